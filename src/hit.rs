// Copyright 2026 the vecpath Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Point and rectangle queries against drawn paths.
//!
//! Both queries work in device space: the path is flattened through the
//! style's matrix followed by the caller's matrix, and the stroke width is
//! scaled by the mean scale of that transform.

use alloc::vec::Vec;

use crate::common::THIN_STROKE_WIDTH;
use crate::outline::stroke_pieces;
use crate::polygon::{band_vs_rect, disc_vs_rect, polygon_vs_rect, segment_distance, Crossings};
use crate::{flatten, Cap, Matrix, PathAtom, Point, Polyline, Rect, Stroke, Style};

/// How a rectangle relates to a drawn path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[expect(clippy::exhaustive_enums, reason = "inside, outside and overlapping cover every case")]
pub enum RectHit {
    /// Everything drawn lies within the rectangle.
    Inside,
    /// Nothing drawn touches the rectangle.
    Outside,
    /// The rectangle and the drawing partly overlap.
    Overlapping,
}

impl RectHit {
    /// Merge the classifications of two parts of one drawing.
    #[inline]
    #[must_use]
    pub fn combine(self, other: Self) -> Self {
        if self == other {
            self
        } else {
            Self::Overlapping
        }
    }
}

/// The stroke width in device space.
fn device_half_width(stroke: &Stroke, matrix: Matrix) -> f64 {
    stroke.half_width() * matrix.mean_scale()
}

/// Distance from a device-space point to what drawing the path would paint.
///
/// Zero means a hit. Strokes up to [`THIN_STROKE_WIDTH`] wide are measured
/// as the flattened centerline minus half the width; wider strokes are
/// tested against their caps, joins and segment bodies. A filled path is
/// hit anywhere inside it by its fill rule, and when it is not stroked the
/// distance is to its outline including the implicit closing edges. A path
/// that is neither stroked nor filled is measured to its centerline. An
/// empty path is infinitely far away.
///
/// [`THIN_STROKE_WIDTH`]: crate::THIN_STROKE_WIDTH
pub fn distance_to_path(atoms: &[PathAtom], style: &Style, matrix: Matrix, point: Point) -> f64 {
    let matrix = matrix * style.matrix_or_identity();
    let lines = flatten(atoms, matrix);
    let mut best = f64::INFINITY;
    let mut crossings = Crossings::default();
    for line in &lines {
        if style.fill.is_some() {
            for (a, b) in line.fill_segments() {
                crossings.add_edge(point, a, b);
            }
        }
        let d = match (&style.stroke, style.fill) {
            (Some(stroke), _) => stroke_distance(line, stroke, matrix, point),
            (None, Some(_)) => edge_distance(line.fill_segments(), point),
            (None, None) => edge_distance(line.segments(), point),
        };
        if d == 0.0 {
            return 0.0;
        }
        best = best.min(d);
    }
    if style.fill.is_some_and(|rule| crossings.is_inside(rule)) {
        return 0.0;
    }
    best
}

fn edge_distance(edges: impl Iterator<Item = (Point, Point)>, point: Point) -> f64 {
    edges
        .map(|(a, b)| segment_distance(point, a, b))
        .fold(f64::INFINITY, f64::min)
}

fn stroke_distance(line: &Polyline, stroke: &Stroke, matrix: Matrix, point: Point) -> f64 {
    let half_width = device_half_width(stroke, matrix);
    if 2.0 * half_width <= THIN_STROKE_WIDTH {
        if line.points.len() == 1 {
            if stroke.cap == Cap::Butt {
                return f64::INFINITY;
            }
            return (point.distance(line.points[0]) - half_width).max(0.0);
        }
        return (edge_distance(line.segments(), point) - half_width).max(0.0);
    }
    let mut best = f64::INFINITY;
    for piece in stroke_pieces(line, stroke, half_width) {
        let d = piece.distance(point);
        if d == 0.0 {
            return 0.0;
        }
        best = best.min(d);
    }
    best
}

/// Classify a device-space rectangle against what drawing the path would
/// paint.
///
/// Each subpath is classified from its stroke (the widened centerline, or
/// the cap, join and segment pieces of a wide stroke) and, when filled, its
/// fill polygon. The first subpath sets the answer and any later
/// disagreement makes it [`RectHit::Overlapping`]. A rectangle entirely
/// within a filled region is overlapping, not outside. An empty path, or an
/// empty rectangle, is [`RectHit::Outside`].
pub fn rect_vs_path(atoms: &[PathAtom], style: &Style, matrix: Matrix, rect: Rect) -> RectHit {
    if rect.is_empty() {
        return RectHit::Outside;
    }
    let matrix = matrix * style.matrix_or_identity();
    let mut result: Option<RectHit> = None;
    for line in flatten(atoms, matrix) {
        let Some(hit) = subpath_vs_rect(&line, style, matrix, rect) else {
            continue;
        };
        let merged = result.map_or(hit, |prev| prev.combine(hit));
        if merged == RectHit::Overlapping {
            return merged;
        }
        result = Some(merged);
    }
    result.unwrap_or(RectHit::Outside)
}

/// `None` when the subpath paints nothing.
fn subpath_vs_rect(line: &Polyline, style: &Style, matrix: Matrix, rect: Rect) -> Option<RectHit> {
    let mut parts: Vec<RectHit> = Vec::new();
    match &style.stroke {
        Some(stroke) => {
            let half_width = device_half_width(stroke, matrix);
            if 2.0 * half_width <= THIN_STROKE_WIDTH {
                if line.points.len() == 1 {
                    if stroke.cap != Cap::Butt {
                        parts.push(disc_vs_rect(line.points[0], half_width, rect));
                    }
                } else {
                    parts.extend(
                        line.segments()
                            .map(|(a, b)| band_vs_rect(a, b, half_width, rect)),
                    );
                }
            } else {
                parts.extend(
                    stroke_pieces(line, stroke, half_width)
                        .iter()
                        .map(|piece| piece.classify(rect)),
                );
            }
        }
        None if style.fill.is_none() => {
            parts.extend(line.segments().map(|(a, b)| band_vs_rect(a, b, 0.0, rect)));
        }
        None => {}
    }
    if let Some(rule) = style.fill {
        match line.points[..] {
            [a, b] => parts.push(band_vs_rect(a, b, 0.0, rect)),
            [_, _, _, ..] => parts.push(polygon_vs_rect(&line.points, rule, rect)),
            // A single point encloses nothing.
            _ => {}
        }
    }
    parts.into_iter().reduce(RectHit::combine)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FillRule, Join, Path, Stroke};

    fn path(s: &str) -> Path {
        s.parse().unwrap()
    }

    const SQUARE: &str = "M0,0 L10,0 L10,10 L0,10 Z";
    // Its center is covered twice.
    const PENTAGRAM: &str = "M50,0 L79,90 L2,35 L98,35 L21,90 Z";

    #[test]
    fn filled_square() {
        let p = path(SQUARE);
        let style = Style::filled(FillRule::NonZero);
        assert_eq!(p.distance_to(&style, Matrix::IDENTITY, Point::new(5.0, 5.0)), 0.0);
        let d = p.distance_to(&style, Matrix::IDENTITY, Point::new(110.0, 5.0));
        assert!((d - 100.0).abs() < 1e-9);
    }

    #[test]
    fn unclosed_fill_uses_closing_edge() {
        let p = path("M0,0 L10,0 L10,10 L0,10");
        let style = Style::filled(FillRule::EvenOdd);
        assert_eq!(p.distance_to(&style, Matrix::IDENTITY, Point::new(5.0, 5.0)), 0.0);
        let d = p.distance_to(&style, Matrix::IDENTITY, Point::new(-3.0, 5.0));
        assert!((d - 3.0).abs() < 1e-9);
    }

    #[test]
    fn fill_rules_differ() {
        let p = path(PENTAGRAM);
        let center = Point::new(50.0, 50.0);
        let nonzero = Style::filled(FillRule::NonZero);
        let evenodd = Style::filled(FillRule::EvenOdd);
        assert_eq!(p.distance_to(&nonzero, Matrix::IDENTITY, center), 0.0);
        assert!(p.distance_to(&evenodd, Matrix::IDENTITY, center) > 0.0);
        // A point in one of the points of the star is filled either way.
        let tip = Point::new(50.0, 10.0);
        assert_eq!(p.distance_to(&evenodd, Matrix::IDENTITY, tip), 0.0);

        let middle = Rect::new(48.0, 48.0, 52.0, 52.0);
        assert_eq!(p.rect_hit(&nonzero, Matrix::IDENTITY, middle), RectHit::Overlapping);
        assert_eq!(p.rect_hit(&evenodd, Matrix::IDENTITY, middle), RectHit::Outside);
    }

    #[test]
    fn thin_and_thick_strokes() {
        let p = path("M0 0 L100 0");
        let thin = Style::stroked(Stroke::new(2.0));
        let d = p.distance_to(&thin, Matrix::IDENTITY, Point::new(50.0, 4.0));
        assert!((d - 3.0).abs() < 1e-9);
        assert_eq!(p.distance_to(&thin, Matrix::IDENTITY, Point::new(50.0, 0.5)), 0.0);

        let thick = Style::stroked(Stroke::new(10.0).with_cap(Cap::Square));
        assert_eq!(p.distance_to(&thick, Matrix::IDENTITY, Point::new(-4.0, 4.0)), 0.0);
        let d = p.distance_to(&thick, Matrix::IDENTITY, Point::new(50.0, 8.0));
        assert!((d - 3.0).abs() < 1e-9);

        // Scaling the drawing scales the stroke.
        let d = p.distance_to(&thin, Matrix::scale(4.0), Point::new(200.0, 10.0));
        assert!((d - 6.0).abs() < 1e-9);
    }

    #[test]
    fn wide_curve_strokes_stay_in_bounds() {
        let style = Style::stroked(Stroke::new(10.0).with_miter_limit(10.0));

        // The curve doubles back sharply around its middle sample.
        let p = path("M0 0 Q100 0 0 5");
        let bounds = p.bounding_box(&style, Matrix::IDENTITY);
        let beyond = Point::new(62.0, 1.0);
        assert!(!bounds.contains(beyond));
        assert!(p.distance_to(&style, Matrix::IDENTITY, beyond) > 0.0);

        for data in [
            "M0 0 Q100 0 0 5",
            "M0 0 C100 0 100 10 0 10",
            "M0 0 Q60 30 0 60 Z",
            "M10 10 A40 20 30 1 1 60 40",
            "M0 0 C50 0 50 50 0 50 L-20 0",
        ] {
            let p = path(data);
            for width in [10.0, 20.0] {
                let wide = Style::stroked(Stroke::new(width).with_miter_limit(10.0));
                let bounds = p.bounding_box(&wide, Matrix::IDENTITY);
                let search = bounds.inflate(5.0);
                let mut hits = 0;
                let mut y = search.y0;
                while y <= search.y1 {
                    let mut x = search.x0;
                    while x <= search.x1 {
                        let pt = Point::new(x, y);
                        if p.distance_to(&wide, Matrix::IDENTITY, pt) == 0.0 {
                            assert!(bounds.contains(pt), "{data}: {pt:?} outside {bounds:?}");
                            hits += 1;
                        }
                        x += 1.0;
                    }
                    y += 1.0;
                }
                assert!(hits > 0, "{data}");
            }
        }
    }

    #[test]
    fn stroked_and_filled_square() {
        let p = path(SQUARE);
        let style =
            Style::filled(FillRule::NonZero).with_stroke(Stroke::new(2.0).with_join(Join::Miter));
        assert_eq!(p.distance_to(&style, Matrix::IDENTITY, Point::new(5.0, 5.0)), 0.0);
        assert_eq!(p.distance_to(&style, Matrix::IDENTITY, Point::new(10.5, 5.0)), 0.0);
        let d = p.distance_to(&style, Matrix::IDENTITY, Point::new(14.0, 5.0));
        assert!((d - 3.0).abs() < 1e-9);
    }

    #[test]
    fn style_matrix_applies_first() {
        let p = path("M0 0 L10 0");
        let style = Style::stroked(Stroke::new(1.0)).with_matrix(Matrix::translate((0.0, 10.0)));
        let d = p.distance_to(&style, Matrix::scale(2.0), Point::new(10.0, 20.0));
        assert_eq!(d, 0.0);
    }

    #[test]
    fn empty_path() {
        let style = Style::filled(FillRule::NonZero).with_stroke(Stroke::new(3.0));
        assert_eq!(
            distance_to_path(&[], &style, Matrix::IDENTITY, Point::ZERO),
            f64::INFINITY
        );
        assert_eq!(
            rect_vs_path(&[], &style, Matrix::IDENTITY, Rect::new(0.0, 0.0, 1.0, 1.0)),
            RectHit::Outside
        );
    }

    #[test]
    fn rect_classification() {
        let p = path(SQUARE);
        let stroked = Style::stroked(Stroke::new(2.0));
        let hit = |style: &Style, r: Rect| p.rect_hit(style, Matrix::IDENTITY, r);
        assert_eq!(hit(&stroked, Rect::new(-5.0, -5.0, 15.0, 15.0)), RectHit::Inside);
        assert_eq!(hit(&stroked, Rect::new(20.0, 20.0, 30.0, 30.0)), RectHit::Outside);
        assert_eq!(hit(&stroked, Rect::new(5.0, -5.0, 15.0, 15.0)), RectHit::Overlapping);
        // Inside the outline but away from the stroke.
        assert_eq!(hit(&stroked, Rect::new(4.0, 4.0, 6.0, 6.0)), RectHit::Outside);
        let filled = stroked.clone().with_fill(FillRule::NonZero);
        assert_eq!(hit(&filled, Rect::new(4.0, 4.0, 6.0, 6.0)), RectHit::Overlapping);

        let thick = Style::stroked(Stroke::new(8.0).with_cap(Cap::Round));
        assert_eq!(hit(&thick, Rect::new(-5.0, -5.0, 15.0, 15.0)), RectHit::Inside);
        assert_eq!(hit(&thick, Rect::new(-3.0, -3.0, 13.0, 13.0)), RectHit::Overlapping);
    }

    #[test]
    fn subpaths_must_agree() {
        let p = path("M0 0 L1 0 M100 100 L101 100");
        let style = Style::stroked(Stroke::new(1.0));
        let r = Rect::new(-1.0, -1.0, 2.0, 2.0);
        assert_eq!(p.rect_hit(&style, Matrix::IDENTITY, r), RectHit::Overlapping);
        let far = Rect::new(50.0, 50.0, 60.0, 60.0);
        assert_eq!(p.rect_hit(&style, Matrix::IDENTITY, far), RectHit::Outside);
    }
}
