// Copyright 2026 the vecpath Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Conversion of paths to device-space polylines.

use alloc::vec;
use alloc::vec::Vec;

use crate::common::{
    ARC_SEGMENT_DEGREES, COINCIDENT_EPSILON, CURVE_SEGMENTS, ELLIPSE_SEGMENTS, MIN_ARC_SEGMENTS,
};
use crate::{arc_params, ArcOutcome, CubicBez, Matrix, PathAtom, Point, Rect, Vec2};

#[cfg(not(feature = "std"))]
use crate::common::FloatFuncs;

/// One flattened subpath.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Polyline {
    /// The vertices. A closed polyline does not repeat its first vertex.
    pub points: Vec<Point>,
    /// Whether the subpath was closed.
    pub closed: bool,
    /// One flag per vertex: whether two drawing commands meet there.
    ///
    /// Vertices sampled from inside a curve, arc or ellipse are not corners,
    /// and stroking gives them round joins whatever the stroke's join style.
    pub corners: Vec<bool>,
}

impl Polyline {
    /// The stroked edges: consecutive vertices, plus the closing edge when
    /// closed.
    pub fn segments(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        let closing = match (self.closed, self.points.first(), self.points.last()) {
            (true, Some(&first), Some(&last)) if self.points.len() > 1 => Some((last, first)),
            _ => None,
        };
        self.points
            .windows(2)
            .map(|w| (w[0], w[1]))
            .chain(closing)
    }

    /// The edges of the filled region, which always include the closing
    /// edge.
    pub fn fill_segments(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        let closing = match (self.points.first(), self.points.last()) {
            (Some(&first), Some(&last)) if self.points.len() > 2 => Some((last, first)),
            _ => None,
        };
        self.points
            .windows(2)
            .map(|w| (w[0], w[1]))
            .chain(closing)
    }

    /// The bounding box of the vertices.
    pub fn bbox(&self) -> Rect {
        self.points
            .iter()
            .fold(Rect::EMPTY, |acc, &p| acc.union_pt(p))
    }
}

/// Flatten a path into one polyline per subpath, in device space.
///
/// Cubics (and promoted quadratics) are sampled at [`CURVE_SEGMENTS`]
/// uniform steps, arcs every [`ARC_SEGMENT_DEGREES`] (at least
/// [`MIN_ARC_SEGMENTS`] chords), and whole ellipses with
/// [`ELLIPSE_SEGMENTS`] chords. Each shape atom is its own closed polyline.
/// Subpaths that never draw anything produce no polyline.
///
/// [`CURVE_SEGMENTS`]: crate::CURVE_SEGMENTS
/// [`ARC_SEGMENT_DEGREES`]: crate::ARC_SEGMENT_DEGREES
/// [`MIN_ARC_SEGMENTS`]: crate::MIN_ARC_SEGMENTS
/// [`ELLIPSE_SEGMENTS`]: crate::ELLIPSE_SEGMENTS
pub fn flatten(atoms: &[PathAtom], matrix: Matrix) -> Vec<Polyline> {
    let mut flattener = Flattener {
        matrix,
        out: Vec::new(),
        points: Vec::new(),
        corners: Vec::new(),
        current: Point::ZERO,
    };
    for atom in atoms {
        flattener.atom(atom);
    }
    flattener.finish(false);
    flattener.out
}

/// The number of chords for an arc sweeping `dtheta` radians.
#[expect(
    clippy::cast_possible_truncation,
    reason = "the chord count is small and non-negative"
)]
pub(crate) fn arc_segment_count(dtheta: f64) -> usize {
    // Exact multiples of the step must not round up.
    let steps = dtheta.abs() / ARC_SEGMENT_DEGREES.to_radians() - 1e-9;
    (steps.ceil() as usize).max(MIN_ARC_SEGMENTS)
}

struct Flattener {
    matrix: Matrix,
    out: Vec<Polyline>,
    // Device-space vertices of the subpath in progress.
    points: Vec<Point>,
    corners: Vec<bool>,
    // User-space pen position.
    current: Point,
}

impl Flattener {
    fn atom(&mut self, atom: &PathAtom) {
        match *atom {
            PathAtom::MoveTo(p) => {
                self.finish(false);
                self.current = p;
            }
            PathAtom::LineTo(p) => self.line(p),
            PathAtom::ArcTo {
                radii,
                angle_deg,
                large_arc,
                sweep,
                to,
            } => {
                let from = self.current;
                match arc_params(
                    from.x, from.y, to.x, to.y, radii.x, radii.y, angle_deg, large_arc, sweep,
                ) {
                    ArcOutcome::Skip => {}
                    ArcOutcome::Line => self.line(to),
                    ArcOutcome::Ok(arc) => {
                        self.begin();
                        let n = arc_segment_count(arc.dtheta);
                        let step = arc.dtheta / n as f64;
                        for i in 1..n {
                            let p = arc.point_at(arc.theta1 + step * i as f64);
                            self.points.push(self.matrix * p);
                            self.corners.push(false);
                        }
                        self.points.push(self.matrix * to);
                        self.corners.push(true);
                        self.current = to;
                    }
                }
            }
            PathAtom::QuadBezierTo(q, p) => {
                self.curve(CubicBez::from_quad(self.current, q, p));
            }
            PathAtom::CubicBezierTo(p1, p2, p3) => {
                self.curve(CubicBez::new(self.current, p1, p2, p3));
            }
            PathAtom::ClosePath(start) => {
                if !self.points.is_empty() {
                    self.finish(true);
                }
                self.current = start;
            }
            PathAtom::Ellipse { center, radii } => {
                self.finish(false);
                let radii = Vec2::new(radii.x.abs(), radii.y.abs());
                let step = 2.0 * core::f64::consts::PI / ELLIPSE_SEGMENTS as f64;
                let points = (0..ELLIPSE_SEGMENTS)
                    .map(|i| {
                        let (s, c) = (step * i as f64).sin_cos();
                        self.matrix * Point::new(center.x + radii.x * c, center.y + radii.y * s)
                    })
                    .collect();
                self.out.push(Polyline {
                    points,
                    closed: true,
                    corners: vec![false; ELLIPSE_SEGMENTS],
                });
                self.current = atom.end_point();
            }
            PathAtom::Rect(r) => {
                self.finish(false);
                let points = r.corners().into_iter().map(|p| self.matrix * p).collect();
                self.out.push(Polyline {
                    points,
                    closed: true,
                    corners: vec![true; 4],
                });
                self.current = atom.end_point();
            }
        }
    }

    /// Seed the subpath in progress with the pen position if it is empty.
    fn begin(&mut self) {
        if self.points.is_empty() {
            self.points.push(self.matrix * self.current);
            self.corners.push(true);
        }
    }

    fn line(&mut self, p: Point) {
        self.begin();
        self.points.push(self.matrix * p);
        self.corners.push(true);
        self.current = p;
    }

    fn curve(&mut self, c: CubicBez) {
        self.begin();
        let start = self.points.len();
        c.flatten_into(CURVE_SEGMENTS, &mut self.points);
        for p in &mut self.points[start..] {
            *p = self.matrix * *p;
        }
        self.corners.resize(self.points.len() - 1, false);
        self.corners.push(true);
        self.current = c.p3;
    }

    fn finish(&mut self, close: bool) {
        if self.points.is_empty() {
            return;
        }
        let mut points = core::mem::take(&mut self.points);
        let mut corners = core::mem::take(&mut self.corners);
        let coincident = points.len() > 1
            && points[0].distance(points[points.len() - 1]) <= COINCIDENT_EPSILON;
        if coincident {
            points.pop();
            corners.pop();
        }
        // Only an explicit close makes the start vertex a corner.
        if let Some(first) = corners.first_mut() {
            *first = close;
        }
        self.out.push(Polyline {
            points,
            closed: close || coincident,
            corners,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Path;

    #[test]
    fn subpaths_and_closure() {
        let path: Path = "M0 0 L10 0 L10 10 Z M20 0 L30 0 M40 0 L50 0 L40 0"
            .parse()
            .unwrap();
        let lines = flatten(path.atoms(), Matrix::IDENTITY);
        assert_eq!(lines.len(), 3);
        assert!(lines[0].closed);
        assert_eq!(lines[0].points.len(), 3);
        assert_eq!(lines[0].segments().count(), 3);
        assert!(!lines[1].closed);
        assert_eq!(lines[1].segments().count(), 1);
        // Ends where it started, so it counts as closed.
        assert!(lines[2].closed);
        assert_eq!(lines[2].points.len(), 2);
    }

    #[test]
    fn sample_counts() {
        let path: Path = "M0 0 C0 10 10 10 10 0 A5 5 0 0 1 20 0".parse().unwrap();
        let lines = flatten(path.atoms(), Matrix::IDENTITY);
        // Start, 18 cubic samples, 18 arc samples for the half turn.
        assert_eq!(lines[0].points.len(), 1 + CURVE_SEGMENTS + 18);

        let mut shapes = Path::new();
        shapes.ellipse((0.0, 0.0), (10.0, 5.0));
        shapes.rect(Rect::new(0.0, 0.0, 1.0, 1.0));
        let lines = flatten(shapes.atoms(), Matrix::IDENTITY);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].points.len(), ELLIPSE_SEGMENTS);
        assert!(lines[0].closed && lines[1].closed);
        assert_eq!(lines[1].points.len(), 4);
    }

    #[test]
    fn matrix_applied() {
        let path: Path = "M1 1 L2 1".parse().unwrap();
        let lines = flatten(path.atoms(), Matrix::scale(10.0));
        assert_eq!(lines[0].points, [Point::new(10.0, 10.0), Point::new(20.0, 10.0)]);
    }

    #[test]
    fn lone_move_is_dropped() {
        let path: Path = "M0 0 M5 5 L6 6".parse().unwrap();
        let lines = flatten(path.atoms(), Matrix::IDENTITY);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].points[0], Point::new(5.0, 5.0));
    }

    #[test]
    fn corner_flags() {
        let path: Path = "M0 0 L10 0 Q20 0 20 10 Z".parse().unwrap();
        let lines = flatten(path.atoms(), Matrix::IDENTITY);
        let corners = &lines[0].corners;
        assert_eq!(corners.len(), lines[0].points.len());
        assert_eq!(corners.len(), 2 + CURVE_SEGMENTS);
        assert!(corners[0] && corners[1]);
        assert!(corners[2..corners.len() - 1].iter().all(|&c| !c));
        assert!(corners[corners.len() - 1]);

        // Returning to the start without a close is not a corner there.
        let path: Path = "M0 0 L10 0 L10 10 L0 0".parse().unwrap();
        let lines = flatten(path.atoms(), Matrix::IDENTITY);
        assert!(lines[0].closed);
        assert_eq!(lines[0].corners, [false, true, true]);

        let mut shapes = Path::new();
        shapes.ellipse((0.0, 0.0), (10.0, 5.0));
        let lines = flatten(shapes.atoms(), Matrix::IDENTITY);
        assert!(lines[0].corners.iter().all(|&c| !c));
    }
}
