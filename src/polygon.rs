// Copyright 2026 the vecpath Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Flat geometry helpers shared by the hit-testing code.

use crate::{FillRule, Point, Rect, RectHit};

/// Distance from `p` to the segment `a`–`b`.
pub(crate) fn segment_distance(p: Point, a: Point, b: Point) -> f64 {
    let ab = b - a;
    let len2 = ab.hypot2();
    if len2 == 0.0 {
        return p.distance(a);
    }
    let t = crate::common::clamp((p - a).dot(ab) / len2, 0.0, 1.0);
    p.distance(a + t * ab)
}

/// Counts of outline crossings along the ray from a point towards +x.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Crossings {
    /// Signed sum of crossings, +1 for edges running towards +y.
    pub(crate) winding: i32,
    /// Number of crossings.
    pub(crate) count: u32,
}

impl Crossings {
    /// Account for the edge `a`–`b` as seen from `p`.
    ///
    /// Each edge is half-open in y, so a ray through a shared vertex counts
    /// it once.
    pub(crate) fn add_edge(&mut self, p: Point, a: Point, b: Point) {
        if (a.y > p.y) == (b.y > p.y) {
            return;
        }
        let x = a.x + (p.y - a.y) * (b.x - a.x) / (b.y - a.y);
        if x > p.x {
            self.count += 1;
            self.winding += if b.y > a.y { 1 } else { -1 };
        }
    }

    pub(crate) fn is_inside(self, rule: FillRule) -> bool {
        rule.is_inside(self.winding, self.count)
    }
}

/// Is `p` inside the polygon formed by `edges` under `rule`?
pub(crate) fn edges_contain(
    edges: impl Iterator<Item = (Point, Point)>,
    p: Point,
    rule: FillRule,
) -> bool {
    let mut crossings = Crossings::default();
    for (a, b) in edges {
        crossings.add_edge(p, a, b);
    }
    crossings.is_inside(rule)
}

/// Does the segment `a`–`b` touch the closed rectangle?
///
/// Liang–Barsky clipping of the segment parameter range against each slab.
pub(crate) fn segment_intersects_rect(a: Point, b: Point, rect: Rect) -> bool {
    let d = b - a;
    let mut t0 = 0.0_f64;
    let mut t1 = 1.0_f64;
    for (p, q) in [
        (-d.x, a.x - rect.x0),
        (d.x, rect.x1 - a.x),
        (-d.y, a.y - rect.y0),
        (d.y, rect.y1 - a.y),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return false;
            }
        } else {
            let r = q / p;
            if p < 0.0 {
                if r > t1 {
                    return false;
                }
                t0 = t0.max(r);
            } else {
                if r < t0 {
                    return false;
                }
                t1 = t1.min(r);
            }
        }
    }
    t0 <= t1
}

/// Distance between the segment `a`–`b` and the closed rectangle.
pub(crate) fn segment_rect_distance(a: Point, b: Point, rect: Rect) -> f64 {
    if segment_intersects_rect(a, b, rect) {
        return 0.0;
    }
    rect.corners()
        .into_iter()
        .map(|c| segment_distance(c, a, b))
        .fold(rect.distance_to(a).min(rect.distance_to(b)), f64::min)
}

/// Does `rect` contain the disc of `radius` around `p`?
pub(crate) fn rect_contains_disc(rect: Rect, p: Point, radius: f64) -> bool {
    p.x - radius >= rect.x0
        && p.x + radius <= rect.x1
        && p.y - radius >= rect.y0
        && p.y + radius <= rect.y1
}

/// Classify the segment `a`–`b` widened by `half_width` against `rect`.
pub(crate) fn band_vs_rect(a: Point, b: Point, half_width: f64, rect: Rect) -> RectHit {
    if rect_contains_disc(rect, a, half_width) && rect_contains_disc(rect, b, half_width) {
        RectHit::Inside
    } else if segment_rect_distance(a, b, rect) <= half_width {
        RectHit::Overlapping
    } else {
        RectHit::Outside
    }
}

/// Classify the disc of `radius` around `center` against `rect`.
pub(crate) fn disc_vs_rect(center: Point, radius: f64, rect: Rect) -> RectHit {
    if rect_contains_disc(rect, center, radius) {
        RectHit::Inside
    } else if rect.distance_to(center) <= radius {
        RectHit::Overlapping
    } else {
        RectHit::Outside
    }
}

/// Classify a closed polygon against `rect`.
///
/// A rectangle lying entirely within the polygon counts as overlapping.
pub(crate) fn polygon_vs_rect(points: &[Point], rule: FillRule, rect: Rect) -> RectHit {
    if points.iter().all(|&p| rect.contains(p)) {
        return RectHit::Inside;
    }
    let edges = || {
        points
            .iter()
            .zip(points.iter().cycle().skip(1))
            .map(|(&a, &b)| (a, b))
    };
    if edges().any(|(a, b)| segment_intersects_rect(a, b, rect)) {
        return RectHit::Overlapping;
    }
    if edges_contain(edges(), rect.center(), rule) {
        RectHit::Overlapping
    } else {
        RectHit::Outside
    }
}
