// Copyright 2026 the vecpath Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cubic Bézier segments and quadratic promotion.

use arrayvec::ArrayVec;

use crate::{Point, Vec2};

/// Promote a quadratic Bézier to a cubic.
///
/// Returns the two cubic control points; the endpoints are unchanged. Every
/// consumer of quadratic segments goes through this function so that
/// painted, flattened and bounded geometry agree exactly.
#[inline]
pub fn quad_to_cubic(p0: Point, q: Point, p2: Point) -> (Point, Point) {
    (p0 + (2.0 / 3.0) * (q - p0), q + (1.0 / 3.0) * (p2 - q))
}

/// A single cubic Bézier segment.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CubicBez {
    /// The start point.
    pub p0: Point,
    /// The first control point.
    pub p1: Point,
    /// The second control point.
    pub p2: Point,
    /// The end point.
    pub p3: Point,
}

impl CubicBez {
    /// Create a new cubic Bézier segment.
    #[inline]
    pub fn new<P: Into<Point>>(p0: P, p1: P, p2: P, p3: P) -> Self {
        Self {
            p0: p0.into(),
            p1: p1.into(),
            p2: p2.into(),
            p3: p3.into(),
        }
    }

    /// The cubic equivalent of a quadratic segment.
    #[inline]
    pub fn from_quad(p0: Point, q: Point, p2: Point) -> Self {
        let (p1, c2) = quad_to_cubic(p0, q, p2);
        Self::new(p0, p1, c2, p2)
    }

    /// Evaluate the curve at parameter `t`.
    #[inline]
    pub fn eval(&self, t: f64) -> Point {
        let mt = 1.0 - t;
        let v = self.p0.to_vec2() * (mt * mt * mt)
            + (self.p1.to_vec2() * (mt * mt * 3.0)
                + (self.p2.to_vec2() * (mt * 3.0) + self.p3.to_vec2() * t) * t)
                * t;
        v.to_point()
    }

    /// Subdivide into halves, using de Casteljau.
    pub fn subdivide(&self) -> (Self, Self) {
        let pm = self.eval(0.5);
        let p01 = self.p0.midpoint(self.p1);
        let p12 = self.p1.midpoint(self.p2);
        let p23 = self.p2.midpoint(self.p3);
        let p012 = p01.midpoint(p12);
        let p123 = p12.midpoint(p23);
        (
            Self::new(self.p0, p01, p012, pm),
            Self::new(pm, p123, p23, self.p3),
        )
    }

    /// The control points of both halves after one de Casteljau split.
    ///
    /// Their bounding box encloses the curve and is tighter than the box of
    /// the original control points.
    pub fn control_lattice(&self) -> ArrayVec<Point, 7> {
        let (a, b) = self.subdivide();
        [a.p0, a.p1, a.p2, a.p3, b.p1, b.p2, b.p3].into()
    }

    /// The direction of travel leaving `p0`.
    ///
    /// Taken from the nearest control point distinct from `p0`, or `None`
    /// when the whole segment is a single point.
    pub fn start_tangent(&self) -> Option<Vec2> {
        [self.p1, self.p2, self.p3]
            .into_iter()
            .map(|p| p - self.p0)
            .find(|d| d.hypot2() > 0.0)
    }

    /// The direction of travel arriving at `p3`.
    pub fn end_tangent(&self) -> Option<Vec2> {
        [self.p2, self.p1, self.p0]
            .into_iter()
            .map(|p| self.p3 - p)
            .find(|d| d.hypot2() > 0.0)
    }

    /// Append `n` uniformly spaced samples, excluding the start point.
    pub(crate) fn flatten_into(&self, n: usize, out: &mut impl Extend<Point>) {
        let n = n.max(1);
        let step = 1.0 / n as f64;
        out.extend((1..n).map(|i| self.eval(i as f64 * step)));
        out.extend(core::iter::once(self.p3));
    }
}
