// Copyright 2026 the vecpath Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Elliptical arcs: endpoint-to-center conversion, sampling, and cubic
//! approximation.

use core::f64::consts::{FRAC_PI_2, PI};

use crate::{Point, Vec2};

#[cfg(not(feature = "std"))]
use crate::common::FloatFuncs;

/// The result of converting an SVG endpoint arc to center form.
#[derive(Clone, Copy, Debug, PartialEq)]
#[expect(clippy::exhaustive_enums, reason = "callers handle each of the three arc cases")]
pub enum ArcOutcome {
    /// The endpoints coincide; the arc draws nothing.
    Skip,
    /// A radius is zero; the arc is drawn as a straight line to its endpoint.
    Line,
    /// A proper elliptical arc.
    Ok(ArcParams),
}

/// An elliptical arc in center parameterization.
///
/// A point on the arc at parameter `θ` is
/// `center + R(phi) · (radii.x · cos θ, radii.y · sin θ)`, for `θ` running
/// from `theta1` to `theta1 + dtheta`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArcParams {
    /// The center of the ellipse.
    pub center: Point,
    /// The (non-negative) radii, after any out-of-range scaling.
    pub radii: Vec2,
    /// The rotation of the ellipse x axis, in radians.
    pub phi: f64,
    /// The start angle, in radians.
    pub theta1: f64,
    /// The signed sweep, in radians; positive when `sweep` was set.
    pub dtheta: f64,
}

/// Convert an SVG endpoint arc into center form.
///
/// Follows the SVG implementation notes: negative radii are made positive,
/// radii too small to span the endpoints are scaled up uniformly, and the
/// flags pick one of the four candidate arcs. The resulting sweep is
/// non-positive when `sweep` is false, non-negative when it is true, and
/// lies strictly within a full turn in either direction.
#[expect(
    clippy::too_many_arguments,
    reason = "takes the SVG arc command parameters as they appear"
)]
pub fn arc_params(
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
    rx: f64,
    ry: f64,
    phi_deg: f64,
    large_arc: bool,
    sweep: bool,
) -> ArcOutcome {
    if (x1 - x2).abs() < f64::EPSILON && (y1 - y2).abs() < f64::EPSILON {
        tracing::trace!(x1, y1, "arc endpoints coincide, skipping");
        return ArcOutcome::Skip;
    }
    if rx == 0.0 || ry == 0.0 {
        tracing::trace!(rx, ry, "zero arc radius, drawing a line");
        return ArcOutcome::Line;
    }
    let mut rx = rx.abs();
    let mut ry = ry.abs();
    let phi = phi_deg.to_radians();
    let (sin_phi, cos_phi) = phi.sin_cos();

    // Step 1: the midpoint-relative start point in the ellipse frame.
    let hx = 0.5 * (x1 - x2);
    let hy = 0.5 * (y1 - y2);
    let x1p = cos_phi * hx + sin_phi * hy;
    let y1p = -sin_phi * hx + cos_phi * hy;

    let lambda = (x1p * x1p) / (rx * rx) + (y1p * y1p) / (ry * ry);
    if lambda > 1.0 {
        let s = lambda.sqrt();
        rx *= s;
        ry *= s;
    }

    // Step 2: the center in the ellipse frame.
    let rx2 = rx * rx;
    let ry2 = ry * ry;
    let den = rx2 * y1p * y1p + ry2 * x1p * x1p;
    let num = rx2 * ry2 - den;
    let mut coef = if den > 0.0 { (num / den).max(0.0).sqrt() } else { 0.0 };
    if large_arc == sweep {
        coef = -coef;
    }
    let cxp = coef * rx * y1p / ry;
    let cyp = -coef * ry * x1p / rx;

    // Step 3: back to user space.
    let center = Point::new(
        cos_phi * cxp - sin_phi * cyp + 0.5 * (x1 + x2),
        sin_phi * cxp + cos_phi * cyp + 0.5 * (y1 + y2),
    );

    // Step 4: the angles.
    let u = Vec2::new((x1p - cxp) / rx, (y1p - cyp) / ry);
    let v = Vec2::new((-x1p - cxp) / rx, (-y1p - cyp) / ry);
    let theta1 = angle_between(Vec2::new(1.0, 0.0), u);
    let mut dtheta = angle_between(u, v);
    if !sweep && dtheta > 0.0 {
        dtheta -= 2.0 * PI;
    } else if sweep && dtheta < 0.0 {
        dtheta += 2.0 * PI;
    }

    ArcOutcome::Ok(ArcParams {
        center,
        radii: Vec2::new(rx, ry),
        phi,
        theta1,
        dtheta,
    })
}

/// Signed angle from `u` to `v`, in `(-π, π]`.
fn angle_between(u: Vec2, v: Vec2) -> f64 {
    u.cross(v).atan2(u.dot(v))
}

impl ArcParams {
    /// The end angle, `theta1 + dtheta`.
    #[inline]
    pub fn theta2(&self) -> f64 {
        self.theta1 + self.dtheta
    }

    /// Map a vector from the ellipse frame into user space (rotation only).
    #[inline]
    fn rotate(&self, v: Vec2) -> Vec2 {
        let (s, c) = self.phi.sin_cos();
        Vec2::new(c * v.x - s * v.y, s * v.x + c * v.y)
    }

    /// The point at parameter `theta`.
    #[inline]
    pub fn point_at(&self, theta: f64) -> Point {
        let (s, c) = theta.sin_cos();
        self.center + self.rotate(Vec2::new(self.radii.x * c, self.radii.y * s))
    }

    /// The derivative at parameter `theta`, oriented in the direction of
    /// travel (so it flips for negative sweeps).
    #[inline]
    pub fn tangent_at(&self, theta: f64) -> Vec2 {
        let (s, c) = theta.sin_cos();
        let d = self.rotate(Vec2::new(-self.radii.x * s, self.radii.y * c));
        if self.dtheta < 0.0 {
            -d
        } else {
            d
        }
    }

    /// The start point of the arc.
    #[inline]
    pub fn start_point(&self) -> Point {
        self.point_at(self.theta1)
    }

    /// The end point of the arc.
    #[inline]
    pub fn end_point(&self) -> Point {
        self.point_at(self.theta2())
    }

    /// Approximate the arc with cubic Béziers of at most 90° each.
    ///
    /// Each item is `(ctrl1, ctrl2, end)`; the first segment starts at
    /// [`start_point`](Self::start_point). Consecutive segments share
    /// tangent directions, so the result is C¹ continuous.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "the segment count is small and non-negative"
    )]
    pub fn cubic_segments(&self) -> CubicSegments {
        // The epsilon keeps an exact quarter-turn multiple from rounding up.
        let n = ((self.dtheta.abs() / FRAC_PI_2 - 1e-9).ceil() as usize).max(1);
        let step = self.dtheta / n as f64;
        let half = 0.5 * step;
        let quarter_sin = (0.5 * half).sin();
        // 4/3·tan(δ/4) written so that it stays finite as δ → 0.
        let arm = if half.sin() != 0.0 {
            (8.0 / 3.0) * quarter_sin * quarter_sin / half.sin()
        } else {
            0.0
        };
        CubicSegments {
            arc: *self,
            idx: 0,
            n,
            step,
            arm,
        }
    }
}

/// Iterator over the cubic segments of an arc.
///
/// Created by [`ArcParams::cubic_segments`].
#[derive(Clone, Debug)]
pub struct CubicSegments {
    arc: ArcParams,
    idx: usize,
    n: usize,
    step: f64,
    arm: f64,
}

impl CubicSegments {
    /// Derivative with respect to the parameter, not the travel direction.
    fn derivative(&self, theta: f64) -> Vec2 {
        let (s, c) = theta.sin_cos();
        self.arc
            .rotate(Vec2::new(-self.arc.radii.x * s, self.arc.radii.y * c))
    }
}

impl Iterator for CubicSegments {
    type Item = (Point, Point, Point);

    fn next(&mut self) -> Option<Self::Item> {
        if self.idx >= self.n {
            return None;
        }
        let a0 = self.arc.theta1 + self.step * self.idx as f64;
        let a1 = if self.idx + 1 == self.n {
            self.arc.theta2()
        } else {
            a0 + self.step
        };
        let p0 = self.arc.point_at(a0);
        let p3 = self.arc.point_at(a1);
        // `arm` already carries the sign of the sweep through `step`.
        let p1 = p0 + self.arm * self.derivative(a0);
        let p2 = p3 - self.arm * self.derivative(a1);
        self.idx += 1;
        Some((p1, p2, p3))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.n - self.idx;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for CubicSegments {}

#[cfg(test)]
mod tests {
    use super::*;
    use core::f64::consts::PI;

    fn assert_near(p0: Point, p1: Point, eps: f64) {
        assert!(p0.nearly_eq(p1, eps), "{p0:?} != {p1:?}");
    }

    fn unwrap_ok(outcome: ArcOutcome) -> ArcParams {
        match outcome {
            ArcOutcome::Ok(params) => params,
            other => panic!("expected a proper arc, got {other:?}"),
        }
    }

    #[test]
    fn degenerate_outcomes() {
        assert_eq!(
            arc_params(5.0, 5.0, 5.0, 5.0, 10.0, 10.0, 0.0, false, true),
            ArcOutcome::Skip
        );
        assert_eq!(
            arc_params(0.0, 0.0, 5.0, 5.0, 0.0, 10.0, 0.0, false, true),
            ArcOutcome::Line
        );
        assert_eq!(
            arc_params(0.0, 0.0, 5.0, 5.0, 10.0, 0.0, 0.0, false, true),
            ArcOutcome::Line
        );
    }

    #[test]
    fn half_circle() {
        let arc = unwrap_ok(arc_params(0.0, 0.0, 20.0, 0.0, 10.0, 10.0, 0.0, false, true));
        assert_near(arc.center, Point::new(10.0, 0.0), 1e-9);
        assert!((arc.dtheta - PI).abs() < 1e-9);
        assert_near(arc.start_point(), Point::new(0.0, 0.0), 1e-9);
        assert_near(arc.end_point(), Point::new(20.0, 0.0), 1e-9);
        // Increasing angle from the left end passes through -y.
        assert_near(arc.point_at(arc.theta1 + 0.5 * arc.dtheta), Point::new(10.0, -10.0), 1e-9);
    }

    #[test]
    fn sweep_sign() {
        for (large, sweep) in [(false, false), (false, true), (true, false), (true, true)] {
            let arc = unwrap_ok(arc_params(0.0, 0.0, 10.0, 5.0, 8.0, 6.0, 30.0, large, sweep));
            if sweep {
                assert!(arc.dtheta >= 0.0);
            } else {
                assert!(arc.dtheta <= 0.0);
            }
            assert!(arc.dtheta.abs() < 2.0 * PI);
            if large {
                assert!(arc.dtheta.abs() >= PI - 1e-9);
            } else {
                assert!(arc.dtheta.abs() <= PI + 1e-9);
            }
            assert_near(arc.start_point(), Point::new(0.0, 0.0), 1e-9);
            assert_near(arc.end_point(), Point::new(10.0, 5.0), 1e-9);
        }
    }

    #[test]
    fn radii_scaled_up() {
        let arc = unwrap_ok(arc_params(0.0, 0.0, 100.0, 0.0, -1.0, 1.0, 0.0, false, true));
        assert!((arc.radii.x - 50.0).abs() < 1e-9);
        assert!((arc.radii.y - 50.0).abs() < 1e-9);
        assert_near(arc.center, Point::new(50.0, 0.0), 1e-9);
    }

    #[test]
    fn cubic_split() {
        let arc = unwrap_ok(arc_params(10.0, 0.0, 0.0, -10.0, 10.0, 10.0, 0.0, true, true));
        let segs: alloc::vec::Vec<_> = arc.cubic_segments().collect();
        assert_eq!(segs.len(), 3);
        let mut p0 = arc.start_point();
        for &(p1, p2, p3) in &segs {
            // Every cubic point stays close to the circle.
            for t in [0.25, 0.5, 0.75] {
                let mt = 1.0 - t;
                let p = (p0.to_vec2() * (mt * mt * mt)
                    + p1.to_vec2() * (3.0 * mt * mt * t)
                    + p2.to_vec2() * (3.0 * mt * t * t)
                    + p3.to_vec2() * (t * t * t))
                    .to_point();
                assert!((p.distance(arc.center) - 10.0).abs() < 0.01);
            }
            p0 = p3;
        }
        assert_near(p0, Point::new(0.0, -10.0), 1e-9);
        // C1 at the joins.
        let d_out = segs[1].0 - segs[0].2;
        let d_in = segs[0].2 - segs[0].1;
        assert!(d_out.cross(d_in).abs() < 1e-9);
        assert!(d_out.dot(d_in) > 0.0);
    }

    #[test]
    fn tangent_follows_travel() {
        let arc = unwrap_ok(arc_params(0.0, 0.0, 20.0, 0.0, 10.0, 10.0, 0.0, false, false));
        let t = arc.tangent_at(arc.theta1);
        // Decreasing angle from the left end leaves (0,0) towards +y.
        assert!(t.y > 0.0 && t.x.abs() < 1e-9);
    }
}
