// Copyright 2026 the vecpath Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bounding boxes: bare geometry, stroke-extended, and transformed.

use core::f64::consts::FRAC_PI_2;

use arrayvec::ArrayVec;

use crate::{
    arc_params, ArcOutcome, ArcParams, CubicBez, Join, Matrix, PathAtom, Point, Rect, Style,
    Vec2,
};

#[cfg(not(feature = "std"))]
use crate::common::FloatFuncs;

/// Joins this close to straight contribute no miter beyond the padding.
const STRAIGHT_JOIN_SIN: f64 = 1e-12;

/// The bounding box of the path geometry, ignoring stroke and transform.
///
/// This is an overestimate: curves contribute the control points of their
/// de Casteljau halves, and arcs the rotated box of their extrema. An empty
/// path yields [`Rect::EMPTY`].
pub fn bare_bbox(atoms: &[PathAtom]) -> Rect {
    let mut bbox = Rect::EMPTY;
    let mut current = Point::ZERO;
    for atom in atoms {
        match *atom {
            PathAtom::MoveTo(p) | PathAtom::LineTo(p) => bbox = bbox.union_pt(p),
            PathAtom::ArcTo {
                radii,
                angle_deg,
                large_arc,
                sweep,
                to,
            } => {
                match arc_params(
                    current.x, current.y, to.x, to.y, radii.x, radii.y, angle_deg, large_arc,
                    sweep,
                ) {
                    ArcOutcome::Skip => {}
                    ArcOutcome::Line => bbox = bbox.union_pt(to),
                    ArcOutcome::Ok(arc) => bbox = bbox.union(arc_bbox(&arc)),
                }
            }
            PathAtom::QuadBezierTo(q, p) => {
                bbox = union_lattice(bbox, CubicBez::from_quad(current, q, p));
            }
            PathAtom::CubicBezierTo(p1, p2, p3) => {
                bbox = union_lattice(bbox, CubicBez::new(current, p1, p2, p3));
            }
            PathAtom::ClosePath(_) => {}
            PathAtom::Ellipse { center, radii } => {
                let r = Vec2::new(radii.x.abs(), radii.y.abs());
                bbox = bbox.union(Rect::from_points(center - r, center + r));
            }
            PathAtom::Rect(r) => bbox = bbox.union(Rect::from_points((r.x0, r.y0), (r.x1, r.y1))),
        }
        current = atom.end_point();
    }
    bbox
}

fn union_lattice(bbox: Rect, c: CubicBez) -> Rect {
    c.control_lattice()
        .into_iter()
        .fold(bbox, |acc, p| acc.union_pt(p))
}

/// Box of an arc: extrema in the ellipse frame, then rotated into place.
fn arc_bbox(arc: &ArcParams) -> Rect {
    let theta2 = arc.theta2();
    let lo = arc.theta1.min(theta2);
    let hi = arc.theta1.max(theta2);
    let mut angles: ArrayVec<f64, 6> = ArrayVec::new();
    angles.push(arc.theta1);
    angles.push(theta2);
    // A sweep under a full turn contains at most four axis crossings.
    let mut k = (lo / FRAC_PI_2).ceil();
    for _ in 0..4 {
        let a = k * FRAC_PI_2;
        if a > hi {
            break;
        }
        angles.push(a);
        k += 1.0;
    }
    let local = angles.iter().fold(Rect::EMPTY, |acc, &a| {
        let (s, c) = a.sin_cos();
        acc.union_pt(Point::new(arc.radii.x * c, arc.radii.y * s))
    });
    let place = Matrix::translate(arc.center.to_vec2()) * Matrix::rotate(arc.phi);
    place.transform_rect_bbox(local)
}

/// Extend a bare bounding box by what drawing with `style` can touch.
///
/// A stroked path is padded by the larger of one unit and the stroke width.
/// For wide mitered strokes the tip of every join that stays within the
/// miter limit is added, since a sharp miter can reach far past the
/// padding. Finally a one unit margin (two with antialiasing) covers
/// rasterization. The style's matrix is not applied here; see
/// [`transformed_bbox`].
pub fn total_bbox(atoms: &[PathAtom], bare: Rect, style: &Style) -> Rect {
    if bare.is_empty() {
        return bare;
    }
    let mut bbox = bare;
    if let Some(stroke) = &style.stroke {
        bbox = bbox.inflate(stroke.width.max(1.0));
        if stroke.join == Join::Miter && stroke.width > 1.0 {
            let min_sin = miter_threshold(stroke.miter_limit);
            for_each_join(atoms, &mut |p, incoming, outgoing| {
                if let Some(tip) = miter_tip(p, incoming, outgoing, stroke.width, min_sin) {
                    bbox = bbox.union_pt(tip);
                }
            });
        }
    }
    bbox.inflate(if style.antialias { 2.0 } else { 1.0 })
}

/// The map of a box through `matrix`: the box of its four mapped corners.
#[inline]
pub fn transformed_bbox(rect: Rect, matrix: Matrix) -> Rect {
    matrix.transform_rect_bbox(rect)
}

/// The smallest sine of the join angle for which a miter is drawn.
fn miter_threshold(limit: f64) -> f64 {
    if limit > 8.0 {
        2.0 / limit
    } else {
        (2.0 * (1.0 / limit).asin()).sin()
    }
}

/// The miter tip at `p`, if the join is mitered.
///
/// `incoming` and `outgoing` are directions of travel into and out of the
/// join. With `n1` the incoming direction and `n2` the reversed outgoing
/// one, the tip lies at `p + w / (2 sin θ) · (n1 + n2)`, where `θ` is the
/// angle between the two segments.
fn miter_tip(p: Point, incoming: Vec2, outgoing: Vec2, width: f64, min_sin: f64) -> Option<Point> {
    let n1 = incoming.try_normalize()?;
    let n2 = -outgoing.try_normalize()?;
    let cos_theta = n1.dot(n2);
    let sin_theta = n1.cross(n2).abs();
    let mitered = if cos_theta < 0.0 {
        sin_theta > STRAIGHT_JOIN_SIN
    } else {
        sin_theta >= min_sin
    };
    if !mitered {
        return None;
    }
    Some(p + (width / (2.0 * sin_theta)) * (n1 + n2))
}

/// Tangents of a drawing atom leaving `from`, or `None` when it draws
/// nothing measurable.
pub(crate) fn atom_tangents(from: Point, atom: &PathAtom) -> Option<(Vec2, Vec2)> {
    match *atom {
        PathAtom::LineTo(p) => {
            let d = p - from;
            (d.hypot2() > 0.0).then_some((d, d))
        }
        PathAtom::QuadBezierTo(q, p) => {
            let c = CubicBez::from_quad(from, q, p);
            Some((c.start_tangent()?, c.end_tangent()?))
        }
        PathAtom::CubicBezierTo(p1, p2, p3) => {
            let c = CubicBez::new(from, p1, p2, p3);
            Some((c.start_tangent()?, c.end_tangent()?))
        }
        PathAtom::ArcTo {
            radii,
            angle_deg,
            large_arc,
            sweep,
            to,
        } => match arc_params(
            from.x, from.y, to.x, to.y, radii.x, radii.y, angle_deg, large_arc, sweep,
        ) {
            ArcOutcome::Skip => None,
            ArcOutcome::Line => atom_tangents(from, &PathAtom::LineTo(to)),
            ArcOutcome::Ok(arc) => Some((arc.tangent_at(arc.theta1), arc.tangent_at(arc.theta2()))),
        },
        _ => None,
    }
}

/// Visit every join of the path as `(point, incoming, outgoing)`.
///
/// Closing a subpath adds the join at the closing vertex and the join
/// between the closing segment and the first segment. Shape atoms are
/// visited through their outlines.
pub(crate) fn for_each_join(atoms: &[PathAtom], f: &mut impl FnMut(Point, Vec2, Vec2)) {
    let mut walker = JoinWalker::default();
    for atom in atoms {
        match atom.shape_outline() {
            Some(outline) => {
                for atom in &outline {
                    walker.atom(atom, f);
                }
            }
            None => walker.atom(atom, f),
        }
    }
}

#[derive(Default)]
struct JoinWalker {
    current: Point,
    // Leaving direction of the subpath's first segment.
    first_out: Option<Vec2>,
    // Arriving direction of the last segment.
    last_in: Option<Vec2>,
}

impl JoinWalker {
    fn atom(&mut self, atom: &PathAtom, f: &mut impl FnMut(Point, Vec2, Vec2)) {
        match *atom {
            PathAtom::MoveTo(p) => {
                self.current = p;
                self.first_out = None;
                self.last_in = None;
            }
            PathAtom::ClosePath(start) => {
                let closing = start - self.current;
                if closing.hypot2() > 0.0 {
                    self.segment(closing, closing, f);
                }
                if let (Some(incoming), Some(outgoing)) = (self.last_in, self.first_out) {
                    f(start, incoming, outgoing);
                }
                self.current = start;
                self.first_out = None;
                self.last_in = None;
            }
            _ => {
                if let Some((out, inc)) = atom_tangents(self.current, atom) {
                    self.segment(out, inc, f);
                }
                self.current = atom.end_point();
            }
        }
    }

    fn segment(&mut self, out: Vec2, inc: Vec2, f: &mut impl FnMut(Point, Vec2, Vec2)) {
        match self.last_in {
            Some(prev) => f(self.current, prev, out),
            None => {
                if self.first_out.is_none() {
                    self.first_out = Some(out);
                }
            }
        }
        self.last_in = Some(inc);
    }
}
