// Copyright 2026 the vecpath Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Wide stroke geometry as a union of simple convex pieces.
//!
//! Rather than computing a true stroke outline, every segment becomes a
//! quadrilateral, every join and cap its own small polygon or disc. Point
//! and rectangle queries then test the pieces one by one.

use alloc::vec::Vec;

use arrayvec::ArrayVec;

use crate::common::COINCIDENT_EPSILON;
use crate::polygon::{disc_vs_rect, edges_contain, polygon_vs_rect, segment_distance};
use crate::{Cap, FillRule, Join, Point, Polyline, Rect, RectHit, Stroke, Vec2};

#[cfg(not(feature = "std"))]
use crate::common::FloatFuncs;

/// One convex part of a stroke.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Piece {
    /// A convex polygon of three or four vertices.
    Polygon(ArrayVec<Point, 4>),
    /// A disc, from round caps and joins.
    Disc { center: Point, radius: f64 },
}

impl Piece {
    fn polygon(points: impl IntoIterator<Item = Point>) -> Self {
        Self::Polygon(points.into_iter().collect())
    }

    fn edges(points: &[Point]) -> impl Iterator<Item = (Point, Point)> + '_ {
        points
            .iter()
            .zip(points.iter().cycle().skip(1))
            .map(|(&a, &b)| (a, b))
    }

    /// Is `p` inside (or on the boundary of) the piece?
    pub(crate) fn contains(&self, p: Point) -> bool {
        match self {
            Self::Polygon(points) => {
                points.iter().any(|&v| v == p)
                    || Self::edges(points).any(|(a, b)| segment_distance(p, a, b) == 0.0)
                    || edges_contain(Self::edges(points), p, FillRule::NonZero)
            }
            Self::Disc { center, radius } => p.distance(*center) <= *radius,
        }
    }

    /// Distance from `p` to the piece, zero inside.
    pub(crate) fn distance(&self, p: Point) -> f64 {
        if self.contains(p) {
            return 0.0;
        }
        match self {
            Self::Polygon(points) => Self::edges(points)
                .map(|(a, b)| segment_distance(p, a, b))
                .fold(f64::INFINITY, f64::min),
            Self::Disc { center, radius } => (p.distance(*center) - radius).max(0.0),
        }
    }

    pub(crate) fn classify(&self, rect: Rect) -> RectHit {
        match self {
            Self::Polygon(points) => polygon_vs_rect(points, FillRule::NonZero, rect),
            Self::Disc { center, radius } => disc_vs_rect(*center, *radius, rect),
        }
    }
}

/// Break the stroke of one polyline into pieces.
///
/// `half_width` is in the same space as the polyline's points. Vertices
/// without a corner flag count as corners.
pub(crate) fn stroke_pieces(line: &Polyline, stroke: &Stroke, half_width: f64) -> Vec<Piece> {
    let mut pts: Vec<Point> = Vec::with_capacity(line.points.len());
    let mut corners: Vec<bool> = Vec::with_capacity(line.points.len());
    for (i, &p) in line.points.iter().enumerate() {
        let corner = line.corners.get(i).copied().unwrap_or(true);
        match pts.last() {
            Some(last) if last.distance(p) <= COINCIDENT_EPSILON => {
                if let Some(c) = corners.last_mut() {
                    *c |= corner;
                }
            }
            _ => {
                pts.push(p);
                corners.push(corner);
            }
        }
    }
    if line.closed && pts.len() > 1 && pts[0].distance(pts[pts.len() - 1]) <= COINCIDENT_EPSILON {
        pts.pop();
        if let Some(last) = corners.pop() {
            corners[0] |= last;
        }
    }

    let mut pieces = Vec::new();
    if pts.len() < 2 {
        if let Some(&p) = pts.first() {
            dot_pieces(p, stroke.cap, half_width, &mut pieces);
        }
        return pieces;
    }

    let closed = line.closed && pts.len() > 2;
    let n = pts.len();
    let seg_count = if closed { n } else { n - 1 };
    let dir = |i: usize| (pts[(i + 1) % n] - pts[i]).try_normalize().unwrap_or(Vec2::ZERO);

    for i in 0..seg_count {
        let a = pts[i];
        let b = pts[(i + 1) % n];
        let offset = dir(i).turn_90() * half_width;
        pieces.push(Piece::polygon([a + offset, b + offset, b - offset, a - offset]));
    }

    // Joins at interior vertices, and at every vertex of a closed polyline.
    // Samples along a curve get round joins.
    let joins = if closed { 0..n } else { 1..n - 1 };
    for i in joins {
        if !corners[i] {
            pieces.push(Piece::Disc {
                center: pts[i],
                radius: half_width,
            });
            continue;
        }
        let incoming = dir((i + n - 1) % n);
        let outgoing = dir(i);
        join_piece(pts[i], incoming, outgoing, stroke, half_width, &mut pieces);
    }

    if !closed {
        cap_piece(pts[0], -dir(0), stroke.cap, half_width, &mut pieces);
        cap_piece(pts[n - 1], dir(n - 2), stroke.cap, half_width, &mut pieces);
    }
    pieces
}

fn dot_pieces(p: Point, cap: Cap, half_width: f64, pieces: &mut Vec<Piece>) {
    match cap {
        Cap::Butt => {}
        Cap::Round => pieces.push(Piece::Disc {
            center: p,
            radius: half_width,
        }),
        Cap::Square => {
            let h = half_width;
            pieces.push(Piece::polygon([
                Point::new(p.x - h, p.y - h),
                Point::new(p.x + h, p.y - h),
                Point::new(p.x + h, p.y + h),
                Point::new(p.x - h, p.y + h),
            ]));
        }
    }
}

/// A cap at `p`, where `out` points away from the stroke.
fn cap_piece(p: Point, out: Vec2, cap: Cap, half_width: f64, pieces: &mut Vec<Piece>) {
    match cap {
        Cap::Butt => {}
        Cap::Round => pieces.push(Piece::Disc {
            center: p,
            radius: half_width,
        }),
        Cap::Square => {
            let side = out.turn_90() * half_width;
            let ext = out * half_width;
            pieces.push(Piece::polygon([
                p + side,
                p + side + ext,
                p - side + ext,
                p - side,
            ]));
        }
    }
}

fn join_piece(
    p: Point,
    incoming: Vec2,
    outgoing: Vec2,
    stroke: &Stroke,
    half_width: f64,
    pieces: &mut Vec<Piece>,
) {
    if stroke.join == Join::Round {
        pieces.push(Piece::Disc {
            center: p,
            radius: half_width,
        });
        return;
    }
    let turn = incoming.cross(outgoing);
    if turn == 0.0 {
        // Straight on, or a full reversal covered by the segment quads.
        return;
    }
    // The outer side of the turn.
    let side = if turn > 0.0 { -half_width } else { half_width };
    let o1 = p + incoming.turn_90() * side;
    let o2 = p + outgoing.turn_90() * side;
    if stroke.join == Join::Miter {
        // sin of half the angle between the segments.
        let half_sin = (0.5 * (1.0 + incoming.dot(outgoing))).max(0.0).sqrt();
        if half_sin > 0.0 && 1.0 / half_sin <= stroke.miter_limit {
            if let Some(bisector) = ((o1 - p) + (o2 - p)).try_normalize() {
                let tip = p + bisector * (half_width / half_sin);
                pieces.push(Piece::polygon([p, o1, tip, o2]));
                return;
            }
        }
    }
    pieces.push(Piece::polygon([p, o1, o2]));
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;

    fn open(points: &[(f64, f64)]) -> Polyline {
        Polyline {
            points: points.iter().map(|&p| p.into()).collect(),
            closed: false,
            corners: vec![true; points.len()],
        }
    }

    fn min_distance(pieces: &[Piece], p: Point) -> f64 {
        pieces
            .iter()
            .map(|piece| piece.distance(p))
            .fold(f64::INFINITY, f64::min)
    }

    #[test]
    fn caps() {
        let line = open(&[(0.0, 0.0), (10.0, 0.0)]);
        let butt = stroke_pieces(&line, &Stroke::new(10.0), 5.0);
        assert_eq!(butt.len(), 1);
        assert!((min_distance(&butt, Point::new(-3.0, 0.0)) - 3.0).abs() < 1e-9);

        let square = stroke_pieces(&line, &Stroke::new(10.0).with_cap(Cap::Square), 5.0);
        assert_eq!(min_distance(&square, Point::new(-3.0, 4.0)), 0.0);
        assert!((min_distance(&square, Point::new(-7.0, 0.0)) - 2.0).abs() < 1e-9);

        let round = stroke_pieces(&line, &Stroke::new(10.0).with_cap(Cap::Round), 5.0);
        assert_eq!(min_distance(&round, Point::new(-3.0, 0.0)), 0.0);
        assert!(min_distance(&round, Point::new(-4.0, 4.0)) > 0.0);
    }

    #[test]
    fn joins() {
        let line = open(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)]);
        // The outer corner of a right-angle turn.
        let corner = Point::new(14.0, -4.0);
        let miter = stroke_pieces(&line, &Stroke::new(10.0), 5.0);
        assert_eq!(min_distance(&miter, corner), 0.0);
        let bevel = stroke_pieces(&line, &Stroke::new(10.0).with_join(Join::Bevel), 5.0);
        assert!(min_distance(&bevel, corner) > 0.0);
        let round = stroke_pieces(&line, &Stroke::new(10.0).with_join(Join::Round), 5.0);
        assert!(min_distance(&round, corner) > 0.0);
        assert_eq!(min_distance(&round, Point::new(13.0, -3.0)), 0.0);
        // Beyond the limit a miter falls back to a bevel.
        let limited = stroke_pieces(&line, &Stroke::new(10.0).with_miter_limit(1.2), 5.0);
        assert!(min_distance(&limited, corner) > 0.0);
    }

    #[test]
    fn closed_has_no_caps() {
        let square = Polyline {
            points: vec![
                Point::new(0.0, 0.0),
                Point::new(10.0, 0.0),
                Point::new(10.0, 10.0),
                Point::new(0.0, 10.0),
            ],
            closed: true,
            corners: vec![true; 4],
        };
        let pieces = stroke_pieces(&square, &Stroke::new(6.0).with_cap(Cap::Round), 3.0);
        // Four quads and four miters.
        assert_eq!(pieces.len(), 8);
        assert_eq!(min_distance(&pieces, Point::new(-2.5, -2.5)), 0.0);
        assert!(min_distance(&pieces, Point::new(5.0, 5.0)) > 0.0);
    }

    #[test]
    fn curve_samples_get_round_joins() {
        // A sharp turn between two samples of one curve.
        let mut line = open(&[(0.0, 0.0), (10.0, 0.0), (0.0, 3.0)]);
        let tip = Point::new(20.0, -1.0);
        let stroke = Stroke::new(10.0).with_miter_limit(10.0);
        assert_eq!(min_distance(&stroke_pieces(&line, &stroke, 5.0), tip), 0.0);

        line.corners[1] = false;
        let pieces = stroke_pieces(&line, &stroke, 5.0);
        assert!(min_distance(&pieces, tip) > 0.0);
        assert_eq!(min_distance(&pieces, Point::new(14.0, 0.5)), 0.0);

        // Missing flags count as corners.
        line.corners.clear();
        assert_eq!(min_distance(&stroke_pieces(&line, &stroke, 5.0), tip), 0.0);
    }

    #[test]
    fn dots() {
        let dot = open(&[(5.0, 5.0), (5.0, 5.0)]);
        assert!(stroke_pieces(&dot, &Stroke::new(6.0), 3.0).is_empty());
        let round = stroke_pieces(&dot, &Stroke::new(6.0).with_cap(Cap::Round), 3.0);
        assert_eq!(min_distance(&round, Point::new(5.0, 7.0)), 0.0);
    }
}
