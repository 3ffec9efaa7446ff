// Copyright 2026 the vecpath Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The path data model: atoms and the owned path that sequences them.

use core::ops::Index;
use core::str::FromStr;

use alloc::string::String;
use alloc::vec::Vec;

use arrayvec::ArrayVec;

use crate::{
    bare_bbox, distance_to_path, emit, normalize, parse, rect_vs_path, tokenize, total_bbox,
    transformed_bbox, ArcLowering, Matrix, PathDataWriter, PathSink, Point, Rect, RectHit, Style,
    SyntaxError, Token, Vec2,
};

#[cfg(not(feature = "std"))]
use crate::common::FloatFuncs;

/// One drawing command of a [`Path`], in absolute coordinates.
///
/// A valid path has `MoveTo` at the beginning of each subpath. The two shape
/// atoms describe a whole closed figure and are never produced by the parser.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[expect(clippy::exhaustive_enums, reason = "the set of drawing atoms is closed")]
pub enum PathAtom {
    /// Start a new subpath at the given point.
    MoveTo(Point),
    /// A straight line to the given point.
    LineTo(Point),
    /// An SVG endpoint arc.
    ArcTo {
        /// The ellipse radii.
        radii: Vec2,
        /// The rotation of the ellipse x axis, in degrees.
        angle_deg: f64,
        /// Pick the arc spanning more than 180°.
        large_arc: bool,
        /// Pick the arc drawn in the positive-angle direction.
        sweep: bool,
        /// The end point.
        to: Point,
    },
    /// A quadratic Bézier with one control point, then the end point.
    QuadBezierTo(Point, Point),
    /// A cubic Bézier with two control points, then the end point.
    CubicBezierTo(Point, Point, Point),
    /// Close the subpath with a line back to its start, which is stored.
    ClosePath(Point),
    /// A whole axis-aligned ellipse.
    Ellipse {
        /// The center.
        center: Point,
        /// The radii.
        radii: Vec2,
    },
    /// A whole axis-aligned rectangle.
    Rect(Rect),
}

impl PathAtom {
    /// The point at which this atom leaves the pen.
    ///
    /// For the shape atoms this is the point their outline starts and ends
    /// at.
    pub fn end_point(&self) -> Point {
        match *self {
            Self::MoveTo(p)
            | Self::LineTo(p)
            | Self::QuadBezierTo(_, p)
            | Self::CubicBezierTo(_, _, p)
            | Self::ClosePath(p)
            | Self::ArcTo { to: p, .. } => p,
            Self::Ellipse { center, radii } => Point::new(center.x + radii.x.abs(), center.y),
            Self::Rect(r) => Point::new(r.x0, r.y0),
        }
    }

    /// Is this one of the whole-shape atoms?
    #[inline]
    pub fn is_shape(&self) -> bool {
        matches!(self, Self::Ellipse { .. } | Self::Rect(_))
    }

    /// The outline of a shape atom as ordinary atoms.
    ///
    /// A rectangle becomes a move, three lines and a close; an ellipse
    /// becomes a move to its rightmost point, four quarter arcs and a close.
    /// Returns `None` for atoms that are not shapes.
    pub fn shape_outline(&self) -> Option<ArrayVec<Self, 6>> {
        let mut out = ArrayVec::new();
        match *self {
            Self::Rect(r) => {
                let [c0, c1, c2, c3] = r.corners();
                out.push(Self::MoveTo(c0));
                out.push(Self::LineTo(c1));
                out.push(Self::LineTo(c2));
                out.push(Self::LineTo(c3));
                out.push(Self::ClosePath(c0));
            }
            Self::Ellipse { center, radii } => {
                let radii = Vec2::new(radii.x.abs(), radii.y.abs());
                let start = Point::new(center.x + radii.x, center.y);
                out.push(Self::MoveTo(start));
                for to in [
                    Point::new(center.x, center.y + radii.y),
                    Point::new(center.x - radii.x, center.y),
                    Point::new(center.x, center.y - radii.y),
                    start,
                ] {
                    out.push(Self::ArcTo {
                        radii,
                        angle_deg: 0.0,
                        large_arc: false,
                        sweep: true,
                        to,
                    });
                }
                out.push(Self::ClosePath(start));
            }
            _ => return None,
        }
        Some(out)
    }
}

/// An owned sequence of [`PathAtom`]s, possibly with multiple subpaths.
#[derive(Clone, Default, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Path(Vec<PathAtom>);

impl Path {
    /// Create a new, empty path.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty path with room for `capacity` atoms.
    pub fn with_capacity(capacity: usize) -> Self {
        Self(Vec::with_capacity(capacity))
    }

    /// Create a path from a vector of atoms.
    pub fn from_vec(v: Vec<PathAtom>) -> Self {
        Self(v)
    }

    /// Parse path data such as `"M0 0 L10 0 Z"`.
    pub fn from_svg(data: &str) -> Result<Self, SyntaxError> {
        let tokens = tokenize(data)?;
        parse(&tokens)
    }

    /// Push a generic atom onto the path.
    pub fn push(&mut self, atom: PathAtom) {
        self.0.push(atom);
    }

    /// Push a "move to" atom onto the path.
    pub fn move_to<P: Into<Point>>(&mut self, p: P) {
        self.push(PathAtom::MoveTo(p.into()));
    }

    /// Push a "line to" atom onto the path.
    pub fn line_to<P: Into<Point>>(&mut self, p: P) {
        self.push(PathAtom::LineTo(p.into()));
    }

    /// Push an SVG endpoint arc onto the path.
    pub fn arc_to<V: Into<Vec2>, P: Into<Point>>(
        &mut self,
        radii: V,
        angle_deg: f64,
        large_arc: bool,
        sweep: bool,
        to: P,
    ) {
        self.push(PathAtom::ArcTo {
            radii: radii.into(),
            angle_deg,
            large_arc,
            sweep,
            to: to.into(),
        });
    }

    /// Push a "quad to" atom onto the path.
    pub fn quad_to<P: Into<Point>>(&mut self, p1: P, p2: P) {
        self.push(PathAtom::QuadBezierTo(p1.into(), p2.into()));
    }

    /// Push a "curve to" atom onto the path.
    pub fn curve_to<P: Into<Point>>(&mut self, p1: P, p2: P, p3: P) {
        self.push(PathAtom::CubicBezierTo(p1.into(), p2.into(), p3.into()));
    }

    /// Push a "close path" atom, closing to the start of the current subpath.
    pub fn close_path(&mut self) {
        let start = self.subpath_start();
        self.push(PathAtom::ClosePath(start));
    }

    /// Push a whole ellipse.
    pub fn ellipse<P: Into<Point>, V: Into<Vec2>>(&mut self, center: P, radii: V) {
        self.push(PathAtom::Ellipse {
            center: center.into(),
            radii: radii.into(),
        });
    }

    /// Push a whole rectangle.
    pub fn rect(&mut self, rect: Rect) {
        self.push(PathAtom::Rect(rect));
    }

    /// The atoms of the path.
    pub fn atoms(&self) -> &[PathAtom] {
        &self.0
    }

    /// The number of atoms.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Is this path empty?
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The pen position after the last atom, if any.
    pub fn current_point(&self) -> Option<Point> {
        self.0.last().map(PathAtom::end_point)
    }

    /// The start of the subpath in progress, or the origin if there is none.
    fn subpath_start(&self) -> Point {
        self.0
            .iter()
            .rev()
            .find_map(|atom| match atom {
                PathAtom::MoveTo(p) => Some(*p),
                _ => None,
            })
            .unwrap_or(Point::ZERO)
    }

    /// Replace every shape atom with its outline in ordinary atoms.
    ///
    /// After this, [`normalize`](Self::normalize) represents the whole path.
    pub fn decompose_shapes(&mut self) {
        if !self.0.iter().any(PathAtom::is_shape) {
            return;
        }
        let mut atoms = Vec::with_capacity(self.0.len() + 8);
        for atom in &self.0 {
            match atom.shape_outline() {
                Some(outline) => atoms.extend(outline),
                None => atoms.push(*atom),
            }
        }
        self.0 = atoms;
    }

    /// Transform every point of the path.
    ///
    /// Arcs and shapes do not survive a general affine map, so they are
    /// lowered to cubic Béziers first; quadratics come out as cubics.
    pub fn apply_matrix(&mut self, matrix: Matrix) {
        let mut out = Self::with_capacity(self.0.len());
        emit(self.atoms(), &mut ArcLowering::with_matrix(&mut out, matrix));
        *self = out;
    }

    /// Write the path as path data.
    ///
    /// Shapes are written as their outlines and quadratics as cubics.
    pub fn to_svg(&self) -> String {
        let mut writer = PathDataWriter::new();
        emit(self.atoms(), &mut writer);
        writer.finish()
    }

    /// The canonical absolute token form of the path; see [`normalize`].
    pub fn normalize(&self) -> Vec<Token> {
        normalize(self.atoms())
    }

    /// Drive `sink` with the path; see [`emit`].
    pub fn emit<S: PathSink + ?Sized>(&self, sink: &mut S) {
        emit(self.atoms(), sink);
    }

    /// The untransformed geometry bounding box; see [`bare_bbox`].
    pub fn bare_bbox(&self) -> Rect {
        bare_bbox(self.atoms())
    }

    /// The box damaged by drawing the path with `style`, in device space.
    ///
    /// The style's own matrix applies first, then `matrix`.
    pub fn bounding_box(&self, style: &Style, matrix: Matrix) -> Rect {
        let bare = self.bare_bbox();
        let total = total_bbox(self.atoms(), bare, style);
        transformed_bbox(total, matrix * style.matrix_or_identity())
    }

    /// Distance from a device-space point to the drawn path; see
    /// [`distance_to_path`].
    pub fn distance_to(&self, style: &Style, matrix: Matrix, point: Point) -> f64 {
        distance_to_path(self.atoms(), style, matrix, point)
    }

    /// Classify a device-space rectangle against the drawn path; see
    /// [`rect_vs_path`].
    pub fn rect_hit(&self, style: &Style, matrix: Matrix, rect: Rect) -> RectHit {
        rect_vs_path(self.atoms(), style, matrix, rect)
    }
}

impl FromStr for Path {
    type Err = SyntaxError;

    fn from_str(s: &str) -> Result<Self, SyntaxError> {
        Self::from_svg(s)
    }
}

impl FromIterator<PathAtom> for Path {
    fn from_iter<T: IntoIterator<Item = PathAtom>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<PathAtom> for Path {
    fn extend<I: IntoIterator<Item = PathAtom>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a PathAtom;
    type IntoIter = core::slice::Iter<'a, PathAtom>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for Path {
    type Item = PathAtom;
    type IntoIter = alloc::vec::IntoIter<PathAtom>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl Index<usize> for Path {
    type Output = PathAtom;

    fn index(&self, index: usize) -> &PathAtom {
        &self.0[index]
    }
}

impl PathSink for Path {
    fn move_to(&mut self, p: Point) {
        Self::move_to(self, p);
    }

    fn line_to(&mut self, p: Point) {
        Self::line_to(self, p);
    }

    fn curve_to(&mut self, p1: Point, p2: Point, p3: Point) {
        Self::curve_to(self, p1, p2, p3);
    }

    fn arc_to(&mut self, radii: Vec2, angle_deg: f64, large_arc: bool, sweep: bool, to: Point) {
        Self::arc_to(self, radii, angle_deg, large_arc, sweep, to);
    }

    fn close(&mut self) {
        self.close_path();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn close_path_records_start() {
        let mut path = Path::new();
        path.move_to((1.0, 2.0));
        path.line_to((5.0, 2.0));
        path.close_path();
        path.move_to((10.0, 10.0));
        path.line_to((20.0, 10.0));
        path.close_path();
        assert_eq!(path[2], PathAtom::ClosePath(Point::new(1.0, 2.0)));
        assert_eq!(path[5], PathAtom::ClosePath(Point::new(10.0, 10.0)));
        assert_eq!(path.current_point(), Some(Point::new(10.0, 10.0)));
        assert_eq!(Path::new().current_point(), None);
    }

    #[test]
    fn decompose_rect_and_ellipse() {
        let mut path = Path::new();
        path.rect(Rect::new(0.0, 0.0, 4.0, 3.0));
        path.ellipse((10.0, 10.0), (5.0, 2.0));
        path.decompose_shapes();
        assert_eq!(path.len(), 11);
        assert_eq!(path[0], PathAtom::MoveTo(Point::new(0.0, 0.0)));
        assert_eq!(path[2], PathAtom::LineTo(Point::new(4.0, 3.0)));
        assert_eq!(path[4], PathAtom::ClosePath(Point::new(0.0, 0.0)));
        assert_eq!(path[5], PathAtom::MoveTo(Point::new(15.0, 10.0)));
        assert!(matches!(
            path[6],
            PathAtom::ArcTo { to, sweep: true, .. } if to == Point::new(10.0, 12.0)
        ));
        assert_eq!(path[10], PathAtom::ClosePath(Point::new(15.0, 10.0)));
        assert!(!path.atoms().iter().any(PathAtom::is_shape));
    }

    #[test]
    fn apply_matrix_lowers_arcs() {
        let mut path = Path::new();
        path.move_to((0.0, 0.0));
        path.arc_to((10.0, 10.0), 0.0, false, true, (20.0, 0.0));
        path.quad_to((25.0, 5.0), (30.0, 0.0));
        path.close_path();
        path.apply_matrix(Matrix::translate((100.0, 0.0)));
        assert_eq!(path[0], PathAtom::MoveTo(Point::new(100.0, 0.0)));
        // A half turn is two quarter cubics.
        assert!(matches!(path[1], PathAtom::CubicBezierTo(..)));
        assert!(matches!(path[2], PathAtom::CubicBezierTo(..)));
        assert!(path[2].end_point().distance(Point::new(120.0, 0.0)) < 1e-9);
        assert!(matches!(path[3], PathAtom::CubicBezierTo(..)));
        assert_eq!(path[4], PathAtom::ClosePath(Point::new(100.0, 0.0)));
    }

    #[test]
    fn clones_are_deep() {
        let mut a: Path = "M0 0 L1 1".parse().unwrap();
        let b = a.clone();
        a.line_to((2.0, 2.0));
        assert_eq!(b.len(), 2);
        assert_eq!(a.len(), 3);
    }
}
