// Copyright 2026 the vecpath Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Canonical token output and the traversal that drives output sinks.

use core::fmt::Write;

use alloc::string::String;
use alloc::vec::Vec;

use crate::{arc_params, quad_to_cubic, ArcOutcome, Matrix, PathAtom, Point, Token, Vec2};

/// The canonical absolute token form of a path.
///
/// Every atom becomes one of `M L A Q C Z` with absolute coordinates, and
/// arc flags become [`Token::Flag`]. Shape atoms are skipped; call
/// [`Path::decompose_shapes`] first to include them.
///
/// Parsing the result gives back the same atoms:
///
/// ```
/// use vecpath::{normalize, parse, tokenize};
///
/// let path = parse(&tokenize("m10 10 h5 v5 z").unwrap()).unwrap();
/// let again = parse(&normalize(path.atoms())).unwrap();
/// assert_eq!(path, again);
/// ```
///
/// [`Path::decompose_shapes`]: crate::Path::decompose_shapes
pub fn normalize(atoms: &[PathAtom]) -> Vec<Token> {
    fn point(out: &mut Vec<Token>, p: Point) {
        out.push(Token::Number(p.x));
        out.push(Token::Number(p.y));
    }

    let mut out = Vec::with_capacity(atoms.len() * 3);
    for atom in atoms {
        match *atom {
            PathAtom::MoveTo(p) => {
                out.push(Token::Command('M'));
                point(&mut out, p);
            }
            PathAtom::LineTo(p) => {
                out.push(Token::Command('L'));
                point(&mut out, p);
            }
            PathAtom::ArcTo {
                radii,
                angle_deg,
                large_arc,
                sweep,
                to,
            } => {
                out.extend([
                    Token::Command('A'),
                    Token::Number(radii.x),
                    Token::Number(radii.y),
                    Token::Number(angle_deg),
                    Token::Flag(large_arc),
                    Token::Flag(sweep),
                ]);
                point(&mut out, to);
            }
            PathAtom::QuadBezierTo(q, p) => {
                out.push(Token::Command('Q'));
                point(&mut out, q);
                point(&mut out, p);
            }
            PathAtom::CubicBezierTo(p1, p2, p3) => {
                out.push(Token::Command('C'));
                point(&mut out, p1);
                point(&mut out, p2);
                point(&mut out, p3);
            }
            PathAtom::ClosePath(_) => out.push(Token::Command('Z')),
            PathAtom::Ellipse { .. } | PathAtom::Rect(_) => {}
        }
    }
    out
}

/// A consumer of path geometry, such as a painter or an exporter.
///
/// Sinks see absolute coordinates and never see quadratics or shapes:
/// [`emit`] promotes the former and decomposes the latter.
pub trait PathSink {
    /// Start a new subpath.
    fn move_to(&mut self, p: Point);
    /// A straight line from the current point.
    fn line_to(&mut self, p: Point);
    /// A cubic Bézier from the current point.
    fn curve_to(&mut self, p1: Point, p2: Point, p3: Point);
    /// An SVG endpoint arc from the current point.
    fn arc_to(&mut self, radii: Vec2, angle_deg: f64, large_arc: bool, sweep: bool, to: Point);
    /// Close the current subpath.
    fn close(&mut self);
}

impl<S: PathSink + ?Sized> PathSink for &mut S {
    #[inline]
    fn move_to(&mut self, p: Point) {
        (**self).move_to(p);
    }

    #[inline]
    fn line_to(&mut self, p: Point) {
        (**self).line_to(p);
    }

    #[inline]
    fn curve_to(&mut self, p1: Point, p2: Point, p3: Point) {
        (**self).curve_to(p1, p2, p3);
    }

    #[inline]
    fn arc_to(&mut self, radii: Vec2, angle_deg: f64, large_arc: bool, sweep: bool, to: Point) {
        (**self).arc_to(radii, angle_deg, large_arc, sweep, to);
    }

    #[inline]
    fn close(&mut self) {
        (**self).close();
    }
}

/// Drive `sink` with every atom of a path, in order.
///
/// Quadratics are promoted to cubics with [`quad_to_cubic`], and shapes are
/// replaced by their outlines as in [`Path::decompose_shapes`].
///
/// [`Path::decompose_shapes`]: crate::Path::decompose_shapes
pub fn emit<S: PathSink + ?Sized>(atoms: &[PathAtom], sink: &mut S) {
    let mut current = Point::ZERO;
    for atom in atoms {
        match atom.shape_outline() {
            Some(outline) => {
                for part in &outline {
                    emit_atom(part, &mut current, sink);
                }
            }
            None => emit_atom(atom, &mut current, sink),
        }
    }
}

fn emit_atom<S: PathSink + ?Sized>(atom: &PathAtom, current: &mut Point, sink: &mut S) {
    match *atom {
        PathAtom::MoveTo(p) => sink.move_to(p),
        PathAtom::LineTo(p) => sink.line_to(p),
        PathAtom::ArcTo {
            radii,
            angle_deg,
            large_arc,
            sweep,
            to,
        } => sink.arc_to(radii, angle_deg, large_arc, sweep, to),
        PathAtom::QuadBezierTo(q, p) => {
            let (p1, p2) = quad_to_cubic(*current, q, p);
            sink.curve_to(p1, p2, p);
        }
        PathAtom::CubicBezierTo(p1, p2, p3) => sink.curve_to(p1, p2, p3),
        PathAtom::ClosePath(_) => sink.close(),
        // Decomposed by the caller.
        PathAtom::Ellipse { .. } | PathAtom::Rect(_) => return,
    }
    *current = atom.end_point();
}

/// A sink adapter for back ends without arcs.
///
/// Arcs are replaced by lines or cubic Béziers, and every point is mapped
/// through a matrix on the way to the inner sink.
#[derive(Clone, Debug)]
pub struct ArcLowering<S> {
    sink: S,
    matrix: Matrix,
    // Both in the untransformed space.
    current: Point,
    start: Point,
}

impl<S: PathSink> ArcLowering<S> {
    /// Lower arcs without transforming.
    pub fn new(sink: S) -> Self {
        ArcLowering::with_matrix(sink, Matrix::IDENTITY)
    }

    /// Lower arcs, then map every point through `matrix`.
    pub fn with_matrix(sink: S, matrix: Matrix) -> Self {
        ArcLowering {
            sink,
            matrix,
            current: Point::ZERO,
            start: Point::ZERO,
        }
    }

    /// Recover the inner sink.
    pub fn into_inner(self) -> S {
        self.sink
    }
}

impl<S: PathSink> PathSink for ArcLowering<S> {
    fn move_to(&mut self, p: Point) {
        self.sink.move_to(self.matrix * p);
        self.current = p;
        self.start = p;
    }

    fn line_to(&mut self, p: Point) {
        self.sink.line_to(self.matrix * p);
        self.current = p;
    }

    fn curve_to(&mut self, p1: Point, p2: Point, p3: Point) {
        let m = self.matrix;
        self.sink.curve_to(m * p1, m * p2, m * p3);
        self.current = p3;
    }

    fn arc_to(&mut self, radii: Vec2, angle_deg: f64, large_arc: bool, sweep: bool, to: Point) {
        let from = self.current;
        let outcome = arc_params(
            from.x, from.y, to.x, to.y, radii.x, radii.y, angle_deg, large_arc, sweep,
        );
        match outcome {
            ArcOutcome::Skip => {}
            ArcOutcome::Line => self.sink.line_to(self.matrix * to),
            ArcOutcome::Ok(arc) => {
                let m = self.matrix;
                let segments = arc.cubic_segments();
                let last = segments.len() - 1;
                for (i, (p1, p2, p3)) in segments.enumerate() {
                    let p3 = if i == last { to } else { p3 };
                    self.sink.curve_to(m * p1, m * p2, m * p3);
                }
            }
        }
        self.current = to;
    }

    fn close(&mut self) {
        self.sink.close();
        self.current = self.start;
    }
}

/// A sink that writes path data.
///
/// Numbers are formatted as by [`Token`]'s `Display`, so parsing the
/// output gives back the emitted geometry.
#[derive(Clone, Debug, Default)]
pub struct PathDataWriter {
    out: String,
}

impl PathDataWriter {
    /// Create a writer with an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// The path data written so far.
    pub fn as_str(&self) -> &str {
        &self.out
    }

    /// Take the written path data.
    pub fn finish(self) -> String {
        self.out
    }

    fn command(&mut self, cmd: char, operands: &[Token]) {
        if !self.out.is_empty() {
            self.out.push(' ');
        }
        self.out.push(cmd);
        for (i, token) in operands.iter().enumerate() {
            if i > 0 {
                self.out.push(' ');
            }
            // Writing into a `String` cannot fail.
            let _ = write!(self.out, "{token}");
        }
    }
}

impl PathSink for PathDataWriter {
    fn move_to(&mut self, p: Point) {
        self.command('M', &[Token::Number(p.x), Token::Number(p.y)]);
    }

    fn line_to(&mut self, p: Point) {
        self.command('L', &[Token::Number(p.x), Token::Number(p.y)]);
    }

    fn curve_to(&mut self, p1: Point, p2: Point, p3: Point) {
        self.command(
            'C',
            &[
                Token::Number(p1.x),
                Token::Number(p1.y),
                Token::Number(p2.x),
                Token::Number(p2.y),
                Token::Number(p3.x),
                Token::Number(p3.y),
            ],
        );
    }

    fn arc_to(&mut self, radii: Vec2, angle_deg: f64, large_arc: bool, sweep: bool, to: Point) {
        self.command(
            'A',
            &[
                Token::Number(radii.x),
                Token::Number(radii.y),
                Token::Number(angle_deg),
                Token::Flag(large_arc),
                Token::Flag(sweep),
                Token::Number(to.x),
                Token::Number(to.y),
            ],
        );
    }

    fn close(&mut self) {
        self.command('Z', &[]);
    }
}
