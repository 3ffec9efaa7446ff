// Copyright 2026 the vecpath Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Token stream to [`Path`] conversion.

use arrayvec::ArrayVec;

use crate::{Path, Point, SyntaxError, SyntaxErrorKind, Token, Vec2};

/// Parse a token stream of path data into an absolute [`Path`].
///
/// Relative commands are resolved against the current point, smooth curve
/// commands get their implicit control point by reflection, and operands
/// beyond a command's arity repeat the command (a repeated move becomes a
/// line). Arc flags may be given as [`Token::Flag`] or as the numbers `0`
/// and `1`.
///
/// On error the position is the index of the offending token, and no
/// partial path is returned.
///
/// # Examples
///
/// ```
/// use vecpath::{parse, tokenize, PathAtom, Point};
///
/// let tokens = tokenize("M0,0 10,10").unwrap();
/// let path = parse(&tokens).unwrap();
/// assert_eq!(path.atoms()[1], PathAtom::LineTo(Point::new(10.0, 10.0)));
/// ```
pub fn parse(tokens: &[Token]) -> Result<Path, SyntaxError> {
    PathParser::new(tokens)
        .run()
        .inspect_err(|err| tracing::debug!(%err, "rejecting path data"))
}

struct PathParser<'a> {
    tokens: &'a [Token],
    pos: usize,
    path: Path,
    current: Point,
    start: Point,
    // Second control point of the previous segment, if it was a cubic.
    last_cubic: Option<Point>,
    // Control point of the previous segment, if it was a quadratic.
    last_quad: Option<Point>,
}

impl<'a> PathParser<'a> {
    fn new(tokens: &'a [Token]) -> Self {
        PathParser {
            tokens,
            pos: 0,
            path: Path::with_capacity(tokens.len() / 3),
            current: Point::ZERO,
            start: Point::ZERO,
            last_cubic: None,
            last_quad: None,
        }
    }

    fn run(mut self) -> Result<Path, SyntaxError> {
        if self.tokens.len() < 3 {
            return Err(SyntaxError::new(SyntaxErrorKind::TooShort, self.tokens.len()));
        }
        if !matches!(self.tokens[0], Token::Command('M' | 'm')) {
            return Err(SyntaxError::new(SyntaxErrorKind::MissingMoveTo, 0));
        }
        while let Some(&token) = self.tokens.get(self.pos) {
            let Token::Command(cmd) = token else {
                return Err(SyntaxError::new(
                    SyntaxErrorKind::UnexpectedOperand,
                    self.pos,
                ));
            };
            self.command(cmd)?;
        }
        Ok(self.path)
    }

    fn command(&mut self, cmd: char) -> Result<(), SyntaxError> {
        let arity = match cmd.to_ascii_uppercase() {
            'Z' => 0,
            'H' | 'V' => 1,
            'M' | 'L' | 'T' => 2,
            'Q' | 'S' => 4,
            'C' => 6,
            'A' => 7,
            _ => {
                return Err(SyntaxError::new(
                    SyntaxErrorKind::UnknownCommand(cmd),
                    self.pos,
                ))
            }
        };
        self.pos += 1;
        if arity == 0 {
            self.path.close_path();
            self.current = self.start;
            self.last_cubic = None;
            self.last_quad = None;
            return Ok(());
        }
        let mut cmd = cmd;
        loop {
            let group_start = self.pos;
            let args = self.operands(cmd, arity)?;
            self.segment(cmd, &args, group_start)?;
            // Extra coordinates after a move are implicit lines.
            cmd = match cmd {
                'M' => 'L',
                'm' => 'l',
                c => c,
            };
            if !self.tokens.get(self.pos).is_some_and(|t| t.is_operand()) {
                return Ok(());
            }
        }
    }

    fn operands(&mut self, cmd: char, arity: usize) -> Result<ArrayVec<f64, 7>, SyntaxError> {
        let mut args = ArrayVec::new();
        while args.len() < arity {
            match self.tokens.get(self.pos).and_then(|t| t.as_number()) {
                Some(v) => {
                    args.push(v);
                    self.pos += 1;
                }
                None => {
                    return Err(SyntaxError::new(SyntaxErrorKind::Truncated(cmd), self.pos));
                }
            }
        }
        Ok(args)
    }

    fn point(&self, relative: bool, x: f64, y: f64) -> Point {
        if relative {
            Point::new(self.current.x + x, self.current.y + y)
        } else {
            Point::new(x, y)
        }
    }

    fn segment(&mut self, cmd: char, a: &[f64], group_start: usize) -> Result<(), SyntaxError> {
        let rel = cmd.is_ascii_lowercase();
        let mut cubic_ctrl = None;
        let mut quad_ctrl = None;
        let end = match cmd.to_ascii_uppercase() {
            'M' => {
                let p = self.point(rel, a[0], a[1]);
                self.path.move_to(p);
                self.start = p;
                p
            }
            'L' => {
                let p = self.point(rel, a[0], a[1]);
                self.path.line_to(p);
                p
            }
            'H' => {
                let x = if rel { self.current.x + a[0] } else { a[0] };
                let p = Point::new(x, self.current.y);
                self.path.line_to(p);
                p
            }
            'V' => {
                let y = if rel { self.current.y + a[0] } else { a[0] };
                let p = Point::new(self.current.x, y);
                self.path.line_to(p);
                p
            }
            'C' => {
                let c1 = self.point(rel, a[0], a[1]);
                let c2 = self.point(rel, a[2], a[3]);
                let p = self.point(rel, a[4], a[5]);
                self.path.curve_to(c1, c2, p);
                cubic_ctrl = Some(c2);
                p
            }
            'S' => {
                let c1 = match self.last_cubic {
                    Some(prev) => prev.reflect_about(self.current),
                    None => self.current,
                };
                let c2 = self.point(rel, a[0], a[1]);
                let p = self.point(rel, a[2], a[3]);
                self.path.curve_to(c1, c2, p);
                cubic_ctrl = Some(c2);
                p
            }
            'Q' => {
                let c = self.point(rel, a[0], a[1]);
                let p = self.point(rel, a[2], a[3]);
                self.path.quad_to(c, p);
                quad_ctrl = Some(c);
                p
            }
            'T' => {
                let c = match self.last_quad {
                    Some(prev) => prev.reflect_about(self.current),
                    None => self.current,
                };
                let p = self.point(rel, a[0], a[1]);
                self.path.quad_to(c, p);
                quad_ctrl = Some(c);
                p
            }
            // 'A', the only remaining command with operands.
            _ => {
                let large_arc = flag(a[3], group_start + 3)?;
                let sweep = flag(a[4], group_start + 4)?;
                let p = self.point(rel, a[5], a[6]);
                self.path
                    .arc_to(Vec2::new(a[0], a[1]), a[2], large_arc, sweep, p);
                p
            }
        };
        self.current = end;
        self.last_cubic = cubic_ctrl;
        self.last_quad = quad_ctrl;
        Ok(())
    }
}

fn flag(value: f64, position: usize) -> Result<bool, SyntaxError> {
    if value == 0.0 {
        Ok(false)
    } else if value == 1.0 {
        Ok(true)
    } else {
        Err(SyntaxError::new(SyntaxErrorKind::InvalidFlag, position))
    }
}

#[cfg(test)]
mod tests {
    use crate::{tokenize, Path, PathAtom, Point, SyntaxErrorKind, Token, Vec2};

    use super::parse;

    fn parse_str(s: &str) -> Path {
        parse(&tokenize(s).unwrap()).unwrap()
    }

    fn parse_err(s: &str) -> (SyntaxErrorKind, usize) {
        let err = parse(&tokenize(s).unwrap()).unwrap_err();
        (err.kind, err.position)
    }

    #[test]
    fn implicit_lineto() {
        let path = parse_str("M0,0 10,10");
        assert_eq!(
            path.atoms(),
            &[
                PathAtom::MoveTo(Point::new(0.0, 0.0)),
                PathAtom::LineTo(Point::new(10.0, 10.0)),
            ]
        );
        let path = parse_str("m1 1 2 2");
        assert_eq!(path[1], PathAtom::LineTo(Point::new(3.0, 3.0)));
    }

    #[test]
    fn smooth_cubic_reflection() {
        let path = parse_str("M0,0 C10,0 10,10 20,10 S30,20 40,20");
        assert_eq!(
            path[2],
            PathAtom::CubicBezierTo(
                Point::new(30.0, 10.0),
                Point::new(30.0, 20.0),
                Point::new(40.0, 20.0)
            )
        );
    }

    #[test]
    fn smooth_without_predecessor() {
        let path = parse_str("M0,0 L5,5 S10,10 20,5");
        assert_eq!(
            path[2],
            PathAtom::CubicBezierTo(
                Point::new(5.0, 5.0),
                Point::new(10.0, 10.0),
                Point::new(20.0, 5.0)
            )
        );
        // A quadratic does not feed S, nor a cubic T.
        let path = parse_str("M0,0 Q5,5 10,0 S15,5 20,0");
        assert!(matches!(path[2], PathAtom::CubicBezierTo(c1, ..) if c1 == Point::new(10.0, 0.0)));
        let path = parse_str("M0,0 C1,1 2,2 3,3 T5,5");
        assert_eq!(
            path[2],
            PathAtom::QuadBezierTo(Point::new(3.0, 3.0), Point::new(5.0, 5.0))
        );
    }

    #[test]
    fn smooth_quad_reflection() {
        let path = parse_str("M0 0 Q10 10 20 0 t20 0 T60 0");
        assert_eq!(
            path[2],
            PathAtom::QuadBezierTo(Point::new(30.0, -10.0), Point::new(40.0, 0.0))
        );
        assert_eq!(
            path[3],
            PathAtom::QuadBezierTo(Point::new(50.0, 10.0), Point::new(60.0, 0.0))
        );
    }

    #[test]
    fn relative_and_axis_commands() {
        let path = parse_str("M10 10 h5 v5 H0 V0 l1 2 c1 1 2 2 3 3");
        assert_eq!(path[1], PathAtom::LineTo(Point::new(15.0, 10.0)));
        assert_eq!(path[2], PathAtom::LineTo(Point::new(15.0, 15.0)));
        assert_eq!(path[3], PathAtom::LineTo(Point::new(0.0, 15.0)));
        assert_eq!(path[4], PathAtom::LineTo(Point::new(0.0, 0.0)));
        assert_eq!(path[5], PathAtom::LineTo(Point::new(1.0, 2.0)));
        assert_eq!(
            path[6],
            PathAtom::CubicBezierTo(
                Point::new(2.0, 3.0),
                Point::new(3.0, 4.0),
                Point::new(4.0, 5.0)
            )
        );
    }

    #[test]
    fn close_resets_current_point() {
        let path = parse_str("M10 10 l5 0 z l0 5 M1 1 L2 2 Z");
        assert_eq!(path[2], PathAtom::ClosePath(Point::new(10.0, 10.0)));
        assert_eq!(path[3], PathAtom::LineTo(Point::new(10.0, 15.0)));
        assert_eq!(path[6], PathAtom::ClosePath(Point::new(1.0, 1.0)));
    }

    #[test]
    fn arc_flags() {
        let path = parse_str("M0 0 a10 10 0 0 1 20 0");
        assert_eq!(
            path[1],
            PathAtom::ArcTo {
                radii: Vec2::new(10.0, 10.0),
                angle_deg: 0.0,
                large_arc: false,
                sweep: true,
                to: Point::new(20.0, 0.0),
            }
        );
        let tokens = [
            Token::Command('M'),
            Token::Number(0.0),
            Token::Number(0.0),
            Token::Command('A'),
            Token::Number(5.0),
            Token::Number(5.0),
            Token::Number(0.0),
            Token::Flag(true),
            Token::Flag(false),
            Token::Number(10.0),
            Token::Number(0.0),
        ];
        let path = parse(&tokens).unwrap();
        assert!(matches!(path[1], PathAtom::ArcTo { large_arc: true, sweep: false, .. }));
        assert_eq!(
            parse_err("M0 0 A5 5 0 2 1 10 0"),
            (SyntaxErrorKind::InvalidFlag, 7)
        );
    }

    #[test]
    fn errors() {
        assert_eq!(parse_err("M0"), (SyntaxErrorKind::TooShort, 2));
        assert_eq!(parse_err("L0 0"), (SyntaxErrorKind::MissingMoveTo, 0));
        assert_eq!(
            parse_err("M0 0 X1 1"),
            (SyntaxErrorKind::UnknownCommand('X'), 3)
        );
        assert_eq!(parse_err("M0 0 L5"), (SyntaxErrorKind::Truncated('L'), 5));
        assert_eq!(
            parse_err("M0 0 L5 5 6"),
            (SyntaxErrorKind::Truncated('L'), 7)
        );
        assert_eq!(
            parse_err("M0 0 L5 5 Z 3"),
            (SyntaxErrorKind::UnexpectedOperand, 7)
        );
    }
}
