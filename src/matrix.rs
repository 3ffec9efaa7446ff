// Copyright 2026 the vecpath Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Affine transform matrices.

use core::ops::{Mul, MulAssign};
use core::str::FromStr;

use alloc::string::ToString;
use alloc::vec::Vec;

use crate::common::SINGULAR_DETERMINANT;
use crate::{MatrixError, Point, Rect, Vec2};

#[cfg(not(feature = "std"))]
use crate::common::FloatFuncs;

/// A 2D affine transform.
///
/// The coefficients `[a, b, c, d, tx, ty]` represent the row-vector matrix
///
/// ```text
/// | a  b  0 |
/// | c  d  0 |
/// | tx ty 1 |
/// ```
///
/// so a point maps to `(a·x + c·y + tx, b·x + d·y + ty)`. With the [`Mul`]
/// operator, `(A * B) * p == A * (B * p)`: the right operand applies first.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Matrix([f64; 6]);

impl Matrix {
    /// The identity transform.
    pub const IDENTITY: Self = Self::scale(1.0);

    /// Construct a matrix from coefficients without checking invertibility.
    #[inline(always)]
    pub const fn new(c: [f64; 6]) -> Self {
        Self(c)
    }

    /// Construct a matrix from coefficients, rejecting (nearly) singular ones.
    ///
    /// A matrix whose determinant magnitude is below `1e-6` would blow up any
    /// later inversion, so it is refused here rather than deep inside a
    /// geometry call.
    pub fn try_new(c: [f64; 6]) -> Result<Self, MatrixError> {
        let m = Self(c);
        let determinant = m.determinant();
        if determinant.is_nan() || determinant.abs() < SINGULAR_DETERMINANT {
            tracing::debug!(determinant, "rejecting singular matrix");
            return Err(MatrixError::Singular { determinant });
        }
        Ok(m)
    }

    /// Uniform scaling.
    #[inline(always)]
    pub const fn scale(s: f64) -> Self {
        Self([s, 0.0, 0.0, s, 0.0, 0.0])
    }

    /// Non-uniform scaling.
    #[inline(always)]
    pub const fn scale_non_uniform(s_x: f64, s_y: f64) -> Self {
        Self([s_x, 0.0, 0.0, s_y, 0.0, 0.0])
    }

    /// Rotation by `th` radians, from +x towards +y.
    #[inline]
    pub fn rotate(th: f64) -> Self {
        let (s, c) = th.sin_cos();
        Self([c, s, -s, c, 0.0, 0.0])
    }

    /// Translation.
    #[inline(always)]
    pub fn translate<V: Into<Vec2>>(p: V) -> Self {
        let p = p.into();
        Self([1.0, 0.0, 0.0, 1.0, p.x, p.y])
    }

    /// Combine `inner` so that it applies *before* `self`.
    ///
    /// This is how nested transform contexts are pushed: the child's matrix
    /// is premultiplied onto the parent's.
    #[inline]
    #[must_use]
    pub fn premultiply(self, inner: Self) -> Self {
        self * inner
    }

    /// `self` followed by `outer`.
    #[inline]
    #[must_use]
    pub fn then(self, outer: Self) -> Self {
        outer * self
    }

    /// Get the coefficients of the transform.
    #[inline(always)]
    pub fn as_coeffs(self) -> [f64; 6] {
        self.0
    }

    /// Compute the determinant of the linear part.
    #[inline]
    pub fn determinant(self) -> f64 {
        self.0[0] * self.0[3] - self.0[1] * self.0[2]
    }

    /// Compute the inverse transform.
    pub fn inverse(self) -> Result<Self, MatrixError> {
        let determinant = self.determinant();
        if determinant.is_nan() || determinant.abs() < SINGULAR_DETERMINANT {
            return Err(MatrixError::Singular { determinant });
        }
        let inv_det = determinant.recip();
        Ok(Self([
            inv_det * self.0[3],
            -inv_det * self.0[1],
            -inv_det * self.0[2],
            inv_det * self.0[0],
            inv_det * (self.0[2] * self.0[5] - self.0[3] * self.0[4]),
            inv_det * (self.0[1] * self.0[4] - self.0[0] * self.0[5]),
        ]))
    }

    /// Is this exactly the identity?
    #[inline]
    pub fn is_identity(self) -> bool {
        self == Self::IDENTITY
    }

    /// The bounding box of a transformed rectangle.
    ///
    /// All four corners are mapped, since the transform need not preserve
    /// axes. The empty rectangle stays empty.
    pub fn transform_rect_bbox(self, rect: Rect) -> Rect {
        if rect.is_empty() {
            return Rect::EMPTY;
        }
        rect.corners()
            .into_iter()
            .fold(Rect::EMPTY, |acc, p| acc.union_pt(self * p))
    }

    /// The length that a unit length maps to, on average over both axes.
    ///
    /// Used to keep tolerances meaningful in device space.
    pub fn mean_scale(self) -> f64 {
        self.determinant().abs().sqrt()
    }
}

impl Default for Matrix {
    #[inline(always)]
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul<Point> for Matrix {
    type Output = Point;

    #[inline]
    fn mul(self, other: Point) -> Point {
        Point::new(
            self.0[0] * other.x + self.0[2] * other.y + self.0[4],
            self.0[1] * other.x + self.0[3] * other.y + self.0[5],
        )
    }
}

impl Mul for Matrix {
    type Output = Self;

    #[inline]
    fn mul(self, other: Self) -> Self {
        Self([
            self.0[0] * other.0[0] + self.0[2] * other.0[1],
            self.0[1] * other.0[0] + self.0[3] * other.0[1],
            self.0[0] * other.0[2] + self.0[2] * other.0[3],
            self.0[1] * other.0[2] + self.0[3] * other.0[3],
            self.0[0] * other.0[4] + self.0[2] * other.0[5] + self.0[4],
            self.0[1] * other.0[4] + self.0[3] * other.0[5] + self.0[5],
        ])
    }
}

impl MulAssign for Matrix {
    #[inline]
    fn mul_assign(&mut self, other: Self) {
        *self = self.mul(other);
    }
}

impl FromStr for Matrix {
    type Err = MatrixError;

    /// Parse six coefficients `a b c d tx ty`.
    ///
    /// Separators may be whitespace, commas or braces, so both the flat form
    /// and the nested `{{a b} {c d} {tx ty}}` form are accepted.
    fn from_str(s: &str) -> Result<Self, MatrixError> {
        let words: Vec<&str> = s
            .split(|c: char| c.is_whitespace() || matches!(c, ',' | '{' | '}'))
            .filter(|w| !w.is_empty())
            .collect();
        if words.len() != 6 {
            return Err(MatrixError::CoefficientCount(words.len()));
        }
        let mut c = [0.0; 6];
        for (slot, word) in c.iter_mut().zip(&words) {
            *slot = word
                .parse()
                .map_err(|_| MatrixError::InvalidNumber(word.to_string()))?;
        }
        Self::try_new(c)
    }
}

#[cfg(feature = "mint")]
impl From<Matrix> for mint::ColumnMatrix2x3<f64> {
    #[inline(always)]
    fn from(a: Matrix) -> Self {
        Self {
            x: mint::Vector2 {
                x: a.0[0],
                y: a.0[1],
            },
            y: mint::Vector2 {
                x: a.0[2],
                y: a.0[3],
            },
            z: mint::Vector2 {
                x: a.0[4],
                y: a.0[5],
            },
        }
    }
}

#[cfg(feature = "mint")]
impl From<mint::ColumnMatrix2x3<f64>> for Matrix {
    #[inline(always)]
    fn from(m: mint::ColumnMatrix2x3<f64>) -> Self {
        Self([m.x.x, m.x.y, m.y.x, m.y.y, m.z.x, m.z.y])
    }
}

#[cfg(test)]
mod tests {
    use crate::{Matrix, MatrixError, Point, Rect};
    use std::f64::consts::PI;

    fn assert_near(p0: Point, p1: Point) {
        assert!(p0.nearly_eq(p1, 1e-9), "{p0:?} != {p1:?}");
    }

    #[test]
    fn matrix_basic() {
        let p = Point::new(3.0, 4.0);

        assert_near(Matrix::default() * p, p);
        assert_near(Matrix::scale(2.0) * p, Point::new(6.0, 8.0));
        assert_near(Matrix::rotate(PI / 2.0) * p, Point::new(-4.0, 3.0));
        assert_near(Matrix::translate((5.0, 6.0)) * p, Point::new(8.0, 10.0));
        // Row-vector layout: c multiplies y into x'.
        assert_near(
            Matrix::new([1.0, 0.0, 2.0, 1.0, 0.0, 0.0]) * p,
            Point::new(11.0, 4.0),
        );
    }

    #[test]
    fn premultiply_applies_inner_first() {
        let outer = Matrix::translate((10.0, 0.0));
        let inner = Matrix::scale(2.0);
        let p = Point::new(1.0, 1.0);
        assert_near(outer.premultiply(inner) * p, Point::new(12.0, 2.0));
        assert_near(inner.then(outer) * p, Point::new(12.0, 2.0));
    }

    #[test]
    fn matrix_inv() {
        let a = Matrix::new([0.1, 1.2, 2.3, 3.4, 4.5, 5.6]);
        let a_inv = a.inverse().unwrap();

        for p in [Point::new(1.0, 0.0), Point::new(0.0, 1.0), Point::new(1.0, 1.0)] {
            assert_near(a * (a_inv * p), p);
            assert_near(a_inv * (a * p), p);
        }
    }

    #[test]
    fn singular_rejected() {
        assert!(matches!(
            Matrix::try_new([1.0, 2.0, 2.0, 4.0, 0.0, 0.0]),
            Err(MatrixError::Singular { .. })
        ));
        assert!(Matrix::new([1e-4, 0.0, 0.0, 1e-4, 0.0, 0.0]).inverse().is_err());
        assert!(Matrix::try_new([1.0, 0.0, 0.0, 1.0, 5.0, 5.0]).is_ok());
    }

    #[test]
    fn parse_forms() {
        let flat: Matrix = "1 0 0 2 5 6".parse().unwrap();
        let nested: Matrix = "{{1 0} {0 2} {5 6}}".parse().unwrap();
        assert_eq!(flat, nested);
        assert_eq!(flat.as_coeffs(), [1.0, 0.0, 0.0, 2.0, 5.0, 6.0]);
        assert_eq!(
            "1 0 0 1 0".parse::<Matrix>(),
            Err(MatrixError::CoefficientCount(5))
        );
        assert!(matches!(
            "1 0 0 x 0 0".parse::<Matrix>(),
            Err(MatrixError::InvalidNumber(_))
        ));
        assert!(matches!(
            "0 0 0 0 1 1".parse::<Matrix>(),
            Err(MatrixError::Singular { .. })
        ));
    }

    #[test]
    fn rect_bbox_rotated() {
        let r = Rect::new(0.0, 0.0, 2.0, 2.0);
        let bb = Matrix::rotate(PI / 4.0).transform_rect_bbox(r);
        let h = 2.0f64.sqrt();
        assert!((bb.x0 + h).abs() < 1e-9 && (bb.x1 - h).abs() < 1e-9);
        assert!(bb.y0.abs() < 1e-9 && (bb.y1 - 2.0 * h).abs() < 1e-9);
        assert!(Matrix::scale(3.0).transform_rect_bbox(Rect::EMPTY).is_empty());
    }
}
