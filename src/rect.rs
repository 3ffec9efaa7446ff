// Copyright 2026 the vecpath Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis-aligned rectangles, used for bounding boxes and area queries.

use crate::Point;

#[cfg(not(feature = "std"))]
use crate::common::FloatFuncs;

/// An axis-aligned rectangle.
///
/// Bounding boxes start out as [`Rect::EMPTY`], whose inverted infinite
/// extents make [`Rect::union_pt`] work without a special first case.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    /// The minimum x coordinate (left edge).
    pub x0: f64,
    /// The minimum y coordinate (top edge in y-down spaces).
    pub y0: f64,
    /// The maximum x coordinate (right edge).
    pub x1: f64,
    /// The maximum y coordinate (bottom edge in y-down spaces).
    pub y1: f64,
}

impl Rect {
    /// The empty rectangle `{+∞, +∞, −∞, −∞}`.
    pub const EMPTY: Self = Self::new(
        f64::INFINITY,
        f64::INFINITY,
        f64::NEG_INFINITY,
        f64::NEG_INFINITY,
    );

    /// A new rectangle from minimum and maximum coordinates.
    #[inline(always)]
    pub const fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// A new rectangle from two points.
    ///
    /// The result will have non-negative width and height.
    #[inline]
    pub fn from_points(p0: impl Into<Point>, p1: impl Into<Point>) -> Self {
        let p0 = p0.into();
        let p1 = p1.into();
        Self::new(p0.x.min(p1.x), p0.y.min(p1.y), p0.x.max(p1.x), p0.y.max(p1.y))
    }

    /// A new rectangle from origin and size.
    ///
    /// Negative sizes are normalized.
    #[inline]
    pub fn from_origin_size(origin: impl Into<Point>, width: f64, height: f64) -> Self {
        let origin = origin.into();
        Self::from_points(origin, Point::new(origin.x + width, origin.y + height))
    }

    /// Is this the empty rectangle (or otherwise inverted)?
    #[inline]
    pub fn is_empty(&self) -> bool {
        !(self.x1 >= self.x0 && self.y1 >= self.y0)
    }

    /// The width of the rectangle.
    #[inline]
    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    /// The height of the rectangle.
    #[inline]
    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }

    /// The center point of the rectangle.
    #[inline]
    pub fn center(&self) -> Point {
        Point::new(0.5 * (self.x0 + self.x1), 0.5 * (self.y0 + self.y1))
    }

    /// The four corners, clockwise in a y-down space starting at the origin.
    #[inline]
    pub fn corners(&self) -> [Point; 4] {
        [
            Point::new(self.x0, self.y0),
            Point::new(self.x1, self.y0),
            Point::new(self.x1, self.y1),
            Point::new(self.x0, self.y1),
        ]
    }

    /// The smallest rectangle enclosing two rectangles.
    #[inline]
    #[must_use]
    pub fn union(&self, other: Self) -> Self {
        Self {
            x0: self.x0.min(other.x0),
            y0: self.y0.min(other.y0),
            x1: self.x1.max(other.x1),
            y1: self.y1.max(other.y1),
        }
    }

    /// Compute the union with one point.
    #[inline]
    #[must_use]
    pub fn union_pt(&self, pt: Point) -> Self {
        Self::new(
            self.x0.min(pt.x),
            self.y0.min(pt.y),
            self.x1.max(pt.x),
            self.y1.max(pt.y),
        )
    }

    /// Expand the rectangle by `amount` on every side.
    ///
    /// The empty rectangle stays empty.
    #[inline]
    #[must_use]
    pub fn inflate(&self, amount: f64) -> Self {
        if self.is_empty() {
            return *self;
        }
        Self {
            x0: self.x0 - amount,
            y0: self.y0 - amount,
            x1: self.x1 + amount,
            y1: self.y1 + amount,
        }
    }

    /// Does the closed rectangle contain `pt`?
    #[inline]
    pub fn contains(&self, pt: Point) -> bool {
        pt.x >= self.x0 && pt.x <= self.x1 && pt.y >= self.y0 && pt.y <= self.y1
    }

    /// Does `self` contain every point of `other`?
    #[inline]
    pub fn contains_rect(&self, other: Self) -> bool {
        other.is_empty()
            || (other.x0 >= self.x0
                && other.x1 <= self.x1
                && other.y0 >= self.y0
                && other.y1 <= self.y1)
    }

    /// Do the closed rectangles share at least one point?
    #[inline]
    pub fn overlaps(&self, other: Self) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.x0 <= other.x1
            && other.x0 <= self.x1
            && self.y0 <= other.y1
            && other.y0 <= self.y1
    }

    /// Distance from `pt` to the closed rectangle, zero inside.
    #[inline]
    pub fn distance_to(&self, pt: Point) -> f64 {
        let dx = (self.x0 - pt.x).max(0.0).max(pt.x - self.x1);
        let dy = (self.y0 - pt.y).max(0.0).max(pt.y - self.y1);
        (dx * dx + dy * dy).sqrt()
    }
}

impl Default for Rect {
    /// The default rectangle is [`Rect::EMPTY`].
    #[inline]
    fn default() -> Self {
        Self::EMPTY
    }
}

impl From<(Point, Point)> for Rect {
    #[inline]
    fn from(points: (Point, Point)) -> Self {
        Self::from_points(points.0, points.1)
    }
}
