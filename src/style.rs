// Copyright 2026 the vecpath Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Paint-independent style parameters read by the geometry queries.

use core::borrow::Borrow;

use smallvec::SmallVec;

use crate::Matrix;

/// Defines the connection between two segments of a stroke.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[expect(clippy::exhaustive_enums, reason = "the SVG join styles")]
pub enum Join {
    /// The segments are extended to their natural intersection point.
    #[default]
    Miter,
    /// An arc between the segments.
    Round,
    /// A straight line connecting the segments.
    Bevel,
}

/// Defines the shape to be drawn at the ends of a stroke.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[expect(clippy::exhaustive_enums, reason = "the SVG cap styles")]
pub enum Cap {
    /// Flat cap.
    #[default]
    Butt,
    /// Rounded cap with radius equal to half the stroke width.
    Round,
    /// Square cap extending half the stroke width past the endpoint.
    Square,
}

/// How the interior of a path is determined.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[expect(clippy::exhaustive_enums, reason = "the SVG fill rules")]
pub enum FillRule {
    /// Inside where the winding number is not zero.
    #[default]
    NonZero,
    /// Inside where a ray crosses the outline an odd number of times.
    EvenOdd,
}

impl FillRule {
    /// Is a point with the given crossing counts inside?
    #[inline]
    pub fn is_inside(self, winding: i32, crossings: u32) -> bool {
        match self {
            Self::NonZero => winding != 0,
            Self::EvenOdd => crossings % 2 == 1,
        }
    }
}

/// Collection of values representing lengths in a dash pattern.
pub type Dashes = SmallVec<[f64; 4]>;

/// Describes the geometry of a stroke.
///
/// Dashes are carried for the renderer; the bounding box and hit-test
/// queries treat a dashed stroke as solid.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stroke {
    /// Width of the stroke.
    pub width: f64,
    /// Style for the ends of open subpaths.
    pub cap: Cap,
    /// Style for connecting segments of the stroke.
    pub join: Join,
    /// Limit for miter joins, as a ratio of miter length to stroke width.
    pub miter_limit: f64,
    /// Lengths of dashes in alternating on/off order.
    pub dash_pattern: Dashes,
    /// Offset of the first dash.
    pub dash_offset: f64,
}

impl Default for Stroke {
    fn default() -> Self {
        Self {
            width: 1.0,
            cap: Cap::Butt,
            join: Join::Miter,
            miter_limit: 4.0,
            dash_pattern: Default::default(),
            dash_offset: 0.0,
        }
    }
}

impl Stroke {
    /// Creates a new stroke with the specified width.
    pub fn new(width: f64) -> Self {
        Self {
            width,
            ..Default::default()
        }
    }

    /// Builder method for setting the join style.
    #[must_use]
    pub fn with_join(mut self, join: Join) -> Self {
        self.join = join;
        self
    }

    /// Builder method for setting the limit for miter joins.
    #[must_use]
    pub fn with_miter_limit(mut self, limit: f64) -> Self {
        self.miter_limit = limit;
        self
    }

    /// Builder method for setting the cap style.
    #[must_use]
    pub fn with_cap(mut self, cap: Cap) -> Self {
        self.cap = cap;
        self
    }

    /// Builder method for setting the dashing parameters.
    #[must_use]
    pub fn with_dashes<P>(mut self, offset: f64, pattern: P) -> Self
    where
        P: IntoIterator,
        P::Item: Borrow<f64>,
    {
        self.dash_offset = offset;
        self.dash_pattern.clear();
        self.dash_pattern
            .extend(pattern.into_iter().map(|dash| *dash.borrow()));
        self
    }

    /// Half the stroke width, never negative.
    #[inline]
    pub fn half_width(&self) -> f64 {
        0.5 * self.width.max(0.0)
    }
}

/// Everything about a draw call that affects its geometry.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Style {
    /// The stroke, if the path is stroked.
    pub stroke: Option<Stroke>,
    /// The fill rule, if the path is filled.
    pub fill: Option<FillRule>,
    /// A transform applied to the path before it is drawn.
    pub matrix: Option<Matrix>,
    /// Whether edges are antialiased, which widens the damaged area.
    pub antialias: bool,
}

impl Style {
    /// A style that neither strokes nor fills.
    pub fn new() -> Self {
        Self::default()
    }

    /// A filled style with the given rule.
    pub fn filled(rule: FillRule) -> Self {
        Self::default().with_fill(rule)
    }

    /// A stroked style.
    pub fn stroked(stroke: Stroke) -> Self {
        Self::default().with_stroke(stroke)
    }

    /// Builder method for setting the stroke.
    #[must_use]
    pub fn with_stroke(mut self, stroke: Stroke) -> Self {
        self.stroke = Some(stroke);
        self
    }

    /// Builder method for setting the fill rule.
    #[must_use]
    pub fn with_fill(mut self, rule: FillRule) -> Self {
        self.fill = Some(rule);
        self
    }

    /// Builder method for setting the transform.
    #[must_use]
    pub fn with_matrix(mut self, matrix: Matrix) -> Self {
        self.matrix = Some(matrix);
        self
    }

    /// Builder method for enabling antialiasing.
    #[must_use]
    pub fn with_antialias(mut self, antialias: bool) -> Self {
        self.antialias = antialias;
        self
    }

    /// The transform, or identity if there is none.
    #[inline]
    pub fn matrix_or_identity(&self) -> Matrix {
        self.matrix.unwrap_or(Matrix::IDENTITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let stroke = Stroke::default();
        assert_eq!(stroke.width, 1.0);
        assert_eq!(stroke.cap, Cap::Butt);
        assert_eq!(stroke.join, Join::Miter);
        assert_eq!(stroke.miter_limit, 4.0);
        assert!(stroke.dash_pattern.is_empty());

        let style = Style::default();
        assert!(style.stroke.is_none());
        assert!(style.fill.is_none());
        assert!(style.matrix.is_none());
        assert!(!style.antialias);
    }

    #[test]
    fn dashes_replace() {
        let stroke = Stroke::new(2.0)
            .with_dashes(1.0, [4.0, 2.0])
            .with_dashes(0.5, &[3.0]);
        assert_eq!(stroke.dash_offset, 0.5);
        assert_eq!(stroke.dash_pattern.as_slice(), &[3.0]);
    }

    #[test]
    fn fill_rules() {
        assert!(FillRule::NonZero.is_inside(2, 2));
        assert!(!FillRule::EvenOdd.is_inside(2, 2));
        assert!(FillRule::EvenOdd.is_inside(-1, 1));
        assert!(!FillRule::NonZero.is_inside(0, 2));
    }
}
