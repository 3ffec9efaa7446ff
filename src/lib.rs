// Copyright 2026 the vecpath Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! SVG-style path geometry.
//!
//! The vecpath library turns path data such as `"M0 0 L10 0 A5 5 0 0 1 20 0"`
//! into a typed sequence of absolute drawing atoms, and answers the
//! questions a drawing or editing application asks of such a path: how much
//! of the canvas does drawing it damage, how far is a pointer from it, and
//! how does a selection rectangle relate to it. Paths can also be written
//! back out in a canonical form or fed to any back end implementing
//! [`PathSink`].
//!
//! # Examples
//!
//! Parsing and measuring a path:
//! ```
//! use vecpath::{FillRule, Matrix, Path, Point, Rect, RectHit, Stroke, Style};
//!
//! let path: Path = "M0 0 l100 0 v100 h-100 z".parse().unwrap();
//! assert_eq!(path.bare_bbox(), Rect::new(0.0, 0.0, 100.0, 100.0));
//!
//! let style = Style::filled(FillRule::NonZero).with_stroke(Stroke::new(2.0));
//! let damage = path.bounding_box(&style, Matrix::IDENTITY);
//! assert!(damage.contains_rect(Rect::new(-1.0, -1.0, 101.0, 101.0)));
//!
//! assert_eq!(path.distance_to(&style, Matrix::IDENTITY, Point::new(50.0, 50.0)), 0.0);
//! let far = path.distance_to(&style, Matrix::IDENTITY, Point::new(150.0, 50.0));
//! assert!((far - 49.0).abs() < 1e-9);
//!
//! let selection = Rect::new(-10.0, -10.0, 110.0, 110.0);
//! assert_eq!(path.rect_hit(&style, Matrix::IDENTITY, selection), RectHit::Inside);
//! ```
//!
//! Rejecting malformed data:
//! ```
//! use vecpath::{Path, SyntaxErrorKind};
//!
//! let err = "L10 10 20 20".parse::<Path>().unwrap_err();
//! assert_eq!(err.kind, SyntaxErrorKind::MissingMoveTo);
//! ```
//!
//! # Features
//!
//! This crate either uses the standard library or the [`libm`] crate for
//! math functionality. The `std` feature is enabled by default, but can be
//! disabled, as long as the `libm` feature is enabled. This is useful for
//! `no_std` environments. The crate still uses the `alloc` crate regardless.
//!
//! - `std` (enabled by default): Get floating point functions from the standard library.
//! - `libm`: Use floating point implementations from [libm][].
//! - `mint`: Enable `From`/`Into` conversion between [`Point`], [`Vec2`], [`Matrix`] and [mint][] types.
//! - `serde`: Implement `serde::Deserialize` and `serde::Serialize` on the data types.
//! - `schemars`: Add support for using the data types in JSON schemas using [schemars][].
//!
//! Diagnostics for rejected input are emitted through [tracing][] at the
//! `debug` level; with no subscriber installed they cost nothing.
//!
//! [`libm`]: https://docs.rs/libm
//! [libm]: https://docs.rs/libm
//! [mint]: https://docs.rs/mint
//! [schemars]: https://docs.rs/schemars
//! [tracing]: https://docs.rs/tracing

// LINEBENDER LINT SET - lib.rs - v1
// See https://linebender.org/wiki/canonical-lints/
// These lints aren't included in Cargo.toml because they
// shouldn't apply to examples and tests
#![warn(unused_crate_dependencies)]
#![warn(clippy::print_stdout, clippy::print_stderr)]
// END LINEBENDER LINT SET
#![deny(clippy::trivially_copy_pass_by_ref)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![cfg_attr(all(not(feature = "std"), not(test)), no_std)]

#[cfg(not(any(feature = "std", feature = "libm")))]
compile_error!("vecpath requires either the `std` or `libm` feature");

// Suppress the unused_crate_dependencies lint when both std and libm are specified.
#[cfg(all(feature = "std", feature = "libm"))]
use libm as _;

extern crate alloc;

mod arc;
mod atom;
mod bbox;
mod bezier;
pub mod common;
mod error;
mod flatten;
mod hit;
mod matrix;
mod outline;
mod parse;
mod point;
mod polygon;
mod rect;
mod serialize;
mod style;
mod token;
mod vec2;

pub use crate::arc::{arc_params, ArcOutcome, ArcParams, CubicSegments};
pub use crate::atom::{Path, PathAtom};
pub use crate::bbox::{bare_bbox, total_bbox, transformed_bbox};
pub use crate::bezier::{quad_to_cubic, CubicBez};
pub use crate::common::{
    ARC_SEGMENT_DEGREES, CURVE_SEGMENTS, ELLIPSE_SEGMENTS, MIN_ARC_SEGMENTS, SINGULAR_DETERMINANT,
    THIN_STROKE_WIDTH,
};
pub use crate::error::{MatrixError, SyntaxError, SyntaxErrorKind};
pub use crate::flatten::{flatten, Polyline};
pub use crate::hit::{distance_to_path, rect_vs_path, RectHit};
pub use crate::matrix::Matrix;
pub use crate::parse::parse;
pub use crate::point::Point;
pub use crate::rect::Rect;
pub use crate::serialize::{emit, normalize, ArcLowering, PathDataWriter, PathSink};
pub use crate::style::{Cap, Dashes, FillRule, Join, Stroke, Style};
pub use crate::token::{tokenize, Token};
pub use crate::vec2::Vec2;
