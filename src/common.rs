// Copyright 2026 the vecpath Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared numeric helpers and tuning constants.

/// Defines a trait that chooses between libstd or libm implementations of float methods.
macro_rules! define_float_funcs {
    ($(
        fn $name:ident(self $(,$arg:ident: $arg_ty:ty)*) -> $ret:ty
        => $lname:ident;
    )+) => {
        #[cfg(not(feature = "std"))]
        pub(crate) trait FloatFuncs : Sized {
            fn signum(self) -> Self;

            fn sin_cos(self) -> (Self, Self);

            $(fn $name(self $(,$arg: $arg_ty)*) -> $ret;)+
        }

        #[cfg(not(feature = "std"))]
        impl FloatFuncs for f64 {
            #[inline]
            fn signum(self) -> f64 {
                if self.is_nan() {
                    f64::NAN
                } else {
                    1.0_f64.copysign(self)
                }
            }

            #[inline]
            fn sin_cos(self) -> (f64, f64) {
                #[cfg(feature = "libm")]
                return libm::sincos(self);

                #[cfg(not(feature = "libm"))]
                compile_error!("vecpath requires either the `std` or `libm` feature")
            }

            $(fn $name(self $(,$arg: $arg_ty)*) -> $ret {
                #[cfg(feature = "libm")]
                return libm::$lname(self $(,$arg as _)*);

                #[cfg(not(feature = "libm"))]
                compile_error!("vecpath requires either the `std` or `libm` feature")
            })+
        }
    }
}

define_float_funcs! {
    fn abs(self) -> Self => fabs;
    fn acos(self) -> Self => acos;
    fn asin(self) -> Self => asin;
    fn atan2(self, other: Self) -> Self => atan2;
    fn ceil(self) -> Self => ceil;
    fn cos(self) -> Self => cos;
    fn copysign(self, sign: Self) -> Self => copysign;
    fn hypot(self, other: Self) -> Self => hypot;
    fn powi(self, n: i32) -> Self => pow;
    fn sin(self) -> Self => sin;
    fn sqrt(self) -> Self => sqrt;
}

/// Number of uniform parameter steps used to flatten a cubic (or promoted
/// quadratic) Bézier segment.
pub const CURVE_SEGMENTS: usize = 18;

/// Number of chords used to flatten a whole ellipse.
pub const ELLIPSE_SEGMENTS: usize = 48;

/// Angular step, in degrees, used to flatten elliptical arcs.
pub const ARC_SEGMENT_DEGREES: f64 = 10.0;

/// Minimum number of chords for any non-degenerate arc.
pub const MIN_ARC_SEGMENTS: usize = 2;

/// Strokes at most this wide are hit-tested as a widened polyline; wider
/// strokes get a full outline with caps and joins.
pub const THIN_STROKE_WIDTH: f64 = 4.0;

/// Determinants smaller than this in magnitude are considered singular.
pub const SINGULAR_DETERMINANT: f64 = 1e-6;

/// Distance under which two flattened points are treated as coincident.
pub(crate) const COINCIDENT_EPSILON: f64 = 1e-9;

/// Clamp `x` into `[min, max]` without panicking on NaN bounds.
#[inline]
pub(crate) fn clamp(x: f64, min: f64, max: f64) -> f64 {
    // `f64::clamp` panics on NaN bounds.
    x.max(min).min(max)
}
