//! Numeric element trait and math wrappers for std/no_std compatibility
//!
//! Uses standard library math when available, falls back to libm for no_std.

use core::fmt::{Debug, Display};
use core::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

#[cfg(all(not(feature = "std"), not(feature = "libm")))]
compile_error!("runstats needs either the `std` or the `libm` feature for float math");

/// Floating-point element type accepted by every accumulator
///
/// Implemented for `f32` and `f64`. Accumulators are generic over this trait
/// and monomorphized per element type.
pub trait Real:
    Copy
    + Debug
    + Display
    + Default
    + PartialOrd
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
    + AddAssign
    + SubAssign
{
    /// Additive identity
    const ZERO: Self;
    /// Multiplicative identity
    const ONE: Self;

    /// Convert a sample count into the element type
    fn from_count(n: u64) -> Self;

    /// Square root
    fn sqrt(self) -> Self;

    /// Natural logarithm
    fn ln(self) -> Self;

    /// Natural exponential
    fn exp(self) -> Self;

    /// `self` raised to a real power
    fn powf(self, exponent: Self) -> Self;

    /// `true` unless the value is zero (positive or negative)
    #[inline]
    fn is_nonzero(self) -> bool {
        self != Self::ZERO
    }
}

macro_rules! impl_real {
    ($t:ty, $sqrt:ident, $ln:ident, $exp:ident, $pow:ident) => {
        impl Real for $t {
            const ZERO: Self = 0.0;
            const ONE: Self = 1.0;

            #[inline]
            fn from_count(n: u64) -> Self {
                n as $t
            }

            #[inline]
            fn sqrt(self) -> Self {
                $sqrt(self)
            }

            #[inline]
            fn ln(self) -> Self {
                $ln(self)
            }

            #[inline]
            fn exp(self) -> Self {
                $exp(self)
            }

            #[inline]
            fn powf(self, exponent: Self) -> Self {
                $pow(self, exponent)
            }
        }
    };
}

impl_real!(f64, sqrt, ln, exp, powf);
impl_real!(f32, sqrtf, lnf, expf, powff);

#[cfg(feature = "std")]
#[inline]
pub fn sqrt(x: f64) -> f64 {
    x.sqrt()
}

#[cfg(not(feature = "std"))]
#[inline]
pub fn sqrt(x: f64) -> f64 {
    libm::sqrt(x)
}

#[cfg(feature = "std")]
#[inline]
pub fn ln(x: f64) -> f64 {
    x.ln()
}

#[cfg(not(feature = "std"))]
#[inline]
pub fn ln(x: f64) -> f64 {
    libm::log(x)
}

#[cfg(feature = "std")]
#[inline]
pub fn exp(x: f64) -> f64 {
    x.exp()
}

#[cfg(not(feature = "std"))]
#[inline]
pub fn exp(x: f64) -> f64 {
    libm::exp(x)
}

#[cfg(feature = "std")]
#[inline]
pub fn powf(x: f64, e: f64) -> f64 {
    x.powf(e)
}

#[cfg(not(feature = "std"))]
#[inline]
pub fn powf(x: f64, e: f64) -> f64 {
    libm::pow(x, e)
}

#[cfg(feature = "std")]
#[inline]
pub fn sqrtf(x: f32) -> f32 {
    x.sqrt()
}

#[cfg(not(feature = "std"))]
#[inline]
pub fn sqrtf(x: f32) -> f32 {
    libm::sqrtf(x)
}

#[cfg(feature = "std")]
#[inline]
pub fn lnf(x: f32) -> f32 {
    x.ln()
}

#[cfg(not(feature = "std"))]
#[inline]
pub fn lnf(x: f32) -> f32 {
    libm::logf(x)
}

#[cfg(feature = "std")]
#[inline]
pub fn expf(x: f32) -> f32 {
    x.exp()
}

#[cfg(not(feature = "std"))]
#[inline]
pub fn expf(x: f32) -> f32 {
    libm::expf(x)
}

#[cfg(feature = "std")]
#[inline]
pub fn powff(x: f32, e: f32) -> f32 {
    x.powf(e)
}

#[cfg(not(feature = "std"))]
#[inline]
pub fn powff(x: f32, e: f32) -> f32 {
    libm::powf(x, e)
}
