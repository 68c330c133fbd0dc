//! # Distributions
//!
//! Base distributions map raw [`Engine`] words into a bounded interval;
//! the [`Diagonal`] adapter wraps a base distribution and constrains
//! consecutive draws to a simplex.
//!
//! ## Module Structure
//!
//! - [`interval`]: the inclusive `[min, max]` parameter type
//! - [`naive`]: [`NaiveInt`] and [`NaiveReal`] base distributions
//! - [`side`]: the [`Lower`], [`Middle`] and [`Upper`] window policies
//! - [`diagonal`]: the [`Diagonal`] adapter and its aliases
//!
//! ## Usage Example
//!
//! ```rust
//! use sampler_core::distribution::{NaiveReal, Triangle};
//! use sampler_core::engine::Tiny;
//!
//! let mut engine = Tiny::<u64>::new(2024);
//! let mut triangle = Triangle::<NaiveReal<f64>>::with_range(0.0, 1.0);
//!
//! let a = triangle.sample(&mut engine);
//! let b = triangle.sample(&mut engine);
//! assert!(a + b <= 1.0);
//! ```

pub mod diagonal;
pub mod interval;
pub mod naive;
pub mod side;

pub use diagonal::{Diagonal, Samples, Tetrahedron, Triangle};
pub use interval::Interval;
pub use naive::{NaiveInt, NaiveReal};
pub use side::{Lower, Middle, Side, Upper, Window};

use std::fmt::{self, Debug, Display};

use num_traits::{Float, Num, PrimInt};

use crate::engine::Engine;
use crate::error::StateResult;
use crate::state::Tokens;

/// Numeric types a distribution can produce.
///
/// Each scalar knows how to write itself as a single state token that
/// parses back to the identical value, and how to move into a wider type
/// in which spans and sums of offsets cannot overflow.
pub trait Scalar: Copy + PartialOrd + Num + Default + Debug + Display + Send + Sync + 'static {
    /// Arithmetic type for spans and offset sums: `i128` for integers, the
    /// type itself for floats.
    type Wide: Copy + PartialOrd + Num + Debug;

    /// Writes the value as one token.
    fn write_token<W: fmt::Write>(&self, out: &mut W) -> fmt::Result;

    /// Reads one token written by [`Scalar::write_token`].
    fn read_token(tokens: &mut Tokens<'_>, expected: &'static str) -> StateResult<Self>;

    /// Lossless widening.
    fn to_wide(self) -> Self::Wide;

    /// Narrows a wide value; the value must fit.
    fn from_wide(value: Self::Wide) -> Self;
}

/// Integer scalars, widened to `i128` for overflow-free range maths.
pub trait IntegerScalar: Scalar<Wide = i128> + PrimInt {}

/// Floating-point scalars.
pub trait RealScalar: Scalar<Wide = Self> + Float {
    /// Converts from `f64`, rounding to the nearest representable value.
    fn from_real(value: f64) -> Self;
}

macro_rules! impl_integer_scalar {
    ($($t:ty),* $(,)?) => {
        $(
            impl Scalar for $t {
                type Wide = i128;

                fn write_token<W: fmt::Write>(&self, out: &mut W) -> fmt::Result {
                    write!(out, "{}", self)
                }

                fn read_token(tokens: &mut Tokens<'_>, expected: &'static str) -> StateResult<Self> {
                    tokens.parse(expected)
                }

                #[inline]
                fn to_wide(self) -> i128 {
                    self as i128
                }

                #[inline]
                fn from_wide(value: i128) -> Self {
                    value as $t
                }
            }

            impl IntegerScalar for $t {}
        )*
    };
}

macro_rules! impl_real_scalar {
    ($($t:ty),* $(,)?) => {
        $(
            // `{:e}` prints the shortest digits that round-trip exactly.
            impl Scalar for $t {
                type Wide = $t;

                fn write_token<W: fmt::Write>(&self, out: &mut W) -> fmt::Result {
                    write!(out, "{:e}", self)
                }

                fn read_token(tokens: &mut Tokens<'_>, expected: &'static str) -> StateResult<Self> {
                    tokens.parse(expected)
                }

                #[inline]
                fn to_wide(self) -> $t {
                    self
                }

                #[inline]
                fn from_wide(value: $t) -> Self {
                    value
                }
            }

            impl RealScalar for $t {
                #[inline]
                fn from_real(value: f64) -> Self {
                    value as $t
                }
            }
        )*
    };
}

impl_integer_scalar!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);
impl_real_scalar!(f32, f64);

/// A distribution over a bounded interval, driven by an [`Engine`].
///
/// [`BaseDistribution::sample_in`] accepts an explicit interval that
/// overrides the stored one for a single draw; the diagonal policies use it
/// to narrow the range per draw.
pub trait BaseDistribution {
    /// Result type of a draw.
    type Output: Scalar;

    /// Creates the distribution over `param`.
    fn with_param(param: Interval<Self::Output>) -> Self
    where
        Self: Sized;

    /// Returns the stored interval.
    fn param(&self) -> Interval<Self::Output>;

    /// Replaces the stored interval.
    fn set_param(&mut self, param: Interval<Self::Output>);

    /// Lower bound of the stored interval.
    fn min(&self) -> Self::Output {
        self.param().min()
    }

    /// Upper bound of the stored interval.
    fn max(&self) -> Self::Output {
        self.param().max()
    }

    /// Clears any cached state. The naive distributions keep none.
    fn reset(&mut self) {}

    /// Draws one value from `param` instead of the stored interval.
    fn sample_in<E: Engine>(&self, engine: &mut E, param: Interval<Self::Output>) -> Self::Output;

    /// Draws one value from the stored interval.
    fn sample<E: Engine>(&self, engine: &mut E) -> Self::Output {
        self.sample_in(engine, self.param())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token<T: Scalar>(value: T) -> String {
        let mut out = String::new();
        value.write_token(&mut out).unwrap();
        out
    }

    #[test]
    fn test_integer_tokens() {
        assert_eq!(token(-42i32), "-42");
        assert_eq!(token(u64::MAX), "18446744073709551615");
    }

    #[test]
    fn test_real_tokens_are_scientific() {
        assert_eq!(token(0.1f64), "1e-1");
        assert_eq!(token(123.0f64), "1.23e2");
        assert_eq!(token(0.0f32), "0e0");
    }

    #[test]
    fn test_real_tokens_round_trip_exactly() {
        for value in [1.0 / 3.0, std::f64::consts::PI, 1e-300, -2.5e300, f64::MIN_POSITIVE] {
            let text = token(value);
            let mut tokens = Tokens::new(&text);
            let parsed = f64::read_token(&mut tokens, "value").unwrap();
            assert_eq!(parsed.to_bits(), value.to_bits(), "{}", text);
        }
    }

    #[test]
    fn test_wide_conversions() {
        assert_eq!(i8::MIN.to_wide(), -128);
        assert_eq!(u64::MAX.to_wide(), u64::MAX as i128);
        assert_eq!(i16::from_wide(-7), -7);
        assert_eq!(2.5f32.to_wide(), 2.5f32);
    }
}
