//! Naive base distributions.
//!
//! Both distributions trade statistical quality for a single engine call
//! per draw:
//!
//! - [`NaiveInt`] reduces the engine word modulo the interval span. Spans
//!   that do not evenly divide the engine range are slightly biased toward
//!   small offsets, and the upper bound itself is never produced.
//! - [`NaiveReal`] rescales the engine word linearly from the engine's
//!   output range, so both bounds are reachable.
//!
//! The diagonal policies are defined in terms of exactly these mappings, so
//! the bias is kept rather than replaced by rejection sampling.

use std::fmt;
use std::str::FromStr;

use num_traits::Float;
use rand::Rng;

use super::{BaseDistribution, IntegerScalar, Interval, RealScalar};
use crate::engine::{Engine, RngEngine, Word};
use crate::error::{StateError, StateResult};
use crate::state::{self, TextState, Tokens};

/// Integer distribution `min + engine() % (max - min)`.
///
/// The arithmetic is carried out in 128 bits, so the full range of any
/// integer type up to 64 bits can be used. A collapsed interval
/// (`min == max`) yields `min`.
///
/// # Examples
///
/// ```rust
/// use sampler_core::distribution::{BaseDistribution, NaiveInt};
/// use sampler_core::engine::Tiny;
///
/// let mut engine = Tiny::<u64>::new(1);
/// let byte = NaiveInt::<i8>::new(-128, 127);
/// for _ in 0..100 {
///     let value = byte.sample(&mut engine);
///     assert!(value < 127);
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NaiveInt<T> {
    param: Interval<T>,
}

impl<T: IntegerScalar> NaiveInt<T> {
    /// Creates the distribution over `[min, max]`.
    pub fn new(min: T, max: T) -> Self {
        Self::with_param(Interval::new(min, max))
    }

    /// Creates the distribution over `[0, max]`.
    pub fn up_to(max: T) -> Self {
        Self::new(T::zero(), max)
    }
}

impl<T: IntegerScalar> BaseDistribution for NaiveInt<T> {
    type Output = T;

    fn with_param(param: Interval<T>) -> Self {
        Self { param }
    }

    fn param(&self) -> Interval<T> {
        self.param
    }

    fn set_param(&mut self, param: Interval<T>) {
        self.param = param;
    }

    fn sample_in<E: Engine>(&self, engine: &mut E, param: Interval<T>) -> T {
        let low = param.min().to_wide();
        let span = param.max().to_wide().wrapping_sub(low) as u128;
        if span == 0 {
            return param.min();
        }
        let offset = engine.generate().widen() % span;
        T::from_wide(low.wrapping_add(offset as i128))
    }
}

/// Real distribution rescaling the engine output range onto `[min, max]`.
///
/// The engine range is taken from [`Engine::min_output`] and
/// [`Engine::max_output`], which default to the bounds of the engine's word
/// type.
///
/// # Examples
///
/// ```rust
/// use sampler_core::distribution::{BaseDistribution, NaiveReal};
/// use sampler_core::engine::Tiny;
///
/// let mut engine = Tiny::<u32>::new(5);
/// let unit = NaiveReal::<f32>::new(0.0, 1.0);
/// let x = unit.sample(&mut engine);
/// assert!((0.0..=1.0).contains(&x));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NaiveReal<T> {
    param: Interval<T>,
}

impl<T: RealScalar> NaiveReal<T> {
    /// Creates the distribution over `[min, max]`.
    pub fn new(min: T, max: T) -> Self {
        Self::with_param(Interval::new(min, max))
    }

    /// Creates the distribution over `[0, max]`.
    pub fn up_to(max: T) -> Self {
        Self::new(T::zero(), max)
    }
}

impl<T: RealScalar> BaseDistribution for NaiveReal<T> {
    type Output = T;

    fn with_param(param: Interval<T>) -> Self {
        Self { param }
    }

    fn param(&self) -> Interval<T> {
        self.param
    }

    fn set_param(&mut self, param: Interval<T>) {
        self.param = param;
    }

    fn sample_in<E: Engine>(&self, engine: &mut E, param: Interval<T>) -> T {
        let low = E::min_output().to_real();
        let high = E::max_output().to_real();
        let unit = (engine.generate().to_real() - low) / (high - low);
        let value = param.min() + T::from_real(unit) * param.span();
        // Rounding can land one ulp past `max`.
        Float::min(value, param.max())
    }
}

macro_rules! impl_naive_common {
    ($name:ident, $bound:ident) => {
        impl<T: $bound> TextState for $name<T> {
            fn write_state<W: fmt::Write>(&self, out: &mut W) -> fmt::Result {
                self.param.write_state(out)
            }

            fn read_state(tokens: &mut Tokens<'_>) -> StateResult<Self> {
                Interval::read_state(tokens).map(Self::with_param)
            }
        }

        impl<T: $bound> fmt::Display for $name<T> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.write_state(f)
            }
        }

        impl<T: $bound> FromStr for $name<T> {
            type Err = StateError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                state::decode(s)
            }
        }

        impl<T: $bound> rand::distributions::Distribution<T> for $name<T> {
            fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> T {
                BaseDistribution::sample(self, &mut RngEngine(rng))
            }
        }
    };
}

impl_naive_common!(NaiveInt, IntegerScalar);
impl_naive_common!(NaiveReal, RealScalar);
