//! # Engines
//!
//! An engine is a deterministic source of unsigned words. Distributions in
//! [`crate::distribution`] are generic over [`Engine`], so they run on the
//! crate's own [`Tiny`] generator as well as on any `rand` generator wrapped
//! in [`RngEngine`].
//!
//! ## Module Structure
//!
//! - [`tiny`]: two-word bit-mixing engine with text state and `rand` interop
//!
//! ## Usage Example
//!
//! ```rust
//! use sampler_core::engine::{Engine, Tiny};
//!
//! let mut a = Tiny::<u64>::new(7);
//! let mut b = Tiny::<u64>::new(7);
//! assert_eq!(a.generate(), b.generate());
//! ```

mod tiny;

pub use tiny::Tiny;

use std::fmt::{Debug, Display};
use std::hash::Hash;
use std::str::FromStr;

use num_traits::{Bounded, PrimInt, Unsigned, WrappingAdd};
use rand::{Rng, RngCore};

/// Unsigned word types an engine can produce.
///
/// Implemented for the built-in unsigned integers up to 64 bits.
pub trait Word:
    PrimInt + Unsigned + WrappingAdd + Default + Hash + Debug + Display + FromStr + Send + Sync + 'static
{
    /// Width of the word in bits.
    const BITS: u32;

    /// Truncates a 64-bit constant into this word type.
    fn truncate_u64(value: u64) -> Self;

    /// Lossless widening used by integer distributions.
    fn widen(self) -> u128;

    /// Conversion used by real distributions.
    fn to_real(self) -> f64;

    /// Fills `words` from a `rand` generator in one bulk operation.
    fn fill_from<R: Rng + ?Sized>(rng: &mut R, words: &mut [Self]);
}

macro_rules! impl_word {
    ($($t:ty),* $(,)?) => {
        $(
            impl Word for $t {
                const BITS: u32 = <$t>::BITS;

                #[inline]
                fn truncate_u64(value: u64) -> Self {
                    value as $t
                }

                #[inline]
                fn widen(self) -> u128 {
                    self as u128
                }

                #[inline]
                fn to_real(self) -> f64 {
                    self as f64
                }

                #[inline]
                fn fill_from<R: Rng + ?Sized>(rng: &mut R, words: &mut [Self]) {
                    rng.fill(words);
                }
            }
        )*
    };
}

impl_word!(u8, u16, u32, u64, usize);

/// A deterministic source of unsigned words.
///
/// `min_output`/`max_output` describe the range of [`Engine::generate`];
/// they default to the full range of the word type, and an engine with a
/// narrower native range overrides them.
pub trait Engine {
    /// Word type produced by [`Engine::generate`].
    type Output: Word;

    /// Advances the state and returns the next word.
    fn generate(&mut self) -> Self::Output;

    /// Smallest value [`Engine::generate`] can return.
    fn min_output() -> Self::Output
    where
        Self: Sized,
    {
        <Self::Output as Bounded>::min_value()
    }

    /// Largest value [`Engine::generate`] can return.
    fn max_output() -> Self::Output
    where
        Self: Sized,
    {
        <Self::Output as Bounded>::max_value()
    }
}

impl<E: Engine> Engine for &mut E {
    type Output = E::Output;

    #[inline]
    fn generate(&mut self) -> Self::Output {
        (**self).generate()
    }

    fn min_output() -> Self::Output {
        E::min_output()
    }

    fn max_output() -> Self::Output {
        E::max_output()
    }
}

/// Adapts any [`rand::RngCore`] generator into an [`Engine`] of `u64` words.
///
/// # Examples
///
/// ```rust
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
/// use sampler_core::distribution::{BaseDistribution, NaiveInt};
/// use sampler_core::engine::RngEngine;
///
/// let mut engine = RngEngine(StdRng::seed_from_u64(42));
/// let dice = NaiveInt::new(1, 7);
/// let roll = dice.sample(&mut engine);
/// assert!((1..7).contains(&roll));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RngEngine<R>(
    /// The wrapped generator.
    pub R,
);

impl<R: RngCore> Engine for RngEngine<R> {
    type Output = u64;

    #[inline]
    fn generate(&mut self) -> u64 {
        self.0.next_u64()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distribution::{BaseDistribution, NaiveReal};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_word_truncation() {
        assert_eq!(u8::truncate_u64(0x1ff), 0xff);
        assert_eq!(u32::truncate_u64(13), 13);
        assert_eq!(<u16 as Word>::BITS, 16);
    }

    #[test]
    fn test_default_output_bounds() {
        assert_eq!(RngEngine::<StdRng>::min_output(), 0);
        assert_eq!(RngEngine::<StdRng>::max_output(), u64::MAX);
    }

    #[test]
    fn test_rng_engine_matches_rng() {
        let mut engine = RngEngine(StdRng::seed_from_u64(5));
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..10 {
            assert_eq!(engine.generate(), rng.next_u64());
        }
    }

    #[test]
    fn test_mut_ref_engine_advances_owner() {
        fn draw<E: Engine>(mut engine: E) -> E::Output {
            engine.generate()
        }

        let mut engine = Tiny::<u32>::new(3);
        let mut copy = engine.clone();
        assert_eq!(draw(&mut engine), copy.generate());
        assert_eq!(engine, copy);
    }

    /// Engine whose native range is `[2, 10]`.
    struct Narrow;

    impl Engine for Narrow {
        type Output = u64;

        fn generate(&mut self) -> u64 {
            6
        }

        fn min_output() -> u64 {
            2
        }

        fn max_output() -> u64 {
            10
        }
    }

    #[test]
    fn test_mut_ref_engine_forwards_output_bounds() {
        assert_eq!(<&mut Narrow as Engine>::min_output(), 2);
        assert_eq!(<&mut &mut Narrow as Engine>::max_output(), 10);

        let unit = NaiveReal::new(0.0f64, 1.0);
        let mut engine = Narrow;
        let mut by_ref = &mut engine;
        assert_eq!(unit.sample(&mut by_ref), 0.5);
    }
}
