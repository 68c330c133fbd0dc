//! Simplex-constrained diagonal adapter.
//!
//! [`Diagonal`] wraps a [`BaseDistribution`] and produces one scalar per
//! call. Consecutive groups of `D` outputs are constrained to lie below
//! ([`Lower`]), on ([`Middle`]) or above ([`Upper`]) the simplex
//! `sum(v - min) == max - min`.
//!
//! The adapter owns a fixed `[T; D]` window and a cursor; nothing is heap
//! allocated and the whole state can be written to and restored from a
//! text state (see [`crate::state`]).

use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;

use super::side::{Lower, Side, Window};
use super::{BaseDistribution, Interval, Scalar};
use crate::engine::Engine;
use crate::error::{StateError, StateResult};
use crate::state::{self, TextState, Tokens};

/// Diagonal distribution over `D` dimensions with window policy `S`.
///
/// # Preconditions
///
/// The base interval must satisfy `min <= max`. `D == 0` is rejected at
/// compile time.
///
/// # Examples
///
/// ```rust
/// use sampler_core::distribution::{Diagonal, Middle, NaiveInt};
/// use sampler_core::engine::Tiny;
///
/// let mut engine = Tiny::<u64>::from_words([1, 2]);
/// let mut split = Diagonal::<NaiveInt<i32>, 4, Middle>::with_range(0, 100);
///
/// let batch: Vec<i32> = split.samples(&mut engine).take(4).collect();
/// assert_eq!(batch.iter().sum::<i32>(), 100);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Diagonal<B: BaseDistribution, const D: usize, S: Side> {
    base: B,
    window: Window<B::Output, D>,
    side: PhantomData<S>,
}

/// Two draws summing to at most `max - min`.
pub type Triangle<B> = Diagonal<B, 2, Lower>;

/// Three draws summing to at most `max - min`.
pub type Tetrahedron<B> = Diagonal<B, 3, Lower>;

impl<B: BaseDistribution, const D: usize, S: Side> Diagonal<B, D, S> {
    /// Number of dimensions.
    pub const DIMENSIONS: usize = D;

    const NONZERO_DIMENSIONS: () = assert!(D > 0, "a diagonal distribution needs at least one dimension");

    /// Wraps `base` with an empty window.
    pub fn new(base: B) -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::NONZERO_DIMENSIONS;
        let window = Window::filled(base.min());
        Self {
            base,
            window,
            side: PhantomData,
        }
    }

    /// Wraps a base distribution over `[min, max]`.
    pub fn with_range(min: B::Output, max: B::Output) -> Self {
        Self::new(B::with_param(Interval::new(min, max)))
    }

    /// Draws the next value.
    #[inline]
    pub fn sample<E: Engine>(&mut self, engine: &mut E) -> B::Output {
        S::advance(&self.base, &mut self.window, engine)
    }

    /// Endless iterator of draws from `engine`.
    pub fn samples<'a, E: Engine>(&'a mut self, engine: &'a mut E) -> Samples<'a, B, D, S, E> {
        Samples {
            diagonal: self,
            engine,
        }
    }

    /// Resets the base distribution and empties the window.
    ///
    /// Empty slots hold the base minimum, i.e. a zero offset.
    pub fn reset(&mut self) {
        self.base.reset();
        self.window = Window::filled(self.base.min());
    }

    /// The wrapped base distribution.
    #[inline]
    pub fn base(&self) -> &B {
        &self.base
    }

    /// Lower bound of the base interval.
    #[inline]
    pub fn min(&self) -> B::Output {
        self.base.min()
    }

    /// Upper bound of the base interval.
    #[inline]
    pub fn max(&self) -> B::Output {
        self.base.max()
    }

    /// The base interval.
    #[inline]
    pub fn param(&self) -> Interval<B::Output> {
        self.base.param()
    }

    /// Replaces the base interval. The window is kept as is.
    pub fn set_param(&mut self, param: Interval<B::Output>) {
        self.base.set_param(param);
    }

    /// The window cursor.
    #[inline]
    pub fn cursor(&self) -> usize {
        self.window.cursor()
    }

    /// The window slots in storage order.
    #[inline]
    pub fn buffer(&self) -> &[B::Output; D] {
        self.window.buffer()
    }
}

/// Iterator returned by [`Diagonal::samples`].
#[derive(Debug)]
pub struct Samples<'a, B: BaseDistribution, const D: usize, S: Side, E> {
    diagonal: &'a mut Diagonal<B, D, S>,
    engine: &'a mut E,
}

impl<B: BaseDistribution, const D: usize, S: Side, E: Engine> Iterator for Samples<'_, B, D, S, E> {
    type Item = B::Output;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        Some(self.diagonal.sample(self.engine))
    }
}

impl<B, const D: usize, S> TextState for Diagonal<B, D, S>
where
    B: BaseDistribution + TextState,
    S: Side,
{
    fn write_state<W: fmt::Write>(&self, out: &mut W) -> fmt::Result {
        self.base.write_state(out)?;
        write!(out, " {}", self.window.cursor)?;
        for value in self.window.buffer.iter() {
            out.write_char(' ')?;
            value.write_token(out)?;
        }
        Ok(())
    }

    fn read_state(tokens: &mut Tokens<'_>) -> StateResult<Self> {
        let base = B::read_state(tokens)?;
        let cursor: usize = tokens.parse("diagonal cursor")?;
        if cursor >= D {
            return Err(StateError::CursorOutOfRange {
                cursor,
                dimensions: D,
            });
        }

        let mut diagonal = Self::new(base);
        for slot in diagonal.window.buffer.iter_mut() {
            *slot = <B::Output as Scalar>::read_token(tokens, "diagonal buffer value")?;
        }
        diagonal.window.cursor = cursor;
        Ok(diagonal)
    }
}

impl<B, const D: usize, S> fmt::Display for Diagonal<B, D, S>
where
    B: BaseDistribution + TextState,
    S: Side,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_state(f)
    }
}

impl<B, const D: usize, S> FromStr for Diagonal<B, D, S>
where
    B: BaseDistribution + TextState,
    S: Side,
{
    type Err = StateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        state::decode(s)
    }
}
