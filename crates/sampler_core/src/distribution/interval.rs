//! Inclusive numeric interval used as a distribution parameter.

use std::fmt;
use std::str::FromStr;

use super::Scalar;
use crate::error::{StateError, StateResult};
use crate::state::{self, TextState, Tokens};

/// An inclusive interval `[min, max]`.
///
/// `min <= max` is the caller's responsibility and is not checked.
///
/// # Examples
///
/// ```
/// use sampler_core::distribution::Interval;
///
/// let unit = Interval::new(0.0, 1.0);
/// assert_eq!(unit.span(), 1.0);
/// assert_eq!(unit.to_string(), "0e0 1e0");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Interval<T> {
    min: T,
    max: T,
}

impl<T: Copy> Interval<T> {
    /// Creates `[min, max]`.
    #[inline]
    pub fn new(min: T, max: T) -> Self {
        Self { min, max }
    }

    /// Lower bound.
    #[inline]
    pub fn min(&self) -> T {
        self.min
    }

    /// Upper bound.
    #[inline]
    pub fn max(&self) -> T {
        self.max
    }
}

impl<T: Scalar> Interval<T> {
    /// `max - min`.
    #[inline]
    pub fn span(&self) -> T {
        self.max - self.min
    }

    /// Whether `value` lies within `[min, max]`.
    #[inline]
    pub fn contains(&self, value: T) -> bool {
        self.min <= value && value <= self.max
    }
}

impl<T: Scalar> TextState for Interval<T> {
    fn write_state<W: fmt::Write>(&self, out: &mut W) -> fmt::Result {
        self.min.write_token(out)?;
        out.write_char(' ')?;
        self.max.write_token(out)
    }

    fn read_state(tokens: &mut Tokens<'_>) -> StateResult<Self> {
        let min = T::read_token(tokens, "interval minimum")?;
        let max = T::read_token(tokens, "interval maximum")?;
        Ok(Self::new(min, max))
    }
}

impl<T: Scalar> fmt::Display for Interval<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_state(f)
    }
}

impl<T: Scalar> FromStr for Interval<T> {
    type Err = StateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        state::decode(s)
    }
}
