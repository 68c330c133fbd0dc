//! Error types for structured error handling.
//!
//! Sampling itself never fails; the only fallible surface is restoring a
//! generator or distribution from its text state.

use thiserror::Error;

/// Errors raised while decoding a text state.
///
/// # Examples
/// ```
/// use sampler_core::StateError;
///
/// let err = StateError::MissingToken { expected: "engine word" };
/// assert_eq!(format!("{}", err), "Missing token: expected engine word");
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StateError {
    /// The input ended before every field was read.
    #[error("Missing token: expected {expected}")]
    MissingToken {
        /// Description of the field being read.
        expected: &'static str,
    },

    /// A token could not be parsed as the expected field.
    #[error("Invalid token {token:?}: expected {expected}")]
    InvalidToken {
        /// Description of the field being read.
        expected: &'static str,
        /// The offending token.
        token: String,
    },

    /// A cursor value lies outside the buffer it indexes.
    #[error("Cursor {cursor} out of range for {dimensions} dimensions")]
    CursorOutOfRange {
        /// The decoded cursor.
        cursor: usize,
        /// The buffer length.
        dimensions: usize,
    },

    /// Input remained after a complete state was read.
    #[error("Trailing input after state: {token:?}")]
    TrailingInput {
        /// The first unread token.
        token: String,
    },
}

/// Result alias for state decoding.
pub type StateResult<T> = Result<T, StateError>;
