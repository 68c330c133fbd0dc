//! Text state grammar for generators and distributions.
//!
//! Every stateful type in this crate writes itself as a sequence of
//! whitespace-separated tokens and reads itself back from the same sequence.
//! Composite types (a diagonal adapter around a base distribution) simply
//! concatenate the token streams of their parts:
//!
//! ```text
//! engine      : <w0> <w1>
//! naive       : <min> <max>
//! diagonal    : <base...> <cursor> <buffer[0]> ... <buffer[D-1]>
//! ```
//!
//! Floating-point tokens are written in scientific notation with the
//! shortest digit string that parses back to the same bits, so a decoded
//! state continues the exact sequence of the encoded one.
//!
//! # Examples
//!
//! ```rust
//! use sampler_core::engine::Tiny;
//! use sampler_core::state;
//!
//! let mut engine = Tiny::<u64>::from_words([1, 2]);
//! engine.discard(10);
//!
//! let text = state::encode(&engine);
//! let restored: Tiny<u64> = state::decode(&text).unwrap();
//! assert_eq!(engine, restored);
//! ```

use std::fmt;
use std::str::{FromStr, SplitWhitespace};

use crate::error::{StateError, StateResult};

/// Whitespace-delimited token reader over an encoded state.
#[derive(Debug, Clone)]
pub struct Tokens<'a> {
    inner: SplitWhitespace<'a>,
}

impl<'a> Tokens<'a> {
    /// Creates a reader over `text`.
    pub fn new(text: &'a str) -> Self {
        Self {
            inner: text.split_whitespace(),
        }
    }

    /// Returns the next raw token, or [`StateError::MissingToken`].
    pub fn next_token(&mut self, expected: &'static str) -> StateResult<&'a str> {
        self.inner
            .next()
            .ok_or(StateError::MissingToken { expected })
    }

    /// Reads and parses the next token with [`FromStr`].
    pub fn parse<T: FromStr>(&mut self, expected: &'static str) -> StateResult<T> {
        let token = self.next_token(expected)?;
        token.parse().map_err(|_| StateError::InvalidToken {
            expected,
            token: token.to_string(),
        })
    }

    /// Fails with [`StateError::TrailingInput`] if any token remains.
    pub fn finish(mut self) -> StateResult<()> {
        match self.inner.next() {
            Some(token) => Err(StateError::TrailingInput {
                token: token.to_string(),
            }),
            None => Ok(()),
        }
    }
}

/// A value with a whitespace-delimited text representation.
pub trait TextState: Sized {
    /// Writes the state tokens, separated by single spaces, with no
    /// leading or trailing whitespace.
    fn write_state<W: fmt::Write>(&self, out: &mut W) -> fmt::Result;

    /// Reads exactly the tokens written by [`TextState::write_state`].
    fn read_state(tokens: &mut Tokens<'_>) -> StateResult<Self>;
}

/// Encodes a value into its text state.
pub fn encode<T: TextState>(value: &T) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = value.write_state(&mut out);
    out
}

/// Decodes a complete text state; trailing tokens are an error.
pub fn decode<T: TextState>(text: &str) -> StateResult<T> {
    let mut tokens = Tokens::new(text);
    T::read_state(&mut tokens)
        .and_then(|value| tokens.finish().map(|()| value))
        .inspect_err(|err| {
            tracing::debug!(error = %err, "failed to decode text state");
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_skip_mixed_whitespace() {
        let mut tokens = Tokens::new("  1\t2\n 3 ");
        assert_eq!(tokens.parse::<u8>("a").unwrap(), 1);
        assert_eq!(tokens.parse::<u8>("b").unwrap(), 2);
        assert_eq!(tokens.parse::<u8>("c").unwrap(), 3);
        assert!(tokens.finish().is_ok());
    }

    #[test]
    fn test_missing_token() {
        let mut tokens = Tokens::new("");
        assert_eq!(
            tokens.parse::<u8>("engine word"),
            Err(StateError::MissingToken {
                expected: "engine word"
            })
        );
    }

    #[test]
    fn test_invalid_token() {
        let mut tokens = Tokens::new("abc");
        let err = tokens.parse::<u32>("cursor").unwrap_err();
        assert_eq!(
            err,
            StateError::InvalidToken {
                expected: "cursor",
                token: "abc".to_string()
            }
        );
        assert!(format!("{}", err).contains("cursor"));
    }

    /// Log sink shared between a test and its subscriber.
    #[derive(Clone, Default)]
    struct Captured(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_decode_logs_trailing_input() {
        let sink = Captured::default();
        let writer = sink.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        let result = tracing::subscriber::with_default(subscriber, || {
            decode::<crate::engine::Tiny<u64>>("1 2 3")
        });
        assert_eq!(
            result,
            Err(StateError::TrailingInput {
                token: "3".to_string()
            })
        );

        let logs = String::from_utf8(sink.0.lock().unwrap().clone()).unwrap();
        assert!(logs.contains("failed to decode text state"), "{}", logs);
    }

    #[test]
    fn test_trailing_input() {
        let mut tokens = Tokens::new("1 2");
        let _ = tokens.parse::<u8>("first").unwrap();
        assert_eq!(
            tokens.finish(),
            Err(StateError::TrailingInput {
                token: "2".to_string()
            })
        );
    }
}
