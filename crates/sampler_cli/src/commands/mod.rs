//! CLI command implementations
//!
//! Each submodule implements a specific CLI command.

pub mod engine;
pub mod resume;
pub mod sample;

use sampler_core::engine::{Engine, Tiny};

use crate::config::ConfigError;
use crate::Result;

/// Builds the engine named by a one- or two-word seed.
///
/// A single word seeds `w0` and leaves `w1` at zero.
pub fn engine_from_seed(seed: &[u64]) -> Result<Tiny<u64>> {
    match *seed {
        [w0] => Ok(Tiny::new(w0)),
        [w0, w1] => Ok(Tiny::from_words([w0, w1])),
        _ => Err(ConfigError::InvalidSeed(seed.len()).into()),
    }
}

/// Draws `count` raw words, one per line.
pub fn word_lines(engine: &mut Tiny<u64>, count: usize) -> Vec<String> {
    (0..count).map(|_| engine.generate().to_string()).collect()
}
