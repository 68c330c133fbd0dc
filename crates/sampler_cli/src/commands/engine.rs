//! Engine command implementation
//!
//! Prints raw words from a seeded `Tiny<u64>` engine.

use tracing::{debug, info};

use super::{engine_from_seed, word_lines};
use crate::Result;

/// Lines printed by an engine run.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineOutput {
    /// One generated word per line.
    pub lines: Vec<String>,
    /// Final engine state, `"<w0> <w1>"`.
    pub engine_state: String,
}

/// Run the engine command
pub fn run(seed: &[u64], count: usize, discard: u64) -> Result<()> {
    info!(?seed, count, discard, "Starting engine run");

    let output = draw(seed, count, discard)?;
    for line in &output.lines {
        println!("{}", line);
    }
    println!("state: {}", output.engine_state);
    Ok(())
}

/// Seeds an engine, skips `discard` words and draws `count` more.
pub fn draw(seed: &[u64], count: usize, discard: u64) -> Result<EngineOutput> {
    let mut engine = engine_from_seed(seed)?;
    if discard > 0 {
        engine.discard(discard);
        debug!(discard, state = %engine, "Discarded words");
    }

    let lines = word_lines(&mut engine, count);
    Ok(EngineOutput {
        lines,
        engine_state: engine.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discard_skips_words() {
        let full = draw(&[5, 6], 10, 0).unwrap();
        let skipped = draw(&[5, 6], 4, 6).unwrap();
        assert_eq!(&full.lines[6..], &skipped.lines[..]);
        assert_eq!(full.engine_state, skipped.engine_state);
    }

    #[test]
    fn test_single_word_seed() {
        let output = draw(&[0], 1, 0).unwrap();
        assert_eq!(output.lines, vec!["0".to_string()]);
        assert_eq!(output.engine_state, "13 0");
    }
}
