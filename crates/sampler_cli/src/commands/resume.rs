//! Resume command implementation
//!
//! Continues a run from the states printed by an earlier one.
//!
//! With only an engine state the raw word stream continues. With an adapter
//! state as well, the sample run it came from continues.

use sampler_core::engine::Tiny;
use sampler_core::state;
use tracing::info;

use super::engine::EngineOutput;
use super::{sample, word_lines};
use crate::config::SamplerConfig;
use crate::Result;

/// Run the resume command
pub fn run(config: &SamplerConfig, engine_state: &str, adapter_state: Option<&str>) -> Result<()> {
    let Some(adapter_state) = adapter_state else {
        info!(engine_state, count = config.count, "Resuming engine");
        let output = draw(engine_state, config.count)?;
        for line in &output.lines {
            println!("{}", line);
        }
        println!("state: {}", output.engine_state);
        return Ok(());
    };

    info!(
        engine_state,
        adapter_state,
        policy = %config.policy,
        dimensions = config.dimensions,
        count = config.count,
        "Resuming sample run"
    );
    let output = sample::resume(config, engine_state, adapter_state)?;
    for line in &output.lines {
        println!("{}", line);
    }
    println!("engine: {}", output.engine_state);
    println!("adapter: {}", output.adapter_state);
    Ok(())
}

/// Decodes `engine_state` and draws `count` words from it.
pub fn draw(engine_state: &str, count: usize) -> Result<EngineOutput> {
    let mut engine: Tiny<u64> = state::decode(engine_state)?;
    let lines = word_lines(&mut engine, count);
    Ok(EngineOutput {
        lines,
        engine_state: engine.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::engine;
    use crate::CliError;

    #[test]
    fn test_resume_continues_engine_run() {
        let whole = engine::draw(&[1, 2], 20, 0).unwrap();
        let head = engine::draw(&[1, 2], 8, 0).unwrap();
        let tail = draw(&head.engine_state, 12).unwrap();

        assert_eq!(&whole.lines[8..], &tail.lines[..]);
        assert_eq!(whole.engine_state, tail.engine_state);
    }

    #[test]
    fn test_resume_rejects_bad_state() {
        assert!(matches!(draw("1", 5), Err(CliError::State(_))));
        assert!(matches!(draw("1 x", 5), Err(CliError::State(_))));
        assert!(matches!(draw("1 2 3", 5), Err(CliError::State(_))));
    }
}
