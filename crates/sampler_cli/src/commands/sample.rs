//! Sample command implementation
//!
//! Draws values from a diagonal adapter over a `Tiny<u64>` engine and prints
//! one window (or middle batch) per line.

use sampler_core::distribution::{
    BaseDistribution, Diagonal, Lower, Middle, NaiveInt, NaiveReal, Side, Upper,
};
use sampler_core::engine::Tiny;
use sampler_core::{state, TextState};
use tracing::{debug, info};

use super::engine_from_seed;
use crate::config::{ConfigError, Policy, SamplerConfig, ValueKind};
use crate::Result;

/// Lines printed by a sample run plus the state needed to resume it.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleOutput {
    /// One line per group of `dimensions` values.
    pub lines: Vec<String>,
    /// Final engine state, `"<w0> <w1>"`.
    pub engine_state: String,
    /// Final adapter state.
    pub adapter_state: String,
}

/// Run the sample command
pub fn run(config: &SamplerConfig, show_state: bool) -> Result<()> {
    info!(
        policy = %config.policy,
        dimensions = config.dimensions,
        kind = %config.kind,
        count = config.count,
        "Starting sample run"
    );

    let output = draw(config)?;
    for line in &output.lines {
        println!("{}", line);
    }
    if show_state {
        println!("engine: {}", output.engine_state);
        println!("adapter: {}", output.adapter_state);
    }

    info!("Sample run complete");
    Ok(())
}

/// Draws `config.count` values as described by `config`.
pub fn draw(config: &SamplerConfig) -> Result<SampleOutput> {
    config.validate()?;
    let mut engine = engine_from_seed(&config.seed)?;

    match config.kind {
        ValueKind::Int => {
            let (min, max) = config.int_bounds()?;
            by_policy::<NaiveInt<i64>>(config, Origin::Fresh { min, max }, &mut engine)
        }
        ValueKind::Real => {
            let origin = Origin::Fresh {
                min: config.min,
                max: config.max,
            };
            by_policy::<NaiveReal<f64>>(config, origin, &mut engine)
        }
    }
}

/// Continues a sample run from the engine and adapter states it printed.
///
/// The interval comes from `adapter_state`; `config` supplies the policy,
/// dimensions, value kind and count, which must match the saved run.
pub fn resume(
    config: &SamplerConfig,
    engine_state: &str,
    adapter_state: &str,
) -> Result<SampleOutput> {
    let mut engine: Tiny<u64> = state::decode(engine_state)?;

    match config.kind {
        ValueKind::Int => {
            by_policy::<NaiveInt<i64>>(config, Origin::Saved(adapter_state), &mut engine)
        }
        ValueKind::Real => {
            by_policy::<NaiveReal<f64>>(config, Origin::Saved(adapter_state), &mut engine)
        }
    }
}

/// Where the adapter of a run comes from.
#[derive(Debug, Clone, Copy)]
enum Origin<'a, T> {
    /// A fresh adapter over `[min, max]`.
    Fresh { min: T, max: T },
    /// An adapter decoded from its text state.
    Saved(&'a str),
}

fn by_policy<B>(
    config: &SamplerConfig,
    origin: Origin<'_, B::Output>,
    engine: &mut Tiny<u64>,
) -> Result<SampleOutput>
where
    B: BaseDistribution + TextState,
{
    match config.policy {
        Policy::Lower => by_dimensions::<B, Lower>(config, origin, engine),
        Policy::Middle => by_dimensions::<B, Middle>(config, origin, engine),
        Policy::Upper => by_dimensions::<B, Upper>(config, origin, engine),
    }
}

fn by_dimensions<B, S>(
    config: &SamplerConfig,
    origin: Origin<'_, B::Output>,
    engine: &mut Tiny<u64>,
) -> Result<SampleOutput>
where
    B: BaseDistribution + TextState,
    S: Side,
{
    let count = config.count;
    match config.dimensions {
        1 => collect::<B, 1, S>(origin, count, engine),
        2 => collect::<B, 2, S>(origin, count, engine),
        3 => collect::<B, 3, S>(origin, count, engine),
        4 => collect::<B, 4, S>(origin, count, engine),
        5 => collect::<B, 5, S>(origin, count, engine),
        6 => collect::<B, 6, S>(origin, count, engine),
        7 => collect::<B, 7, S>(origin, count, engine),
        8 => collect::<B, 8, S>(origin, count, engine),
        other => Err(ConfigError::InvalidDimensions(other).into()),
    }
}

fn collect<B, const D: usize, S>(
    origin: Origin<'_, B::Output>,
    count: usize,
    engine: &mut Tiny<u64>,
) -> Result<SampleOutput>
where
    B: BaseDistribution + TextState,
    S: Side,
{
    let mut diagonal = match origin {
        Origin::Fresh { min, max } => Diagonal::<B, D, S>::with_range(min, max),
        Origin::Saved(text) => state::decode::<Diagonal<B, D, S>>(text)?,
    };
    debug!(policy = S::NAME, dimensions = D, "Built diagonal adapter");

    let values: Vec<B::Output> = diagonal.samples(engine).take(count).collect();
    let lines = values
        .chunks(D)
        .map(|chunk| {
            chunk
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect();

    Ok(SampleOutput {
        lines,
        engine_state: engine.to_string(),
        adapter_state: diagonal.to_string(),
    })
}
