//! Sampler CLI - Reproducible Simplex Sampling Runs
//!
//! Command-line front end for `sampler_core`.
//!
//! # Commands
//!
//! - `sampler sample` - Draw windows from a diagonal adapter
//! - `sampler engine` - Print raw engine words
//! - `sampler resume --engine-state "<w0> <w1>"` - Continue a saved engine
//! - `sampler resume --engine-state ... --adapter-state ...` - Continue a
//!   saved sample run
//!
//! Settings come from, in increasing priority: defaults, a TOML file given
//! with `--config`, `SAMPLER_*` environment variables, command-line flags.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;

pub use error::{CliError, Result};

use config::{CliArgs, LogLevel};

/// Deterministic simplex sampler
#[derive(Parser)]
#[command(name = "sampler")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file path (TOML)
    #[arg(short, long, global = true, env = "SAMPLER_CONFIG")]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Draw values from a diagonal adapter, one window per line
    Sample {
        /// Window policy (lower, middle, upper)
        #[arg(short, long)]
        policy: Option<String>,

        /// Coordinates per window (1 to 8)
        #[arg(short, long)]
        dimensions: Option<usize>,

        /// Value kind (int, real)
        #[arg(short, long)]
        kind: Option<String>,

        /// Lower bound of the interval
        #[arg(long, allow_negative_numbers = true)]
        min: Option<f64>,

        /// Upper bound of the interval
        #[arg(long, allow_negative_numbers = true)]
        max: Option<f64>,

        /// Number of values to draw
        #[arg(short = 'n', long)]
        count: Option<usize>,

        /// Engine seed word; pass twice to set both words
        #[arg(short, long)]
        seed: Vec<u64>,

        /// Print the final engine and adapter state (see `resume`)
        #[arg(long)]
        state: bool,
    },

    /// Print raw engine words and the final state
    Engine {
        /// Engine seed word; pass twice to set both words
        #[arg(short, long)]
        seed: Vec<u64>,

        /// Number of words to print
        #[arg(short = 'n', long)]
        count: Option<usize>,

        /// Words to skip before printing
        #[arg(long, default_value_t = 0)]
        discard: u64,
    },

    /// Continue a raw engine or a sample run from saved state
    Resume {
        /// Saved engine state, "<w0> <w1>"
        #[arg(short, long)]
        engine_state: String,

        /// Saved adapter state printed by `sample --state`
        #[arg(short, long)]
        adapter_state: Option<String>,

        /// Window policy of the saved run (lower, middle, upper)
        #[arg(short, long, requires = "adapter_state")]
        policy: Option<String>,

        /// Coordinates per window of the saved run (1 to 8)
        #[arg(short, long, requires = "adapter_state")]
        dimensions: Option<usize>,

        /// Value kind of the saved run (int, real)
        #[arg(short, long, requires = "adapter_state")]
        kind: Option<String>,

        /// Number of words or values to print
        #[arg(short = 'n', long)]
        count: Option<usize>,
    },
}

impl Cli {
    fn overrides(&self) -> CliArgs {
        let mut args = CliArgs {
            config_file: self.config.clone(),
            log_level: self.log_level.clone(),
            ..Default::default()
        };

        match &self.command {
            Commands::Sample {
                policy,
                dimensions,
                kind,
                min,
                max,
                count,
                seed,
                ..
            } => {
                args.policy = policy.clone();
                args.dimensions = *dimensions;
                args.kind = kind.clone();
                args.min = *min;
                args.max = *max;
                args.count = *count;
                args.seed = seed.clone();
            }
            Commands::Engine { seed, count, .. } => {
                args.count = *count;
                args.seed = seed.clone();
            }
            Commands::Resume {
                policy,
                dimensions,
                kind,
                count,
                ..
            } => {
                args.policy = policy.clone();
                args.dimensions = *dimensions;
                args.kind = kind.clone();
                args.count = *count;
            }
        }
        args
    }
}

fn init_tracing(level: LogLevel) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_filter_str()));

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = config::build_config(&cli.overrides())?;

    init_tracing(config.log_level);
    debug!(?config, "Resolved configuration");

    match cli.command {
        Commands::Sample { state, .. } => commands::sample::run(&config, state),
        Commands::Engine { discard, .. } => {
            commands::engine::run(&config.seed, config.count, discard)
        }
        Commands::Resume {
            engine_state,
            adapter_state,
            ..
        } => commands::resume::run(&config, &engine_state, adapter_state.as_deref()),
    }
}
