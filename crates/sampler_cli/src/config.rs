//! Sampler configuration management
//!
//! Handles loading configuration from environment variables, TOML files, and CLI arguments.

use serde::Deserialize;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

/// Largest dimension count the binary dispatches to.
pub const MAX_DIMENSIONS: usize = 8;

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid policy: {0}. Must be one of: lower, middle, upper")]
    InvalidPolicy(String),

    #[error("Invalid value kind: {0}. Must be one of: int, real")]
    InvalidKind(String),

    #[error("Invalid dimensions: {0}. Must be between 1 and 8")]
    InvalidDimensions(usize),

    #[error("Invalid interval: min {min} is greater than max {max}")]
    InvalidInterval { min: f64, max: f64 },

    #[error("Invalid interval: [{min}, {max}] must have finite bounds and a finite width")]
    NonFiniteInterval { min: f64, max: f64 },

    #[error("Integer bounds must be whole numbers within i64 range: {0}")]
    NonIntegralBound(f64),

    #[error("Invalid count: must be greater than zero")]
    ZeroCount,

    #[error("Invalid seed: expected one or two words, got {0}")]
    InvalidSeed(usize),

    #[error("Configuration file error: {0}")]
    FileError(String),

    #[error("Environment variable error: {0}")]
    EnvError(String),
}

/// Log levels supported by the binary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

/// Window policy of the diagonal adapter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Policy {
    #[default]
    Lower,
    Middle,
    Upper,
}

impl FromStr for Policy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "lower" => Ok(Policy::Lower),
            "middle" => Ok(Policy::Middle),
            "upper" => Ok(Policy::Upper),
            _ => Err(ConfigError::InvalidPolicy(s.to_string())),
        }
    }
}

impl std::fmt::Display for Policy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Policy::Lower => write!(f, "lower"),
            Policy::Middle => write!(f, "middle"),
            Policy::Upper => write!(f, "upper"),
        }
    }
}

/// Scalar kind drawn by the base distribution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Int,
    #[default]
    Real,
}

impl FromStr for ValueKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "int" | "integer" => Ok(ValueKind::Int),
            "real" | "float" => Ok(ValueKind::Real),
            _ => Err(ConfigError::InvalidKind(s.to_string())),
        }
    }
}

impl std::fmt::Display for ValueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValueKind::Int => write!(f, "int"),
            ValueKind::Real => write!(f, "real"),
        }
    }
}

/// Sampler configuration structure
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SamplerConfig {
    /// Log level
    #[serde(deserialize_with = "deserialize_log_level")]
    pub log_level: LogLevel,
    /// Window policy
    #[serde(deserialize_with = "deserialize_policy")]
    pub policy: Policy,
    /// Number of coordinates per window
    pub dimensions: usize,
    /// Integer or real draws
    #[serde(deserialize_with = "deserialize_kind")]
    pub kind: ValueKind,
    /// Lower bound of the base interval
    pub min: f64,
    /// Upper bound of the base interval
    pub max: f64,
    /// Number of values to draw
    pub count: usize,
    /// Engine seed: `[w0]` or `[w0, w1]`
    pub seed: Vec<u64>,
}

fn deserialize_log_level<'de, D>(deserializer: D) -> Result<LogLevel, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    LogLevel::from_str(&s).map_err(serde::de::Error::custom)
}

fn deserialize_policy<'de, D>(deserializer: D) -> Result<Policy, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    Policy::from_str(&s).map_err(serde::de::Error::custom)
}

fn deserialize_kind<'de, D>(deserializer: D) -> Result<ValueKind, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    ValueKind::from_str(&s).map_err(serde::de::Error::custom)
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Info,
            policy: Policy::Lower,
            dimensions: 3,
            kind: ValueKind::Real,
            min: 0.0,
            max: 1.0,
            count: 12,
            seed: vec![1, 2],
        }
    }
}

const ENV_VARS: [&str; 8] = [
    "SAMPLER_LOG_LEVEL",
    "SAMPLER_POLICY",
    "SAMPLER_DIMENSIONS",
    "SAMPLER_KIND",
    "SAMPLER_MIN",
    "SAMPLER_MAX",
    "SAMPLER_COUNT",
    "SAMPLER_SEED",
];

fn parse_env<T: FromStr>(name: &str, value: &str) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::EnvError(format!("{}={:?} could not be parsed", name, value)))
}

/// Parses a seed list such as `"7"`, `"1,2"` or `"1 2"`.
pub fn parse_seed_list(value: &str) -> Result<Vec<u64>, ConfigError> {
    value
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .map(|part| parse_env("SAMPLER_SEED", part))
        .collect()
}

impl SamplerConfig {
    /// Apply `SAMPLER_*` environment variables on top of `self`
    ///
    /// Only variables that are set are applied; the result is not validated.
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_vars(|name| std::env::var(name).ok())
    }

    fn apply_vars<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        for name in ENV_VARS {
            let Some(value) = lookup(name) else {
                continue;
            };
            match name {
                "SAMPLER_LOG_LEVEL" => self.log_level = LogLevel::from_str(&value)?,
                "SAMPLER_POLICY" => self.policy = Policy::from_str(&value)?,
                "SAMPLER_DIMENSIONS" => self.dimensions = parse_env(name, &value)?,
                "SAMPLER_KIND" => self.kind = ValueKind::from_str(&value)?,
                "SAMPLER_MIN" => self.min = parse_env(name, &value)?,
                "SAMPLER_MAX" => self.max = parse_env(name, &value)?,
                "SAMPLER_COUNT" => self.count = parse_env(name, &value)?,
                "SAMPLER_SEED" => self.seed = parse_seed_list(&value)?,
                _ => {}
            }
        }
        Ok(())
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &PathBuf) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileError(format!("Failed to read config file: {}", e)))?;

        let config: SamplerConfig = toml::from_str(&content)
            .map_err(|e| ConfigError::FileError(format!("Failed to parse TOML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_DIMENSIONS).contains(&self.dimensions) {
            return Err(ConfigError::InvalidDimensions(self.dimensions));
        }
        if self.min.is_nan() || self.max.is_nan() || self.min > self.max {
            return Err(ConfigError::InvalidInterval {
                min: self.min,
                max: self.max,
            });
        }
        // Integer spans up to 2^64 are fine; real ones must not overflow.
        if !(self.max - self.min).is_finite() {
            return Err(ConfigError::NonFiniteInterval {
                min: self.min,
                max: self.max,
            });
        }
        if self.kind == ValueKind::Int {
            integral_bound(self.min)?;
            integral_bound(self.max)?;
        }
        if self.count == 0 {
            return Err(ConfigError::ZeroCount);
        }
        if !(1..=2).contains(&self.seed.len()) {
            return Err(ConfigError::InvalidSeed(self.seed.len()));
        }
        Ok(())
    }

    /// Integer bounds of the interval, for `kind = "int"`
    pub fn int_bounds(&self) -> Result<(i64, i64), ConfigError> {
        Ok((integral_bound(self.min)?, integral_bound(self.max)?))
    }

    /// Merge with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli: &CliArgs) -> Result<(), ConfigError> {
        if let Some(log_level) = &cli.log_level {
            self.log_level = LogLevel::from_str(log_level)?;
        }
        if let Some(policy) = &cli.policy {
            self.policy = Policy::from_str(policy)?;
        }
        if let Some(dimensions) = cli.dimensions {
            self.dimensions = dimensions;
        }
        if let Some(kind) = &cli.kind {
            self.kind = ValueKind::from_str(kind)?;
        }
        if let Some(min) = cli.min {
            self.min = min;
        }
        if let Some(max) = cli.max {
            self.max = max;
        }
        if let Some(count) = cli.count {
            self.count = count;
        }
        if !cli.seed.is_empty() {
            self.seed = cli.seed.clone();
        }
        Ok(())
    }
}

fn integral_bound(value: f64) -> Result<i64, ConfigError> {
    // 2^63 is exactly representable; anything at or above it overflows i64.
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    if value.fract() != 0.0 || value < -LIMIT || value >= LIMIT {
        return Err(ConfigError::NonIntegralBound(value));
    }
    Ok(value as i64)
}

/// CLI arguments structure
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    /// Config file path
    pub config_file: Option<PathBuf>,
    /// Log level override
    pub log_level: Option<String>,
    /// Policy override
    pub policy: Option<String>,
    /// Dimension override
    pub dimensions: Option<usize>,
    /// Value kind override
    pub kind: Option<String>,
    /// Interval minimum override
    pub min: Option<f64>,
    /// Interval maximum override
    pub max: Option<f64>,
    /// Draw count override
    pub count: Option<usize>,
    /// Seed words override; empty keeps the configured seed
    pub seed: Vec<u64>,
}

/// Build configuration from all sources
///
/// Priority (highest to lowest):
/// 1. CLI arguments
/// 2. Environment variables
/// 3. Config file
/// 4. Default values
pub fn build_config(cli: &CliArgs) -> Result<SamplerConfig, ConfigError> {
    let mut config = if let Some(config_path) = &cli.config_file {
        SamplerConfig::from_file(config_path)?
    } else {
        SamplerConfig::default()
    };

    config.apply_env()?;
    config.merge_with_cli(cli)?;
    config.validate()?;

    Ok(config)
}
