//! CLI error types

use thiserror::Error;

use crate::config::ConfigError;

/// Errors surfaced by the `sampler` binary
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid saved state: {0}")]
    State(#[from] sampler_core::StateError),
}

/// Result alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CliError::from(ConfigError::InvalidDimensions(9));
        assert!(err.to_string().starts_with("Configuration error"));

        let err = CliError::from(sampler_core::StateError::MissingToken {
            expected: "engine word w1",
        });
        assert_eq!(
            err.to_string(),
            "Invalid saved state: Missing token: expected engine word w1"
        );
    }
}
