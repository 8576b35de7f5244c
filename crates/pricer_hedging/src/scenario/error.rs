//! Error types for scenario configuration and execution.

use pricer_core::types::PricingError;
use thiserror::Error;

/// Errors loading or validating a scenario configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// IO error reading the config file
    #[error("IO error: {0}")]
    Io(String),

    /// TOML parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Environment override with an unparsable value
    #[error("Invalid value '{value}' for environment variable {var}")]
    Env {
        /// Variable name
        var: String,
        /// Raw value
        value: String,
    },

    /// One or more validation failures
    #[error("Validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
}

/// Errors running a scenario.
#[derive(Debug, Error)]
pub enum ScenarioError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Pricing or simulation error
    #[error("Pricing error: {0}")]
    Pricing(#[from] PricingError),

    /// Batch requested with no seeds
    #[error("Batch requires at least one seed")]
    EmptyBatch,
}
