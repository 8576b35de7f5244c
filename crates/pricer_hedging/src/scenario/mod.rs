//! TOML-configured hedging experiments.
//!
//! - [`ScenarioConfig`]: path, hedge and position parameters with
//!   environment overrides
//! - [`ScenarioRunner`]: single runs and parallel Monte-Carlo batches
//! - [`model_stock_from_quote`]: underlying path implied by an option quote

mod config;
mod error;
mod runner;

pub use config::{
    PositionSpec, ScenarioConfig, ENV_LOG_LEVEL, ENV_REBALANCE_INTERVAL, ENV_SEED,
};
pub use error::{ConfigError, ScenarioError};
pub use runner::{
    model_stock_from_quote, model_stock_from_quote_with, BatchSummary, ModelledStock,
    ScenarioOutcome, ScenarioRunner,
};
