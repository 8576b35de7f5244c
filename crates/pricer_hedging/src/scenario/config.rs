//! Scenario configuration.
//!
//! Scenarios are loaded from TOML files with environment variable override
//! support:
//!
//! ```toml
//! seed = 42
//! day_count = 256.0
//! log_level = "info"
//!
//! [path]
//! horizon = 512.0
//! spot = 50.0
//! drift = 0.05
//! volatility = 0.125
//! time_step = 0.1
//!
//! [hedge]
//! rebalance_interval = 1
//! accrual_rate = 0.05
//! accrual = "compounding"
//!
//! [[positions]]
//! option_type = "CALL"
//! side = "LONG"
//! strike = 50.0
//! maturity = 2.0
//! rate = 0.05
//! volatility = 0.125
//! ```
//!
//! | Variable | Field |
//! |---|---|
//! | `HEDGE_SEED` | `seed` |
//! | `HEDGE_REBALANCE_INTERVAL` | `hedge.rebalance_interval` |
//! | `HEDGE_LOG_LEVEL` | `log_level` |

use std::path::Path;

use pricer_core::types::{OptionType, PricingError, Side};
use pricer_models::instruments::OptionContract;
use pricer_models::models::PathConfig;
use serde::Deserialize;

use super::error::ConfigError;
use crate::hedging::HedgeConfig;
use crate::portfolio::{Portfolio, Position};
use crate::series::DEFAULT_DAY_COUNT;

/// Seed override variable.
pub const ENV_SEED: &str = "HEDGE_SEED";
/// Rebalance interval override variable.
pub const ENV_REBALANCE_INTERVAL: &str = "HEDGE_REBALANCE_INTERVAL";
/// Log level override variable.
pub const ENV_LOG_LEVEL: &str = "HEDGE_LOG_LEVEL";

const VALID_LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// One `[[positions]]` entry; tags are parsed on conversion.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PositionSpec {
    /// "CALL" or "PUT"
    pub option_type: String,
    /// "LONG" or "SHORT"
    pub side: String,
    /// Strike K
    pub strike: f64,
    /// Maturity T in years
    pub maturity: f64,
    /// Risk-free rate r
    pub rate: f64,
    /// Volatility σ
    pub volatility: f64,
    /// Dividend yield q
    #[serde(default)]
    pub dividend_yield: f64,
}

impl PositionSpec {
    /// Parses the tags and builds a validated position.
    ///
    /// # Errors
    /// `InvalidOptionType`/`InvalidSide` for unknown tags, `Domain` for
    /// invalid numbers.
    pub fn to_position(&self) -> Result<Position, PricingError> {
        let option_type: OptionType = self.option_type.parse()?;
        let side: Side = self.side.parse()?;
        let contract = OptionContract::new(
            option_type,
            side,
            self.strike,
            self.maturity,
            self.rate,
            self.volatility,
        )?
        .with_dividend_yield(self.dividend_yield)?;
        Ok(Position::new(contract, side))
    }
}

/// Complete description of one hedging experiment.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScenarioConfig {
    /// Path generation parameters
    pub path: PathConfig,

    /// Hedge parameters
    pub hedge: HedgeConfig,

    /// Option positions to hedge
    pub positions: Vec<PositionSpec>,

    /// Path time units per year when pricing the options
    #[serde(default = "default_day_count")]
    pub day_count: f64,

    /// RNG seed; entropy when absent
    #[serde(default)]
    pub seed: Option<u64>,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_day_count() -> f64 {
    DEFAULT_DAY_COUNT
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ScenarioConfig {
    /// Long one 50-strike two-year call on a 50.0 stock with r = 5%,
    /// σ = 12.5%, hedged every step.
    fn default() -> Self {
        Self {
            path: PathConfig {
                horizon: 512.0,
                spot: 50.0,
                drift: 0.05,
                volatility: 0.125,
                time_step: 0.1,
            },
            hedge: HedgeConfig::risk_free(1, 0.05),
            positions: vec![PositionSpec {
                option_type: "CALL".to_string(),
                side: "LONG".to_string(),
                strike: 50.0,
                maturity: 2.0,
                rate: 0.05,
                volatility: 0.125,
                dividend_yield: 0.0,
            }],
            day_count: default_day_count(),
            seed: None,
            log_level: default_log_level(),
        }
    }
}

impl ScenarioConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Apply `HEDGE_*` environment variable overrides.
    pub fn with_env_override(self) -> Result<Self, ConfigError> {
        self.with_overrides(|var| std::env::var(var).ok())
    }

    /// Apply overrides from `lookup`, which maps a variable name to its
    /// value.
    ///
    /// # Errors
    /// `ConfigError::Env` when a numeric override does not parse.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(ENV_SEED) {
            self.seed = Some(parse_env(ENV_SEED, &value)?);
        }

        if let Some(value) = lookup(ENV_REBALANCE_INTERVAL) {
            self.hedge.rebalance_interval = parse_env(ENV_REBALANCE_INTERVAL, &value)?;
        }

        if let Some(value) = lookup(ENV_LOG_LEVEL) {
            self.log_level = value;
        }

        Ok(self)
    }

    /// Validate the configuration, collecting every problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if !VALID_LOG_LEVELS.contains(&self.log_level.to_lowercase().as_str()) {
            errors.push(format!(
                "Invalid log_level '{}'. Valid values: {:?}",
                self.log_level, VALID_LOG_LEVELS
            ));
        }

        if let Err(e) = self.path.validate() {
            errors.push(format!("path: {}", e));
        }

        if let Err(e) = self.hedge.validate() {
            errors.push(format!("hedge: {}", e));
        }

        if !(self.day_count.is_finite() && self.day_count > 0.0) {
            errors.push(format!("day_count must be positive, got {}", self.day_count));
        }

        if self.positions.is_empty() {
            errors.push("positions cannot be empty".to_string());
        }
        for (i, spec) in self.positions.iter().enumerate() {
            if let Err(e) = spec.to_position() {
                errors.push(format!("positions[{}]: {}", i, e));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Load configuration from file and validate.
    pub fn load_and_validate(path: &Path) -> Result<Self, ConfigError> {
        let config = Self::load(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from file with environment overrides and validate.
    pub fn load_with_env_and_validate(path: &Path) -> Result<Self, ConfigError> {
        let config = Self::load(path)?.with_env_override()?;
        config.validate()?;
        Ok(config)
    }

    /// Builds the portfolio described by `positions`.
    ///
    /// # Errors
    /// The first tag or domain error among the positions, or
    /// `PreconditionViolation` when there are none.
    pub fn portfolio(&self) -> Result<Portfolio, PricingError> {
        let positions = self
            .positions
            .iter()
            .map(PositionSpec::to_position)
            .collect::<Result<Vec<_>, _>>()?;
        Portfolio::new(positions)
    }
}

fn parse_env<T: std::str::FromStr>(var: &str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Env {
        var: var.to_string(),
        value: value.to_string(),
    })
}
