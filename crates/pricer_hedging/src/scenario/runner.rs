//! End-to-end scenario execution.

use pricer_models::analytical::{ImpliedVolatility, QuoteInput};
use pricer_models::models::{PathConfig, PathSimulator, StockPath};
use pricer_models::rng::PricerRng;
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info};

use super::config::ScenarioConfig;
use super::error::ScenarioError;
use crate::hedging::{DeltaHedgeSimulator, HedgeHistory};
use crate::portfolio::{Portfolio, PortfolioSeries};

/// Output of one scenario run.
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioOutcome {
    /// Simulated underlying
    pub path: StockPath,
    /// Aggregated portfolio series on the path
    pub portfolio: PortfolioSeries,
    /// Hedge records on the path
    pub history: HedgeHistory,
}

/// Per-path tracking statistics of a Monte-Carlo batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchSummary {
    seeds: Vec<u64>,
    rms_errors: Vec<f64>,
    max_abs_errors: Vec<f64>,
}

impl BatchSummary {
    /// Seeds in input order.
    pub fn seeds(&self) -> &[u64] {
        &self.seeds
    }

    /// RMS tracking error of each path.
    pub fn rms_errors(&self) -> &[f64] {
        &self.rms_errors
    }

    /// Largest absolute tracking error of each path.
    pub fn max_abs_errors(&self) -> &[f64] {
        &self.max_abs_errors
    }

    /// Mean of the per-path RMS errors.
    pub fn mean_rms(&self) -> f64 {
        if self.rms_errors.is_empty() {
            return 0.0;
        }
        self.rms_errors.iter().sum::<f64>() / self.rms_errors.len() as f64
    }

    /// Largest per-path RMS error.
    pub fn max_rms(&self) -> f64 {
        self.rms_errors.iter().copied().fold(0.0, f64::max)
    }

    /// Number of paths.
    pub fn len(&self) -> usize {
        self.seeds.len()
    }

    /// True for an empty batch.
    pub fn is_empty(&self) -> bool {
        self.seeds.is_empty()
    }
}

/// Validated scenario ready to run.
///
/// # Examples
/// ```
/// use pricer_hedging::scenario::{ScenarioConfig, ScenarioRunner};
///
/// let runner = ScenarioRunner::new(ScenarioConfig::default()).unwrap();
/// let outcome = runner.run(42).unwrap();
/// assert_eq!(outcome.history.len(), outcome.path.len());
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    config: ScenarioConfig,
    simulator: PathSimulator,
    portfolio: Portfolio,
    hedger: DeltaHedgeSimulator,
}

impl ScenarioRunner {
    /// Validates `config` and prepares its components.
    ///
    /// # Errors
    /// `ScenarioError::Config` listing every validation failure.
    pub fn new(config: ScenarioConfig) -> Result<Self, ScenarioError> {
        config.validate()?;
        Ok(Self {
            simulator: PathSimulator::new(config.path)?,
            portfolio: config.portfolio()?,
            hedger: DeltaHedgeSimulator::new(config.hedge)?,
            config,
        })
    }

    /// Scenario configuration.
    pub fn config(&self) -> &ScenarioConfig {
        &self.config
    }

    /// Portfolio being hedged.
    pub fn portfolio(&self) -> &Portfolio {
        &self.portfolio
    }

    /// Runs the scenario on the path generated from `seed`.
    pub fn run(&self, seed: u64) -> Result<ScenarioOutcome, ScenarioError> {
        self.run_with_rng(&mut PricerRng::from_seed(seed))
    }

    /// Runs with the configured seed, or fresh entropy when there is none.
    pub fn run_configured(&self) -> Result<ScenarioOutcome, ScenarioError> {
        match self.config.seed {
            Some(seed) => self.run(seed),
            None => self.run_with_rng(&mut PricerRng::from_entropy()),
        }
    }

    /// Generates a path from `rng`, models the portfolio and hedges it.
    pub fn run_with_rng(&self, rng: &mut PricerRng) -> Result<ScenarioOutcome, ScenarioError> {
        let path = self.simulator.simulate(rng);
        let portfolio = self.portfolio.model(&path, self.config.day_count)?;
        let history = self.hedger.run(&path, &portfolio)?;

        info!(
            seed = ?rng.seed(),
            steps = path.len(),
            interval = self.config.hedge.rebalance_interval,
            rms = history.rms_tracking_error(),
            max_abs = history.max_abs_tracking_error(),
            "scenario run complete"
        );

        Ok(ScenarioOutcome {
            path,
            portfolio,
            history,
        })
    }

    /// Runs one independent path per seed in parallel.
    ///
    /// # Errors
    /// `ScenarioError::EmptyBatch` for no seeds, otherwise the first failing
    /// run's error.
    pub fn run_batch(&self, seeds: &[u64]) -> Result<BatchSummary, ScenarioError> {
        if seeds.is_empty() {
            return Err(ScenarioError::EmptyBatch);
        }

        let stats = seeds
            .par_iter()
            .map(|&seed| {
                self.run(seed).map(|o| {
                    (
                        o.history.rms_tracking_error(),
                        o.history.max_abs_tracking_error(),
                    )
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let (rms_errors, max_abs_errors): (Vec<f64>, Vec<f64>) = stats.into_iter().unzip();
        let summary = BatchSummary {
            seeds: seeds.to_vec(),
            rms_errors,
            max_abs_errors,
        };

        info!(
            paths = summary.len(),
            mean_rms = summary.mean_rms(),
            max_rms = summary.max_rms(),
            "scenario batch complete"
        );
        Ok(summary)
    }
}

/// Underlying path implied by an observed option quote.
#[derive(Debug, Clone, Serialize)]
pub struct ModelledStock {
    /// Volatility solved from the quote
    pub implied_volatility: f64,
    /// GBM path under (r, σ_iv)
    pub path: StockPath,
}

/// [`model_stock_from_quote_with`] using the default solver and one path
/// step per day.
pub fn model_stock_from_quote(
    quote: &QuoteInput,
    day_count: f64,
    rng: &mut PricerRng,
) -> Result<ModelledStock, ScenarioError> {
    model_stock_from_quote_with(&ImpliedVolatility::default(), quote, day_count, 1.0, rng)
}

/// Solves the implied volatility of `quote`, then simulates the underlying
/// under the risk-neutral measure, GBM(r, σ_iv), over the remaining life
/// N = τ · day_count.
///
/// # Errors
/// Implied volatility failures, or `Domain` when the horizon and
/// `time_step` do not form a valid grid.
///
/// # Examples
/// ```
/// use pricer_core::types::OptionType;
/// use pricer_hedging::scenario::model_stock_from_quote;
/// use pricer_models::analytical::{BlackScholes, QuoteInput};
/// use pricer_models::rng::PricerRng;
///
/// let price = BlackScholes::new(50.0, 70.0, 2.0, 0.05, 0.0, 0.07)
///     .unwrap()
///     .price(OptionType::Call);
/// let quote = QuoteInput {
///     option_type: OptionType::Call,
///     price,
///     spot: 50.0,
///     strike: 70.0,
///     expiry: 2.0,
///     rate: 0.05,
///     dividend_yield: 0.0,
/// };
///
/// let stock = model_stock_from_quote(&quote, 256.0, &mut PricerRng::from_seed(1)).unwrap();
/// assert!((stock.implied_volatility - 0.07).abs() < 1e-6);
/// assert_eq!(stock.path.len(), 513);
/// ```
pub fn model_stock_from_quote_with(
    solver: &ImpliedVolatility,
    quote: &QuoteInput,
    day_count: f64,
    time_step: f64,
    rng: &mut PricerRng,
) -> Result<ModelledStock, ScenarioError> {
    let implied_volatility = solver.solve(
        quote.option_type,
        quote.price,
        quote.spot,
        quote.strike,
        quote.expiry,
        quote.rate,
        quote.dividend_yield,
    )?;

    let horizon = quote.expiry * day_count;
    let config = PathConfig::new(horizon, quote.spot, quote.rate, implied_volatility, time_step)?;
    let (drift, volatility) = config.normalised();
    debug!(
        implied_volatility,
        horizon, drift, volatility, "modelling stock from quote"
    );

    let path = PathSimulator::new(config)?.simulate(rng);
    Ok(ModelledStock {
        implied_volatility,
        path,
    })
}
