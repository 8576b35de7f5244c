//! Discrete delta hedging of a portfolio along a stock path.
//!
//! At every `rebalance_interval`-th grid index the hedge is reset to
//! `portfolio.delta[i]` shares with the remainder of the portfolio value in
//! the bank:
//!
//! ```text
//! shares = Δ_i
//! bank   = V_i - Δ_i · S_i
//! ```
//!
//! Every index, rebalance or not, values the hedge at the current spot and
//! records the tracking error `V_i - (shares · S_i + bank_leg)`.
//!
//! Two bank accrual conventions are supported, see [`AccrualConvention`].

use pricer_core::types::PricingError;
use pricer_models::models::StockPath;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::portfolio::PortfolioSeries;
use crate::series::{check_day_count, DEFAULT_DAY_COUNT};

/// How the bank balance grows between rebalances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccrualConvention {
    /// Balance compounds continuously over the steps elapsed since the last
    /// rebalance: `bank · exp(rate · k · Δt / day_count)`.
    #[default]
    Compounding,
    /// Balance at the last rebalance times a single step's growth factor,
    /// `bank · exp(rate · Δt / day_count)`, at every index.
    SingleStep,
}

/// Hedge rebalancing and bank accrual parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HedgeConfig {
    /// Rebalance every this many grid indices
    pub rebalance_interval: usize,
    /// Continuous rate the bank accrues at
    pub accrual_rate: f64,
    /// Accrual convention
    #[serde(default)]
    pub accrual: AccrualConvention,
    /// Path time units per year for the accrual
    #[serde(default = "default_day_count")]
    pub day_count: f64,
}

fn default_day_count() -> f64 {
    DEFAULT_DAY_COUNT
}

impl HedgeConfig {
    /// Bank compounds at the risk-free `rate`, annualised with the default
    /// day count.
    ///
    /// # Examples
    /// ```
    /// use pricer_hedging::hedging::{AccrualConvention, HedgeConfig};
    ///
    /// let config = HedgeConfig::risk_free(10, 0.05);
    /// assert_eq!(config.accrual, AccrualConvention::Compounding);
    /// assert_eq!(config.day_count, 256.0);
    /// ```
    pub fn risk_free(rebalance_interval: usize, rate: f64) -> Self {
        Self {
            rebalance_interval,
            accrual_rate: rate,
            accrual: AccrualConvention::Compounding,
            day_count: DEFAULT_DAY_COUNT,
        }
    }

    /// Bank grows by `exp(volatility · Δt)` in raw path time units, one step
    /// at a time.
    ///
    /// `volatility` is normally the per-unit σ' of the path.
    pub fn volatility_accrual(rebalance_interval: usize, volatility: f64) -> Self {
        Self {
            rebalance_interval,
            accrual_rate: volatility,
            accrual: AccrualConvention::SingleStep,
            day_count: 1.0,
        }
    }

    /// Replaces the accrual day count.
    pub fn with_day_count(mut self, day_count: f64) -> Self {
        self.day_count = day_count;
        self
    }

    /// Checks the configuration.
    ///
    /// # Errors
    /// `PricingError::Domain` for a zero interval, a non-finite rate or a
    /// non-positive day count.
    pub fn validate(&self) -> Result<(), PricingError> {
        if self.rebalance_interval == 0 {
            return Err(PricingError::domain("rebalance interval must be at least 1"));
        }
        if !self.accrual_rate.is_finite() {
            return Err(PricingError::domain(format!(
                "accrual rate must be finite, got {}",
                self.accrual_rate
            )));
        }
        check_day_count(self.day_count)
    }

    /// Log growth of the bank over one step of length `time_step`.
    #[inline]
    pub fn step_log_growth(&self, time_step: f64) -> f64 {
        self.accrual_rate * time_step / self.day_count
    }
}

/// Hedge valuation at one grid index.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HedgeRecord {
    /// Path time t_i
    pub time: f64,
    /// Underlying leg plus bank leg
    pub hedge_value: f64,
    /// shares · S_i
    pub underlying_leg: f64,
    /// Accrued bank balance
    pub bank_leg: f64,
    /// Portfolio value minus hedge value
    pub tracking_error: f64,
}

/// Mutable hedge position carried from one index to the next.
#[derive(Debug, Clone, PartialEq)]
pub struct HedgeState {
    shares: f64,
    bank: f64,
    rebalance_interval: usize,
    steps_since_rebalance: usize,
}

impl HedgeState {
    /// Flat position that rebalances every `rebalance_interval` indices.
    ///
    /// # Errors
    /// `PricingError::Domain` if `rebalance_interval` is zero.
    pub fn new(rebalance_interval: usize) -> Result<Self, PricingError> {
        if rebalance_interval == 0 {
            return Err(PricingError::domain("rebalance interval must be at least 1"));
        }
        Ok(Self {
            shares: 0.0,
            bank: 0.0,
            rebalance_interval,
            steps_since_rebalance: 0,
        })
    }

    /// Shares of the underlying held.
    #[inline]
    pub fn shares(&self) -> f64 {
        self.shares
    }

    /// Bank balance fixed at the last rebalance.
    #[inline]
    pub fn bank(&self) -> f64 {
        self.bank
    }

    /// Rebalancing period in grid indices.
    #[inline]
    pub fn rebalance_interval(&self) -> usize {
        self.rebalance_interval
    }

    /// True when index `i` is a rebalance point.
    #[inline]
    pub fn is_rebalance(&self, i: usize) -> bool {
        i % self.rebalance_interval == 0
    }

    /// Advances the state to index `i` and values the hedge there.
    ///
    /// `spot`, `price` and `delta` are the underlying price and the
    /// portfolio value and delta at index `i`.
    ///
    /// # Examples
    /// ```
    /// use pricer_hedging::hedging::{AccrualConvention, HedgeState};
    ///
    /// let mut state = HedgeState::new(2).unwrap();
    /// let r0 = state.step(0, 0.0, 100.0, 10.0, 0.5, 0.0, AccrualConvention::Compounding);
    /// assert_eq!(state.shares(), 0.5);
    /// assert_eq!(state.bank(), -40.0);
    /// assert_eq!(r0.tracking_error, 0.0);
    ///
    /// // no rebalance at index 1: the hedge keeps 0.5 shares
    /// let r1 = state.step(1, 1.0, 102.0, 11.5, 0.6, 0.0, AccrualConvention::Compounding);
    /// assert_eq!(r1.underlying_leg, 51.0);
    /// assert_eq!(r1.tracking_error, 11.5 - 11.0);
    /// ```
    #[allow(clippy::too_many_arguments)]
    pub fn step(
        &mut self,
        i: usize,
        time: f64,
        spot: f64,
        price: f64,
        delta: f64,
        step_log_growth: f64,
        accrual: AccrualConvention,
    ) -> HedgeRecord {
        if self.is_rebalance(i) {
            self.shares = delta;
            self.bank = price - delta * spot;
            self.steps_since_rebalance = 0;
        } else {
            self.steps_since_rebalance += 1;
        }

        let underlying_leg = self.shares * spot;
        let bank_leg = match accrual {
            AccrualConvention::Compounding => {
                self.bank * (step_log_growth * self.steps_since_rebalance as f64).exp()
            }
            AccrualConvention::SingleStep => self.bank * step_log_growth.exp(),
        };
        let hedge_value = underlying_leg + bank_leg;

        HedgeRecord {
            time,
            hedge_value,
            underlying_leg,
            bank_leg,
            tracking_error: price - hedge_value,
        }
    }
}

/// Full hedge run, one record per grid index.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HedgeHistory {
    records: Vec<HedgeRecord>,
    rebalance_interval: usize,
}

impl HedgeHistory {
    /// Records in grid order.
    pub fn records(&self) -> &[HedgeRecord] {
        &self.records
    }

    /// Tracking error per index.
    pub fn tracking_errors(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.tracking_error).collect()
    }

    /// Root mean square of the tracking errors; 0 for an empty history.
    pub fn rms_tracking_error(&self) -> f64 {
        if self.records.is_empty() {
            return 0.0;
        }
        let sum_sq: f64 = self
            .records
            .iter()
            .map(|r| r.tracking_error * r.tracking_error)
            .sum();
        (sum_sq / self.records.len() as f64).sqrt()
    }

    /// Largest absolute tracking error; 0 for an empty history.
    pub fn max_abs_tracking_error(&self) -> f64 {
        self.records
            .iter()
            .map(|r| r.tracking_error.abs())
            .fold(0.0, f64::max)
    }

    /// Record at the last grid index.
    pub fn final_record(&self) -> Option<&HedgeRecord> {
        self.records.last()
    }

    /// Number of indices at which the hedge was reset.
    pub fn rebalance_count(&self) -> usize {
        self.records.len().div_ceil(self.rebalance_interval)
    }

    /// Rebalancing period used for the run.
    pub fn rebalance_interval(&self) -> usize {
        self.rebalance_interval
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when no index was simulated.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Runs a [`HedgeState`] over a path and its portfolio series.
///
/// # Examples
/// ```
/// use pricer_core::types::{OptionType, Side};
/// use pricer_hedging::hedging::{DeltaHedgeSimulator, HedgeConfig};
/// use pricer_hedging::portfolio::{Portfolio, Position};
/// use pricer_models::instruments::OptionContract;
/// use pricer_models::models::{PathConfig, PathSimulator};
/// use pricer_models::rng::PricerRng;
///
/// let config = PathConfig::new(512.0, 50.0, 0.05, 0.125, 0.1).unwrap();
/// let path = PathSimulator::new(config).unwrap().simulate(&mut PricerRng::from_seed(1));
/// let call = OptionContract::new(OptionType::Call, Side::Long, 50.0, 2.0, 0.05, 0.125).unwrap();
/// let series = Portfolio::new(vec![Position::long(call)]).unwrap().model(&path, 256.0).unwrap();
///
/// let simulator = DeltaHedgeSimulator::new(HedgeConfig::risk_free(1, 0.05)).unwrap();
/// let history = simulator.run(&path, &series).unwrap();
/// assert_eq!(history.len(), path.len());
/// assert!(history.rms_tracking_error() < 1e-9);
/// ```
#[derive(Debug, Clone)]
pub struct DeltaHedgeSimulator {
    config: HedgeConfig,
}

impl DeltaHedgeSimulator {
    /// Creates a simulator.
    ///
    /// # Errors
    /// `PricingError::Domain` if `config` is invalid.
    pub fn new(config: HedgeConfig) -> Result<Self, PricingError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Hedge configuration.
    pub fn config(&self) -> &HedgeConfig {
        &self.config
    }

    /// Hedges `portfolio` along `path`, index by index.
    ///
    /// # Errors
    /// `PricingError::PreconditionViolation` when the portfolio series was
    /// not evaluated on the grid of `path`.
    pub fn run(
        &self,
        path: &StockPath,
        portfolio: &PortfolioSeries,
    ) -> Result<HedgeHistory, PricingError> {
        if path.len() != portfolio.len() {
            return Err(PricingError::precondition(format!(
                "path has {} points but portfolio series has {}",
                path.len(),
                portfolio.len()
            )));
        }
        if let Some(i) = path
            .times()
            .iter()
            .zip(portfolio.times())
            .position(|(a, b)| a != b)
        {
            return Err(PricingError::precondition(format!(
                "portfolio time grid differs from path at index {}",
                i
            )));
        }

        let mut state = HedgeState::new(self.config.rebalance_interval)?;
        let growth = self.config.step_log_growth(path.time_step());
        let records: Vec<HedgeRecord> = path
            .points()
            .zip(portfolio.price().iter().zip(portfolio.delta()))
            .enumerate()
            .map(|(i, ((t, spot), (&price, &delta)))| {
                state.step(i, t, spot, price, delta, growth, self.config.accrual)
            })
            .collect();

        let history = HedgeHistory {
            records,
            rebalance_interval: self.config.rebalance_interval,
        };
        debug!(
            points = history.len(),
            interval = self.config.rebalance_interval,
            accrual = ?self.config.accrual,
            rms = history.rms_tracking_error(),
            "delta hedge simulated"
        );
        Ok(history)
    }
}
