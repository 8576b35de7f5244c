//! Geometric Brownian Motion path simulation.
//!
//! GBM is the fundamental model for asset price dynamics:
//! ```text
//! S(t) = S0 * exp((α' - σ'²/2) * t + σ' * W(t))
//! ```
//! where W is the scaled random walk from [`BrownianMotion`] and
//! α' = α/N, σ' = σ/√N are the annualised drift and volatility rescaled to
//! the simulation's unit of time (N units make up the horizon).
//!
//! ## Grid
//!
//! A path starts at the origin (0, S0) and then takes `floor(N/Δt)`
//! sequential increments, so its last point never lies past t = N. A ratio
//! within [`GRID_TOLERANCE`] of an integer counts as that integer.

use pricer_core::types::PricingError;
use tracing::debug;

use super::brownian::BrownianMotion;
use crate::rng::PricerRng;

/// Slack absorbed when N/Δt lands just below an integer, e.g. 512/0.1.
pub const GRID_TOLERANCE: f64 = 1e-9;

/// Largest increment count a path may take.
pub const MAX_STEPS: usize = u32::MAX as usize;

/// Rescales annualised drift and volatility to a horizon of `horizon` units.
///
/// Returns (α/N, σ/√N).
///
/// # Examples
/// ```
/// use pricer_models::models::normalise;
///
/// let (drift, vol) = normalise(100.0, 0.05, 0.10);
/// assert!((drift - 0.0005).abs() < 1e-15);
/// assert!((vol - 0.01).abs() < 1e-15);
/// ```
#[inline]
pub fn normalise(horizon: f64, drift: f64, volatility: f64) -> (f64, f64) {
    (drift / horizon, volatility / horizon.sqrt())
}

/// Path generation parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathConfig {
    /// Horizon N in simulation time units
    pub horizon: f64,
    /// Initial price S0
    pub spot: f64,
    /// Annualised drift α
    pub drift: f64,
    /// Annualised volatility σ
    pub volatility: f64,
    /// Time increment Δt
    pub time_step: f64,
}

impl PathConfig {
    /// Creates a validated configuration.
    ///
    /// # Errors
    /// `PricingError::Domain` unless all inputs are finite, N > 0, S0 > 0,
    /// σ ≥ 0, 0 < Δt ≤ N and N/Δt ≤ [`MAX_STEPS`].
    ///
    /// # Examples
    /// ```
    /// use pricer_models::models::PathConfig;
    ///
    /// assert!(PathConfig::new(512.0, 50.0, 0.05, 0.125, 0.1).is_ok());
    /// assert!(PathConfig::new(512.0, 50.0, 0.05, 0.125, 0.0).is_err());
    /// ```
    pub fn new(
        horizon: f64,
        spot: f64,
        drift: f64,
        volatility: f64,
        time_step: f64,
    ) -> Result<Self, PricingError> {
        let config = Self {
            horizon,
            spot,
            drift,
            volatility,
            time_step,
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks the invariants listed on [`PathConfig::new`].
    ///
    /// # Errors
    /// `PricingError::Domain` naming the first violated constraint.
    pub fn validate(&self) -> Result<(), PricingError> {
        let fields = [
            ("horizon", self.horizon),
            ("spot", self.spot),
            ("drift", self.drift),
            ("volatility", self.volatility),
            ("time_step", self.time_step),
        ];
        if let Some((name, value)) = fields.iter().find(|(_, v)| !v.is_finite()) {
            return Err(PricingError::domain(format!("{} must be finite, got {}", name, value)));
        }
        if self.horizon <= 0.0 {
            return Err(PricingError::domain(format!(
                "horizon must be positive, got {}",
                self.horizon
            )));
        }
        if self.spot <= 0.0 {
            return Err(PricingError::domain(format!(
                "spot must be positive, got {}",
                self.spot
            )));
        }
        if self.volatility < 0.0 {
            return Err(PricingError::domain(format!(
                "volatility must be non-negative, got {}",
                self.volatility
            )));
        }
        if self.time_step <= 0.0 || self.time_step > self.horizon {
            return Err(PricingError::domain(format!(
                "time step must lie in (0, {}], got {}",
                self.horizon, self.time_step
            )));
        }
        let ratio = self.grid_ratio();
        if !ratio.is_finite() || ratio > MAX_STEPS as f64 {
            return Err(PricingError::domain(format!(
                "horizon {} over time step {} gives more than {} steps",
                self.horizon, self.time_step, MAX_STEPS
            )));
        }
        Ok(())
    }

    /// Number of increments after the origin, `floor(N/Δt)`.
    #[inline]
    pub fn steps(&self) -> usize {
        self.grid_ratio() as usize
    }

    #[inline]
    fn grid_ratio(&self) -> f64 {
        (self.horizon / self.time_step + GRID_TOLERANCE).floor()
    }

    /// Per-unit (α', σ').
    #[inline]
    pub fn normalised(&self) -> (f64, f64) {
        normalise(self.horizon, self.drift, self.volatility)
    }
}

/// Immutable simulated price path.
///
/// `times()[0] == 0` and `prices()[0] == S0`; both vectors have
/// `config().steps() + 1` entries.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct StockPath {
    config: PathConfig,
    times: Vec<f64>,
    prices: Vec<f64>,
}

impl StockPath {
    /// Builds a path from explicit points, e.g. replayed market data.
    ///
    /// # Errors
    /// `PricingError::PreconditionViolation` when the vectors differ in
    /// length, are empty, times are not strictly increasing, or a price is
    /// not positive and finite.
    pub fn from_parts(
        config: PathConfig,
        times: Vec<f64>,
        prices: Vec<f64>,
    ) -> Result<Self, PricingError> {
        if times.len() != prices.len() {
            return Err(PricingError::precondition(format!(
                "path has {} times but {} prices",
                times.len(),
                prices.len()
            )));
        }
        if times.is_empty() {
            return Err(PricingError::precondition("path is empty"));
        }
        if times.iter().any(|t| !t.is_finite()) || times.windows(2).any(|w| w[1] <= w[0]) {
            return Err(PricingError::precondition("path times must be strictly increasing"));
        }
        if prices.iter().any(|p| !(p.is_finite() && *p > 0.0)) {
            return Err(PricingError::precondition("path prices must be positive and finite"));
        }
        Ok(Self {
            config,
            times,
            prices,
        })
    }

    /// Generating configuration.
    #[inline]
    pub fn config(&self) -> &PathConfig {
        &self.config
    }

    /// Δt of the generating configuration.
    #[inline]
    pub fn time_step(&self) -> f64 {
        self.config.time_step
    }

    /// Simulation times t_i.
    #[inline]
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Prices S(t_i).
    #[inline]
    pub fn prices(&self) -> &[f64] {
        &self.prices
    }

    /// (t, S) pairs in order.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.times.iter().copied().zip(self.prices.iter().copied())
    }

    /// Number of grid points including the origin.
    #[inline]
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Always false for a constructed path.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Last price on the path.
    pub fn terminal_price(&self) -> f64 {
        self.prices.last().copied().unwrap_or(self.config.spot)
    }
}

/// GBM path generator.
///
/// # Examples
/// ```
/// use pricer_models::models::{PathConfig, PathSimulator};
/// use pricer_models::rng::PricerRng;
///
/// let config = PathConfig::new(512.0, 50.0, 0.05, 0.125, 0.1).unwrap();
/// let simulator = PathSimulator::new(config).unwrap();
///
/// let path = simulator.simulate(&mut PricerRng::from_seed(42));
/// assert_eq!(path.len(), 5121);
/// assert_eq!(path.prices()[0], 50.0);
/// assert!((path.times()[5120] - 512.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone)]
pub struct PathSimulator {
    config: PathConfig,
    drift: f64,
    volatility: f64,
    walk: BrownianMotion,
}

impl PathSimulator {
    /// Creates a simulator for `config`.
    ///
    /// # Errors
    /// `PricingError::Domain` if the configuration is invalid.
    pub fn new(config: PathConfig) -> Result<Self, PricingError> {
        config.validate()?;
        let (drift, volatility) = config.normalised();
        Ok(Self {
            config,
            drift,
            volatility,
            walk: BrownianMotion::new(config.time_step)?,
        })
    }

    /// Generating configuration.
    pub fn config(&self) -> &PathConfig {
        &self.config
    }

    /// Generates one path, consuming fresh randomness from `rng`.
    pub fn simulate(&self, rng: &mut PricerRng) -> StockPath {
        let steps = self.config.steps();
        let mut walk = self.walk.clone();
        walk.reset();

        let mut times = Vec::with_capacity(steps + 1);
        let mut prices = Vec::with_capacity(steps + 1);
        times.push(0.0);
        prices.push(self.config.spot);

        let drift = self.drift - 0.5 * self.volatility * self.volatility;
        for _ in 0..steps {
            let (t, w) = walk.step(rng);
            times.push(t);
            prices.push(self.config.spot * (drift * t + self.volatility * w).exp());
        }

        debug!(
            steps,
            seed = ?rng.seed(),
            terminal = prices[steps],
            "simulated stock path"
        );

        StockPath {
            config: self.config,
            times,
            prices,
        }
    }
}
