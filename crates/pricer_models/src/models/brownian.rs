//! Scaled symmetric random walk.
//!
//! A discrete approximation to standard Brownian motion: every step
//! advances time by Δt and moves the walk by +√Δt or -√Δt, each with
//! probability `p` and `1 - p` (0.5 by default). As Δt → 0 the walk
//! converges in distribution to W(t).

use pricer_core::types::PricingError;
use rand_distr::Bernoulli;

use crate::rng::PricerRng;

/// Default up-move probability.
pub const DEFAULT_PROBABILITY: f64 = 0.5;

/// Stateful scaled random walk.
///
/// # Examples
/// ```
/// use pricer_models::models::BrownianMotion;
/// use pricer_models::rng::PricerRng;
///
/// let mut rng = PricerRng::from_seed(1);
/// let mut bm = BrownianMotion::new(0.25).unwrap();
///
/// let (t, w) = bm.step(&mut rng);
/// assert_eq!(t, 0.25);
/// assert_eq!(w.abs(), 0.5);
/// ```
#[derive(Debug, Clone)]
pub struct BrownianMotion {
    time_step: f64,
    step_size: f64,
    probability: f64,
    coin: Bernoulli,
    time: f64,
    value: f64,
}

impl BrownianMotion {
    /// Creates a symmetric walk with step `time_step`, starting at (0, 0).
    ///
    /// # Errors
    /// `PricingError::Domain` unless `time_step` is positive and finite.
    pub fn new(time_step: f64) -> Result<Self, PricingError> {
        Self::with_probability(time_step, DEFAULT_PROBABILITY)
    }

    /// Creates a walk whose up-move has probability `probability`.
    ///
    /// # Errors
    /// `PricingError::Domain` unless `time_step` is positive and finite and
    /// `probability` lies in [0, 1].
    pub fn with_probability(time_step: f64, probability: f64) -> Result<Self, PricingError> {
        if !(time_step.is_finite() && time_step > 0.0) {
            return Err(PricingError::domain(format!(
                "time step must be positive, got {}",
                time_step
            )));
        }
        let coin = Bernoulli::new(probability).map_err(|e| {
            PricingError::domain(format!("invalid up-move probability {}: {}", probability, e))
        })?;

        Ok(Self {
            time_step,
            step_size: time_step.sqrt(),
            probability,
            coin,
            time: 0.0,
            value: 0.0,
        })
    }

    /// Returns Δt.
    #[inline]
    pub fn time_step(&self) -> f64 {
        self.time_step
    }

    /// Returns the up-move probability.
    #[inline]
    pub fn probability(&self) -> f64 {
        self.probability
    }

    /// Current (t, W) state.
    #[inline]
    pub fn state(&self) -> (f64, f64) {
        (self.time, self.value)
    }

    /// Advances one step and returns the new (t, W).
    pub fn step(&mut self, rng: &mut PricerRng) -> (f64, f64) {
        let up = rng.sample(&self.coin);
        self.time += self.time_step;
        self.value += if up { self.step_size } else { -self.step_size };
        (self.time, self.value)
    }

    /// Advances `steps` times, returning every visited (t, W).
    pub fn sample(&mut self, rng: &mut PricerRng, steps: usize) -> Vec<(f64, f64)> {
        (0..steps).map(|_| self.step(rng)).collect()
    }

    /// Returns the walk to (0, 0).
    pub fn reset(&mut self) {
        self.time = 0.0;
        self.value = 0.0;
    }
}
