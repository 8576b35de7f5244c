//! Implied volatility by Newton-Raphson on the Black-Scholes price.
//!
//! Starting point is the Brenner-Subrahmanyam approximation
//! σ₀ = √(2π/τ)·(C/S); iteration uses the analytic vega as derivative:
//!
//! σₙ₊₁ = σₙ - (BS(σₙ) - C) / vega(σₙ)
//!
//! When vega vanishes numerically the solver takes a fixed increment
//! towards the root instead, doubling σ while no upper bound on the root
//! is known. The iteration is always bounded by
//! `SolverConfig::max_iterations`.

use std::cell::Cell;
use std::f64::consts::PI;

use pricer_core::math::solvers::{NewtonRaphsonSolver, SolverConfig};
use pricer_core::types::{OptionType, PricingError};
use rayon::prelude::*;
use tracing::{debug, warn};

use super::black_scholes::BlackScholes;

/// Observed option quote to invert.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QuoteInput {
    /// Call or put
    pub option_type: OptionType,
    /// Observed premium C
    pub price: f64,
    /// Underlying price S
    pub spot: f64,
    /// Strike K
    pub strike: f64,
    /// Time to expiry τ in years
    pub expiry: f64,
    /// Risk-free rate r
    pub rate: f64,
    /// Dividend yield q
    pub dividend_yield: f64,
}

/// Implied volatility solver.
///
/// # Examples
/// ```
/// use pricer_core::types::OptionType;
/// use pricer_models::analytical::{BlackScholes, ImpliedVolatility};
///
/// let sigma = 0.11435117637;
/// let price = BlackScholes::new(42.0, 70.0, 5.0, 0.05, 0.0, sigma)
///     .unwrap()
///     .price(OptionType::Call);
///
/// let iv = ImpliedVolatility::default()
///     .solve(OptionType::Call, price, 42.0, 70.0, 5.0, 0.05, 0.0)
///     .unwrap();
/// assert!((iv - sigma).abs() < 1e-6);
/// ```
#[derive(Debug, Clone)]
pub struct ImpliedVolatility {
    solver: NewtonRaphsonSolver<f64>,
    fallback_step: f64,
}

impl Default for ImpliedVolatility {
    /// Tolerance 1e-9 on the price, 100 iterations, fallback increment
    /// tolerance / 100.
    fn default() -> Self {
        Self::new(SolverConfig::default())
    }
}

impl ImpliedVolatility {
    /// Creates a solver; the fallback increment is `tolerance / 100`.
    pub fn new(config: SolverConfig<f64>) -> Self {
        Self {
            fallback_step: config.tolerance / 100.0,
            solver: NewtonRaphsonSolver::new(config),
        }
    }

    /// Overrides the fixed increment used when vega is zero.
    ///
    /// # Errors
    /// `PricingError::Domain` unless `step` is positive and finite.
    pub fn with_fallback_step(mut self, step: f64) -> Result<Self, PricingError> {
        if !(step.is_finite() && step > 0.0) {
            return Err(PricingError::domain(format!(
                "fallback step must be positive, got {}",
                step
            )));
        }
        self.fallback_step = step;
        Ok(self)
    }

    /// Returns the solver configuration.
    pub fn config(&self) -> &SolverConfig<f64> {
        self.solver.config()
    }

    /// Returns the fixed increment used when vega is zero.
    pub fn fallback_step(&self) -> f64 {
        self.fallback_step
    }

    /// Brenner-Subrahmanyam estimate σ₀ = √(2π/τ)·(C/S).
    ///
    /// # Errors
    /// `PricingError::Domain` unless τ > 0, S > 0 and C > 0.
    ///
    /// # Examples
    /// ```
    /// use pricer_models::analytical::ImpliedVolatility;
    ///
    /// let guess = ImpliedVolatility::initial_guess(6.04, 50.0, 1.0).unwrap();
    /// assert!((guess - 0.3028).abs() < 1e-3);
    /// assert!(ImpliedVolatility::initial_guess(6.04, 50.0, 0.0).is_err());
    /// ```
    pub fn initial_guess(price: f64, spot: f64, expiry: f64) -> Result<f64, PricingError> {
        if !(expiry.is_finite() && expiry > 0.0) {
            return Err(PricingError::domain(format!(
                "time to expiry must be positive, got {}",
                expiry
            )));
        }
        if !(spot.is_finite() && spot > 0.0) {
            return Err(PricingError::domain(format!("spot must be positive, got {}", spot)));
        }
        if !(price.is_finite() && price > 0.0) {
            return Err(PricingError::domain(format!("price must be positive, got {}", price)));
        }
        Ok((2.0 * PI / expiry).sqrt() * (price / spot))
    }

    /// Solves BS(σ) = `price` for σ.
    ///
    /// # Errors
    /// - `PricingError::Domain` for invalid inputs or a price outside the
    ///   no-arbitrage band (intrinsic, upper bound)
    /// - `PricingError::NonConvergence` when the iteration cap is reached
    #[allow(clippy::too_many_arguments)]
    pub fn solve(
        &self,
        option_type: OptionType,
        price: f64,
        spot: f64,
        strike: f64,
        expiry: f64,
        rate: f64,
        dividend_yield: f64,
    ) -> Result<f64, PricingError> {
        let sigma0 = Self::initial_guess(price, spot, expiry)?;
        let base = BlackScholes::new(spot, strike, expiry, rate, dividend_yield, sigma0)?;
        check_arbitrage_bounds(&base, option_type, price)?;

        let flat_vega = Cell::new(0_usize);
        let residual = |sigma: f64| match base.with_volatility(sigma) {
            Ok(bs) => bs.price(option_type) - price,
            Err(_) => f64::NAN,
        };
        let vega = |sigma: f64| {
            let v = base
                .with_volatility(sigma)
                .map_or(0.0, |bs| bs.vega(option_type));
            if v == 0.0 || !(v.is_finite()) {
                flat_vega.set(flat_vega.get() + 1);
            }
            v
        };

        let result = self
            .solver
            .find_root_monotone(residual, vega, sigma0, self.fallback_step, 0.0);

        if flat_vega.get() > 0 {
            warn!(
                steps = flat_vega.get(),
                increment = self.fallback_step,
                "vega vanished; fixed-increment steps taken"
            );
        }

        match result {
            Ok(sigma) => {
                debug!(%option_type, price, sigma0, sigma, "implied volatility solved");
                Ok(sigma)
            }
            Err(err) => {
                debug!(%option_type, price, sigma0, error = %err, "implied volatility failed");
                Err(err.into())
            }
        }
    }

    /// Solves a batch of independent quotes in parallel, preserving order.
    ///
    /// # Examples
    /// ```
    /// use pricer_core::types::OptionType;
    /// use pricer_models::analytical::{ImpliedVolatility, QuoteInput};
    ///
    /// let quote = QuoteInput {
    ///     option_type: OptionType::Call,
    ///     price: 6.04,
    ///     spot: 50.0,
    ///     strike: 50.0,
    ///     expiry: 1.0,
    ///     rate: 0.05,
    ///     dividend_yield: 0.0,
    /// };
    /// let bad = QuoteInput { price: -1.0, ..quote };
    ///
    /// let out = ImpliedVolatility::default().solve_batch(&[quote, bad]);
    /// assert!((out[0].as_ref().unwrap() - 0.2).abs() < 1e-3);
    /// assert!(out[1].is_err());
    /// ```
    pub fn solve_batch(&self, quotes: &[QuoteInput]) -> Vec<Result<f64, PricingError>> {
        quotes
            .par_iter()
            .map(|q| {
                self.solve(
                    q.option_type,
                    q.price,
                    q.spot,
                    q.strike,
                    q.expiry,
                    q.rate,
                    q.dividend_yield,
                )
            })
            .collect()
    }
}

fn check_arbitrage_bounds(
    bs: &BlackScholes,
    option_type: OptionType,
    price: f64,
) -> Result<(), PricingError> {
    let forward_spot = bs.spot() * (-bs.dividend_yield() * bs.expiry()).exp();
    let discounted_strike = bs.strike() * (-bs.rate() * bs.expiry()).exp();
    let (lower, upper) = match option_type {
        OptionType::Call => ((forward_spot - discounted_strike).max(0.0), forward_spot),
        OptionType::Put => ((discounted_strike - forward_spot).max(0.0), discounted_strike),
    };
    if price <= lower || price >= upper {
        return Err(PricingError::domain(format!(
            "{} price {} outside no-arbitrage bounds ({}, {})",
            option_type, price, lower, upper
        )));
    }
    Ok(())
}
