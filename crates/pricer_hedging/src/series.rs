//! Per-contract price and Greek series along a stock path.
//!
//! Every grid point (t, S_t) of a [`StockPath`] is converted to an
//! annualised time to expiry τ = T - t / day_count and priced with the
//! Black-Scholes engine. The resulting vectors are index-aligned with the
//! path.

use std::fmt;

use pricer_core::types::PricingError;
use pricer_models::instruments::OptionContract;
use pricer_models::models::StockPath;
use serde::{Deserialize, Serialize};

/// Simulation time units per year.
pub const DEFAULT_DAY_COUNT: f64 = 256.0;

/// Times to expiry within this many years of zero are treated as expiry.
pub const EXPIRY_SNAP: f64 = 1e-9;

/// Tracked output field of a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GreekField {
    /// Option premium
    Price,
    /// ∂V/∂S
    Delta,
    /// ∂²V/∂S²
    Gamma,
    /// ∂V/∂σ
    Vega,
    /// ∂V/∂t
    Theta,
    /// ∂V/∂r
    Rho,
}

impl GreekField {
    /// All tracked fields in output order.
    pub const ALL: [GreekField; 6] = [
        GreekField::Price,
        GreekField::Delta,
        GreekField::Gamma,
        GreekField::Vega,
        GreekField::Theta,
        GreekField::Rho,
    ];

    /// Lowercase field name.
    pub fn name(&self) -> &'static str {
        match self {
            GreekField::Price => "price",
            GreekField::Delta => "delta",
            GreekField::Gamma => "gamma",
            GreekField::Vega => "vega",
            GreekField::Theta => "theta",
            GreekField::Rho => "rho",
        }
    }
}

impl fmt::Display for GreekField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Converts simulation time `t` to years left until `maturity`.
///
/// Values within [`EXPIRY_SNAP`] of zero snap to exactly zero so the
/// expiry branch of the engine applies at the last grid point.
///
/// # Examples
/// ```
/// use pricer_hedging::series::time_to_expiry;
///
/// assert_eq!(time_to_expiry(2.0, 256.0, 256.0), 1.0);
/// assert_eq!(time_to_expiry(2.0, 512.0 + 1e-11, 256.0), 0.0);
/// ```
#[inline]
pub fn time_to_expiry(maturity: f64, t: f64, day_count: f64) -> f64 {
    let tau = maturity - t / day_count;
    if tau.abs() <= EXPIRY_SNAP {
        0.0
    } else {
        tau
    }
}

pub(crate) fn check_day_count(day_count: f64) -> Result<(), PricingError> {
    if day_count.is_finite() && day_count > 0.0 {
        Ok(())
    } else {
        Err(PricingError::domain(format!(
            "day count must be positive, got {}",
            day_count
        )))
    }
}

/// Price and Greeks of one contract over a path.
///
/// # Examples
/// ```
/// use pricer_core::types::{OptionType, Side};
/// use pricer_hedging::series::{GreekField, OptionSeries};
/// use pricer_models::instruments::OptionContract;
/// use pricer_models::models::{PathConfig, PathSimulator};
/// use pricer_models::rng::PricerRng;
///
/// let config = PathConfig::new(512.0, 50.0, 0.05, 0.125, 1.0).unwrap();
/// let path = PathSimulator::new(config).unwrap().simulate(&mut PricerRng::from_seed(3));
/// let call = OptionContract::new(OptionType::Call, Side::Long, 50.0, 2.0, 0.05, 0.125).unwrap();
///
/// let series = OptionSeries::model(&call, &path, 256.0).unwrap();
/// assert_eq!(series.len(), path.len());
///
/// let last = path.terminal_price();
/// assert_eq!(series.field(GreekField::Price)[series.len() - 1], (last - 50.0).max(0.0));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptionSeries {
    contract: OptionContract,
    times: Vec<f64>,
    price: Vec<f64>,
    delta: Vec<f64>,
    gamma: Vec<f64>,
    vega: Vec<f64>,
    theta: Vec<f64>,
    rho: Vec<f64>,
}

impl OptionSeries {
    /// Evaluates `contract` at every point of `path`.
    ///
    /// # Errors
    /// `PricingError::Domain` for a non-positive day count or when the engine
    /// rejects a grid point. No partial series is returned.
    pub fn model(
        contract: &OptionContract,
        path: &StockPath,
        day_count: f64,
    ) -> Result<Self, PricingError> {
        check_day_count(day_count)?;

        let n = path.len();
        let mut series = Self {
            contract: *contract,
            times: Vec::with_capacity(n),
            price: Vec::with_capacity(n),
            delta: Vec::with_capacity(n),
            gamma: Vec::with_capacity(n),
            vega: Vec::with_capacity(n),
            theta: Vec::with_capacity(n),
            rho: Vec::with_capacity(n),
        };

        let option_type = contract.option_type();
        for (t, spot) in path.points() {
            let tau = time_to_expiry(contract.maturity(), t, day_count);
            let bs = contract.engine(spot, tau)?;
            series.times.push(t);
            series.price.push(bs.price(option_type));
            series.delta.push(bs.delta(option_type));
            series.gamma.push(bs.gamma(option_type));
            series.vega.push(bs.vega(option_type));
            series.theta.push(bs.theta(option_type));
            series.rho.push(bs.rho(option_type));
        }

        Ok(series)
    }

    /// Contract the series was evaluated for.
    pub fn contract(&self) -> &OptionContract {
        &self.contract
    }

    /// Path times.
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Values of `field` at every grid point.
    pub fn field(&self, field: GreekField) -> &[f64] {
        match field {
            GreekField::Price => &self.price,
            GreekField::Delta => &self.delta,
            GreekField::Gamma => &self.gamma,
            GreekField::Vega => &self.vega,
            GreekField::Theta => &self.theta,
            GreekField::Rho => &self.rho,
        }
    }

    /// Premium series.
    pub fn price(&self) -> &[f64] {
        &self.price
    }

    /// Delta series.
    pub fn delta(&self) -> &[f64] {
        &self.delta
    }

    /// Number of grid points.
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// True for a series over an empty grid.
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pricer_core::types::{OptionType, Side};
    use pricer_models::models::{PathConfig, PathSimulator};
    use pricer_models::rng::PricerRng;

    fn path(seed: u64) -> StockPath {
        let config = PathConfig::new(512.0, 50.0, 0.05, 0.125, 0.5).unwrap();
        PathSimulator::new(config)
            .unwrap()
            .simulate(&mut PricerRng::from_seed(seed))
    }

    fn call() -> OptionContract {
        OptionContract::new(OptionType::Call, Side::Long, 50.0, 2.0, 0.05, 0.125).unwrap()
    }

    // ==========================================================
    // time_to_expiry
    // ==========================================================

    #[test]
    fn test_time_to_expiry_snaps_near_zero() {
        assert_eq!(time_to_expiry(1.0, 256.0 - 1e-8, 256.0), 0.0);
        assert_eq!(time_to_expiry(1.0, 256.0 + 1e-8, 256.0), 0.0);
        assert_relative_eq!(time_to_expiry(1.0, 128.0, 256.0), 0.5, epsilon = 1e-15);
        assert!(time_to_expiry(1.0, 300.0, 256.0) < 0.0);
    }

    // ==========================================================
    // model
    // ==========================================================

    #[test]
    fn test_series_aligned_with_path() {
        let p = path(11);
        let s = OptionSeries::model(&call(), &p, DEFAULT_DAY_COUNT).unwrap();
        assert_eq!(s.len(), p.len());
        assert_eq!(s.times(), p.times());
        for field in GreekField::ALL {
            assert_eq!(s.field(field).len(), p.len(), "{}", field);
        }
    }

    #[test]
    fn test_series_matches_engine_pointwise() {
        let p = path(12);
        let c = call();
        let s = OptionSeries::model(&c, &p, DEFAULT_DAY_COUNT).unwrap();
        for i in [0, 100, 500, 1000] {
            let tau = 2.0 - p.times()[i] / 256.0;
            let bs = c.engine(p.prices()[i], tau).unwrap();
            assert_relative_eq!(s.price()[i], bs.price(OptionType::Call), epsilon = 1e-12);
            assert_relative_eq!(s.delta()[i], bs.delta(OptionType::Call), epsilon = 1e-12);
            assert_relative_eq!(
                s.field(GreekField::Vega)[i],
                bs.vega(OptionType::Call),
                epsilon = 1e-12
            );
        }
    }

    #[test]
    fn test_terminal_point_uses_expiry_values() {
        let p = path(13);
        let s = OptionSeries::model(&call(), &p, DEFAULT_DAY_COUNT).unwrap();
        let last = s.len() - 1;
        let spot = p.terminal_price();
        assert_eq!(s.price()[last], (spot - 50.0).max(0.0));
        assert_eq!(s.field(GreekField::Gamma)[last], 0.0);
        assert_eq!(s.field(GreekField::Theta)[last], 0.0);
        assert!([0.0, 0.5, 1.0].contains(&s.delta()[last]));
    }

    #[test]
    fn test_rejects_bad_day_count() {
        let p = path(14);
        assert!(matches!(
            OptionSeries::model(&call(), &p, 0.0),
            Err(PricingError::Domain(_))
        ));
        assert!(OptionSeries::model(&call(), &p, f64::NAN).is_err());
    }

    #[test]
    fn test_field_display() {
        assert_eq!(GreekField::Theta.to_string(), "theta");
        assert_eq!(GreekField::ALL.len(), 6);
    }
}
