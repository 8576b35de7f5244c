//! Strategy profiles across spot, volatility and time to expiry.
//!
//! A strategy is any slice of [`Position`]s. Spot profiles evaluate the
//! signed sum of the positions at a grid of spots, either at inception
//! (full time to maturity left) or at expiry (payoff).

use pricer_core::types::PricingError;
use pricer_models::analytical::BlackScholes;
use pricer_models::instruments::OptionContract;
use pricer_models::models::StockPath;

use crate::portfolio::Position;
use crate::series::{GreekField, OptionSeries};

/// Integer spots `1, 2, ..., 2 · max_strike`.
///
/// # Examples
/// ```
/// use pricer_hedging::profile::spot_grid;
///
/// let grid = spot_grid(3.0);
/// assert_eq!(grid, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
/// ```
pub fn spot_grid(max_strike: f64) -> Vec<f64> {
    let top = (2.0 * max_strike).round();
    if !(top.is_finite() && top >= 1.0) {
        return Vec::new();
    }
    (1..=top as usize).map(|s| s as f64).collect()
}

/// Largest strike in `positions`, for sizing a [`spot_grid`].
pub fn max_strike(positions: &[Position]) -> Option<f64> {
    positions
        .iter()
        .map(|p| p.contract().strike())
        .fold(None, |acc, k| Some(acc.map_or(k, |m: f64| m.max(k))))
}

fn field_value(bs: &BlackScholes, contract: &OptionContract, field: GreekField) -> f64 {
    let option_type = contract.option_type();
    match field {
        GreekField::Price => bs.price(option_type),
        GreekField::Delta => bs.delta(option_type),
        GreekField::Gamma => bs.gamma(option_type),
        GreekField::Vega => bs.vega(option_type),
        GreekField::Theta => bs.theta(option_type),
        GreekField::Rho => bs.rho(option_type),
    }
}

/// Signed payoff of the strategy at expiry for every spot.
pub fn payoff_profile(positions: &[Position], spots: &[f64]) -> Vec<f64> {
    spots
        .iter()
        .map(|&s| {
            positions
                .iter()
                .map(|p| p.sign() * p.contract().payoff(s))
                .sum()
        })
        .collect()
}

/// Signed `field` of the strategy at inception for every spot.
///
/// # Errors
/// `PricingError::Domain` for a non-positive spot.
///
/// # Examples
/// ```
/// use pricer_core::types::{OptionType, Side};
/// use pricer_hedging::portfolio::Position;
/// use pricer_hedging::profile::{spot_grid, value_profile};
/// use pricer_hedging::series::GreekField;
/// use pricer_models::instruments::OptionContract;
///
/// // call spread: long 50, short 60
/// let long = OptionContract::new(OptionType::Call, Side::Long, 50.0, 1.0, 0.05, 0.2).unwrap();
/// let short = OptionContract::new(OptionType::Call, Side::Short, 60.0, 1.0, 0.05, 0.2).unwrap();
/// let strategy = [Position::from(long), Position::from(short)];
///
/// let deltas = value_profile(&strategy, &spot_grid(60.0), GreekField::Delta).unwrap();
/// assert!(deltas.iter().all(|d| (0.0..=1.0).contains(d)));
/// ```
pub fn value_profile(
    positions: &[Position],
    spots: &[f64],
    field: GreekField,
) -> Result<Vec<f64>, PricingError> {
    spots
        .iter()
        .map(|&s| {
            positions.iter().try_fold(0.0, |acc, p| {
                let contract = p.contract();
                let bs = contract.engine(s, contract.maturity())?;
                Ok(acc + p.sign() * field_value(&bs, contract, field))
            })
        })
        .collect()
}

/// Strategy delta across `spots`, one curve per volatility in `vols`.
///
/// Each contract is repriced with the given volatility in place of its own.
///
/// # Errors
/// `PricingError::Domain` for a non-positive spot or volatility.
pub fn delta_volatility_profile(
    positions: &[Position],
    spots: &[f64],
    vols: &[f64],
) -> Result<Vec<Vec<f64>>, PricingError> {
    vols.iter()
        .map(|&vol| {
            spots
                .iter()
                .map(|&s| {
                    positions.iter().try_fold(0.0, |acc, p| {
                        let contract = p.contract();
                        let bs = contract
                            .engine(s, contract.maturity())?
                            .with_volatility(vol)?;
                        Ok(acc + p.sign() * bs.delta(contract.option_type()))
                    })
                })
                .collect()
        })
        .collect()
}

/// One `field` series per contract over a shared path.
///
/// Used to compare how a Greek evolves for different maturities on the same
/// underlying scenario.
///
/// # Errors
/// The first pricing error of any contract.
pub fn expiry_profile(
    contracts: &[OptionContract],
    path: &StockPath,
    field: GreekField,
    day_count: f64,
) -> Result<Vec<Vec<f64>>, PricingError> {
    contracts
        .iter()
        .map(|c| OptionSeries::model(c, path, day_count).map(|s| s.field(field).to_vec()))
        .collect()
}
