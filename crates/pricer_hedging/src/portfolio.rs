//! Signed aggregation of option series into a portfolio series.
//!
//! A portfolio is a typed list of [`Position`]s. Modelling it evaluates an
//! [`OptionSeries`] per position, then folds every tracked field with sign
//! +1 for long and -1 for short positions. All constituents must share the
//! same time grid.

use pricer_core::types::{PricingError, Side};
use pricer_models::instruments::OptionContract;
use pricer_models::models::StockPath;
use serde::Serialize;
use tracing::debug;

use crate::series::{GreekField, OptionSeries};

/// One contract held long or short.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Position {
    contract: OptionContract,
    side: Side,
}

impl Position {
    /// Holds `contract` on `side`, overriding the contract's own side.
    pub fn new(contract: OptionContract, side: Side) -> Self {
        Self {
            contract: contract.with_side(side),
            side,
        }
    }

    /// Long position in `contract`.
    pub fn long(contract: OptionContract) -> Self {
        Self::new(contract, Side::Long)
    }

    /// Short position in `contract`.
    pub fn short(contract: OptionContract) -> Self {
        Self::new(contract, Side::Short)
    }

    /// Underlying contract.
    #[inline]
    pub fn contract(&self) -> &OptionContract {
        &self.contract
    }

    /// Held side.
    #[inline]
    pub fn side(&self) -> Side {
        self.side
    }

    /// +1 for long, -1 for short.
    #[inline]
    pub fn sign(&self) -> f64 {
        self.side.sign()
    }
}

impl From<OptionContract> for Position {
    fn from(contract: OptionContract) -> Self {
        Self::new(contract, contract.side())
    }
}

/// Non-empty collection of positions on one underlying.
///
/// # Examples
/// ```
/// use pricer_core::types::{OptionType, Side};
/// use pricer_hedging::portfolio::{Portfolio, Position};
/// use pricer_hedging::series::GreekField;
/// use pricer_models::instruments::OptionContract;
/// use pricer_models::models::{PathConfig, PathSimulator};
/// use pricer_models::rng::PricerRng;
///
/// let call = OptionContract::new(OptionType::Call, Side::Long, 50.0, 2.0, 0.05, 0.125).unwrap();
/// let portfolio = Portfolio::new(vec![Position::long(call), Position::short(call)]).unwrap();
///
/// let config = PathConfig::new(512.0, 50.0, 0.05, 0.125, 1.0).unwrap();
/// let path = PathSimulator::new(config).unwrap().simulate(&mut PricerRng::from_seed(9));
/// let series = portfolio.model(&path, 256.0).unwrap();
///
/// assert!(series.field(GreekField::Price).iter().all(|p| *p == 0.0));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Portfolio {
    positions: Vec<Position>,
}

impl Portfolio {
    /// Creates a portfolio.
    ///
    /// # Errors
    /// `PricingError::PreconditionViolation` when `positions` is empty.
    pub fn new(positions: Vec<Position>) -> Result<Self, PricingError> {
        if positions.is_empty() {
            return Err(PricingError::precondition("portfolio has no positions"));
        }
        Ok(Self { positions })
    }

    /// Constituent positions.
    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    /// Evaluates every position over `path` and aggregates the result.
    ///
    /// # Errors
    /// The first pricing error of any constituent aborts the run.
    pub fn model(&self, path: &StockPath, day_count: f64) -> Result<PortfolioSeries, PricingError> {
        let legs = self
            .positions
            .iter()
            .map(|p| OptionSeries::model(p.contract(), path, day_count).map(|s| (s, p.side())))
            .collect::<Result<Vec<_>, _>>()?;
        PortfolioSeries::aggregate(&legs)
    }
}

/// Signed sum of constituent series on a shared grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortfolioSeries {
    times: Vec<f64>,
    price: Vec<f64>,
    delta: Vec<f64>,
    gamma: Vec<f64>,
    vega: Vec<f64>,
    theta: Vec<f64>,
    rho: Vec<f64>,
}

impl PortfolioSeries {
    /// Folds precomputed series with their sides.
    ///
    /// # Errors
    /// `PricingError::PreconditionViolation` when `legs` is empty or any leg
    /// differs from the first in length or timestamps.
    pub fn aggregate(legs: &[(OptionSeries, Side)]) -> Result<Self, PricingError> {
        let (first, _) = legs
            .first()
            .ok_or_else(|| PricingError::precondition("cannot aggregate an empty portfolio"))?;

        let times = first.times().to_vec();
        for (idx, (leg, _)) in legs.iter().enumerate().skip(1) {
            if leg.len() != times.len() {
                return Err(PricingError::precondition(format!(
                    "leg {} has {} points, expected {}",
                    idx,
                    leg.len(),
                    times.len()
                )));
            }
            if let Some(i) = leg.times().iter().zip(&times).position(|(a, b)| a != b) {
                return Err(PricingError::precondition(format!(
                    "leg {} time grid differs at index {}: {} vs {}",
                    idx,
                    i,
                    leg.times()[i],
                    times[i]
                )));
            }
        }

        let n = times.len();
        let mut out = Self {
            times,
            price: vec![0.0; n],
            delta: vec![0.0; n],
            gamma: vec![0.0; n],
            vega: vec![0.0; n],
            theta: vec![0.0; n],
            rho: vec![0.0; n],
        };
        for (leg, side) in legs {
            let sign = side.sign();
            for field in GreekField::ALL {
                for (acc, v) in out.field_mut(field).iter_mut().zip(leg.field(field)) {
                    *acc += sign * v;
                }
            }
        }

        debug!(legs = legs.len(), points = n, "portfolio aggregated");
        Ok(out)
    }

    fn field_mut(&mut self, field: GreekField) -> &mut Vec<f64> {
        match field {
            GreekField::Price => &mut self.price,
            GreekField::Delta => &mut self.delta,
            GreekField::Gamma => &mut self.gamma,
            GreekField::Vega => &mut self.vega,
            GreekField::Theta => &mut self.theta,
            GreekField::Rho => &mut self.rho,
        }
    }

    /// Shared time grid.
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Aggregated values of `field`.
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

    /// Aggregated premium.
    pub fn price(&self) -> &[f64] {
        &self.price
    }

    /// Aggregated delta.
    pub fn delta(&self) -> &[f64] {
        &self.delta
    }

    /// Number of grid points.
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// True for an empty grid.
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }
}
