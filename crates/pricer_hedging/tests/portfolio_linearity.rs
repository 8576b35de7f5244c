//! Portfolio aggregation properties.

use pricer_core::types::{OptionType, PricingError, Side};
use pricer_hedging::hedging::{DeltaHedgeSimulator, HedgeConfig};
use pricer_hedging::portfolio::{Portfolio, PortfolioSeries, Position};
use pricer_hedging::series::{GreekField, OptionSeries};
use pricer_models::instruments::OptionContract;
use pricer_models::models::{PathConfig, PathSimulator, StockPath};
use pricer_models::rng::PricerRng;
use proptest::prelude::*;

fn path(seed: u64, time_step: f64) -> StockPath {
    let config = PathConfig::new(256.0, 50.0, 0.05, 0.2, time_step).unwrap();
    PathSimulator::new(config)
        .unwrap()
        .simulate(&mut PricerRng::from_seed(seed))
}

fn option_type_strategy() -> impl Strategy<Value = OptionType> {
    prop_oneof![Just(OptionType::Call), Just(OptionType::Put)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_long_short_same_contract_cancels(
        option_type in option_type_strategy(),
        strike in 30.0..80.0_f64,
        maturity in 0.25..2.0_f64,
        vol in 0.05..0.8_f64,
        seed in any::<u64>(),
    ) {
        let contract = OptionContract::new(option_type, Side::Long, strike, maturity, 0.05, vol).unwrap();
        let p = path(seed, 1.0);
        let series = Portfolio::new(vec![Position::long(contract), Position::short(contract)])
            .unwrap()
            .model(&p, 256.0)
            .unwrap();

        prop_assert_eq!(series.len(), p.len());
        for field in GreekField::ALL {
            prop_assert!(series.field(field).iter().all(|v| *v == 0.0), "{} not flat", field);
        }
    }

    #[test]
    fn prop_aggregation_is_order_independent(
        strikes in prop::collection::vec(30.0..80.0_f64, 2..5),
        seed in any::<u64>(),
    ) {
        let p = path(seed, 2.0);
        let legs: Vec<(OptionSeries, Side)> = strikes
            .iter()
            .enumerate()
            .map(|(i, &k)| {
                let side = if i % 2 == 0 { Side::Long } else { Side::Short };
                let c = OptionContract::new(OptionType::Call, side, k, 1.0, 0.05, 0.2).unwrap();
                (OptionSeries::model(&c, &p, 256.0).unwrap(), side)
            })
            .collect();
        let mut reversed = legs.clone();
        reversed.reverse();

        let forward = PortfolioSeries::aggregate(&legs).unwrap();
        let backward = PortfolioSeries::aggregate(&reversed).unwrap();
        for field in GreekField::ALL {
            for (a, b) in forward.field(field).iter().zip(backward.field(field)) {
                prop_assert!((a - b).abs() < 1e-10);
            }
        }
    }
}

#[test]
fn test_flat_portfolio_needs_no_hedge() {
    let contract = OptionContract::new(OptionType::Put, Side::Long, 45.0, 1.0, 0.05, 0.2).unwrap();
    let p = path(8, 0.5);
    let series = Portfolio::new(vec![Position::long(contract), Position::short(contract)])
        .unwrap()
        .model(&p, 256.0)
        .unwrap();
    let history = DeltaHedgeSimulator::new(HedgeConfig::risk_free(7, 0.05))
        .unwrap()
        .run(&p, &series)
        .unwrap();
    assert_eq!(history.max_abs_tracking_error(), 0.0);
}

#[test]
fn test_mixed_grids_rejected() {
    let contract = OptionContract::new(OptionType::Call, Side::Long, 50.0, 1.0, 0.05, 0.2).unwrap();
    let a = OptionSeries::model(&contract, &path(1, 1.0), 256.0).unwrap();
    let b = OptionSeries::model(&contract, &path(1, 2.0), 256.0).unwrap();
    assert!(matches!(
        PortfolioSeries::aggregate(&[(a, Side::Long), (b, Side::Long)]),
        Err(PricingError::PreconditionViolation(_))
    ));
}
