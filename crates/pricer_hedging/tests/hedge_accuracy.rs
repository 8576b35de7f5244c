//! Hedge accuracy tests.
//!
//! Reference scenario: S0 = 50, r = 5%, σ = 12.5%, two-year horizon of
//! 512 path units (256 per year), Δt = 0.1, long one 50-strike call.
//!
//! # Test Categories
//!
//! 1. **Scaling**: finer rebalancing tracks the portfolio more closely
//! 2. **Accrual conventions**: compounding vs single-step bank growth
//! 3. **Output**: records serialise for external plotting

use approx::assert_relative_eq;
use pricer_core::types::{OptionType, Side};
use pricer_hedging::hedging::{DeltaHedgeSimulator, HedgeConfig, HedgeHistory};
use pricer_hedging::portfolio::{Portfolio, PortfolioSeries, Position};
use pricer_hedging::scenario::{ScenarioConfig, ScenarioRunner};
use pricer_models::instruments::OptionContract;
use pricer_models::models::{PathConfig, PathSimulator, StockPath};
use pricer_models::rng::PricerRng;

const DAY_COUNT: f64 = 256.0;

fn reference_path(seed: u64) -> StockPath {
    let config = PathConfig::new(512.0, 50.0, 0.05, 0.125, 0.1).unwrap();
    PathSimulator::new(config)
        .unwrap()
        .simulate(&mut PricerRng::from_seed(seed))
}

fn long_call(path: &StockPath) -> PortfolioSeries {
    let call = OptionContract::new(OptionType::Call, Side::Long, 50.0, 2.0, 0.05, 0.125).unwrap();
    Portfolio::new(vec![Position::long(call)])
        .unwrap()
        .model(path, DAY_COUNT)
        .unwrap()
}

fn hedge(path: &StockPath, series: &PortfolioSeries, config: HedgeConfig) -> HedgeHistory {
    DeltaHedgeSimulator::new(config)
        .unwrap()
        .run(path, series)
        .unwrap()
}

// ============================================================================
// Scaling
// ============================================================================

#[test]
fn test_interval_one_beats_interval_fifty() {
    let path = reference_path(42);
    let series = long_call(&path);

    let fine = hedge(&path, &series, HedgeConfig::risk_free(1, 0.05));
    let coarse = hedge(&path, &series, HedgeConfig::risk_free(50, 0.05));

    assert_eq!(path.len(), 5121);
    assert!(
        fine.rms_tracking_error() <= coarse.rms_tracking_error(),
        "fine={} coarse={}",
        fine.rms_tracking_error(),
        coarse.rms_tracking_error()
    );
    assert!(fine.rms_tracking_error() < 1e-9);
    assert!(coarse.rms_tracking_error() > 0.0);
}

#[test]
fn test_scaling_holds_across_seeds() {
    for seed in [1, 7, 2024] {
        let path = reference_path(seed);
        let series = long_call(&path);
        let fine = hedge(&path, &series, HedgeConfig::risk_free(1, 0.05));
        let coarse = hedge(&path, &series, HedgeConfig::risk_free(50, 0.05));
        assert!(fine.rms_tracking_error() <= coarse.rms_tracking_error());
    }
}

#[test]
fn test_batch_mean_error_grows_with_interval() {
    let seeds: Vec<u64> = (100..116).collect();
    let mean_rms = |interval: usize| {
        let mut config = ScenarioConfig::default();
        config.hedge.rebalance_interval = interval;
        ScenarioRunner::new(config)
            .unwrap()
            .run_batch(&seeds)
            .unwrap()
            .mean_rms()
    };

    let frequent = mean_rms(5);
    let rare = mean_rms(250);
    assert!(frequent < rare, "frequent={} rare={}", frequent, rare);
}

#[test]
fn test_rebalance_points_have_zero_error() {
    let path = reference_path(3);
    let series = long_call(&path);
    let history = hedge(&path, &series, HedgeConfig::risk_free(20, 0.05));
    for (i, record) in history.records().iter().enumerate().step_by(20) {
        assert!(record.tracking_error.abs() < 1e-9, "index {}", i);
    }
}

// ============================================================================
// Accrual conventions
// ============================================================================

#[test]
fn test_volatility_accrual_leaves_residual_at_every_step() {
    let path = reference_path(42);
    let series = long_call(&path);
    let (_, sigma) = path.config().normalised();

    let reference = hedge(&path, &series, HedgeConfig::volatility_accrual(1, sigma));
    let risk_free = hedge(&path, &series, HedgeConfig::risk_free(1, 0.05));

    // long call hedge borrows: bank < 0, so growth makes the error positive
    let first = reference.records()[0];
    let expected_growth = (sigma * 0.1_f64).exp();
    assert_relative_eq!(
        first.bank_leg,
        (series.price()[0] - series.delta()[0] * 50.0) * expected_growth,
        epsilon = 1e-12
    );
    assert!(first.tracking_error > 0.0);
    assert!(reference.rms_tracking_error() > risk_free.rms_tracking_error());
}

// ============================================================================
// Output
// ============================================================================

#[test]
fn test_records_serialise_to_json() {
    let path = reference_path(5);
    let series = long_call(&path);
    let history = hedge(&path, &series, HedgeConfig::risk_free(10, 0.05));

    let json = serde_json::to_value(history.final_record().unwrap()).unwrap();
    for key in ["time", "hedge_value", "underlying_leg", "bank_leg", "tracking_error"] {
        assert!(json.get(key).is_some(), "missing {}", key);
    }
    assert_relative_eq!(json["time"].as_f64().unwrap(), 512.0, epsilon = 1e-9);
}
