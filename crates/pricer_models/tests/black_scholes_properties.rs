//! Property tests for the Black-Scholes engine and implied volatility.
//!
//! # Test Categories
//!
//! 1. **Parity**: call minus put equals the discounted forward spread
//! 2. **Bounds**: delta ranges and non-negative gamma/vega
//! 3. **Expiry boundary**: intrinsic prices and boundary deltas
//! 4. **Implied volatility**: price-then-solve round trips

use approx::assert_relative_eq;
use pricer_core::types::{OptionType, PricingError};
use pricer_models::analytical::{BlackScholes, ImpliedVolatility, QuoteInput};
use pricer_models::instruments::OptionContract;
use proptest::prelude::*;

fn engine(spot: f64, strike: f64, expiry: f64, rate: f64, vol: f64) -> BlackScholes {
    BlackScholes::new(spot, strike, expiry, rate, 0.0, vol).unwrap()
}

// ============================================================================
// Reference values
// ============================================================================

#[test]
fn test_reference_call() {
    let bs = engine(50.0, 50.0, 1.0, 0.05, 0.2);
    assert_relative_eq!(bs.price(OptionType::Call), 6.04, epsilon = 5e-3);
    assert_relative_eq!(bs.delta(OptionType::Call), 0.638, epsilon = 1e-3);
}

#[test]
fn test_reference_contract_matches_engine() {
    let contract = OptionContract::from_tags("CALL", "LONG", 50.0, 1.0, 0.05, 0.2).unwrap();
    let bs = contract.engine(50.0, 1.0).unwrap();
    assert_relative_eq!(
        bs.price(contract.option_type()),
        engine(50.0, 50.0, 1.0, 0.05, 0.2).price(OptionType::Call),
        epsilon = 1e-14
    );
}

#[test]
fn test_unsupported_tags() {
    assert!(matches!(
        BlackScholes::price_tagged("STRADDLE", 50.0, 50.0, 1.0, 0.05, 0.0, 0.2),
        Err(PricingError::InvalidOptionType(_))
    ));
    assert!(matches!(
        OptionContract::from_tags("CALL", "FLAT", 50.0, 1.0, 0.05, 0.2),
        Err(PricingError::InvalidSide(_))
    ));
}

// ============================================================================
// Expiry boundary
// ============================================================================

#[test]
fn test_expiry_boundary_values() {
    let cases = [
        (60.0, 10.0, 0.0, 1.0, 0.0),
        (40.0, 0.0, 10.0, 0.0, -1.0),
        (50.0, 0.0, 0.0, 0.5, -0.5),
    ];
    for (spot, call, put, call_delta, put_delta) in cases {
        let bs = engine(spot, 50.0, 0.0, 0.05, 0.2);
        assert_eq!(bs.price(OptionType::Call), call);
        assert_eq!(bs.price(OptionType::Put), put);
        assert_eq!(bs.delta(OptionType::Call), call_delta);
        assert_eq!(bs.delta(OptionType::Put), put_delta);
        assert_eq!(bs.gamma(OptionType::Call), 0.0);
        assert_eq!(bs.vega(OptionType::Put), 0.0);
    }
}

#[test]
fn test_price_approaches_intrinsic() {
    for expiry in [1e-2, 1e-4, 1e-6] {
        let call = engine(55.0, 50.0, expiry, 0.05, 0.2).price(OptionType::Call);
        let put = engine(45.0, 50.0, expiry, 0.05, 0.2).price(OptionType::Put);
        assert!((call - 5.0).abs() < 0.1, "call at τ={} is {}", expiry, call);
        assert!((put - 5.0).abs() < 0.1, "put at τ={} is {}", expiry, put);
    }
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_put_call_parity(
        spot in 10.0..200.0_f64,
        strike in 10.0..200.0_f64,
        expiry in 0.01..5.0_f64,
        rate in -0.02..0.1_f64,
        vol in 0.01..1.5_f64,
    ) {
        let bs = engine(spot, strike, expiry, rate, vol);
        let lhs = bs.price(OptionType::Call) - bs.price(OptionType::Put);
        let rhs = spot - strike * (-rate * expiry).exp();
        prop_assert!((lhs - rhs).abs() < 1e-9, "parity gap {}", lhs - rhs);
    }

    #[test]
    fn prop_delta_bounds_and_symmetric_gamma_vega(
        spot in 10.0..200.0_f64,
        strike in 10.0..200.0_f64,
        expiry in 0.0..5.0_f64,
        rate in 0.0..0.1_f64,
        vol in 0.01..1.5_f64,
    ) {
        let bs = engine(spot, strike, expiry, rate, vol);
        let call_delta = bs.delta(OptionType::Call);
        let put_delta = bs.delta(OptionType::Put);
        prop_assert!((0.0..=1.0).contains(&call_delta));
        prop_assert!((-1.0..=0.0).contains(&put_delta));

        let gamma = bs.gamma(OptionType::Call);
        let vega = bs.vega(OptionType::Call);
        prop_assert!(gamma >= 0.0);
        prop_assert!(vega >= 0.0);
        prop_assert_eq!(gamma, bs.gamma(OptionType::Put));
        prop_assert_eq!(vega, bs.vega(OptionType::Put));
    }

    #[test]
    fn prop_implied_vol_round_trip(
        strike in 90.0..110.0_f64,
        expiry in 0.5..2.0_f64,
        vol in 0.05..1.0_f64,
        is_call in any::<bool>(),
    ) {
        let option_type = if is_call { OptionType::Call } else { OptionType::Put };
        let price = engine(100.0, strike, expiry, 0.03, vol).price(option_type);
        let iv = ImpliedVolatility::default()
            .solve(option_type, price, 100.0, strike, expiry, 0.03, 0.0)
            .unwrap();
        prop_assert!((iv - vol).abs() < 1e-6, "σ = {}, solved {}", vol, iv);
    }
}

// ============================================================================
// Batch implied volatility
// ============================================================================

#[test]
fn test_batch_matches_sequential() {
    let solver = ImpliedVolatility::default();
    let quotes: Vec<QuoteInput> = (0..40)
        .map(|i| {
            let strike = 80.0 + i as f64;
            let option_type = if i % 2 == 0 { OptionType::Call } else { OptionType::Put };
            QuoteInput {
                option_type,
                price: engine(100.0, strike, 1.0, 0.02, 0.3).price(option_type),
                spot: 100.0,
                strike,
                expiry: 1.0,
                rate: 0.02,
                dividend_yield: 0.0,
            }
        })
        .collect();

    let batch = solver.solve_batch(&quotes);
    for (q, out) in quotes.iter().zip(batch) {
        let sequential = solver
            .solve(q.option_type, q.price, q.spot, q.strike, q.expiry, q.rate, q.dividend_yield)
            .unwrap();
        assert_eq!(out.unwrap(), sequential);
        assert_relative_eq!(sequential, 0.3, epsilon = 1e-6);
    }
}
