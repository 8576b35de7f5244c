//! Criterion benchmarks for pricer_models pricing and simulation.
//!
//! Measures Black-Scholes Greeks, implied volatility inversion and GBM
//! path generation across grid sizes.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pricer_core::types::OptionType;
use pricer_models::analytical::{BlackScholes, ImpliedVolatility, QuoteInput};
use pricer_models::models::{PathConfig, PathSimulator};
use pricer_models::rng::PricerRng;

/// Benchmark price and full Greek set for a single engine.
fn bench_black_scholes(c: &mut Criterion) {
    let mut group = c.benchmark_group("black_scholes");
    let bs = BlackScholes::new(50.0, 50.0, 1.0, 0.05, 0.0, 0.2).unwrap();

    group.bench_function("price", |b| {
        b.iter(|| black_box(&bs).price(black_box(OptionType::Call)))
    });
    group.bench_function("greeks", |b| {
        b.iter(|| black_box(&bs).greeks(black_box(OptionType::Put)))
    });

    group.finish();
}

/// Benchmark single and batched implied volatility solves.
fn bench_implied_volatility(c: &mut Criterion) {
    let mut group = c.benchmark_group("implied_volatility");
    let solver = ImpliedVolatility::default();
    let price = BlackScholes::new(50.0, 55.0, 1.0, 0.05, 0.0, 0.3)
        .unwrap()
        .price(OptionType::Call);

    group.bench_function("single", |b| {
        b.iter(|| {
            solver
                .solve(OptionType::Call, black_box(price), 50.0, 55.0, 1.0, 0.05, 0.0)
                .unwrap()
        })
    });

    for size in [100, 1000] {
        let quotes: Vec<QuoteInput> = (0..size)
            .map(|i| {
                let strike = 40.0 + 20.0 * i as f64 / size as f64;
                QuoteInput {
                    option_type: OptionType::Call,
                    price: BlackScholes::new(50.0, strike, 1.0, 0.05, 0.0, 0.25)
                        .unwrap()
                        .price(OptionType::Call),
                    spot: 50.0,
                    strike,
                    expiry: 1.0,
                    rate: 0.05,
                    dividend_yield: 0.0,
                }
            })
            .collect();
        group.bench_with_input(BenchmarkId::new("batch", size), &quotes, |b, quotes| {
            b.iter(|| solver.solve_batch(black_box(quotes)))
        });
    }

    group.finish();
}

/// Benchmark GBM path generation for increasingly fine grids.
fn bench_path_simulation(c: &mut Criterion) {
    let mut group = c.benchmark_group("path_simulation");

    for time_step in [1.0, 0.1, 0.01] {
        let config = PathConfig::new(512.0, 50.0, 0.05, 0.125, time_step).unwrap();
        let simulator = PathSimulator::new(config).unwrap();
        group.bench_with_input(
            BenchmarkId::new("simulate", config.steps()),
            &simulator,
            |b, simulator| {
                let mut rng = PricerRng::from_seed(42);
                b.iter(|| simulator.simulate(&mut rng))
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_black_scholes,
    bench_implied_volatility,
    bench_path_simulation
);
criterion_main!(benches);
