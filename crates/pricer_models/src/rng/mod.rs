//! # Random Number Generation
//!
//! Seeded randomness for path simulation.
//!
//! - **Reproducibility**: the same seed always yields the same sequence,
//!   which is what makes a simulated path testable
//! - **Fresh randomness**: [`PricerRng::from_entropy`] for production runs
//!
//! ## Usage Example
//!
//! ```rust
//! use pricer_models::rng::PricerRng;
//! use rand_distr::Bernoulli;
//!
//! let coin = Bernoulli::new(0.5).unwrap();
//! let mut a = PricerRng::from_seed(12345);
//! let mut b = PricerRng::from_seed(12345);
//! let xs: Vec<bool> = (0..16).map(|_| a.sample(&coin)).collect();
//! let ys: Vec<bool> = (0..16).map(|_| b.sample(&coin)).collect();
//! assert_eq!(xs, ys);
//! ```

mod prng;

pub use prng::PricerRng;
