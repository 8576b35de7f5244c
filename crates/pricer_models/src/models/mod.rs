//! Stochastic process models for the underlying.
//!
//! - [`BrownianMotion`]: scaled symmetric random walk
//! - [`PathSimulator`]: Geometric Brownian Motion paths on a fixed grid
//!
//! ## Example
//!
//! ```
//! use pricer_models::models::{PathConfig, PathSimulator};
//! use pricer_models::rng::PricerRng;
//!
//! let config = PathConfig::new(365.0, 100.0, 0.05, 0.15, 0.01).unwrap();
//! let path = PathSimulator::new(config).unwrap().simulate(&mut PricerRng::from_seed(5));
//! assert_eq!(path.len(), 36_501);
//! ```

pub mod brownian;
pub mod gbm;

pub use brownian::BrownianMotion;
pub use gbm::{normalise, PathConfig, PathSimulator, StockPath};
