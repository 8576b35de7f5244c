//! # Pricer Hedging (L3: Simulation)
//!
//! Option series along simulated paths, portfolio aggregation and discrete
//! delta hedging.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │          pricer_hedging (L3)            │
//! ├─────────────────────────────────────────┤
//! │  series/    - per-contract Greeks      │
//! │  portfolio/ - signed aggregation       │
//! │  hedging/   - rebalancing state machine│
//! │  profile/   - spot / vol / expiry      │
//! │  scenario/  - TOML runs and batches    │
//! └─────────────────────────────────────────┘
//!          ↓
//! ┌─────────────────────────────────────────┐
//! │           pricer_models (L2)            │
//! │  Black-Scholes, implied vol, GBM paths  │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Pipeline
//!
//! One run is strictly sequential: simulate the path, evaluate each
//! position's [`series::OptionSeries`], fold them into a
//! [`portfolio::PortfolioSeries`], then walk the grid with the
//! [`hedging::DeltaHedgeSimulator`]. Independent runs are parallelised by
//! [`scenario::ScenarioRunner::run_batch`].
//!
//! ## Example
//!
//! ```
//! use pricer_core::types::{OptionType, Side};
//! use pricer_hedging::hedging::{DeltaHedgeSimulator, HedgeConfig};
//! use pricer_hedging::portfolio::{Portfolio, Position};
//! use pricer_models::instruments::OptionContract;
//! use pricer_models::models::{PathConfig, PathSimulator};
//! use pricer_models::rng::PricerRng;
//!
//! let config = PathConfig::new(512.0, 50.0, 0.05, 0.125, 0.1).unwrap();
//! let path = PathSimulator::new(config).unwrap().simulate(&mut PricerRng::from_seed(42));
//!
//! let call = OptionContract::new(OptionType::Call, Side::Long, 50.0, 2.0, 0.05, 0.125).unwrap();
//! let series = Portfolio::new(vec![Position::long(call)])
//!     .unwrap()
//!     .model(&path, 256.0)
//!     .unwrap();
//!
//! let fine = DeltaHedgeSimulator::new(HedgeConfig::risk_free(1, 0.05)).unwrap();
//! let coarse = DeltaHedgeSimulator::new(HedgeConfig::risk_free(50, 0.05)).unwrap();
//! let fine_rms = fine.run(&path, &series).unwrap().rms_tracking_error();
//! let coarse_rms = coarse.run(&path, &series).unwrap().rms_tracking_error();
//! assert!(fine_rms <= coarse_rms);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod hedging;
pub mod portfolio;
pub mod profile;
pub mod scenario;
pub mod series;
pub mod telemetry;
