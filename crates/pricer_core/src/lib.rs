//! # pricer_core: Numerical Foundation for the Hedging Simulator
//!
//! ## Layer 1 (Foundation) Role
//!
//! pricer_core is the bottom layer of the workspace, providing:
//! - Standard normal CDF/PDF (`math::distributions`)
//! - Root-finding with an explicit iteration cap (`math::solvers`)
//! - Closed option/position tags: `OptionType`, `Side` (`types::option`)
//! - Error taxonomy: `PricingError`, `SolverError` (`types::error`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other pricer_* crates, with minimal external dependencies:
//! - num-traits: Traits for generic numerical computation
//! - statrs: Double-precision complementary error function
//! - thiserror: Error derivation
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use pricer_core::math::distributions::norm_cdf;
//! use pricer_core::types::{OptionType, Side};
//!
//! let call: OptionType = "CALL".parse().unwrap();
//! assert_eq!(call, OptionType::Call);
//! assert_eq!(Side::Short.sign(), -1.0);
//!
//! assert!((norm_cdf(0.0) - 0.5).abs() < 1e-15);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): Enable serialisation for `OptionType` and `Side`

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod math;
pub mod types;
