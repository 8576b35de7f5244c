//! # Pricer Models (L2: Business Logic)
//!
//! Option contracts, closed-form pricing and path simulation.
//!
//! This crate provides:
//! - [`instruments::OptionContract`]: validated European option terms
//! - [`analytical::BlackScholes`]: prices and Greeks with exact expiry values
//! - [`analytical::ImpliedVolatility`]: bounded Newton inversion of the price
//! - [`models::PathSimulator`]: GBM paths driven by a scaled random walk
//! - [`rng::PricerRng`]: seeded randomness for reproducible paths
//!
//! ## Design Principles
//!
//! - **Validate once**: constructors return `Result`, methods on a
//!   constructed value are pure
//! - **Typed failures**: every error is a `pricer_core::types::PricingError`
//! - **Sequential paths**: each step derives from the previous one; only
//!   independent runs are parallelised

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod analytical;
pub mod instruments;
pub mod models;
pub mod rng;
