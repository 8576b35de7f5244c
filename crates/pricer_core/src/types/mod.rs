//! Core financial tags and error types.
//!
//! This module provides:
//! - `option`: Closed `OptionType` and `Side` tags with string parsing
//! - `error`: Structured error types for pricing and solver operations
//!
//! # Re-exports
//!
//! - [`OptionType`], [`Side`] from `option`
//! - [`PricingError`], [`SolverError`] from `error`

pub mod error;
pub mod option;

pub use error::{PricingError, SolverError};
pub use option::{OptionType, Side};
