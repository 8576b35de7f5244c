//! Analytical pricing formulas for European options.
//!
//! This module provides:
//! - Black-Scholes-Merton prices with first- and second-order Greeks
//! - Implied volatility inversion of the Black-Scholes price
//!
//! ## Design Principles
//!
//! - **Validated construction**: domain errors surface when an engine is
//!   built, pricing afterwards is infallible
//! - **Exact expiry**: boundary values at T ≤ 0 come from an explicit
//!   branch, not an epsilon substitution
//! - **Numerical Stability**: Uses erfc-based CDF for accuracy

pub mod black_scholes;
pub mod implied_volatility;

// Re-export main types at module level
pub use black_scholes::{BlackScholes, Greeks, MIN_EXPIRY};
pub use implied_volatility::{ImpliedVolatility, QuoteInput};
