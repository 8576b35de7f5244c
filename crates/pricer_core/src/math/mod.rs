//! Mathematical building blocks.
//!
//! - [`distributions`]: Standard normal CDF and PDF
//! - [`solvers`]: Newton-Raphson root finding with an iteration cap

pub mod distributions;
pub mod solvers;
