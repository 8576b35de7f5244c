//! Error types for structured error handling.
//!
//! This module provides:
//! - `PricingError`: Errors from pricing, aggregation and hedging operations
//! - `SolverError`: Errors from root-finding solvers

use thiserror::Error;

/// Categorised pricing errors.
///
/// Every failure in the pricing and hedging pipeline surfaces as one of
/// these variants; nothing is silently coerced to zero or a default.
///
/// # Variants
/// - `InvalidOptionType`: Unsupported option type tag
/// - `InvalidSide`: Unsupported position side tag
/// - `Domain`: Input outside the domain of a formula (non-positive
///   volatility, spot, strike or time where a log/sqrt/division needs it)
/// - `NonConvergence`: Iterative solver exhausted its iteration bound
/// - `PreconditionViolation`: Series evaluated over mismatched time grids
///
/// # Examples
/// ```
/// use pricer_core::types::PricingError;
///
/// let err = PricingError::InvalidOptionType("STRADDLE".to_string());
/// assert_eq!(format!("{}", err), "Unsupported option type: STRADDLE");
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PricingError {
    /// Option type tag is neither call nor put.
    #[error("Unsupported option type: {0}")]
    InvalidOptionType(String),

    /// Side tag is neither long nor short.
    #[error("Unsupported position side: {0}")]
    InvalidSide(String),

    /// Input outside the mathematical domain of the computation.
    #[error("Domain error: {0}")]
    Domain(String),

    /// Iterative computation hit its iteration cap.
    #[error("Failed to converge after {iterations} iterations (last estimate {last_estimate})")]
    NonConvergence {
        /// Number of iterations attempted
        iterations: usize,
        /// Estimate held when the cap was reached
        last_estimate: f64,
    },

    /// Precondition on the inputs does not hold.
    #[error("Precondition violated: {0}")]
    PreconditionViolation(String),
}

impl PricingError {
    /// Create a domain error.
    pub fn domain(msg: impl Into<String>) -> Self {
        Self::Domain(msg.into())
    }

    /// Create a precondition violation.
    pub fn precondition(msg: impl Into<String>) -> Self {
        Self::PreconditionViolation(msg.into())
    }
}

/// Root-finding solver errors.
///
/// # Variants
/// - `MaxIterationsExceeded`: Solver failed to converge within iteration limit
/// - `InvalidConfig`: Tolerance or iteration limit unusable
/// - `NonFinite`: Iteration produced NaN or infinity
///
/// # Examples
/// ```
/// use pricer_core::types::SolverError;
///
/// let err = SolverError::MaxIterationsExceeded { iterations: 100, last: 0.2 };
/// assert!(format!("{}", err).contains("100 iterations"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    /// Solver failed to converge within maximum iterations.
    #[error("Failed to converge after {iterations} iterations")]
    MaxIterationsExceeded {
        /// Number of iterations attempted
        iterations: usize,
        /// Last iterate
        last: f64,
    },

    /// Solver configuration is unusable.
    #[error("Invalid solver configuration: {0}")]
    InvalidConfig(String),

    /// Iteration produced a non-finite value.
    #[error("Non-finite iterate at x = {x}")]
    NonFinite {
        /// The last finite iterate
        x: f64,
    },
}

impl From<SolverError> for PricingError {
    fn from(err: SolverError) -> Self {
        match err {
            SolverError::MaxIterationsExceeded { iterations, last } => {
                PricingError::NonConvergence {
                    iterations,
                    last_estimate: last,
                }
            }
            SolverError::InvalidConfig(_) | SolverError::NonFinite { .. } => {
                PricingError::Domain(err.to_string())
            }
        }
    }
}
