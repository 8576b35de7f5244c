//! Root-finding solvers for numerical computation.
//!
//! ## Available Solvers
//!
//! - [`NewtonRaphsonSolver`]: quadratic convergence using an explicit
//!   derivative, bracketed for increasing functions and falling back to
//!   fixed steps when the derivative vanishes
//!
//! ## Configuration
//!
//! [`SolverConfig`] carries:
//! - `tolerance`: Convergence tolerance on the residual (default: 1e-9)
//! - `max_iterations`: Maximum iteration count (default: 100)
//!
//! ## Example
//!
//! ```
//! use pricer_core::math::solvers::{NewtonRaphsonSolver, SolverConfig};
//!
//! let config = SolverConfig::default();
//! let solver = NewtonRaphsonSolver::new(config);
//!
//! let root = solver
//!     .find_root_monotone(|x: f64| x * x - 2.0, |x: f64| 2.0 * x, 1.0, 1e-6, 0.0)
//!     .unwrap();
//! assert!((root - std::f64::consts::SQRT_2).abs() < 1e-9);
//! ```

mod config;
mod newton_raphson;

pub use config::SolverConfig;
pub use newton_raphson::NewtonRaphsonSolver;
