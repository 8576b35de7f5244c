//! Solver configuration types.

use num_traits::Float;

use crate::types::SolverError;

/// Configuration for root-finding algorithms.
///
/// Every solver run is bounded: it either reaches `tolerance` or stops
/// after `max_iterations` with `SolverError::MaxIterationsExceeded`.
///
/// # Type Parameters
///
/// * `T` - Floating-point type for tolerance (e.g., `f64`)
///
/// # Example
///
/// ```
/// use pricer_core::math::solvers::SolverConfig;
///
/// let config: SolverConfig<f64> = SolverConfig::default();
/// assert!((config.tolerance - 1e-9).abs() < 1e-20);
/// assert_eq!(config.max_iterations, 100);
///
/// assert!(SolverConfig::new(0.0_f64, 100).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig<T: Float> {
    /// Convergence tolerance on the residual.
    ///
    /// The solver stops when `|f(x)| <= tolerance`.
    pub tolerance: T,

    /// Maximum number of iterations before giving up.
    pub max_iterations: usize,
}

impl<T: Float> Default for SolverConfig<T> {
    /// Default values:
    /// - `tolerance`: 1e-9
    /// - `max_iterations`: 100
    fn default() -> Self {
        Self {
            tolerance: T::from(1e-9).unwrap_or_else(T::epsilon),
            max_iterations: 100,
        }
    }
}

impl<T: Float> SolverConfig<T> {
    /// Create a validated configuration.
    ///
    /// # Errors
    ///
    /// `SolverError::InvalidConfig` if `tolerance` is not a positive finite
    /// number or `max_iterations == 0`.
    ///
    /// # Example
    ///
    /// ```
    /// use pricer_core::math::solvers::SolverConfig;
    ///
    /// let config = SolverConfig::new(1e-12, 200).unwrap();
    /// assert_eq!(config.max_iterations, 200);
    /// ```
    pub fn new(tolerance: T, max_iterations: usize) -> Result<Self, SolverError> {
        if !(tolerance.is_finite() && tolerance > T::zero()) {
            return Err(SolverError::InvalidConfig(
                "tolerance must be positive and finite".to_string(),
            ));
        }
        if max_iterations == 0 {
            return Err(SolverError::InvalidConfig(
                "max_iterations must be > 0".to_string(),
            ));
        }
        Ok(Self {
            tolerance,
            max_iterations,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config: SolverConfig<f64> = SolverConfig::default();
        assert!((config.tolerance - 1e-9).abs() < 1e-20);
        assert_eq!(config.max_iterations, 100);
    }

    #[test]
    fn test_new_config() {
        let config: SolverConfig<f64> = SolverConfig::new(1e-12, 200).unwrap();
        assert!((config.tolerance - 1e-12).abs() < 1e-25);
        assert_eq!(config.max_iterations, 200);
    }

    #[test]
    fn test_new_config_rejects_bad_tolerance() {
        for tol in [0.0, -1e-10, f64::NAN, f64::INFINITY] {
            match SolverConfig::new(tol, 100) {
                Err(SolverError::InvalidConfig(msg)) => assert!(msg.contains("tolerance")),
                other => panic!("Expected InvalidConfig for {}, got {:?}", tol, other),
            }
        }
    }

    #[test]
    fn test_new_config_rejects_zero_iterations() {
        match SolverConfig::new(1e-10_f64, 0) {
            Err(SolverError::InvalidConfig(msg)) => assert!(msg.contains("max_iterations")),
            other => panic!("Expected InvalidConfig, got {:?}", other),
        }
    }

    #[test]
    fn test_config_with_f32() {
        let config: SolverConfig<f32> = SolverConfig::default();
        assert!(config.tolerance > 0.0);
        assert_eq!(config.max_iterations, 100);
    }
}
