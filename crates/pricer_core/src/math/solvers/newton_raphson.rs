//! Newton-Raphson root-finding solver.

use super::SolverConfig;
use crate::types::SolverError;
use num_traits::Float;

/// Newton-Raphson root finder with a hard iteration cap.
///
/// Uses Newton's method: `x_{n+1} = x_n - f(x_n) / f'(x_n)` for fast
/// quadratic convergence on smooth functions, safeguarded for increasing
/// functions on a half-line.
///
/// # Type Parameters
///
/// * `T` - Floating-point type (e.g., `f64`)
///
/// # Convergence
///
/// Newton-Raphson converges quadratically near a root. It may fail if:
/// - The derivative is near zero
/// - The initial guess is far from the root
/// - The function has discontinuities
///
/// [`find_root_monotone`](Self::find_root_monotone) covers the first two
/// cases for increasing functions on a half-line, which is the shape of an
/// option price as a function of volatility.
///
/// # Example
///
/// ```
/// use pricer_core::math::solvers::{NewtonRaphsonSolver, SolverConfig};
///
/// // Solve x² - 2 = 0 on (0, ∞) (find √2)
/// let solver = NewtonRaphsonSolver::new(SolverConfig::default());
///
/// let f = |x: f64| x * x - 2.0;
/// let f_prime = |x: f64| 2.0 * x;
///
/// let root = solver.find_root_monotone(f, f_prime, 1.0, 1e-6, 0.0).unwrap();
/// assert!((root - std::f64::consts::SQRT_2).abs() < 1e-9);
/// ```
#[derive(Debug, Clone)]
pub struct NewtonRaphsonSolver<T: Float> {
    config: SolverConfig<T>,
}

impl<T: Float> NewtonRaphsonSolver<T> {
    /// Create a new Newton-Raphson solver with the given configuration.
    pub fn new(config: SolverConfig<T>) -> Self {
        Self { config }
    }

    /// Find a root of an increasing function `f` on `(lower_bound, ∞)`.
    ///
    /// The solver keeps a bracket: iterates with `f < 0` raise its lower
    /// end, iterates with `f > 0` set its upper end. Each iteration takes
    /// the Newton step unless:
    /// - `f'(x)` is numerically zero (the step is not finite): a fixed step
    ///   of `fallback_step` is taken towards the root, up when `f(x) < 0`
    ///   and down when `f(x) > 0`; going up with no upper end known, the
    ///   step is at least the distance to `lower_bound`;
    /// - the step leaves a closed bracket: the iterate moves to its midpoint
    ///   (with no upper end yet, a step at or below the lower end moves up
    ///   by `fallback_step` instead);
    /// - no upper end is known: the distance from `lower_bound` may at most
    ///   double per iteration.
    ///
    /// # Errors
    ///
    /// * `SolverError::MaxIterationsExceeded` with the last iterate when the
    ///   cap is reached
    /// * `SolverError::NonFinite` when `f` itself is not finite
    ///
    /// # Example
    ///
    /// ```
    /// use pricer_core::math::solvers::{NewtonRaphsonSolver, SolverConfig};
    ///
    /// let solver = NewtonRaphsonSolver::new(SolverConfig::default());
    ///
    /// // ln(x) = 0 from a guess where the plain Newton step overshoots below zero
    /// let root = solver
    ///     .find_root_monotone(|x: f64| x.ln(), |x: f64| 1.0 / x, 5.0, 1e-6, 0.0)
    ///     .unwrap();
    /// assert!((root - 1.0).abs() < 1e-8);
    /// ```
    pub fn find_root_monotone<F, G>(
        &self,
        f: F,
        f_prime: G,
        x0: T,
        fallback_step: T,
        lower_bound: T,
    ) -> Result<T, SolverError>
    where
        F: Fn(T) -> T,
        G: Fn(T) -> T,
    {
        let mut x = x0;
        let two = T::one() + T::one();
        let mut lo = lower_bound;
        let mut hi: Option<T> = None;

        for _ in 0..self.config.max_iterations {
            let f_val = f(x);
            if !f_val.is_finite() {
                return Err(non_finite(x));
            }
            if f_val.abs() <= self.config.tolerance {
                return Ok(x);
            }
            if f_val < T::zero() {
                lo = lo.max(x);
            } else {
                hi = Some(hi.map_or(x, |h| h.min(x)));
            }

            let newton = f_val / f_prime(x);
            let step = if newton.is_finite() {
                x - newton
            } else if f_val < T::zero() {
                match hi {
                    Some(_) => x + fallback_step,
                    None => x + fallback_step.max(x - lower_bound),
                }
            } else {
                x - fallback_step
            };

            x = match hi {
                Some(h) if step <= lo || step >= h => (lo + h) / two,
                Some(_) => step,
                None if step <= lo => x + fallback_step,
                None => step.min(lower_bound + two * (x - lower_bound)),
            };
        }

        Err(SolverError::MaxIterationsExceeded {
            iterations: self.config.max_iterations,
            last: x.to_f64().unwrap_or(f64::NAN),
        })
    }

    /// Returns a reference to the solver configuration.
    pub fn config(&self) -> &SolverConfig<T> {
        &self.config
    }
}

fn non_finite<T: Float>(x: T) -> SolverError {
    SolverError::NonFinite {
        x: x.to_f64().unwrap_or(f64::NAN),
    }
}
