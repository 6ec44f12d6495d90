//! Root-finding algorithms.
//!
//! Curve bootstrapping needs exactly one kind of solve: find the single
//! unknown discount factor that zeroes an instrument's NPV, starting from
//! the previously solved discount factor. No analytic derivative is
//! available, so the workhorse is the secant method (Newton with a
//! finite-difference slope carried between iterations).
//!
//! - [`secant`]: two-seed secant iteration
//! - [`SecantSolver`]: [`RootFinder`] implementation seeding the second point
//!   from the first the same way scipy's `newton` does without `fprime`
//!
//! # Example
//!
//! ```rust
//! use parcurve_math::solvers::{RootFinder, SecantSolver, SolverConfig};
//!
//! // Discount factor at 1Y that reprices a 5% simple-rate deposit
//! let f = |df: f64| df * (1.0 + 0.05) - 1.0;
//!
//! let result = SecantSolver.find_root(f, 1.0, &SolverConfig::default()).unwrap();
//! assert!((result.root - 1.0 / 1.05).abs() < 1e-10);
//! ```

mod secant;

pub use secant::secant;

use crate::error::MathResult;

/// Default tolerance for root-finding algorithms.
pub const DEFAULT_TOLERANCE: f64 = 1e-10;

/// Default maximum iterations for root-finding algorithms.
pub const DEFAULT_MAX_ITERATIONS: u32 = 50;

/// Relative offset used to derive the second secant seed from the first.
const SEED_RELATIVE_STEP: f64 = 1e-4;

/// Configuration for root-finding algorithms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig {
    /// Tolerance for convergence.
    pub tolerance: f64,
    /// Maximum number of iterations.
    pub max_iterations: u32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl SolverConfig {
    /// Creates a new solver configuration.
    #[must_use]
    pub fn new(tolerance: f64, max_iterations: u32) -> Self {
        Self {
            tolerance,
            max_iterations,
        }
    }

    /// Sets the tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the maximum iterations.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }
}

/// Result of a root-finding iteration.
#[derive(Debug, Clone, Copy)]
pub struct SolverResult {
    /// The root found.
    pub root: f64,
    /// Number of iterations used.
    pub iterations: u32,
    /// Final residual (function value at root).
    pub residual: f64,
}

/// Trait for one-dimensional root finders seeded with a single guess.
///
/// Implementations must be `Send + Sync` so one finder can serve
/// independent curve builds running on different threads.
pub trait RootFinder: Send + Sync {
    /// Finds a root of `f` starting from `initial_guess`.
    ///
    /// # Arguments
    ///
    /// * `f` - The function for which to find a root
    /// * `initial_guess` - Starting point for the search
    /// * `config` - Solver configuration
    fn find_root<F>(&self, f: F, initial_guess: f64, config: &SolverConfig) -> MathResult<SolverResult>
    where
        F: Fn(f64) -> f64;

    /// Returns the name of the solver.
    fn name(&self) -> &'static str;
}

/// Secant method solver seeded from a single guess.
#[derive(Debug, Clone, Copy, Default)]
pub struct SecantSolver;

impl SecantSolver {
    /// Second seed derived from the first: a small relative nudge, with an
    /// absolute floor so a zero guess still moves.
    #[must_use]
    pub fn second_seed(x0: f64) -> f64 {
        let nudge = if x0 >= 0.0 {
            SEED_RELATIVE_STEP
        } else {
            -SEED_RELATIVE_STEP
        };
        x0 * (1.0 + SEED_RELATIVE_STEP) + nudge
    }
}

impl RootFinder for SecantSolver {
    fn find_root<F>(&self, f: F, initial_guess: f64, config: &SolverConfig) -> MathResult<SolverResult>
    where
        F: Fn(f64) -> f64,
    {
        secant(f, initial_guess, Self::second_seed(initial_guess), config)
    }

    fn name(&self) -> &'static str {
        "Secant"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MathError;
    use approx::assert_relative_eq;

    #[test]
    fn test_solver_config() {
        let config = SolverConfig::default()
            .with_tolerance(1e-8)
            .with_max_iterations(20);

        assert!((config.tolerance - 1e-8).abs() < f64::EPSILON);
        assert_eq!(config.max_iterations, 20);
    }

    #[test]
    fn test_default_constants() {
        let config = SolverConfig::default();
        assert_eq!(config.tolerance, 1e-10);
        assert_eq!(config.max_iterations, 50);
    }

    #[test]
    fn test_second_seed() {
        assert_relative_eq!(SecantSolver::second_seed(1.0), 1.0002, epsilon = 1e-15);
        assert_relative_eq!(SecantSolver::second_seed(0.0), 1e-4, epsilon = 1e-15);
        assert!(SecantSolver::second_seed(-1.0) < -1.0);
    }

    #[test]
    fn test_root_finder_discount_factor() {
        // Par swap, 2 annual coupons at 4%: 1 - df2 - 0.04 * (df1 + df2) = 0, df1 known
        let df1 = 1.0 / 1.04;
        let f = |df2: f64| 1.0 - df2 - 0.04 * (df1 + df2);

        let result = SecantSolver
            .find_root(f, df1, &SolverConfig::default())
            .unwrap();

        assert_relative_eq!(result.root, 1.0 / 1.04_f64.powi(2), epsilon = 1e-12);
        assert!(result.iterations <= 3);
    }

    #[test]
    fn test_root_finder_reports_cap() {
        // No real root: x^2 + 1
        let f = |x: f64| x * x + 1.0;

        let err = SecantSolver
            .find_root(f, 0.5, &SolverConfig::default())
            .unwrap_err();

        assert!(matches!(
            err,
            MathError::ConvergenceFailed { .. }
                | MathError::DivisionByZero { .. }
                | MathError::NonFiniteValue { .. }
        ));
    }

    #[test]
    fn test_root_finder_name() {
        assert_eq!(SecantSolver.name(), "Secant");
    }
}
