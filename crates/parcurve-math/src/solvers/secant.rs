//! Secant root-finding algorithm.

use crate::error::{MathError, MathResult};
use crate::solvers::{SolverConfig, SolverResult};

/// Secant root-finding algorithm.
///
/// Similar to Newton-Raphson but approximates the derivative using
/// finite differences from the previous iteration. Does not require
/// an analytical derivative or a bracketing interval.
///
/// Convergence is declared when either `|f(x)|` or the step size drops
/// below `config.tolerance`. A NaN or infinite function value aborts the
/// search with [`MathError::NonFiniteValue`] rather than wandering on.
///
/// # Arguments
///
/// * `f` - The function for which to find a root
/// * `x0` - First initial guess
/// * `x1` - Second initial guess (should be different from x0)
/// * `config` - Solver configuration
///
/// # Example
///
/// ```rust
/// use parcurve_math::solvers::{secant, SolverConfig};
///
/// // Find root of x^2 - 2 (i.e., sqrt(2))
/// let f = |x: f64| x * x - 2.0;
///
/// let result = secant(f, 1.0, 2.0, &SolverConfig::default()).unwrap();
/// assert!((result.root - std::f64::consts::SQRT_2).abs() < 1e-10);
/// ```
pub fn secant<F>(f: F, x0: f64, x1: f64, config: &SolverConfig) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
{
    let eval = |x: f64| -> MathResult<f64> {
        let fx = f(x);
        if fx.is_finite() {
            Ok(fx)
        } else {
            Err(MathError::non_finite(x, fx))
        }
    };

    let mut x_prev = x0;
    let mut f_prev = eval(x_prev)?;
    if f_prev.abs() < config.tolerance {
        return Ok(SolverResult {
            root: x_prev,
            iterations: 0,
            residual: f_prev,
        });
    }

    let mut x_curr = x1;
    let mut f_curr = eval(x_curr)?;

    for iteration in 0..config.max_iterations {
        log::trace!("secant iteration {iteration}: x = {x_curr:.15}, f = {f_curr:.3e}");

        if f_curr.abs() < config.tolerance {
            return Ok(SolverResult {
                root: x_curr,
                iterations: iteration,
                residual: f_curr,
            });
        }

        // Parallel secant line
        let denom = f_curr - f_prev;
        if denom.abs() < 1e-15 {
            return Err(MathError::DivisionByZero { value: denom });
        }

        let x_next = x_curr - f_curr * (x_curr - x_prev) / denom;
        if !x_next.is_finite() {
            return Err(MathError::non_finite(x_curr, x_next));
        }

        if (x_next - x_curr).abs() < config.tolerance {
            let f_next = eval(x_next)?;
            return Ok(SolverResult {
                root: x_next,
                iterations: iteration + 1,
                residual: f_next,
            });
        }

        x_prev = x_curr;
        f_prev = f_curr;
        x_curr = x_next;
        f_curr = eval(x_curr)?;
    }

    Err(MathError::convergence_failed(
        config.max_iterations,
        f_curr.abs(),
        x_curr,
    ))
}
