//! Linear algebra utilities.
//!
//! Only banded systems show up in curve work (spline second-derivative
//! fits), so this stays a single Thomas-algorithm solve over slices.

use crate::error::{MathError, MathResult};

/// Solves a tridiagonal system of equations.
///
/// The system has the form:
/// ```text
/// | b[0]  c[0]   0    ...    0     | | x[0]   |   | d[0]   |
/// | a[0]  b[1]  c[1]  ...    0     | | x[1]   |   | d[1]   |
/// |  0    a[1]  b[2]  ...    0     | | x[2]   | = | d[2]   |
/// | ...   ...   ...   ...   ...    | | ...    |   | ...    |
/// |  0     0     0   a[n-2] b[n-1] | | x[n-1] |   | d[n-1] |
/// ```
///
/// # Arguments
///
/// * `a` - Lower diagonal (length n-1)
/// * `b` - Main diagonal (length n)
/// * `c` - Upper diagonal (length n-1)
/// * `d` - Right-hand side (length n)
///
/// # Errors
///
/// Returns [`MathError::InvalidInput`] on inconsistent lengths and
/// [`MathError::SingularMatrix`] when a pivot vanishes.
pub fn solve_tridiagonal(a: &[f64], b: &[f64], c: &[f64], d: &[f64]) -> MathResult<Vec<f64>> {
    let n = b.len();
    if n == 0 {
        return Ok(Vec::new());
    }
    if a.len() != n - 1 || c.len() != n - 1 || d.len() != n {
        return Err(MathError::invalid_input(
            "Tridiagonal system has inconsistent dimensions",
        ));
    }

    let mut c_prime = vec![0.0; n];
    let mut d_prime = vec![0.0; n];

    // Forward sweep
    let mut pivot = b[0];
    for i in 0..n {
        if i > 0 {
            pivot = b[i] - a[i - 1] * c_prime[i - 1];
        }
        if pivot.abs() < 1e-15 {
            return Err(MathError::SingularMatrix);
        }
        if i < n - 1 {
            c_prime[i] = c[i] / pivot;
        }
        let carried = if i > 0 { a[i - 1] * d_prime[i - 1] } else { 0.0 };
        d_prime[i] = (d[i] - carried) / pivot;
    }

    // Back substitution
    let mut x = d_prime;
    for i in (0..n - 1).rev() {
        x[i] -= c_prime[i] * x[i + 1];
    }

    Ok(x)
}
