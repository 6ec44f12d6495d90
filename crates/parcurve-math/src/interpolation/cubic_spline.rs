//! Natural cubic spline interpolation.

use crate::error::MathResult;
use crate::interpolation::{locate, validate_knots, Extrapolation, Interpolator, Query};
use crate::linear_algebra::solve_tridiagonal;

/// Natural cubic spline interpolation.
///
/// Piecewise cubic polynomials with continuous first and second
/// derivatives. "Natural" means the second derivative is zero at both
/// end knots.
///
/// # Example
///
/// ```rust
/// use parcurve_math::interpolation::{CubicSpline, Interpolator};
///
/// let xs = vec![0.0, 1.0, 2.0, 3.0];
/// let ys = vec![0.0, 1.0, 4.0, 9.0];
///
/// let spline = CubicSpline::new(xs, ys).unwrap();
/// let y = spline.interpolate(1.5).unwrap();
/// assert!(y > 1.0 && y < 4.0);
/// ```
#[derive(Debug, Clone)]
pub struct CubicSpline {
    xs: Vec<f64>,
    ys: Vec<f64>,
    /// Second derivatives at each knot
    y2s: Vec<f64>,
    extrapolation: Extrapolation,
}

impl CubicSpline {
    /// Creates a natural cubic spline interpolator.
    ///
    /// # Errors
    ///
    /// Returns an error if there are fewer than 3 points, lengths differ,
    /// or `xs` is not strictly increasing.
    pub fn new(xs: Vec<f64>, ys: Vec<f64>) -> MathResult<Self> {
        validate_knots(&xs, &ys, 3)?;
        let y2s = natural_second_derivatives(&xs, &ys)?;

        Ok(Self {
            xs,
            ys,
            y2s,
            extrapolation: Extrapolation::Forbid,
        })
    }

    /// Sets the out-of-range policy.
    #[must_use]
    pub fn with_extrapolation(mut self, extrapolation: Extrapolation) -> Self {
        self.extrapolation = extrapolation;
        self
    }

    /// Second derivative at each knot.
    #[must_use]
    pub fn second_derivatives(&self) -> &[f64] {
        &self.y2s
    }

    fn weights(&self, i: usize, x: f64) -> (f64, f64, f64) {
        let h = self.xs[i + 1] - self.xs[i];
        let a = (self.xs[i + 1] - x) / h;
        let b = (x - self.xs[i]) / h;
        (h, a, b)
    }
}

impl Interpolator for CubicSpline {
    fn interpolate(&self, x: f64) -> MathResult<f64> {
        Ok(match locate(&self.xs, x, self.extrapolation)? {
            Query::Pinned(i) => self.ys[i],
            Query::Segment(i, x) => {
                let (h, a, b) = self.weights(i, x);
                a * self.ys[i]
                    + b * self.ys[i + 1]
                    + ((a * a * a - a) * self.y2s[i] + (b * b * b - b) * self.y2s[i + 1]) * (h * h)
                        / 6.0
            }
        })
    }

    fn derivative(&self, x: f64) -> MathResult<f64> {
        Ok(match locate(&self.xs, x, self.extrapolation)? {
            Query::Pinned(_) => 0.0,
            Query::Segment(i, x) => {
                let (h, a, b) = self.weights(i, x);
                (self.ys[i + 1] - self.ys[i]) / h
                    - (3.0 * a * a - 1.0) * h * self.y2s[i] / 6.0
                    + (3.0 * b * b - 1.0) * h * self.y2s[i + 1] / 6.0
            }
        })
    }

    fn min_x(&self) -> f64 {
        self.xs[0]
    }

    fn max_x(&self) -> f64 {
        self.xs[self.xs.len() - 1]
    }
}

/// Second derivatives for a natural spline: interior knots from a
/// tridiagonal system, both ends pinned at zero.
fn natural_second_derivatives(xs: &[f64], ys: &[f64]) -> MathResult<Vec<f64>> {
    let n = xs.len();
    let h: Vec<f64> = xs.windows(2).map(|w| w[1] - w[0]).collect();
    let slopes: Vec<f64> = (0..n - 1).map(|i| (ys[i + 1] - ys[i]) / h[i]).collect();

    let interior = n - 2;
    let lower: Vec<f64> = (1..interior).map(|k| h[k]).collect();
    let upper = lower.clone();
    let diag: Vec<f64> = (1..=interior).map(|i| 2.0 * (h[i - 1] + h[i])).collect();
    let rhs: Vec<f64> = (1..=interior)
        .map(|i| 6.0 * (slopes[i] - slopes[i - 1]))
        .collect();

    let inner = solve_tridiagonal(&lower, &diag, &upper, &rhs)?;

    let mut y2s = Vec::with_capacity(n);
    y2s.push(0.0);
    y2s.extend(inner);
    y2s.push(0.0);
    Ok(y2s)
}
