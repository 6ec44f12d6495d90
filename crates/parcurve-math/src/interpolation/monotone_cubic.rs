//! Monotone piecewise cubic Hermite interpolation (PCHIP).
//!
//! Fritsch-Carlson slopes: knot derivatives are the weighted harmonic mean
//! of adjacent secant slopes, and zero wherever the data turns. The end
//! slopes use the one-sided three-point formula with the usual shape
//! safeguards, matching `scipy.interpolate.PchipInterpolator`.

use crate::error::MathResult;
use crate::interpolation::{locate, validate_knots, Extrapolation, Interpolator, Query};

/// Monotonicity-preserving cubic Hermite interpolator.
///
/// Between any two knots the interpolant never overshoots the data, so
/// monotone input stays monotone. With only two knots it degenerates to a
/// straight line.
///
/// # Example
///
/// ```rust
/// use parcurve_math::interpolation::{Interpolator, MonotoneCubic};
///
/// let xs = vec![0.0, 1.0, 2.0, 5.0];
/// let ys = vec![0.0, -0.03, -0.065, -0.18];
///
/// let pchip = MonotoneCubic::new(xs, ys).unwrap();
/// let y = pchip.interpolate(3.0).unwrap();
/// assert!(y < -0.065 && y > -0.18);
/// ```
#[derive(Debug, Clone)]
pub struct MonotoneCubic {
    xs: Vec<f64>,
    ys: Vec<f64>,
    /// First derivative at each knot
    slopes: Vec<f64>,
    extrapolation: Extrapolation,
}

impl MonotoneCubic {
    /// Creates a monotone cubic interpolator.
    ///
    /// # Errors
    ///
    /// Returns an error if there are fewer than 2 points, lengths differ,
    /// or `xs` is not strictly increasing.
    pub fn new(xs: Vec<f64>, ys: Vec<f64>) -> MathResult<Self> {
        validate_knots(&xs, &ys, 2)?;
        let slopes = knot_slopes(&xs, &ys);

        Ok(Self {
            xs,
            ys,
            slopes,
            extrapolation: Extrapolation::Forbid,
        })
    }

    /// Sets the out-of-range policy.
    #[must_use]
    pub fn with_extrapolation(mut self, extrapolation: Extrapolation) -> Self {
        self.extrapolation = extrapolation;
        self
    }

    /// First derivative at each knot.
    #[must_use]
    pub fn knot_derivatives(&self) -> &[f64] {
        &self.slopes
    }
}

impl Interpolator for MonotoneCubic {
    fn interpolate(&self, x: f64) -> MathResult<f64> {
        Ok(match locate(&self.xs, x, self.extrapolation)? {
            Query::Pinned(i) => self.ys[i],
            Query::Segment(i, x) => {
                let h = self.xs[i + 1] - self.xs[i];
                let t = (x - self.xs[i]) / h;
                let t2 = t * t;
                let t3 = t2 * t;

                let h00 = 2.0 * t3 - 3.0 * t2 + 1.0;
                let h10 = t3 - 2.0 * t2 + t;
                let h01 = -2.0 * t3 + 3.0 * t2;
                let h11 = t3 - t2;

                h00 * self.ys[i]
                    + h10 * h * self.slopes[i]
                    + h01 * self.ys[i + 1]
                    + h11 * h * self.slopes[i + 1]
            }
        })
    }

    fn derivative(&self, x: f64) -> MathResult<f64> {
        Ok(match locate(&self.xs, x, self.extrapolation)? {
            Query::Pinned(_) => 0.0,
            Query::Segment(i, x) => {
                let h = self.xs[i + 1] - self.xs[i];
                let t = (x - self.xs[i]) / h;
                let t2 = t * t;

                let dh00 = (6.0 * t2 - 6.0 * t) / h;
                let dh10 = 3.0 * t2 - 4.0 * t + 1.0;
                let dh01 = (-6.0 * t2 + 6.0 * t) / h;
                let dh11 = 3.0 * t2 - 2.0 * t;

                dh00 * self.ys[i]
                    + dh10 * self.slopes[i]
                    + dh01 * self.ys[i + 1]
                    + dh11 * self.slopes[i + 1]
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

/// Sign with `sign(0) = 0`.
fn sign(v: f64) -> f64 {
    if v > 0.0 {
        1.0
    } else if v < 0.0 {
        -1.0
    } else {
        0.0
    }
}

fn knot_slopes(xs: &[f64], ys: &[f64]) -> Vec<f64> {
    let n = xs.len();
    let h: Vec<f64> = xs.windows(2).map(|w| w[1] - w[0]).collect();
    let delta: Vec<f64> = (0..n - 1).map(|k| (ys[k + 1] - ys[k]) / h[k]).collect();

    if n == 2 {
        return vec![delta[0]; 2];
    }

    let mut d = vec![0.0; n];
    for k in 1..n - 1 {
        if sign(delta[k - 1]) * sign(delta[k]) > 0.0 {
            let w1 = 2.0 * h[k] + h[k - 1];
            let w2 = h[k] + 2.0 * h[k - 1];
            d[k] = (w1 + w2) / (w1 / delta[k - 1] + w2 / delta[k]);
        }
    }

    d[0] = end_slope(h[0], h[1], delta[0], delta[1]);
    d[n - 1] = end_slope(h[n - 2], h[n - 3], delta[n - 2], delta[n - 3]);
    d
}

/// One-sided three-point end slope, clipped to keep the end segment's shape.
fn end_slope(h0: f64, h1: f64, m0: f64, m1: f64) -> f64 {
    let d = ((2.0 * h0 + h1) * m0 - h0 * m1) / (h0 + h1);
    if sign(d) != sign(m0) {
        0.0
    } else if sign(m0) != sign(m1) && d.abs() > 3.0 * m0.abs() {
        3.0 * m0
    } else {
        d
    }
}
