//! Log-linear interpolation.
//!
//! Interpolates the logarithm of values. On discount factors this gives a
//! piecewise constant instantaneous forward rate between knots.

use crate::error::{MathError, MathResult};
use crate::interpolation::{locate, validate_knots, Extrapolation, Interpolator, Query};

/// Log-linear interpolation between strictly positive data points.
///
/// ```text
/// y(x) = exp(linear_interpolate(x, ln(y)))
/// ```
///
/// # Example
///
/// ```rust
/// use parcurve_math::interpolation::{LogLinearInterpolator, Interpolator};
///
/// let times = vec![0.0, 1.0, 2.0, 3.0];
/// let discount_factors = vec![1.0, 0.97, 0.94, 0.91];
///
/// let interp = LogLinearInterpolator::new(times, discount_factors).unwrap();
/// let df = interp.interpolate(1.5).unwrap();
/// assert!(df < 0.97 && df > 0.94);
/// ```
#[derive(Debug, Clone)]
pub struct LogLinearInterpolator {
    xs: Vec<f64>,
    /// ln(y) at each knot
    log_ys: Vec<f64>,
    extrapolation: Extrapolation,
}

impl LogLinearInterpolator {
    /// Creates a new log-linear interpolator.
    ///
    /// # Errors
    ///
    /// Returns an error if there are fewer than 2 points, lengths differ,
    /// `xs` is not strictly increasing, or any y value is non-positive.
    pub fn new(xs: Vec<f64>, ys: Vec<f64>) -> MathResult<Self> {
        validate_knots(&xs, &ys, 2)?;

        let log_ys = ys
            .iter()
            .enumerate()
            .map(|(i, &y)| {
                if y > 0.0 {
                    Ok(y.ln())
                } else {
                    Err(MathError::invalid_input(format!(
                        "y[{i}] = {y} is not positive; log-linear requires positive values"
                    )))
                }
            })
            .collect::<MathResult<Vec<_>>>()?;

        Ok(Self {
            xs,
            log_ys,
            extrapolation: Extrapolation::Forbid,
        })
    }

    /// Sets the out-of-range policy.
    #[must_use]
    pub fn with_extrapolation(mut self, extrapolation: Extrapolation) -> Self {
        self.extrapolation = extrapolation;
        self
    }

    fn log_value(&self, query: Query) -> (f64, f64) {
        match query {
            Query::Pinned(i) => (self.log_ys[i], 0.0),
            Query::Segment(i, x) => {
                let slope =
                    (self.log_ys[i + 1] - self.log_ys[i]) / (self.xs[i + 1] - self.xs[i]);
                (self.log_ys[i] + slope * (x - self.xs[i]), slope)
            }
        }
    }
}

impl Interpolator for LogLinearInterpolator {
    fn interpolate(&self, x: f64) -> MathResult<f64> {
        let (log_y, _) = self.log_value(locate(&self.xs, x, self.extrapolation)?);
        Ok(log_y.exp())
    }

    fn derivative(&self, x: f64) -> MathResult<f64> {
        // dy/dx = y * d(ln y)/dx
        let (log_y, slope) = self.log_value(locate(&self.xs, x, self.extrapolation)?);
        Ok(log_y.exp() * slope)
    }

    fn min_x(&self) -> f64 {
        self.xs[0]
    }

    fn max_x(&self) -> f64 {
        self.xs[self.xs.len() - 1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_log_linear_through_points() {
        let xs = vec![0.0, 1.0, 2.0, 3.0];
        let ys = vec![1.0, 0.97, 0.94, 0.91];

        let interp = LogLinearInterpolator::new(xs.clone(), ys.clone()).unwrap();

        for (x, y) in xs.iter().zip(ys.iter()) {
            assert_relative_eq!(interp.interpolate(*x).unwrap(), *y, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_log_linear_exponential_decay() {
        // y = exp(-r*t) is reproduced exactly
        let r: f64 = 0.05;
        let xs = vec![0.0, 1.0, 2.0, 3.0];
        let ys: Vec<f64> = xs.iter().map(|&t: &f64| (-r * t).exp()).collect();

        let interp = LogLinearInterpolator::new(xs, ys).unwrap();

        let t = 1.5;
        assert_relative_eq!(interp.interpolate(t).unwrap(), (-r * t).exp(), epsilon = 1e-12);
        assert_relative_eq!(
            interp.derivative(t).unwrap(),
            -r * (-r * t).exp(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_geometric_midpoint() {
        let interp = LogLinearInterpolator::new(vec![0.0, 1.0], vec![1.0, 0.81]).unwrap();
        assert_relative_eq!(interp.interpolate(0.5).unwrap(), 0.9, epsilon = 1e-12);
    }

    #[test]
    fn test_log_linear_rejects_non_positive() {
        let xs = vec![0.0, 1.0, 2.0];
        let ys = vec![1.0, 0.0, -1.0];

        assert!(LogLinearInterpolator::new(xs, ys).is_err());
    }

    #[test]
    fn test_log_linear_extrapolation() {
        let xs = vec![0.0, 1.0, 2.0];
        let ys = vec![1.0, 0.9, 0.81];

        let forbid = LogLinearInterpolator::new(xs.clone(), ys.clone()).unwrap();
        assert!(forbid.interpolate(2.5).is_err());

        let extend = LogLinearInterpolator::new(xs, ys)
            .unwrap()
            .with_extrapolation(Extrapolation::Extend);
        assert_relative_eq!(extend.interpolate(3.0).unwrap(), 0.729, epsilon = 1e-12);
    }
}
