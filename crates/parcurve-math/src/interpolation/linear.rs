//! Linear interpolation.

use crate::error::MathResult;
use crate::interpolation::{locate, validate_knots, Extrapolation, Interpolator, Query};

/// Linear interpolation between data points.
///
/// With [`Extrapolation::Flat`] this behaves like `numpy.interp`: queries
/// left of the first knot return the first value, queries right of the last
/// knot return the last value.
///
/// # Example
///
/// ```rust
/// use parcurve_math::interpolation::{Extrapolation, Interpolator, LinearInterpolator};
///
/// // Par swap rates quoted at 2Y and 5Y
/// let interp = LinearInterpolator::new(vec![2.0, 5.0], vec![0.030, 0.036])
///     .unwrap()
///     .with_extrapolation(Extrapolation::Flat);
///
/// assert!((interp.interpolate(3.5).unwrap() - 0.033).abs() < 1e-12);
/// assert!((interp.interpolate(1.0).unwrap() - 0.030).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct LinearInterpolator {
    xs: Vec<f64>,
    ys: Vec<f64>,
    extrapolation: Extrapolation,
}

impl LinearInterpolator {
    /// Creates a new linear interpolator.
    ///
    /// # Errors
    ///
    /// Returns an error if there are fewer than 2 points, lengths differ,
    /// or `xs` is not strictly increasing.
    pub fn new(xs: Vec<f64>, ys: Vec<f64>) -> MathResult<Self> {
        validate_knots(&xs, &ys, 2)?;
        Ok(Self {
            xs,
            ys,
            extrapolation: Extrapolation::Forbid,
        })
    }

    /// Sets the out-of-range policy.
    #[must_use]
    pub fn with_extrapolation(mut self, extrapolation: Extrapolation) -> Self {
        self.extrapolation = extrapolation;
        self
    }

    fn slope(&self, i: usize) -> f64 {
        (self.ys[i + 1] - self.ys[i]) / (self.xs[i + 1] - self.xs[i])
    }
}

impl Interpolator for LinearInterpolator {
    fn interpolate(&self, x: f64) -> MathResult<f64> {
        Ok(match locate(&self.xs, x, self.extrapolation)? {
            Query::Pinned(i) => self.ys[i],
            Query::Segment(i, x) => self.ys[i] + self.slope(i) * (x - self.xs[i]),
        })
    }

    fn derivative(&self, x: f64) -> MathResult<f64> {
        Ok(match locate(&self.xs, x, self.extrapolation)? {
            Query::Pinned(_) => 0.0,
            Query::Segment(i, _) => self.slope(i),
        })
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
    fn test_linear_interpolation() {
        let xs = vec![0.0, 1.0, 2.0, 3.0];
        let ys = vec![0.0, 1.0, 4.0, 9.0];

        let interp = LinearInterpolator::new(xs, ys).unwrap();

        assert_relative_eq!(interp.interpolate(1.0).unwrap(), 1.0, epsilon = 1e-10);
        assert_relative_eq!(interp.interpolate(1.5).unwrap(), 2.5, epsilon = 1e-10);
        assert_relative_eq!(interp.derivative(1.5).unwrap(), 3.0, epsilon = 1e-10);
    }

    #[test]
    fn test_extrapolation_forbidden_by_default() {
        let interp = LinearInterpolator::new(vec![0.0, 1.0], vec![0.0, 1.0]).unwrap();

        assert!(interp.interpolate(-0.1).is_err());
        assert!(interp.interpolate(1.1).is_err());
    }

    #[test]
    fn test_flat_extrapolation() {
        let interp = LinearInterpolator::new(vec![1.0, 2.0, 5.0], vec![0.03, 0.032, 0.036])
            .unwrap()
            .with_extrapolation(Extrapolation::Flat);

        assert_relative_eq!(interp.interpolate(0.25).unwrap(), 0.03, epsilon = 1e-15);
        assert_relative_eq!(interp.interpolate(7.0).unwrap(), 0.036, epsilon = 1e-15);
        assert_eq!(interp.derivative(7.0).unwrap(), 0.0);
    }

    #[test]
    fn test_extended_extrapolation() {
        let interp = LinearInterpolator::new(vec![0.0, 1.0], vec![1.0, 2.0])
            .unwrap()
            .with_extrapolation(Extrapolation::Extend);

        assert_relative_eq!(interp.interpolate(2.0).unwrap(), 3.0, epsilon = 1e-12);
        assert_relative_eq!(interp.interpolate(-1.0).unwrap(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_unsorted_rejected() {
        assert!(LinearInterpolator::new(vec![0.0, 2.0, 1.0], vec![0.0, 1.0, 2.0]).is_err());
    }
}
