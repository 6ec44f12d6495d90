//! One-dimensional interpolation.
//!
//! Curve construction needs interpolation in two places: discount factors
//! between solved pillars, and par swap rates between quoted maturities.
//!
//! # Available Methods
//!
//! - [`LinearInterpolator`]: piecewise linear, used for par swap rates
//! - [`LogLinearInterpolator`]: linear in `ln(y)`, i.e. piecewise flat forwards on discount factors
//! - [`CubicSpline`]: natural cubic spline (zero second derivative at both ends)
//! - [`MonotoneCubic`]: Fritsch-Carlson monotone piecewise cubic Hermite (PCHIP)
//!
//! | Method | Smoothness | Preserves monotonicity | Minimum points |
//! |--------|------------|------------------------|----------------|
//! | Linear | C0 | Yes | 2 |
//! | Log-Linear | C0 | Yes | 2 |
//! | Cubic Spline | C2 | No | 3 |
//! | Monotone Cubic | C1 | Yes | 2 |
//!
//! Out-of-range queries are governed by [`Extrapolation`]. The default is to
//! refuse them.

mod cubic_spline;
mod linear;
mod log_linear;
mod monotone_cubic;

pub use cubic_spline::CubicSpline;
pub use linear::LinearInterpolator;
pub use log_linear::LogLinearInterpolator;
pub use monotone_cubic::MonotoneCubic;

use crate::error::{MathError, MathResult};

/// Trait for interpolation methods.
pub trait Interpolator: Send + Sync {
    /// Returns the interpolated value at x.
    fn interpolate(&self, x: f64) -> MathResult<f64>;

    /// Returns the first derivative at x.
    fn derivative(&self, x: f64) -> MathResult<f64>;

    /// Returns the minimum x value in the data.
    fn min_x(&self) -> f64;

    /// Returns the maximum x value in the data.
    fn max_x(&self) -> f64;

    /// Checks if x is within the interpolation range.
    fn in_range(&self, x: f64) -> bool {
        x >= self.min_x() && x <= self.max_x()
    }
}

/// Behaviour outside the knot range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Extrapolation {
    /// Out-of-range queries return [`MathError::ExtrapolationNotAllowed`].
    #[default]
    Forbid,
    /// Hold the end value constant (zero slope).
    Flat,
    /// Continue the end segment's own formula.
    Extend,
}

/// Where a query lands relative to the knots.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Query {
    /// Evaluate segment `i` at `x`.
    Segment(usize, f64),
    /// Flat extrapolation: return the value at knot `i`, slope zero.
    Pinned(usize),
}

/// Checks knot vectors shared by every interpolator.
pub(crate) fn validate_knots(xs: &[f64], ys: &[f64], min_points: usize) -> MathResult<()> {
    if xs.len() < min_points {
        return Err(MathError::insufficient_data(min_points, xs.len()));
    }
    if xs.len() != ys.len() {
        return Err(MathError::invalid_input(format!(
            "xs and ys must have same length: {} vs {}",
            xs.len(),
            ys.len()
        )));
    }
    if xs.windows(2).any(|w| w[1] <= w[0]) {
        return Err(MathError::invalid_input(
            "x values must be strictly increasing",
        ));
    }
    if xs.iter().chain(ys).any(|v| !v.is_finite()) {
        return Err(MathError::invalid_input("knots must be finite"));
    }
    Ok(())
}

/// Index `i` with `xs[i] <= x < xs[i+1]`, clamped to the end segments.
pub(crate) fn find_segment(xs: &[f64], x: f64) -> usize {
    let last = xs.len() - 2;
    match xs.partition_point(|&probe| probe <= x) {
        0 => 0,
        i => (i - 1).min(last),
    }
}

/// Resolves a query point against the knot range and extrapolation policy.
pub(crate) fn locate(xs: &[f64], x: f64, policy: Extrapolation) -> MathResult<Query> {
    let min = xs[0];
    let max = xs[xs.len() - 1];
    if x >= min && x <= max {
        return Ok(Query::Segment(find_segment(xs, x), x));
    }
    match policy {
        Extrapolation::Forbid => Err(MathError::ExtrapolationNotAllowed { x, min, max }),
        Extrapolation::Flat if x < min => Ok(Query::Pinned(0)),
        Extrapolation::Flat => Ok(Query::Pinned(xs.len() - 1)),
        Extrapolation::Extend => Ok(Query::Segment(find_segment(xs, x), x)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn test_find_segment() {
        let xs = [0.0, 1.0, 2.0, 3.0];
        assert_eq!(find_segment(&xs, -1.0), 0);
        assert_eq!(find_segment(&xs, 0.0), 0);
        assert_eq!(find_segment(&xs, 1.0), 1);
        assert_eq!(find_segment(&xs, 2.5), 2);
        assert_eq!(find_segment(&xs, 3.0), 2);
        assert_eq!(find_segment(&xs, 10.0), 2);
    }

    #[test]
    fn test_validate_knots() {
        assert!(validate_knots(&[0.0, 1.0], &[1.0, 2.0], 2).is_ok());
        assert!(validate_knots(&[0.0], &[1.0], 2).is_err());
        assert!(validate_knots(&[0.0, 1.0], &[1.0], 2).is_err());
        assert!(validate_knots(&[1.0, 1.0], &[1.0, 2.0], 2).is_err());
        assert!(validate_knots(&[0.0, 1.0], &[1.0, f64::NAN], 2).is_err());
    }

    #[test]
    fn test_all_interpolators_through_points() {
        let times = vec![0.5, 1.0, 2.0, 3.0, 5.0];
        let log_dfs: Vec<f64> = [0.02, 0.025, 0.03, 0.035, 0.04]
            .iter()
            .zip(&times)
            .map(|(r, t)| -r * t)
            .collect();
        let dfs: Vec<f64> = log_dfs.iter().map(|l| l.exp()).collect();

        let linear = LinearInterpolator::new(times.clone(), log_dfs.clone()).unwrap();
        let spline = CubicSpline::new(times.clone(), log_dfs.clone()).unwrap();
        let pchip = MonotoneCubic::new(times.clone(), log_dfs.clone()).unwrap();
        let log_linear = LogLinearInterpolator::new(times.clone(), dfs.clone()).unwrap();

        for i in 0..times.len() {
            let t = times[i];
            assert_relative_eq!(linear.interpolate(t).unwrap(), log_dfs[i], epsilon = 1e-12);
            assert_relative_eq!(spline.interpolate(t).unwrap(), log_dfs[i], epsilon = 1e-12);
            assert_relative_eq!(pchip.interpolate(t).unwrap(), log_dfs[i], epsilon = 1e-12);
            assert_relative_eq!(log_linear.interpolate(t).unwrap(), dfs[i], epsilon = 1e-12);
        }
    }

    #[test]
    fn test_derivative_consistency() {
        let times = vec![0.5, 1.0, 2.0, 3.0, 5.0];
        let ys = vec![0.98, 0.96, 0.93, 0.89, 0.82];

        check_derivative(&LinearInterpolator::new(times.clone(), ys.clone()).unwrap(), 1.5, "Linear");
        check_derivative(&LogLinearInterpolator::new(times.clone(), ys.clone()).unwrap(), 1.5, "LogLinear");
        check_derivative(&CubicSpline::new(times.clone(), ys.clone()).unwrap(), 1.5, "CubicSpline");
        check_derivative(&MonotoneCubic::new(times, ys).unwrap(), 1.5, "MonotoneCubic");
    }

    fn check_derivative(interp: &dyn Interpolator, t: f64, name: &str) {
        let h = 1e-6;
        let y_plus = interp.interpolate(t + h).unwrap();
        let y_minus = interp.interpolate(t - h).unwrap();
        let numerical = (y_plus - y_minus) / (2.0 * h);

        let analytical = interp.derivative(t).unwrap();

        assert!(
            (analytical - numerical).abs() < 1e-6,
            "{} derivative at t={}: analytical={}, numerical={}",
            name,
            t,
            analytical,
            numerical
        );
    }

    proptest! {
        #[test]
        fn prop_monotone_data_stays_monotone(
            steps in prop::collection::vec(0.001f64..0.2, 3..8),
            probe in 0.0f64..1.0,
        ) {
            let xs: Vec<f64> = (0..=steps.len()).map(|i| i as f64).collect();
            let mut ys = vec![0.0];
            for s in &steps {
                let last = ys[ys.len() - 1];
                ys.push(last - s);
            }
            let pchip = MonotoneCubic::new(xs.clone(), ys).unwrap();

            let x_max = xs[xs.len() - 1];
            let a = probe * x_max;
            let b = (a + 0.05).min(x_max);
            prop_assert!(pchip.interpolate(b).unwrap() <= pchip.interpolate(a).unwrap() + 1e-14);
        }
    }
}
