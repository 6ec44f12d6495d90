//! Interpolation schemes for discount curves.
//!
//! [`InterpolationScheme`] names the law used between curve nodes;
//! [`DfInterpolator`] fits that law over `(time, df)` nodes and evaluates it.

use serde::{Deserialize, Serialize};

use parcurve_math::interpolation::{CubicSpline, Interpolator, LogLinearInterpolator, MonotoneCubic};

use crate::error::{CurveError, CurveResult};

/// Interpolation scheme for a bootstrapped discount curve.
///
/// The scheme also selects the bootstrap strategy: [`LinearSwapRates`]
/// runs the closed-form swap walk, every other scheme the iterative
/// root-finding path.
///
/// [`LinearSwapRates`]: InterpolationScheme::LinearSwapRates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum InterpolationScheme {
    /// Log-linear discount factors (piecewise flat forwards).
    #[default]
    FlatForward,

    /// Par swap rates interpolated linearly onto the longest swap's
    /// coupon grid; discount factors are flat-forward between nodes.
    LinearSwapRates,

    /// Natural cubic spline on `ln(df)`.
    CubicSplineLogDf,

    /// Monotone (PCHIP) cubic on `ln(df)`.
    MonotoneSplineLogDf,
}

impl InterpolationScheme {
    /// Returns true if this scheme uses the closed-form swap walk.
    #[must_use]
    pub fn is_linear_swap_rate(&self) -> bool {
        matches!(self, Self::LinearSwapRates)
    }

    /// Returns true if this scheme fits a global spline.
    #[must_use]
    pub fn is_spline(&self) -> bool {
        matches!(self, Self::CubicSplineLogDf | Self::MonotoneSplineLogDf)
    }
}

impl std::fmt::Display for InterpolationScheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::FlatForward => "Flat Forward",
            Self::LinearSwapRates => "Linear Swap Rates",
            Self::CubicSplineLogDf => "Cubic Spline (log df)",
            Self::MonotoneSplineLogDf => "Monotone Spline (log df)",
        };
        write!(f, "{name}")
    }
}

/// Fitted state for one scheme.
#[derive(Debug, Clone)]
enum Fitted {
    /// Root node only: every query returns 1.0.
    Root,
    LogLinear(LogLinearInterpolator),
    /// Spline over `ln(df)`.
    CubicLog(CubicSpline),
    /// PCHIP over `ln(df)`.
    MonotoneLog(MonotoneCubic),
}

/// Discount factor interpolator over curve nodes.
///
/// Queries at or before `t = 0` return exactly 1.0. Beyond the last node
/// the zero rate is held flat: `df(t) = df_last^(t / t_last)`. Spline
/// schemes fall back to log-linear until three nodes exist.
#[derive(Debug, Clone)]
pub struct DfInterpolator {
    scheme: InterpolationScheme,
    last_time: f64,
    last_df: f64,
    fitted: Fitted,
}

impl DfInterpolator {
    /// Creates an unfitted interpolator (behaves as the root node alone).
    #[must_use]
    pub fn new(scheme: InterpolationScheme) -> Self {
        Self {
            scheme,
            last_time: 0.0,
            last_df: 1.0,
            fitted: Fitted::Root,
        }
    }

    /// Returns the scheme.
    #[must_use]
    pub fn scheme(&self) -> InterpolationScheme {
        self.scheme
    }

    /// Recomputes the fitted state from the full node arrays.
    ///
    /// # Errors
    ///
    /// Returns an error if the arrays differ in length, are empty, contain a
    /// non-positive discount factor, or times are not strictly increasing.
    pub fn fit(&mut self, times: &[f64], dfs: &[f64]) -> CurveResult<()> {
        if times.len() != dfs.len() || times.is_empty() {
            return Err(CurveError::interpolation(format!(
                "cannot fit {} times against {} discount factors",
                times.len(),
                dfs.len()
            )));
        }
        if let Some(bad) = dfs.iter().find(|df| !(**df > 0.0 && df.is_finite())) {
            return Err(CurveError::invalid_value(format!(
                "discount factor {bad} is not positive and finite"
            )));
        }

        let n = times.len();
        let log_dfs = || dfs.iter().map(|df| df.ln()).collect::<Vec<_>>();
        let fitted = match self.scheme {
            _ if n == 1 => Fitted::Root,
            InterpolationScheme::CubicSplineLogDf if n >= 3 => {
                Fitted::CubicLog(CubicSpline::new(times.to_vec(), log_dfs())?)
            }
            InterpolationScheme::MonotoneSplineLogDf if n >= 3 => {
                Fitted::MonotoneLog(MonotoneCubic::new(times.to_vec(), log_dfs())?)
            }
            _ => Fitted::LogLinear(LogLinearInterpolator::new(times.to_vec(), dfs.to_vec())?),
        };

        self.fitted = fitted;
        self.last_time = times[n - 1];
        self.last_df = dfs[n - 1];
        Ok(())
    }

    /// Discount factor at curve-relative time `t`.
    ///
    /// # Errors
    ///
    /// Returns an error if `t` is NaN or the fitted interpolant rejects it.
    pub fn evaluate(&self, t: f64) -> CurveResult<f64> {
        if t.is_nan() {
            return Err(CurveError::invalid_value("discount factor requested at NaN time"));
        }
        if t <= 0.0 {
            return Ok(1.0);
        }
        if t > self.last_time {
            if self.last_time <= 0.0 {
                return Ok(1.0);
            }
            return Ok(self.last_df.powf(t / self.last_time));
        }

        let df = match &self.fitted {
            Fitted::Root => 1.0,
            Fitted::LogLinear(interp) => interp.interpolate(t)?,
            Fitted::CubicLog(spline) => spline.interpolate(t)?.exp(),
            Fitted::MonotoneLog(pchip) => pchip.interpolate(t)?.exp(),
        };
        Ok(df)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const ALL: [InterpolationScheme; 4] = [
        InterpolationScheme::FlatForward,
        InterpolationScheme::LinearSwapRates,
        InterpolationScheme::CubicSplineLogDf,
        InterpolationScheme::MonotoneSplineLogDf,
    ];

    fn nodes() -> (Vec<f64>, Vec<f64>) {
        let times = vec![0.0, 0.25, 1.0, 2.0, 5.0];
        let dfs = vec![1.0, 0.9876, 0.96, 0.925, 0.83];
        (times, dfs)
    }

    #[test]
    fn test_root_node_is_exact() {
        let (times, dfs) = nodes();
        for scheme in ALL {
            let mut interp = DfInterpolator::new(scheme);
            interp.fit(&times, &dfs).unwrap();
            assert_eq!(interp.evaluate(0.0).unwrap(), 1.0, "{scheme}");
            assert_eq!(interp.evaluate(-1.0).unwrap(), 1.0, "{scheme}");
        }
    }

    #[test]
    fn test_nodes_are_reproduced() {
        let (times, dfs) = nodes();
        for scheme in ALL {
            let mut interp = DfInterpolator::new(scheme);
            interp.fit(&times, &dfs).unwrap();
            for (t, df) in times.iter().zip(&dfs) {
                assert_relative_eq!(interp.evaluate(*t).unwrap(), *df, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_flat_zero_rate_extrapolation() {
        let (times, dfs) = nodes();
        let mut interp = DfInterpolator::new(InterpolationScheme::CubicSplineLogDf);
        interp.fit(&times, &dfs).unwrap();

        assert_relative_eq!(
            interp.evaluate(10.0).unwrap(),
            0.83_f64.powf(2.0),
            epsilon = 1e-14
        );
    }

    #[test]
    fn test_flat_forward_midpoint() {
        let mut interp = DfInterpolator::new(InterpolationScheme::FlatForward);
        interp.fit(&[0.0, 1.0], &[1.0, 0.81]).unwrap();
        assert_relative_eq!(interp.evaluate(0.5).unwrap(), 0.9, epsilon = 1e-14);
    }

    #[test]
    fn test_root_only() {
        let mut interp = DfInterpolator::new(InterpolationScheme::MonotoneSplineLogDf);
        interp.fit(&[0.0], &[1.0]).unwrap();
        assert_eq!(interp.evaluate(3.0).unwrap(), 1.0);
    }

    #[test]
    fn test_spline_falls_back_with_two_nodes() {
        let mut spline = DfInterpolator::new(InterpolationScheme::CubicSplineLogDf);
        let mut flat = DfInterpolator::new(InterpolationScheme::FlatForward);
        spline.fit(&[0.0, 2.0], &[1.0, 0.9]).unwrap();
        flat.fit(&[0.0, 2.0], &[1.0, 0.9]).unwrap();

        assert_eq!(spline.evaluate(1.3).unwrap(), flat.evaluate(1.3).unwrap());
    }

    #[test]
    fn test_refit_is_incremental() {
        let mut interp = DfInterpolator::new(InterpolationScheme::FlatForward);
        interp.fit(&[0.0, 1.0], &[1.0, 0.97]).unwrap();
        let before = interp.evaluate(1.5).unwrap();

        interp.fit(&[0.0, 1.0, 2.0], &[1.0, 0.97, 0.9]).unwrap();
        let after = interp.evaluate(1.5).unwrap();

        assert!(after < before);
    }

    #[test]
    fn test_rejects_bad_nodes() {
        let mut interp = DfInterpolator::new(InterpolationScheme::FlatForward);
        assert!(interp.fit(&[0.0, 1.0], &[1.0, -0.5]).is_err());
        assert!(interp.fit(&[0.0, 1.0], &[1.0]).is_err());
        assert!(interp.fit(&[0.0, 0.0], &[1.0, 0.9]).is_err());
    }

    #[test]
    fn test_scheme_serde_names() {
        let json = serde_json::to_string(&InterpolationScheme::MonotoneSplineLogDf).unwrap();
        assert_eq!(json, "\"monotone_spline_log_df\"");
    }
}
