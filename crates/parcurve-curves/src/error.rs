//! Error types for curve construction.
//!
//! Every failure aborts the whole build: a caller either receives a fully
//! calibrated [`DiscountCurve`](crate::DiscountCurve) or one of these.

use parcurve_math::MathError;
use thiserror::Error;

/// A specialized Result type for curve operations.
pub type CurveResult<T> = Result<T, CurveError>;

/// Error types for curve operations.
#[derive(Error, Debug, Clone)]
pub enum CurveError {
    /// The instrument set cannot define a curve at all.
    #[error("Configuration error: {reason}")]
    Configuration {
        /// What is missing or inconsistent.
        reason: String,
    },

    /// Instruments within a class are out of order or misaligned.
    #[error("Ordering error: {reason}")]
    Ordering {
        /// Description of the violation.
        reason: String,
    },

    /// Instrument classes overlap in maturity.
    #[error("Boundary error: {reason}")]
    Boundary {
        /// Description of the overlap.
        reason: String,
    },

    /// A root search for a pillar discount factor did not converge.
    #[error(
        "Convergence failed for {instrument} after {iterations} iterations (last df: {last_value}): {reason}"
    )]
    Convergence {
        /// Instrument whose pillar was being solved.
        instrument: String,
        /// Iterations used before giving up.
        iterations: u32,
        /// Last trial discount factor.
        last_value: f64,
        /// Solver diagnostic.
        reason: String,
    },

    /// A calibration instrument does not reprice against the finished curve.
    #[error(
        "Refit failed for {instrument}: value {value:.12} vs target {target} (tolerance {tolerance:.0e})"
    )]
    Refit {
        /// Offending instrument.
        instrument: String,
        /// Normalised value against the finished curve.
        value: f64,
        /// Expected normalised value.
        target: f64,
        /// Tolerance for the instrument's class.
        tolerance: f64,
    },

    /// Invalid value (NaN, Inf, or domain error).
    #[error("Invalid value: {reason}")]
    InvalidValue {
        /// Description of why value is invalid.
        reason: String,
    },

    /// Interpolation failed.
    #[error("Interpolation error: {reason}")]
    Interpolation {
        /// Description of the interpolation error.
        reason: String,
    },
}

impl CurveError {
    /// Creates a configuration error.
    #[must_use]
    pub fn configuration(reason: impl Into<String>) -> Self {
        Self::Configuration {
            reason: reason.into(),
        }
    }

    /// Creates an ordering error.
    #[must_use]
    pub fn ordering(reason: impl Into<String>) -> Self {
        Self::Ordering {
            reason: reason.into(),
        }
    }

    /// Creates a boundary error.
    #[must_use]
    pub fn boundary(reason: impl Into<String>) -> Self {
        Self::Boundary {
            reason: reason.into(),
        }
    }

    /// Creates a convergence error from a failed root search.
    #[must_use]
    pub fn convergence(instrument: impl Into<String>, source: &MathError, fallback: f64) -> Self {
        let (iterations, last_value) = match *source {
            MathError::ConvergenceFailed {
                iterations,
                last_estimate,
                ..
            } => (iterations, last_estimate),
            MathError::NonFiniteValue { x, .. } => (0, x),
            _ => (0, fallback),
        };
        Self::Convergence {
            instrument: instrument.into(),
            iterations,
            last_value,
            reason: source.to_string(),
        }
    }

    /// Creates a refit error.
    #[must_use]
    pub fn refit(instrument: impl Into<String>, value: f64, target: f64, tolerance: f64) -> Self {
        Self::Refit {
            instrument: instrument.into(),
            value,
            target,
            tolerance,
        }
    }

    /// Creates an invalid value error.
    #[must_use]
    pub fn invalid_value(reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            reason: reason.into(),
        }
    }

    /// Creates an interpolation error.
    #[must_use]
    pub fn interpolation(reason: impl Into<String>) -> Self {
        Self::Interpolation {
            reason: reason.into(),
        }
    }
}

impl From<MathError> for CurveError {
    fn from(err: MathError) -> Self {
        Self::Interpolation {
            reason: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering_display() {
        let err = CurveError::ordering("swaps have different start dates");
        let msg = format!("{}", err);
        assert!(msg.contains("Ordering"));
        assert!(msg.contains("different start dates"));
    }

    #[test]
    fn test_convergence_from_math_error() {
        let math = MathError::convergence_failed(50, 1e-3, 0.91);
        let err = CurveError::convergence("Swap(0.00 -> 5.00 @ 5.0000%)", &math, 0.95);

        match err {
            CurveError::Convergence {
                iterations,
                last_value,
                ..
            } => {
                assert_eq!(iterations, 50);
                assert_eq!(last_value, 0.91);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_refit_display() {
        let err = CurveError::refit("Deposit(0.00 -> 0.25 @ 5.0000%)", 1.000001, 1.0, 1e-10);
        let msg = format!("{}", err);
        assert!(msg.contains("Refit failed"));
        assert!(msg.contains("Deposit"));
    }
}
