//! Core traits for discount curve queries.
//!
//! This module defines the [`Curve`] trait that both the finished
//! [`DiscountCurve`](crate::DiscountCurve) and the in-progress
//! [`CurveBuilder`](crate::bootstrap::CurveBuilder) satisfy, so
//! instruments can value themselves against either.

use crate::compounding::Compounding;
use crate::error::CurveResult;

/// The core trait for discount curves.
///
/// Times come in two flavours. Curve-relative times `t` are measured from
/// the curve origin ([`valuation_time`](Curve::valuation_time)); absolute
/// times share the axis instruments are quoted on. Instruments always ask
/// for [`discount_factor_at`](Curve::discount_factor_at) with absolute times.
///
/// # Derived Methods
///
/// The trait provides default implementations for:
/// - [`discount_factor_at`](Curve::discount_factor_at): absolute-time lookup
/// - [`zero_rate`](Curve::zero_rate): Derived from discount factors
/// - [`forward_rate`](Curve::forward_rate): Simple forward between two times
/// - [`instantaneous_forward`](Curve::instantaneous_forward): Limiting forward rate
pub trait Curve: Send + Sync {
    /// Returns the discount factor from the curve origin to time `t`.
    ///
    /// Returns exactly 1.0 for `t <= 0`.
    fn discount_factor(&self, t: f64) -> CurveResult<f64>;

    /// Absolute time of the curve origin.
    fn valuation_time(&self) -> f64;

    /// Curve-relative time of the last node.
    fn max_time(&self) -> f64;

    /// Returns the discount factor to an absolute time.
    fn discount_factor_at(&self, time: f64) -> CurveResult<f64> {
        self.discount_factor(time - self.valuation_time())
    }

    /// Returns the zero rate at time `t` with the specified compounding.
    fn zero_rate(&self, t: f64, compounding: Compounding) -> CurveResult<f64> {
        let df = self.discount_factor(t)?;
        Ok(compounding.zero_rate(df, t))
    }

    /// Returns the simply-compounded forward rate between times `t1` and `t2`.
    ///
    /// `F(t1, t2) = (DF(t1) / DF(t2) - 1) / (t2 - t1)`
    fn forward_rate(&self, t1: f64, t2: f64) -> CurveResult<f64> {
        if t2 <= t1 {
            return Ok(0.0);
        }

        let df1 = self.discount_factor(t1)?;
        let df2 = self.discount_factor(t2)?;

        if df2 <= 0.0 {
            return Ok(0.0);
        }

        Ok((df1 / df2 - 1.0) / (t2 - t1))
    }

    /// Returns the instantaneous forward rate at time `t`.
    ///
    /// `f(t) = -d(ln DF(t))/dt`, approximated with a one-day forward step.
    fn instantaneous_forward(&self, t: f64) -> CurveResult<f64> {
        let h = 1.0 / 365.0;

        let df = self.discount_factor(t)?;
        let df_plus = self.discount_factor(t + h)?;

        if df <= 0.0 || df_plus <= 0.0 {
            return Ok(0.0);
        }

        Ok(-(df_plus.ln() - df.ln()) / h)
    }
}
