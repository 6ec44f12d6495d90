//! Money market deposit instrument.
//!
//! A deposit is the simplest instrument for curve bootstrap,
//! used for the short end of the curve.

use std::sync::Arc;

use super::{CurveInstrument, DepositInstrument, InstrumentType, SharedDeposit};
use crate::error::{CurveError, CurveResult};
use crate::traits::Curve;

/// A money market deposit paying simple interest.
///
/// # Pricing Formula
///
/// The deposit is at par when:
/// ```text
/// DF(end) = DF(start) / (1 + rate × τ)
/// ```
/// where τ is the year fraction between start and maturity.
///
/// # Example
///
/// ```rust
/// use parcurve_curves::instruments::{Deposit, DepositInstrument};
///
/// // 3-month deposit at 5%
/// let deposit = Deposit::new(0.0, 0.25, 0.05).unwrap();
/// let df = deposit.maturity_discount_factor(1.0);
/// assert!((df - 1.0 / 1.0125).abs() < 1e-15);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Deposit {
    start_time: f64,
    maturity_time: f64,
    rate: f64,
    notional: f64,
}

impl Deposit {
    /// Creates a new deposit with unit notional.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::InvalidValue`] for non-finite inputs.
    pub fn new(start_time: f64, maturity_time: f64, rate: f64) -> CurveResult<Self> {
        if !(start_time.is_finite() && maturity_time.is_finite() && rate.is_finite()) {
            return Err(CurveError::invalid_value(format!(
                "deposit fields must be finite: start {start_time}, maturity {maturity_time}, rate {rate}"
            )));
        }
        Ok(Self {
            start_time,
            maturity_time,
            rate,
            notional: 1.0,
        })
    }

    /// Sets the notional.
    #[must_use]
    pub fn with_notional(mut self, notional: f64) -> Self {
        self.notional = notional;
        self
    }

    /// Year fraction between start and maturity.
    #[must_use]
    pub fn year_fraction(&self) -> f64 {
        self.maturity_time - self.start_time
    }
}

impl CurveInstrument for Deposit {
    fn start_time(&self) -> f64 {
        self.start_time
    }

    fn maturity_time(&self) -> f64 {
        self.maturity_time
    }

    fn notional(&self) -> f64 {
        self.notional
    }

    fn value(&self, _valuation_time: f64, curve: &dyn Curve) -> CurveResult<f64> {
        // Maturity redemption forwarded to the deposit's own start
        let df_start = curve.discount_factor_at(self.start_time)?;
        let df_end = curve.discount_factor_at(self.maturity_time)?;
        let redemption = self.notional * (1.0 + self.rate * self.year_fraction());
        Ok(redemption * df_end / df_start)
    }

    fn instrument_type(&self) -> InstrumentType {
        InstrumentType::Deposit
    }

    fn description(&self) -> String {
        format!(
            "Deposit {:.6} -> {:.6} @ {:.4}%",
            self.start_time,
            self.maturity_time,
            self.rate * 100.0
        )
    }
}

impl DepositInstrument for Deposit {
    fn rate(&self) -> f64 {
        self.rate
    }

    fn maturity_discount_factor(&self, settlement_df: f64) -> f64 {
        settlement_df / (1.0 + self.rate * self.year_fraction())
    }

    fn bridge(&self, start_time: f64, maturity_time: f64) -> SharedDeposit {
        Arc::new(Self {
            start_time,
            maturity_time,
            ..*self
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    struct FlatCurve(f64);

    impl Curve for FlatCurve {
        fn discount_factor(&self, t: f64) -> CurveResult<f64> {
            Ok(if t <= 0.0 { 1.0 } else { (-self.0 * t).exp() })
        }

        fn valuation_time(&self) -> f64 {
            0.0
        }

        fn max_time(&self) -> f64 {
            10.0
        }
    }

    #[test]
    fn test_maturity_discount_factor() {
        let deposit = Deposit::new(0.0, 0.25, 0.05).unwrap();
        assert_relative_eq!(
            deposit.maturity_discount_factor(1.0),
            1.0 / (1.0 + 0.05 * 0.25),
            epsilon = 1e-15
        );
        assert_relative_eq!(
            deposit.maturity_discount_factor(0.99),
            0.99 / 1.0125,
            epsilon = 1e-15
        );
    }

    #[test]
    fn test_value_at_par() {
        // Continuously compounded rate equivalent to 5% simple over 6M
        let tau: f64 = 0.5;
        let rate = (1.0 + 0.05 * tau).ln() / tau;
        let deposit = Deposit::new(0.0, tau, 0.05).unwrap().with_notional(100.0);

        let value = deposit.value(0.0, &FlatCurve(rate)).unwrap();
        assert_relative_eq!(value / deposit.notional(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_bridge_keeps_rate() {
        let deposit = Deposit::new(0.1, 0.35, 0.05).unwrap().with_notional(10.0);
        let bridge = deposit.bridge(0.0, 0.1);

        assert_eq!(bridge.start_time(), 0.0);
        assert_eq!(bridge.maturity_time(), 0.1);
        assert_eq!(bridge.rate(), 0.05);
        assert_eq!(bridge.notional(), 10.0);
    }

    #[test]
    fn test_rejects_nan() {
        assert!(Deposit::new(0.0, f64::NAN, 0.05).is_err());
    }

    #[test]
    fn test_description() {
        let deposit = Deposit::new(0.0, 0.25, 0.05).unwrap();
        assert!(deposit.description().contains("5.0000%"));
    }
}
