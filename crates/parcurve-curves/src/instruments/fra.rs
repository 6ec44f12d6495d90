//! Forward Rate Agreement instrument.

use super::{CurveInstrument, FraInstrument, InstrumentType, PayReceive};
use crate::error::{CurveError, CurveResult};
use crate::traits::Curve;

/// A Forward Rate Agreement.
///
/// Fixes a simple rate between two future times. The fixed payer receives
/// `N × τ × (F - K)` at maturity, where `F` is the simple forward implied
/// by the forecasting curve and `K` the contract rate.
///
/// # Pricing Formula
///
/// ```text
/// F = (DF(start) / DF(end) - 1) / τ
/// V = sign × N × τ × (F - K) × DF(end) / DF(valuation)
/// ```
///
/// At par, `DF(end) = DF(start) / (1 + K × τ)`.
///
/// # Example
///
/// ```rust
/// use parcurve_curves::instruments::{CurveInstrument, Fra};
///
/// // 3x6 FRA at 4.5%
/// let fra = Fra::new(0.25, 0.5, 0.045).unwrap();
/// assert_eq!(fra.maturity_time(), 0.5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fra {
    start_time: f64,
    maturity_time: f64,
    rate: f64,
    notional: f64,
    direction: PayReceive,
}

impl Fra {
    /// Creates a fixed-payer FRA with unit notional.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::InvalidValue`] for non-finite inputs.
    pub fn new(start_time: f64, maturity_time: f64, rate: f64) -> CurveResult<Self> {
        if !(start_time.is_finite() && maturity_time.is_finite() && rate.is_finite()) {
            return Err(CurveError::invalid_value(format!(
                "FRA fields must be finite: start {start_time}, maturity {maturity_time}, rate {rate}"
            )));
        }
        Ok(Self {
            start_time,
            maturity_time,
            rate,
            notional: 1.0,
            direction: PayReceive::Pay,
        })
    }

    /// Sets the notional.
    #[must_use]
    pub fn with_notional(mut self, notional: f64) -> Self {
        self.notional = notional;
        self
    }

    /// Sets the direction of the fixed rate.
    #[must_use]
    pub fn with_direction(mut self, direction: PayReceive) -> Self {
        self.direction = direction;
        self
    }

    /// Year fraction of the forward period.
    #[must_use]
    pub fn year_fraction(&self) -> f64 {
        self.maturity_time - self.start_time
    }

    /// Simple forward rate implied by `forecast` over the FRA period.
    pub fn forward_rate(&self, forecast: &dyn Curve) -> CurveResult<f64> {
        let df_start = forecast.discount_factor_at(self.start_time)?;
        let df_end = forecast.discount_factor_at(self.maturity_time)?;
        Ok((df_start / df_end - 1.0) / self.year_fraction())
    }
}

impl CurveInstrument for Fra {
    fn start_time(&self) -> f64 {
        self.start_time
    }

    fn maturity_time(&self) -> f64 {
        self.maturity_time
    }

    fn notional(&self) -> f64 {
        self.notional
    }

    fn value(&self, valuation_time: f64, curve: &dyn Curve) -> CurveResult<f64> {
        self.value_with_forecast(valuation_time, curve, None)
    }

    fn instrument_type(&self) -> InstrumentType {
        InstrumentType::Fra
    }

    fn description(&self) -> String {
        format!(
            "FRA {:.6} -> {:.6} @ {:.4}% ({})",
            self.start_time,
            self.maturity_time,
            self.rate * 100.0,
            self.direction
        )
    }
}

impl FraInstrument for Fra {
    fn fra_rate(&self) -> f64 {
        self.rate
    }

    fn invert_for_maturity_df(&self, curve: &dyn Curve) -> CurveResult<f64> {
        let df_start = curve.discount_factor_at(self.start_time)?;
        Ok(df_start / (1.0 + self.rate * self.year_fraction()))
    }

    fn value_with_forecast(
        &self,
        valuation_time: f64,
        discount: &dyn Curve,
        forecast: Option<&dyn Curve>,
    ) -> CurveResult<f64> {
        let forward = self.forward_rate(forecast.unwrap_or(discount))?;
        let df_payment = discount.discount_factor_at(self.maturity_time)?;
        let df_valuation = discount.discount_factor_at(valuation_time)?;

        let payoff = self.notional * self.year_fraction() * (forward - self.rate);
        Ok(self.direction.sign() * payoff * df_payment / df_valuation)
    }
}
