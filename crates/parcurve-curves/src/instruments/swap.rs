//! Interest Rate Swap (IRS) instrument.
//!
//! Swaps exchange fixed for floating payments and calibrate the
//! medium-to-long end of the curve.

use super::schedule::{generate_schedule, CouponPeriod, Frequency};
use super::{CurveInstrument, InstrumentType, PayReceive, SwapInstrument};
use crate::error::{CurveError, CurveResult};
use crate::traits::Curve;

/// Fixed-for-floating interest rate swap.
///
/// # Pricing
///
/// ```text
/// Fixed Leg PV: N × K × Σ τi × DF(Ti)
/// Float Leg PV: N × Σ τj × Fj × DF(Tj)
/// ```
///
/// Floating forwards `Fj` come from the forecast curve when one is given,
/// otherwise from the discount curve, in which case the floating leg
/// telescopes to `DF(T0) - DF(Tn)`.
///
/// # Example
///
/// ```rust
/// use parcurve_curves::instruments::{CurveInstrument, Frequency, Swap, SwapInstrument};
///
/// // 5-year semi-annual swap at 4.25%
/// let swap = Swap::new(0.0, 5.0, 0.0425, Frequency::SemiAnnual).unwrap();
/// assert_eq!(swap.coupon_schedule().len(), 10);
/// assert_eq!(swap.maturity_time(), 5.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Swap {
    fixed_rate: f64,
    fixed_leg: Vec<CouponPeriod>,
    float_leg: Vec<CouponPeriod>,
    notional: f64,
    direction: PayReceive,
}

impl Swap {
    /// Creates a fixed-payer swap with unit notional. The floating leg
    /// resets on the fixed leg's frequency until changed.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::InvalidValue`] if the rate is not finite or the
    /// schedule cannot be generated.
    pub fn new(
        start_time: f64,
        maturity_time: f64,
        fixed_rate: f64,
        fixed_frequency: Frequency,
    ) -> CurveResult<Self> {
        let fixed_leg = generate_schedule(start_time, maturity_time, fixed_frequency)?;
        Self::from_schedule(fixed_leg, fixed_rate)
    }

    /// Creates a swap from an explicit fixed-leg schedule. The floating leg
    /// reuses the same periods.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::InvalidValue`] for an empty or unordered
    /// schedule, or a non-finite rate.
    pub fn from_schedule(fixed_leg: Vec<CouponPeriod>, fixed_rate: f64) -> CurveResult<Self> {
        if !fixed_rate.is_finite() {
            return Err(CurveError::invalid_value(format!(
                "swap rate {fixed_rate} is not finite"
            )));
        }
        check_leg(&fixed_leg)?;
        Ok(Self {
            fixed_rate,
            float_leg: fixed_leg.clone(),
            fixed_leg,
            notional: 1.0,
            direction: PayReceive::Pay,
        })
    }

    /// Regenerates the floating leg on its own frequency.
    ///
    /// # Errors
    ///
    /// Returns an error if the schedule cannot be generated.
    pub fn with_float_frequency(mut self, frequency: Frequency) -> CurveResult<Self> {
        self.float_leg = generate_schedule(self.start_time(), self.maturity_time(), frequency)?;
        Ok(self)
    }

    /// Sets the notional.
    #[must_use]
    pub fn with_notional(mut self, notional: f64) -> Self {
        self.notional = notional;
        self
    }

    /// Sets the direction of the fixed leg.
    #[must_use]
    pub fn with_direction(mut self, direction: PayReceive) -> Self {
        self.direction = direction;
        self
    }

    /// Floating-leg periods.
    #[must_use]
    pub fn float_schedule(&self) -> &[CouponPeriod] {
        &self.float_leg
    }

    /// Unit-notional fixed-leg annuity, `Σ τi × DF(Ti)`.
    pub fn annuity(&self, discount: &dyn Curve) -> CurveResult<f64> {
        self.fixed_leg.iter().try_fold(0.0, |acc, period| -> CurveResult<f64> {
            Ok(acc + period.accrual * discount.discount_factor_at(period.payment_time)?)
        })
    }

    /// Unit-notional floating-leg PV, undiscounted to valuation.
    fn float_leg_pv(&self, discount: &dyn Curve, forecast: &dyn Curve) -> CurveResult<f64> {
        self.float_leg.iter().try_fold(0.0, |acc, period| -> CurveResult<f64> {
            let df_start = forecast.discount_factor_at(period.accrual_start)?;
            let df_end = forecast.discount_factor_at(period.payment_time)?;
            let forward = (df_start / df_end - 1.0) / period.accrual;
            Ok(acc + period.accrual * forward * discount.discount_factor_at(period.payment_time)?)
        })
    }

    /// Fixed rate that sets the swap's value to zero.
    pub fn par_rate(&self, discount: &dyn Curve, forecast: Option<&dyn Curve>) -> CurveResult<f64> {
        let float = self.float_leg_pv(discount, forecast.unwrap_or(discount))?;
        Ok(float / self.annuity(discount)?)
    }
}

fn check_leg(leg: &[CouponPeriod]) -> CurveResult<()> {
    if leg.is_empty() {
        return Err(CurveError::invalid_value("swap leg has no periods"));
    }
    for period in leg {
        if !(period.accrual_start.is_finite() && period.payment_time.is_finite())
            || period.payment_time <= period.accrual_start
            || period.accrual <= 0.0
        {
            return Err(CurveError::invalid_value(format!(
                "invalid swap period {:.6} -> {:.6} (accrual {})",
                period.accrual_start, period.payment_time, period.accrual
            )));
        }
    }
    if leg.windows(2).any(|w| w[1].payment_time <= w[0].payment_time) {
        return Err(CurveError::invalid_value(
            "swap payment times must be strictly increasing",
        ));
    }
    Ok(())
}

impl CurveInstrument for Swap {
    fn start_time(&self) -> f64 {
        self.fixed_leg[0].accrual_start
    }

    fn maturity_time(&self) -> f64 {
        self.fixed_leg[self.fixed_leg.len() - 1].payment_time
    }

    fn notional(&self) -> f64 {
        self.notional
    }

    fn value(&self, valuation_time: f64, curve: &dyn Curve) -> CurveResult<f64> {
        self.value_with_forecast(valuation_time, curve, None)
    }

    fn instrument_type(&self) -> InstrumentType {
        InstrumentType::Swap
    }

    fn description(&self) -> String {
        format!(
            "Swap {:.6} -> {:.6} @ {:.4}% ({}, {} coupons)",
            self.start_time(),
            self.maturity_time(),
            self.fixed_rate * 100.0,
            self.direction,
            self.fixed_leg.len()
        )
    }
}

impl SwapInstrument for Swap {
    fn fixed_rate(&self) -> f64 {
        self.fixed_rate
    }

    fn coupon_schedule(&self) -> &[CouponPeriod] {
        &self.fixed_leg
    }

    fn value_with_forecast(
        &self,
        valuation_time: f64,
        discount: &dyn Curve,
        forecast: Option<&dyn Curve>,
    ) -> CurveResult<f64> {
        let float = self.float_leg_pv(discount, forecast.unwrap_or(discount))?;
        let fixed = self.fixed_rate * self.annuity(discount)?;
        let df_valuation = discount.discount_factor_at(valuation_time)?;

        Ok(self.direction.sign() * self.notional * (float - fixed) / df_valuation)
    }
}
