//! Closed-form swap walk for linearly interpolated par rates.
//!
//! The longest swap's coupon schedule is the master grid. Par rates are
//! interpolated linearly onto every coupon time, and each coupon beyond
//! the frontier gets its discount factor straight from the par condition:
//!
//! ```text
//! df_i  = (df_settle - r_i × PV01_{i-1}) / (1 + τ_i × r_i)
//! PV01_i = PV01_{i-1} + τ_i × df_i
//! ```
//!
//! Each new unknown enters one equation linearly, so no root search runs.

use parcurve_math::interpolation::{Extrapolation, Interpolator, LinearInterpolator};
use tracing::debug;

use super::builder::CurveBuilder;
use crate::error::{CurveError, CurveResult};
use crate::instruments::SharedSwap;
use crate::traits::Curve;

/// Coupons within this of the frontier count as already on the curve.
const FRONTIER_TOLERANCE: f64 = 1e-10;

/// Par swap rate as a function of time.
enum ParRates {
    Constant(f64),
    Linear(LinearInterpolator),
}

impl ParRates {
    fn new(swaps: &[SharedSwap]) -> CurveResult<Self> {
        if let [only] = swaps {
            return Ok(Self::Constant(only.fixed_rate()));
        }
        let maturities = swaps.iter().map(|s| s.maturity_time()).collect();
        let rates = swaps.iter().map(|s| s.fixed_rate()).collect();
        let interp =
            LinearInterpolator::new(maturities, rates)?.with_extrapolation(Extrapolation::Flat);
        Ok(Self::Linear(interp))
    }

    fn at(&self, t: f64) -> CurveResult<f64> {
        match self {
            Self::Constant(rate) => Ok(*rate),
            Self::Linear(interp) => Ok(interp.interpolate(t)?),
        }
    }
}

/// Appends a node at every master-grid coupon beyond the frontier.
pub(crate) fn bootstrap_swaps(builder: &mut CurveBuilder, swaps: &[SharedSwap]) -> CurveResult<()> {
    let Some(longest) = swaps.last() else {
        return Ok(());
    };

    let rates = ParRates::new(swaps)?;
    let df_settle = builder.discount_factor_at(longest.start_time())?;
    let frontier = builder.frontier();

    let mut pv01 = 0.0;
    let mut walked = 0_usize;
    for period in longest.coupon_schedule() {
        if period.payment_time <= frontier + FRONTIER_TOLERANCE {
            pv01 += period.accrual * builder.discount_factor_at(period.payment_time)?;
            continue;
        }

        let rate = rates.at(period.payment_time)?;
        let df = (df_settle - rate * pv01) / (1.0 + period.accrual * rate);
        builder.push(period.payment_time, df)?;
        pv01 += period.accrual * df;
        walked += 1;
    }

    if walked == 0 {
        return Err(CurveError::boundary(format!(
            "swap payments of {} fall inside the deposit and FRA region ending at {frontier:.6}",
            longest.description()
        )));
    }

    debug!(nodes = walked, pv01, "linear swap rate walk complete");
    Ok(())
}
