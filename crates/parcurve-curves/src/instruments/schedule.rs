//! Fixed-leg coupon schedules on a year-fraction axis.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{CurveError, CurveResult};

/// Coupons closer than this to a whole number of periods are treated as
/// falling on the regular grid.
const GRID_TOLERANCE: f64 = 1e-9;

/// Payment frequency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Frequency {
    /// Annual payments (1 per year)
    Annual,
    /// Semi-annual payments (2 per year)
    #[default]
    SemiAnnual,
    /// Quarterly payments (4 per year)
    Quarterly,
    /// Monthly payments (12 per year)
    Monthly,
}

impl Frequency {
    /// Returns the number of periods per year.
    #[must_use]
    pub fn periods_per_year(&self) -> u32 {
        match self {
            Frequency::Annual => 1,
            Frequency::SemiAnnual => 2,
            Frequency::Quarterly => 4,
            Frequency::Monthly => 12,
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Frequency::Annual => "Annual",
            Frequency::SemiAnnual => "Semi-Annual",
            Frequency::Quarterly => "Quarterly",
            Frequency::Monthly => "Monthly",
        };
        write!(f, "{name}")
    }
}

/// One accrual period of a leg.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CouponPeriod {
    /// Accrual start time.
    pub accrual_start: f64,
    /// Payment (and accrual end) time.
    pub payment_time: f64,
    /// Year fraction of the period.
    pub accrual: f64,
}

impl CouponPeriod {
    /// Creates a period whose year fraction is its length on the time axis.
    #[must_use]
    pub fn new(accrual_start: f64, payment_time: f64) -> Self {
        Self {
            accrual_start,
            payment_time,
            accrual: payment_time - accrual_start,
        }
    }
}

/// Generates the coupon periods between `start` and `maturity`.
///
/// When the span is a whole number of periods the coupons sit at
/// `start + k / frequency`, so two schedules from the same start share
/// their leading coupon times exactly. Otherwise the grid is rolled back
/// from `maturity` and the first period is a short stub.
pub fn generate_schedule(
    start: f64,
    maturity: f64,
    frequency: Frequency,
) -> CurveResult<Vec<CouponPeriod>> {
    if !start.is_finite() || !maturity.is_finite() {
        return Err(CurveError::invalid_value("schedule times must be finite"));
    }
    if maturity <= start {
        return Err(CurveError::invalid_value(format!(
            "schedule maturity {maturity} is not after start {start}"
        )));
    }

    let per_year = f64::from(frequency.periods_per_year());
    let periods = (maturity - start) * per_year;
    let whole = periods.round();

    let payment_times: Vec<f64> = if whole >= 1.0 && (periods - whole).abs() < GRID_TOLERANCE {
        let n = whole as usize;
        (1..=n)
            .map(|k| {
                if k == n {
                    maturity
                } else {
                    start + k as f64 / per_year
                }
            })
            .collect()
    } else {
        let n = periods.ceil() as usize;
        (0..n)
            .rev()
            .map(|k| maturity - k as f64 / per_year)
            .collect()
    };

    let mut accrual_start = start;
    Ok(payment_times
        .into_iter()
        .map(|payment_time| {
            let period = CouponPeriod::new(accrual_start, payment_time);
            accrual_start = payment_time;
            period
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_regular_semi_annual() {
        let periods = generate_schedule(0.0, 5.0, Frequency::SemiAnnual).unwrap();

        assert_eq!(periods.len(), 10);
        assert_eq!(periods[0].accrual_start, 0.0);
        assert_eq!(periods[0].payment_time, 0.5);
        assert_eq!(periods[9].payment_time, 5.0);
        for p in &periods {
            assert_relative_eq!(p.accrual, 0.5, epsilon = 1e-15);
        }
    }

    #[test]
    fn test_schedules_share_leading_coupons() {
        let short = generate_schedule(0.25, 2.25, Frequency::Quarterly).unwrap();
        let long = generate_schedule(0.25, 5.25, Frequency::Quarterly).unwrap();

        for (a, b) in short.iter().zip(&long) {
            assert_eq!(a.payment_time, b.payment_time);
        }
    }

    #[test]
    fn test_front_stub() {
        let periods = generate_schedule(0.0, 1.25, Frequency::Annual).unwrap();

        assert_eq!(periods.len(), 2);
        assert_relative_eq!(periods[0].payment_time, 0.25, epsilon = 1e-15);
        assert_relative_eq!(periods[0].accrual, 0.25, epsilon = 1e-15);
        assert_eq!(periods[1].payment_time, 1.25);
    }

    #[test]
    fn test_short_single_period() {
        let periods = generate_schedule(0.0, 0.3, Frequency::Annual).unwrap();
        assert_eq!(periods.len(), 1);
        assert_relative_eq!(periods[0].accrual, 0.3, epsilon = 1e-15);
    }

    #[test]
    fn test_rejects_inverted_span() {
        assert!(generate_schedule(2.0, 1.0, Frequency::Annual).is_err());
        assert!(generate_schedule(1.0, 1.0, Frequency::Annual).is_err());
    }
}
