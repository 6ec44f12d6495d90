//! Calibration instruments for discount curve bootstrap.
//!
//! The bootstrapper sees instruments only through small capability traits:
//!
//! - [`CurveInstrument`]: times, notional, and a valuation against a curve
//! - [`DepositInstrument`]: closed-form maturity discount factor
//! - [`FraInstrument`]: closed-form inversion when the start is already known
//! - [`SwapInstrument`]: fixed rate and fixed-leg coupon schedule
//!
//! [`Deposit`], [`Fra`] and [`Swap`] are reference implementations on a
//! year-fraction time axis. Any type implementing the traits can be fed to
//! the [`InstrumentValidator`](crate::InstrumentValidator).
//!
//! All times are absolute on a single axis shared with the valuation time.

mod deposit;
mod fra;
mod schedule;
mod swap;

pub use deposit::Deposit;
pub use fra::Fra;
pub use schedule::{generate_schedule, CouponPeriod, Frequency};
pub use swap::Swap;

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::CurveResult;
use crate::traits::Curve;

/// Shared handle to a deposit.
pub type SharedDeposit = Arc<dyn DepositInstrument>;

/// Shared handle to an FRA.
pub type SharedFra = Arc<dyn FraInstrument>;

/// Shared handle to a swap.
pub type SharedSwap = Arc<dyn SwapInstrument>;

/// Instrument type for categorization and sorting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum InstrumentType {
    /// Money market deposit (shortest maturity first)
    Deposit = 0,
    /// Forward Rate Agreement
    Fra = 1,
    /// Fixed-for-floating interest rate swap
    Swap = 2,
}

impl fmt::Display for InstrumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Deposit => write!(f, "Deposit"),
            Self::Fra => write!(f, "FRA"),
            Self::Swap => write!(f, "Swap"),
        }
    }
}

/// Direction of the fixed leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PayReceive {
    /// Pay fixed, receive floating.
    #[default]
    Pay,
    /// Receive fixed, pay floating.
    Receive,
}

impl PayReceive {
    /// +1 for a fixed payer, -1 for a fixed receiver.
    #[must_use]
    pub fn sign(self) -> f64 {
        match self {
            Self::Pay => 1.0,
            Self::Receive => -1.0,
        }
    }
}

impl fmt::Display for PayReceive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pay => write!(f, "Pay fixed"),
            Self::Receive => write!(f, "Receive fixed"),
        }
    }
}

/// Trait for curve instruments used in bootstrap.
///
/// # Implementation Notes
///
/// - `maturity_time()` is the last cash flow time
/// - `pillar_time()` is where the bootstrap places the node this instrument solves
/// - `value()` is expressed as of `valuation_time`, i.e. divided by the
///   discount factor to that time
pub trait CurveInstrument: Send + Sync + fmt::Debug {
    /// Accrual start time.
    fn start_time(&self) -> f64;

    /// Final cash flow time.
    fn maturity_time(&self) -> f64;

    /// Time of the curve node this instrument determines.
    fn pillar_time(&self) -> f64 {
        self.maturity_time()
    }

    /// Notional amount.
    fn notional(&self) -> f64;

    /// Value as of `valuation_time` against `curve`.
    fn value(&self, valuation_time: f64, curve: &dyn Curve) -> CurveResult<f64>;

    /// Returns the instrument type for categorization and sorting.
    fn instrument_type(&self) -> InstrumentType;

    /// Returns a description string for diagnostics and error messages.
    fn description(&self) -> String {
        format!(
            "{} {:.6} -> {:.6}",
            self.instrument_type(),
            self.start_time(),
            self.maturity_time()
        )
    }
}

/// Deposit capability: a closed-form maturity discount factor.
pub trait DepositInstrument: CurveInstrument {
    /// Simple deposit rate.
    fn rate(&self) -> f64;

    /// Discount factor at maturity given the discount factor at settlement.
    fn maturity_discount_factor(&self, settlement_df: f64) -> f64;

    /// Same rate convention over a new span. Used to bridge the valuation
    /// time to a forward-starting swap schedule.
    fn bridge(&self, start_time: f64, maturity_time: f64) -> SharedDeposit;
}

/// FRA capability.
pub trait FraInstrument: CurveInstrument {
    /// Contract rate.
    fn fra_rate(&self) -> f64;

    /// Maturity discount factor implied by the contract rate when the start
    /// discount factor is already determined by `curve`.
    fn invert_for_maturity_df(&self, curve: &dyn Curve) -> CurveResult<f64>;

    /// Value with an optional separate forecasting curve.
    fn value_with_forecast(
        &self,
        valuation_time: f64,
        discount: &dyn Curve,
        forecast: Option<&dyn Curve>,
    ) -> CurveResult<f64>;
}

/// Swap capability.
pub trait SwapInstrument: CurveInstrument {
    /// Fixed-leg coupon rate.
    fn fixed_rate(&self) -> f64;

    /// Fixed-leg coupon periods in payment order.
    fn coupon_schedule(&self) -> &[CouponPeriod];

    /// Value with an optional separate forecasting curve.
    fn value_with_forecast(
        &self,
        valuation_time: f64,
        discount: &dyn Curve,
        forecast: Option<&dyn Curve>,
    ) -> CurveResult<f64>;
}
