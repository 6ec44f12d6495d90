//! Instrument validation ahead of any curve math.
//!
//! [`InstrumentValidator`] checks ordering and consistency across the three
//! instrument classes and, when swaps or deposits start forward of the
//! valuation time, bridges the gap with a synthetic deposit. The result is a
//! [`CalibrationSet`], the only input the bootstrapper accepts.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use parcurve_curves::instruments::{Deposit, Frequency, Swap};
//! use parcurve_curves::{InstrumentValidator, SharedDeposit, SharedSwap};
//!
//! let deposits: Vec<SharedDeposit> = vec![Arc::new(Deposit::new(0.0, 0.25, 0.05).unwrap())];
//! let swaps: Vec<SharedSwap> = vec![Arc::new(Swap::new(0.0, 2.0, 0.045, Frequency::Annual).unwrap())];
//!
//! let set = InstrumentValidator::new(0.0).validate(deposits, vec![], swaps).unwrap();
//! assert_eq!(set.instrument_count(), 2);
//! ```

use std::sync::Arc;

use tracing::warn;

use crate::error::{CurveError, CurveResult};
use crate::instruments::{CurveInstrument, SharedDeposit, SharedFra, SharedSwap};

/// Coupon times and swap starts closer than this are the same time.
const TIME_TOLERANCE: f64 = 1e-10;

/// Validated, time-ordered calibration instruments.
#[derive(Debug, Clone)]
pub struct CalibrationSet {
    valuation_time: f64,
    deposits: Vec<SharedDeposit>,
    fras: Vec<SharedFra>,
    swaps: Vec<SharedSwap>,
    synthetic_deposit: bool,
}

impl CalibrationSet {
    /// Valuation time all instruments are measured against.
    #[must_use]
    pub fn valuation_time(&self) -> f64 {
        self.valuation_time
    }

    /// Deposits in maturity order, including any synthetic bridge.
    #[must_use]
    pub fn deposits(&self) -> &[SharedDeposit] {
        &self.deposits
    }

    /// FRAs in maturity order.
    #[must_use]
    pub fn fras(&self) -> &[SharedFra] {
        &self.fras
    }

    /// Swaps in maturity order, all sharing one start time.
    #[must_use]
    pub fn swaps(&self) -> &[SharedSwap] {
        &self.swaps
    }

    /// Whether a bridging deposit was inserted.
    #[must_use]
    pub fn has_synthetic_deposit(&self) -> bool {
        self.synthetic_deposit
    }

    /// Total number of instruments.
    #[must_use]
    pub fn instrument_count(&self) -> usize {
        self.deposits.len() + self.fras.len() + self.swaps.len()
    }
}

/// Orders and cross-checks calibration instruments.
///
/// Rules, applied in order:
///
/// 1. At least one instrument overall.
/// 2. Deposits start at or after valuation and before their own maturity,
///    with strictly increasing maturities.
/// 3. FRAs likewise; the first FRA matures after the last deposit.
/// 4. Swaps start at or after valuation, all at the same time, with
///    strictly increasing maturities after every deposit and FRA; each
///    swap's coupon times are a prefix of the longest swap's.
/// 5. Swaps starting after valuation with no deposit starting at valuation
///    get a synthetic deposit over `[valuation, swap start]`.
/// 6. If still no deposit starts at valuation, the earliest-maturing
///    deposit is bridged from valuation to its own settlement.
#[derive(Debug, Clone, Copy)]
pub struct InstrumentValidator {
    valuation_time: f64,
}

impl InstrumentValidator {
    /// Creates a validator for the given valuation time.
    #[must_use]
    pub fn new(valuation_time: f64) -> Self {
        Self { valuation_time }
    }

    /// Validates the three instrument lists.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::Configuration`], [`CurveError::Ordering`] or
    /// [`CurveError::Boundary`] for the first rule violated.
    pub fn validate(
        &self,
        deposits: Vec<SharedDeposit>,
        fras: Vec<SharedFra>,
        swaps: Vec<SharedSwap>,
    ) -> CurveResult<CalibrationSet> {
        if !self.valuation_time.is_finite() {
            return Err(CurveError::configuration(format!(
                "valuation time {} is not finite",
                self.valuation_time
            )));
        }
        if deposits.is_empty() && fras.is_empty() && swaps.is_empty() {
            return Err(CurveError::configuration("no calibration instruments"));
        }

        self.check_class("deposit", &deposits)?;
        self.check_class("FRA", &fras)?;
        check_boundary("FRA", fras.first(), deposits.last())?;
        self.check_class("swap", &swaps)?;
        check_swap_schedules(&swaps)?;
        check_boundary("swap", swaps.first(), fras.last())?;
        check_boundary("swap", swaps.first(), deposits.last())?;

        let mut set = CalibrationSet {
            valuation_time: self.valuation_time,
            deposits,
            fras,
            swaps,
            synthetic_deposit: false,
        };
        self.bridge_forward_start(&mut set)?;
        self.bridge_lagged_deposits(&mut set)?;
        Ok(set)
    }

    fn check_class<I: CurveInstrument + ?Sized>(
        &self,
        class: &str,
        instruments: &[Arc<I>],
    ) -> CurveResult<()> {
        for inst in instruments {
            if inst.start_time() < self.valuation_time {
                return Err(CurveError::ordering(format!(
                    "{class} {} starts before valuation time {}",
                    inst.description(),
                    self.valuation_time
                )));
            }
            if inst.start_time() >= inst.maturity_time() {
                return Err(CurveError::ordering(format!(
                    "{class} {} matures on or before it starts",
                    inst.description()
                )));
            }
        }

        if let Some(pair) = instruments
            .windows(2)
            .find(|w| w[1].maturity_time() <= w[0].maturity_time())
        {
            return Err(CurveError::ordering(format!(
                "{class}s must be in increasing maturity: {} follows {}",
                pair[1].description(),
                pair[0].description()
            )));
        }
        Ok(())
    }

    fn bridge_forward_start(&self, set: &mut CalibrationSet) -> CurveResult<()> {
        let Some(swap_start) = set.swaps.first().map(|s| s.start_time()) else {
            return Ok(());
        };
        if swap_start <= self.valuation_time + TIME_TOLERANCE {
            return Ok(());
        }
        if set
            .deposits
            .iter()
            .any(|d| (d.start_time() - self.valuation_time).abs() <= TIME_TOLERANCE)
        {
            return Ok(());
        }

        let Some(first) = set.deposits.first() else {
            return Err(CurveError::configuration(format!(
                "swaps start at {swap_start} after valuation time {}: need a deposit to pin down short end",
                self.valuation_time
            )));
        };
        if set
            .deposits
            .iter()
            .any(|d| (d.maturity_time() - swap_start).abs() <= TIME_TOLERANCE)
        {
            return Ok(());
        }

        let bridge = first.bridge(self.valuation_time, swap_start);
        warn!(
            deposit = %bridge.description(),
            "inserting synthetic deposit to bridge valuation time to swap start"
        );

        let at = set.deposits.partition_point(|d| d.maturity_time() < swap_start);
        set.deposits.insert(at, bridge);
        set.synthetic_deposit = true;

        self.check_class("deposit", &set.deposits)?;
        check_boundary("FRA", set.fras.first(), set.deposits.last())?;
        Ok(())
    }

    fn bridge_lagged_deposits(&self, set: &mut CalibrationSet) -> CurveResult<()> {
        if set
            .deposits
            .iter()
            .any(|d| (d.start_time() - self.valuation_time).abs() <= TIME_TOLERANCE)
        {
            return Ok(());
        }
        let Some(first) = set.deposits.first() else {
            return Ok(());
        };

        // Settlement discount factors must come from a node, not from
        // extrapolation off the root
        let settlement = first.start_time();
        let bridge = first.bridge(self.valuation_time, settlement);
        warn!(
            deposit = %bridge.description(),
            "inserting synthetic deposit to bridge valuation time to deposit settlement"
        );

        let at = set.deposits.partition_point(|d| d.maturity_time() < settlement);
        set.deposits.insert(at, bridge);
        set.synthetic_deposit = true;

        self.check_class("deposit", &set.deposits)?;
        check_boundary("FRA", set.fras.first(), set.deposits.last())?;
        Ok(())
    }
}

/// The first instrument of a later class must mature after the last
/// instrument of an earlier one.
fn check_boundary<A, B>(
    class: &str,
    first: Option<&Arc<A>>,
    last_before: Option<&Arc<B>>,
) -> CurveResult<()>
where
    A: CurveInstrument + ?Sized,
    B: CurveInstrument + ?Sized,
{
    if let (Some(first), Some(before)) = (first, last_before) {
        if first.maturity_time() <= before.maturity_time() {
            return Err(CurveError::boundary(format!(
                "first {class} {} does not mature after {}",
                first.description(),
                before.description()
            )));
        }
    }
    Ok(())
}

fn check_swap_schedules(swaps: &[SharedSwap]) -> CurveResult<()> {
    let Some(longest) = swaps.last() else {
        return Ok(());
    };

    let start = longest.start_time();
    if let Some(other) = swaps
        .iter()
        .find(|s| (s.start_time() - start).abs() > TIME_TOLERANCE)
    {
        return Err(CurveError::ordering(format!(
            "swaps have different start dates: {} and {}",
            other.description(),
            longest.description()
        )));
    }

    let grid = longest.coupon_schedule();
    for swap in swaps {
        let coupons = swap.coupon_schedule();
        let aligned = coupons.len() <= grid.len()
            && coupons
                .iter()
                .zip(grid)
                .all(|(c, g)| (c.payment_time - g.payment_time).abs() <= TIME_TOLERANCE);
        if !aligned {
            return Err(CurveError::ordering(format!(
                "coupon schedule of {} is not aligned with the longest swap {}",
                swap.description(),
                longest.description()
            )));
        }
    }
    Ok(())
}
