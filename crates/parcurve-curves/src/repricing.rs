//! Refit verification for bootstrapped curves.
//!
//! Every calibration instrument is revalued against the finished curve and
//! compared with its par target:
//!
//! | Instrument | Measure                              | Target | Tolerance |
//! |------------|--------------------------------------|--------|-----------|
//! | Deposit    | `value(valuation) / notional`        | 1.0    | 1e-10     |
//! | FRA        | `value(valuation) / notional`        | 0.0    | 1e-5      |
//! | Swap       | `value(swap start) / notional`       | 0.0    | 1e-5      |
//!
//! Deposit nodes come from a closed form, so their tolerance is tight;
//! FRA and swap nodes come out of a root search.
//!
//! # Usage
//!
//! ```rust,ignore
//! let curve = bootstrapper.bootstrap(&set)?;
//!
//! let report = RefitVerifier::default().report(&curve)?;
//! if !report.all_passed() {
//!     eprintln!("{report}");
//! }
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::curve::DiscountCurve;
use crate::error::{CurveError, CurveResult};
use crate::instruments::{CurveInstrument, InstrumentType};
use crate::traits::Curve;

/// Refit tolerances by instrument class, per unit notional.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RefitTolerances {
    /// Deposit tolerance on `value / notional - 1`.
    #[serde(default = "default_deposit_tolerance")]
    pub deposit: f64,

    /// FRA tolerance on `value / notional`.
    #[serde(default = "default_iterative_tolerance")]
    pub fra: f64,

    /// Swap tolerance on `value / notional`, valued from the swap start.
    #[serde(default = "default_iterative_tolerance")]
    pub swap: f64,
}

fn default_deposit_tolerance() -> f64 {
    1e-10
}

fn default_iterative_tolerance() -> f64 {
    1e-5
}

impl Default for RefitTolerances {
    fn default() -> Self {
        Self {
            deposit: default_deposit_tolerance(),
            fra: default_iterative_tolerance(),
            swap: default_iterative_tolerance(),
        }
    }
}

impl RefitTolerances {
    /// Tolerance for an instrument class.
    #[must_use]
    pub fn for_instrument(&self, instrument_type: InstrumentType) -> f64 {
        match instrument_type {
            InstrumentType::Deposit => self.deposit,
            InstrumentType::Fra => self.fra,
            InstrumentType::Swap => self.swap,
        }
    }
}

/// Result of repricing one instrument against the curve.
#[derive(Debug, Clone)]
pub struct RepricingCheck {
    /// Instrument description.
    pub instrument: String,

    /// Instrument class.
    pub instrument_type: InstrumentType,

    /// Expected normalised value.
    pub target: f64,

    /// Normalised value against the curve.
    pub value: f64,

    /// Absolute error `|value - target|`.
    pub error: f64,

    /// Tolerance for the instrument class.
    pub tolerance: f64,

    /// Whether the error is within tolerance.
    pub passed: bool,
}

impl RepricingCheck {
    /// Creates a check result.
    #[must_use]
    pub fn new(
        instrument: String,
        instrument_type: InstrumentType,
        target: f64,
        value: f64,
        tolerance: f64,
    ) -> Self {
        let error = (value - target).abs();
        Self {
            instrument,
            instrument_type,
            target,
            value,
            error,
            tolerance,
            passed: error <= tolerance,
        }
    }
}

impl fmt::Display for RepricingCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = if self.passed { "ok  " } else { "FAIL" };
        write!(
            f,
            "{} {} | value: {:.12} | error: {:.2e} (tol: {:.0e})",
            status, self.instrument, self.value, self.error, self.tolerance
        )
    }
}

/// Repricing results for every calibration instrument of a curve.
#[derive(Debug, Clone)]
pub struct RepricingReport {
    checks: Vec<RepricingCheck>,
}

impl RepricingReport {
    /// Creates a report from individual checks.
    #[must_use]
    pub fn new(checks: Vec<RepricingCheck>) -> Self {
        Self { checks }
    }

    /// Individual checks in calibration order.
    #[must_use]
    pub fn checks(&self) -> &[RepricingCheck] {
        &self.checks
    }

    /// Whether every instrument repriced within tolerance.
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.checks.iter().all(|c| c.passed)
    }

    /// Largest absolute error.
    #[must_use]
    pub fn max_error(&self) -> f64 {
        self.checks.iter().map(|c| c.error).fold(0.0_f64, f64::max)
    }

    /// Number of failed checks.
    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.checks.iter().filter(|c| !c.passed).count()
    }

    /// Failed checks.
    pub fn failures(&self) -> impl Iterator<Item = &RepricingCheck> {
        self.checks.iter().filter(|c| !c.passed)
    }
}

impl fmt::Display for RepricingReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Repricing Report")?;
        writeln!(f, "================")?;
        writeln!(f, "Status: {}", if self.all_passed() { "PASSED" } else { "FAILED" })?;
        writeln!(
            f,
            "Instruments: {}/{} passed",
            self.checks.len() - self.failed_count(),
            self.checks.len()
        )?;
        writeln!(f, "Max Error: {:.2e}", self.max_error())?;

        for check in &self.checks {
            writeln!(f, "  {check}")?;
        }
        Ok(())
    }
}

/// Revalues calibration instruments against a finished curve.
#[derive(Debug, Clone, Copy, Default)]
pub struct RefitVerifier {
    tolerances: RefitTolerances,
}

impl RefitVerifier {
    /// Creates a verifier with the given tolerances.
    #[must_use]
    pub fn new(tolerances: RefitTolerances) -> Self {
        Self { tolerances }
    }

    /// Tolerances in use.
    #[must_use]
    pub fn tolerances(&self) -> RefitTolerances {
        self.tolerances
    }

    /// Reprices every instrument and reports, without failing on a breach.
    ///
    /// # Errors
    ///
    /// Returns an error only if an instrument cannot be valued at all.
    pub fn report(&self, curve: &DiscountCurve) -> CurveResult<RepricingReport> {
        let valuation_time = curve.valuation_time();
        let mut checks = Vec::with_capacity(curve.instrument_count());

        for deposit in curve.deposits() {
            checks.push(self.check(deposit.as_ref(), valuation_time, 1.0, curve)?);
        }
        for fra in curve.fras() {
            checks.push(self.check(fra.as_ref(), valuation_time, 0.0, curve)?);
        }
        for swap in curve.swaps() {
            checks.push(self.check(swap.as_ref(), swap.start_time(), 0.0, curve)?);
        }

        Ok(RepricingReport::new(checks))
    }

    /// Reprices every instrument and fails on the first breach.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::Refit`] naming the first instrument outside its
    /// tolerance.
    pub fn verify(&self, curve: &DiscountCurve) -> CurveResult<RepricingReport> {
        let report = self.report(curve)?;
        if let Some(check) = report.failures().next() {
            return Err(CurveError::refit(
                check.instrument.clone(),
                check.value,
                check.target,
                check.tolerance,
            ));
        }
        Ok(report)
    }

    fn check<I: CurveInstrument + ?Sized>(
        &self,
        instrument: &I,
        as_of: f64,
        target: f64,
        curve: &DiscountCurve,
    ) -> CurveResult<RepricingCheck> {
        let value = instrument.value(as_of, curve)? / instrument.notional();
        let instrument_type = instrument.instrument_type();

        Ok(RepricingCheck::new(
            instrument.description(),
            instrument_type,
            target,
            value,
            self.tolerances.for_instrument(instrument_type),
        ))
    }
}
