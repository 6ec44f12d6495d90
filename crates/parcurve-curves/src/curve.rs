//! The finished discount curve.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CurveError, CurveResult};
use crate::instruments::{SharedDeposit, SharedFra, SharedSwap};
use crate::interpolation::{DfInterpolator, InterpolationScheme};
use crate::traits::Curve;
use crate::validation::CalibrationSet;

/// One curve node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurveNode {
    /// Time from the curve origin.
    pub time: f64,
    /// Discount factor at `time`.
    pub discount_factor: f64,
}

impl CurveNode {
    /// Creates a node.
    #[must_use]
    pub fn new(time: f64, discount_factor: f64) -> Self {
        Self {
            time,
            discount_factor,
        }
    }
}

/// An immutable bootstrapped discount curve.
///
/// Holds the solved nodes, the interpolator fitted over them, and the
/// calibration instruments that produced them. The first node is always
/// `(0, 1.0)`.
///
/// # Example
///
/// ```rust
/// use parcurve_curves::{Curve, CurveNode, DiscountCurve, InterpolationScheme};
///
/// let curve = DiscountCurve::from_nodes(
///     0.0,
///     &[CurveNode::new(0.0, 1.0), CurveNode::new(1.0, 0.96)],
///     InterpolationScheme::FlatForward,
/// )
/// .unwrap();
///
/// assert_eq!(curve.discount_factor(0.0).unwrap(), 1.0);
/// assert!((curve.discount_factor(0.5).unwrap() - 0.96_f64.sqrt()).abs() < 1e-14);
/// ```
#[derive(Debug, Clone)]
pub struct DiscountCurve {
    valuation_time: f64,
    times: Vec<f64>,
    dfs: Vec<f64>,
    interpolator: DfInterpolator,
    deposits: Vec<SharedDeposit>,
    fras: Vec<SharedFra>,
    swaps: Vec<SharedSwap>,
}

impl DiscountCurve {
    pub(crate) fn from_parts(
        valuation_time: f64,
        times: Vec<f64>,
        dfs: Vec<f64>,
        interpolator: DfInterpolator,
        set: &CalibrationSet,
    ) -> Self {
        Self {
            valuation_time,
            times,
            dfs,
            interpolator,
            deposits: set.deposits().to_vec(),
            fras: set.fras().to_vec(),
            swaps: set.swaps().to_vec(),
        }
    }

    /// Creates a curve directly from nodes, without calibration instruments.
    ///
    /// # Errors
    ///
    /// Returns an error unless the first node is `(0, 1.0)`, times strictly
    /// increase and every discount factor is positive.
    pub fn from_nodes(
        valuation_time: f64,
        nodes: &[CurveNode],
        scheme: InterpolationScheme,
    ) -> CurveResult<Self> {
        match nodes.first() {
            Some(root) if root.time == 0.0 && root.discount_factor == 1.0 => {}
            _ => {
                return Err(CurveError::invalid_value(
                    "curve must start with the root node (0, 1.0)",
                ))
            }
        }
        if !valuation_time.is_finite() {
            return Err(CurveError::invalid_value(format!(
                "valuation time {valuation_time} is not finite"
            )));
        }

        let times: Vec<f64> = nodes.iter().map(|n| n.time).collect();
        let dfs: Vec<f64> = nodes.iter().map(|n| n.discount_factor).collect();
        if times.windows(2).any(|w| w[1] <= w[0]) {
            return Err(CurveError::ordering("node times must be strictly increasing"));
        }

        let mut interpolator = DfInterpolator::new(scheme);
        interpolator.fit(&times, &dfs)?;

        Ok(Self {
            valuation_time,
            times,
            dfs,
            interpolator,
            deposits: Vec::new(),
            fras: Vec::new(),
            swaps: Vec::new(),
        })
    }

    /// Curve nodes in time order.
    #[must_use]
    pub fn nodes(&self) -> Vec<CurveNode> {
        self.times
            .iter()
            .zip(&self.dfs)
            .map(|(&t, &df)| CurveNode::new(t, df))
            .collect()
    }

    /// Node times relative to the curve origin.
    #[must_use]
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Node discount factors.
    #[must_use]
    pub fn discount_factors(&self) -> &[f64] {
        &self.dfs
    }

    /// Interpolation scheme.
    #[must_use]
    pub fn scheme(&self) -> InterpolationScheme {
        self.interpolator.scheme()
    }

    /// Calibration deposits, including any synthetic bridge.
    #[must_use]
    pub fn deposits(&self) -> &[SharedDeposit] {
        &self.deposits
    }

    /// Calibration FRAs.
    #[must_use]
    pub fn fras(&self) -> &[SharedFra] {
        &self.fras
    }

    /// Calibration swaps.
    #[must_use]
    pub fn swaps(&self) -> &[SharedSwap] {
        &self.swaps
    }

    /// Number of calibration instruments.
    #[must_use]
    pub fn instrument_count(&self) -> usize {
        self.deposits.len() + self.fras.len() + self.swaps.len()
    }
}

impl Curve for DiscountCurve {
    fn discount_factor(&self, t: f64) -> CurveResult<f64> {
        self.interpolator.evaluate(t)
    }

    fn valuation_time(&self) -> f64 {
        self.valuation_time
    }

    fn max_time(&self) -> f64 {
        self.times[self.times.len() - 1]
    }
}

impl fmt::Display for DiscountCurve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "OBJECT TYPE: DiscountCurve")?;
        writeln!(f, "VALUATION TIME: {:.6}", self.valuation_time)?;
        for deposit in &self.deposits {
            writeln!(f, "DEPOSIT: {}", deposit.description())?;
        }
        for fra in &self.fras {
            writeln!(f, "FRA: {}", fra.description())?;
        }
        for swap in &self.swaps {
            writeln!(f, "SWAP: {}", swap.description())?;
        }
        writeln!(f, "INTERP TYPE: {}", self.scheme())?;
        writeln!(f, "{:>10} {:>14}", "GRID TIMES", "GRID DFS")?;
        for (t, df) in self.times.iter().zip(&self.dfs) {
            writeln!(f, "{t:>10.6} {df:>14.10}")?;
        }
        Ok(())
    }
}
