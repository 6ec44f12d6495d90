//! Mutable node arrays for a curve under construction.

use tracing::debug;

use crate::curve::DiscountCurve;
use crate::error::{CurveError, CurveResult};
use crate::interpolation::{DfInterpolator, InterpolationScheme};
use crate::traits::Curve;
use crate::validation::CalibrationSet;

/// A discount curve being bootstrapped.
///
/// Holds the node arrays and the interpolator fitted over them. Every
/// [`push`](Self::push) appends one node and refits, so instruments valued
/// against the builder mid-build see exactly the nodes solved so far.
///
/// The builder always starts from the root node `(0, 1.0)`. Node times are
/// stored relative to the valuation time; `push` takes absolute times.
#[derive(Debug, Clone)]
pub struct CurveBuilder {
    valuation_time: f64,
    times: Vec<f64>,
    dfs: Vec<f64>,
    interpolator: DfInterpolator,
}

impl CurveBuilder {
    /// Creates a builder holding only the root node.
    ///
    /// # Errors
    ///
    /// Returns an error if `valuation_time` is not finite.
    pub fn new(valuation_time: f64, scheme: InterpolationScheme) -> CurveResult<Self> {
        if !valuation_time.is_finite() {
            return Err(CurveError::configuration(format!(
                "valuation time {valuation_time} is not finite"
            )));
        }

        let times = vec![0.0];
        let dfs = vec![1.0];
        let mut interpolator = DfInterpolator::new(scheme);
        interpolator.fit(&times, &dfs)?;

        Ok(Self {
            valuation_time,
            times,
            dfs,
            interpolator,
        })
    }

    /// Appends a node at absolute `time` and refits the interpolator.
    ///
    /// On error the builder is left unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::Ordering`] if `time` does not lie after the
    /// frontier, or an interpolation error if the refit fails.
    pub fn push(&mut self, time: f64, discount_factor: f64) -> CurveResult<()> {
        let t = time - self.valuation_time;
        let last = self.times[self.times.len() - 1];
        if t.is_nan() || t <= last {
            return Err(CurveError::ordering(format!(
                "node at {time:.6} does not extend the curve beyond {:.6}",
                self.frontier()
            )));
        }

        self.times.push(t);
        self.dfs.push(discount_factor);
        if let Err(e) = self.interpolator.fit(&self.times, &self.dfs) {
            self.times.pop();
            self.dfs.pop();
            return Err(e);
        }

        debug!(time = t, df = discount_factor, nodes = self.times.len(), "node appended");
        Ok(())
    }

    /// Copy of this builder with one trial node appended.
    ///
    /// # Errors
    ///
    /// Propagates the [`push`](Self::push) failure.
    pub fn with_trial(&self, time: f64, discount_factor: f64) -> CurveResult<Self> {
        let mut trial = self.clone();
        trial.push(time, discount_factor)?;
        Ok(trial)
    }

    /// Absolute time of the last node.
    #[must_use]
    pub fn frontier(&self) -> f64 {
        self.valuation_time + self.times[self.times.len() - 1]
    }

    /// Discount factor of the last node.
    #[must_use]
    pub fn last_discount_factor(&self) -> f64 {
        self.dfs[self.dfs.len() - 1]
    }

    /// Interpolation scheme.
    #[must_use]
    pub fn scheme(&self) -> InterpolationScheme {
        self.interpolator.scheme()
    }

    /// Number of nodes, including the root.
    #[must_use]
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Always false: the root node is present from construction.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Curve-relative node times.
    #[must_use]
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Node discount factors.
    #[must_use]
    pub fn discount_factors(&self) -> &[f64] {
        &self.dfs
    }

    /// Freezes the nodes into a finished curve carrying `set`'s instruments.
    #[must_use]
    pub fn into_curve(self, set: &CalibrationSet) -> DiscountCurve {
        DiscountCurve::from_parts(
            self.valuation_time,
            self.times,
            self.dfs,
            self.interpolator,
            set,
        )
    }
}

impl Curve for CurveBuilder {
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
