//! Root search for a single pillar discount factor.

use std::cell::RefCell;

use parcurve_math::solvers::{RootFinder, SolverConfig, SolverResult};
use parcurve_math::MathError;
use tracing::debug;

use super::builder::CurveBuilder;
use crate::error::{CurveError, CurveResult};
use crate::instruments::CurveInstrument;

/// Everything one root search needs, passed explicitly.
///
/// The objective is `f(df) = value(valuation_time, builder + (pillar_time, df)) / notional`,
/// the instrument valued against the solved nodes plus one trial node.
/// Nothing is shared between searches, so independent builds can run on
/// different threads.
pub struct SolveContext<'a, I: CurveInstrument + ?Sized> {
    /// Curve solved so far.
    pub builder: &'a CurveBuilder,
    /// Absolute time of the unknown node.
    pub pillar_time: f64,
    /// Time the instrument is valued as of.
    pub valuation_time: f64,
    /// Instrument to reprice.
    pub instrument: &'a I,
}

impl<'a, I: CurveInstrument + ?Sized> SolveContext<'a, I> {
    /// Bundles a root search for `instrument`'s pillar.
    #[must_use]
    pub fn new(
        builder: &'a CurveBuilder,
        pillar_time: f64,
        valuation_time: f64,
        instrument: &'a I,
    ) -> Self {
        Self {
            builder,
            pillar_time,
            valuation_time,
            instrument,
        }
    }

    /// Normalised instrument value with `trial_df` at the pillar.
    ///
    /// # Errors
    ///
    /// Returns an error if the trial node cannot be appended or the
    /// instrument cannot be valued.
    pub fn objective(&self, trial_df: f64) -> CurveResult<f64> {
        let trial = self.builder.with_trial(self.pillar_time, trial_df)?;
        let value = self.instrument.value(self.valuation_time, &trial)?;
        Ok(value / self.instrument.notional())
    }

    /// Runs `finder` from `seed` and returns the converged discount factor.
    ///
    /// The search runs over `ln(df)` seeded at `ln(seed)`, so every trial
    /// is a positive discount factor however far a step overshoots. The
    /// returned root and any reported estimate are discount factors.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::Convergence`] if the search fails or hits a
    /// non-finite value, [`CurveError::InvalidValue`] for a non-positive
    /// seed, or the first valuation error raised for a trial.
    pub fn solve<R: RootFinder>(
        &self,
        finder: &R,
        seed: f64,
        config: &SolverConfig,
    ) -> CurveResult<SolverResult> {
        if !(seed.is_finite() && seed > 0.0) {
            return Err(CurveError::invalid_value(format!(
                "root search for {} seeded with non-positive discount factor {seed}",
                self.instrument.description()
            )));
        }

        let failure: RefCell<Option<CurveError>> = RefCell::new(None);

        let f = |log_df: f64| -> f64 {
            let df = log_df.exp();
            if !(df.is_finite() && df > 0.0) {
                return f64::NAN;
            }
            match self.objective(df) {
                Ok(v) => v,
                Err(e) => {
                    failure.borrow_mut().get_or_insert(e);
                    f64::NAN
                }
            }
        };

        let outcome = finder.find_root(f, seed.ln(), config);
        if let Some(e) = failure.into_inner() {
            return Err(e);
        }

        let log_result = outcome.map_err(|e| {
            CurveError::convergence(self.instrument.description(), &to_df_space(e), seed)
        })?;
        let result = SolverResult {
            root: log_result.root.exp(),
            ..log_result
        };
        if !(result.root.is_finite() && result.root > 0.0) {
            return Err(CurveError::Convergence {
                instrument: self.instrument.description(),
                iterations: result.iterations,
                last_value: result.root,
                reason: "root is not a positive discount factor".to_string(),
            });
        }

        debug!(
            instrument = %self.instrument.description(),
            solver = finder.name(),
            iterations = result.iterations,
            residual = result.residual,
            df = result.root,
            "pillar solved"
        );
        Ok(result)
    }
}

/// Maps trial points reported by a log-space search back to discount factors.
fn to_df_space(error: MathError) -> MathError {
    match error {
        MathError::ConvergenceFailed {
            iterations,
            residual,
            last_estimate,
        } => MathError::ConvergenceFailed {
            iterations,
            residual,
            last_estimate: last_estimate.exp(),
        },
        MathError::NonFiniteValue { x, value } => MathError::NonFiniteValue { x: x.exp(), value },
        other => other,
    }
}
