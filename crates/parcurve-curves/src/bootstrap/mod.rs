//! Curve bootstrap algorithms.
//!
//! This module turns a validated [`CalibrationSet`] into a [`DiscountCurve`].
//!
//! # Bootstrap Methods
//!
//! The interpolation scheme selects the strategy:
//!
//! - **General iterative bootstrap** (flat forward and spline schemes):
//!   deposits in closed form, FRAs by closed-form inversion or root search,
//!   one root search per swap for the discount factor at its last coupon.
//!
//! - **Linear swap rate walk** ([`InterpolationScheme::LinearSwapRates`]):
//!   deposits and FRAs as above, then par rates interpolated linearly onto
//!   the longest swap's coupon grid and every coupon's discount factor
//!   solved in closed form from the running PV01.
//!
//! Either way the curve grows one node at a time in a [`CurveBuilder`],
//! refitting the interpolator after each node.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use parcurve_curves::instruments::{Deposit, Frequency, Swap};
//! use parcurve_curves::{BootstrapConfig, Curve, CurveBootstrapper, SharedDeposit, SharedSwap};
//!
//! let deposits: Vec<SharedDeposit> = vec![Arc::new(Deposit::new(0.0, 0.25, 0.05).unwrap())];
//! let swaps: Vec<SharedSwap> = vec![
//!     Arc::new(Swap::new(0.0, 2.0, 0.045, Frequency::SemiAnnual).unwrap()),
//!     Arc::new(Swap::new(0.0, 5.0, 0.047, Frequency::SemiAnnual).unwrap()),
//! ];
//!
//! let bootstrapper = CurveBootstrapper::new(BootstrapConfig::default().with_refit_check(true));
//! let curve = bootstrapper.build(0.0, deposits, vec![], swaps).unwrap();
//!
//! assert_eq!(curve.discount_factor(0.0).unwrap(), 1.0);
//! assert!((curve.discount_factor(0.25).unwrap() - 1.0 / 1.0125).abs() < 1e-12);
//! ```
//!
//! [`InterpolationScheme::LinearSwapRates`]: crate::InterpolationScheme::LinearSwapRates

mod builder;
mod iterative;
mod linear_swap;
mod solve;

pub use builder::CurveBuilder;
pub use solve::SolveContext;

use parcurve_math::solvers::{RootFinder, SecantSolver};
use tracing::info;

use crate::config::BootstrapConfig;
use crate::curve::DiscountCurve;
use crate::error::CurveResult;
use crate::instruments::{SharedDeposit, SharedFra, SharedSwap};
use crate::repricing::RefitVerifier;
use crate::validation::{CalibrationSet, InstrumentValidator};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Builds discount curves from calibration sets.
///
/// The bootstrapper holds only configuration and a root finder; every call
/// to [`bootstrap`](Self::bootstrap) allocates its own [`CurveBuilder`], so
/// one instance can serve many builds, concurrently if need be.
#[derive(Debug, Clone)]
pub struct CurveBootstrapper<R: RootFinder = SecantSolver> {
    config: BootstrapConfig,
    root_finder: R,
}

impl CurveBootstrapper {
    /// Creates a bootstrapper using the secant solver.
    #[must_use]
    pub fn new(config: BootstrapConfig) -> Self {
        Self {
            config,
            root_finder: SecantSolver,
        }
    }
}

impl Default for CurveBootstrapper {
    fn default() -> Self {
        Self::new(BootstrapConfig::default())
    }
}

impl<R: RootFinder> CurveBootstrapper<R> {
    /// Replaces the root finder.
    #[must_use]
    pub fn with_root_finder<S: RootFinder>(self, root_finder: S) -> CurveBootstrapper<S> {
        CurveBootstrapper {
            config: self.config,
            root_finder,
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &BootstrapConfig {
        &self.config
    }

    /// Returns the root finder.
    #[must_use]
    pub fn root_finder(&self) -> &R {
        &self.root_finder
    }

    /// Validates raw instrument lists and bootstraps them.
    ///
    /// # Errors
    ///
    /// Returns the validator's error before any numeric work, or any error
    /// from [`bootstrap`](Self::bootstrap).
    pub fn build(
        &self,
        valuation_time: f64,
        deposits: Vec<SharedDeposit>,
        fras: Vec<SharedFra>,
        swaps: Vec<SharedSwap>,
    ) -> CurveResult<DiscountCurve> {
        let set = InstrumentValidator::new(valuation_time).validate(deposits, fras, swaps)?;
        self.bootstrap(&set)
    }

    /// Bootstraps a curve from a validated set.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::Configuration`](crate::CurveError::Configuration)
    /// for invalid settings, [`CurveError::Convergence`](crate::CurveError::Convergence)
    /// if a root search fails, and [`CurveError::Refit`](crate::CurveError::Refit)
    /// if the refit check is enabled and an instrument does not reprice.
    pub fn bootstrap(&self, set: &CalibrationSet) -> CurveResult<DiscountCurve> {
        self.config.validate()?;
        let scheme = self.config.interpolation;
        let solver = self.config.solver_config();

        let mut builder = CurveBuilder::new(set.valuation_time(), scheme)?;
        iterative::bootstrap_deposits(&mut builder, set.deposits())?;
        iterative::bootstrap_fras(&mut builder, set.fras(), &self.root_finder, &solver)?;
        if scheme.is_linear_swap_rate() {
            linear_swap::bootstrap_swaps(&mut builder, set.swaps())?;
        } else {
            iterative::bootstrap_swaps(&mut builder, set.swaps(), &self.root_finder, &solver)?;
        }

        let curve = builder.into_curve(set);
        if self.config.check_refit {
            RefitVerifier::new(self.config.refit).verify(&curve)?;
        }

        info!(
            scheme = %scheme,
            nodes = curve.times().len(),
            instruments = set.instrument_count(),
            refit_checked = self.config.check_refit,
            "discount curve built"
        );
        Ok(curve)
    }

    /// Bootstraps independent sets across the rayon pool, in input order.
    #[cfg(feature = "parallel")]
    pub fn bootstrap_many(&self, sets: &[CalibrationSet]) -> Vec<CurveResult<DiscountCurve>> {
        sets.par_iter().map(|set| self.bootstrap(set)).collect()
    }

    /// Bootstraps independent sets one after another, in input order.
    #[cfg(not(feature = "parallel"))]
    pub fn bootstrap_many(&self, sets: &[CalibrationSet]) -> Vec<CurveResult<DiscountCurve>> {
        sets.iter().map(|set| self.bootstrap(set)).collect()
    }
}
