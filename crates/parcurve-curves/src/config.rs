//! Bootstrap configuration.
//!
//! All fields carry serde defaults, so a partial TOML or JSON document
//! only needs to name what differs:
//!
//! ```toml
//! interpolation = "monotone_spline_log_df"
//! check_refit = true
//!
//! [solver]
//! max_iterations = 100
//! ```

use parcurve_math::solvers::{SolverConfig, DEFAULT_MAX_ITERATIONS, DEFAULT_TOLERANCE};
use serde::{Deserialize, Serialize};

use crate::error::{CurveError, CurveResult};
use crate::interpolation::InterpolationScheme;
use crate::repricing::RefitTolerances;

/// Root search settings for iteratively solved pillars.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolverSettings {
    /// Tolerance on the instrument's value per unit notional.
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,

    /// Iteration cap; exceeding it fails the build.
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,
}

fn default_tolerance() -> f64 {
    DEFAULT_TOLERANCE
}

fn default_max_iterations() -> u32 {
    DEFAULT_MAX_ITERATIONS
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            tolerance: default_tolerance(),
            max_iterations: default_max_iterations(),
        }
    }
}

impl From<SolverSettings> for SolverConfig {
    fn from(settings: SolverSettings) -> Self {
        SolverConfig::new(settings.tolerance, settings.max_iterations)
    }
}

/// Configuration for [`CurveBootstrapper`](crate::CurveBootstrapper).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct BootstrapConfig {
    /// Interpolation scheme; also selects the bootstrap strategy.
    #[serde(default)]
    pub interpolation: InterpolationScheme,

    /// Revalue every calibration instrument after the build.
    #[serde(default)]
    pub check_refit: bool,

    /// Root search settings.
    #[serde(default)]
    pub solver: SolverSettings,

    /// Refit tolerances per instrument class.
    #[serde(default)]
    pub refit: RefitTolerances,
}

impl BootstrapConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the interpolation scheme.
    #[must_use]
    pub fn with_interpolation(mut self, scheme: InterpolationScheme) -> Self {
        self.interpolation = scheme;
        self
    }

    /// Enables or disables the post-build refit check.
    #[must_use]
    pub fn with_refit_check(mut self, enabled: bool) -> Self {
        self.check_refit = enabled;
        self
    }

    /// Sets the solver tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.solver.tolerance = tolerance;
        self
    }

    /// Sets the solver iteration cap.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.solver.max_iterations = max_iterations;
        self
    }

    /// Sets the refit tolerances.
    #[must_use]
    pub fn with_refit_tolerances(mut self, tolerances: RefitTolerances) -> Self {
        self.refit = tolerances;
        self
    }

    /// Parses a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::Configuration`] if the document does not parse
    /// or fails [`validate`](Self::validate).
    pub fn from_toml_str(source: &str) -> CurveResult<Self> {
        let config: Self = toml::from_str(source)
            .map_err(|e| CurveError::configuration(format!("invalid TOML config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Parses a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::Configuration`] if the document does not parse
    /// or fails [`validate`](Self::validate).
    pub fn from_json_str(source: &str) -> CurveResult<Self> {
        let config: Self = serde_json::from_str(source)
            .map_err(|e| CurveError::configuration(format!("invalid JSON config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Solver configuration for root searches.
    #[must_use]
    pub fn solver_config(&self) -> SolverConfig {
        self.solver.into()
    }

    /// Checks numeric settings.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::Configuration`] for a non-positive tolerance or
    /// a zero iteration cap.
    pub fn validate(&self) -> CurveResult<()> {
        let positive = |name: &str, value: f64| {
            if value > 0.0 && value.is_finite() {
                Ok(())
            } else {
                Err(CurveError::configuration(format!(
                    "{name} must be positive and finite, got {value}"
                )))
            }
        };

        positive("solver tolerance", self.solver.tolerance)?;
        if self.solver.max_iterations == 0 {
            return Err(CurveError::configuration("solver iteration cap must be at least 1"));
        }
        positive("deposit refit tolerance", self.refit.deposit)?;
        positive("FRA refit tolerance", self.refit.fra)?;
        positive("swap refit tolerance", self.refit.swap)?;
        Ok(())
    }
}
