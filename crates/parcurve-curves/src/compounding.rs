//! Compounding conventions for quoting zero rates off a discount curve.
//!
//! # Example
//!
//! ```rust
//! use parcurve_curves::Compounding;
//!
//! let df_continuous = Compounding::Continuous.discount_factor(0.05, 2.0);
//! let df_annual = Compounding::Annual.discount_factor(0.05, 2.0);
//!
//! // Continuous compounding gives slightly lower DF
//! assert!(df_continuous < df_annual);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Interest compounding convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Compounding {
    /// Simple interest (no compounding)
    Simple,
    /// Annual compounding (1x per year)
    Annual,
    /// Semi-annual compounding (2x per year)
    SemiAnnual,
    /// Quarterly compounding (4x per year)
    Quarterly,
    /// Monthly compounding (12x per year)
    Monthly,
    /// Continuous compounding
    #[default]
    Continuous,
}

impl Compounding {
    /// Periods per year for the discrete conventions.
    fn periods(self) -> Option<f64> {
        match self {
            Compounding::Annual => Some(1.0),
            Compounding::SemiAnnual => Some(2.0),
            Compounding::Quarterly => Some(4.0),
            Compounding::Monthly => Some(12.0),
            Compounding::Simple | Compounding::Continuous => None,
        }
    }

    /// Discount factor implied by `rate` over `t` years.
    #[must_use]
    pub fn discount_factor(self, rate: f64, t: f64) -> f64 {
        if t <= 0.0 {
            return 1.0;
        }
        match self {
            Compounding::Simple => 1.0 / (1.0 + rate * t),
            Compounding::Continuous => (-rate * t).exp(),
            discrete => {
                let n = discrete.periods().unwrap_or(1.0);
                (1.0 + rate / n).powf(-n * t)
            }
        }
    }

    /// Zero rate implied by discount factor `df` over `t` years.
    ///
    /// At `t <= 0` the rate is undefined and 0.0 is returned.
    #[must_use]
    pub fn zero_rate(self, df: f64, t: f64) -> f64 {
        if t <= 0.0 || df <= 0.0 {
            return 0.0;
        }
        match self {
            Compounding::Simple => (1.0 / df - 1.0) / t,
            Compounding::Continuous => -df.ln() / t,
            discrete => {
                let n = discrete.periods().unwrap_or(1.0);
                n * (df.powf(-1.0 / (n * t)) - 1.0)
            }
        }
    }
}

impl fmt::Display for Compounding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Compounding::Simple => "Simple",
            Compounding::Annual => "Annual",
            Compounding::SemiAnnual => "Semi-Annual",
            Compounding::Quarterly => "Quarterly",
            Compounding::Monthly => "Monthly",
            Compounding::Continuous => "Continuous",
        };
        write!(f, "{name}")
    }
}
