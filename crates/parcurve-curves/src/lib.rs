//! # Parcurve Curves
//!
//! Discount curve bootstrapping from money-market instruments.
//!
//! This crate provides:
//!
//! - **Curve Trait**: Core [`Curve`] trait for discount factor, zero and forward queries
//! - **Instruments**: Capability traits plus reference deposits, FRAs and swaps
//! - **Validation**: Ordering and consistency checks before any curve math
//! - **Bootstrap**: General iterative and linear swap rate strategies
//! - **Interpolation**: Flat forward, cubic and monotone splines on log discount factors
//! - **Repricing**: Refit verification of calibration instruments
//! - **Configuration**: Serde-backed settings loadable from TOML or JSON
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use parcurve_curves::prelude::*;
//!
//! let deposits: Vec<SharedDeposit> = vec![Arc::new(Deposit::new(0.0, 0.25, 0.05).unwrap())];
//! let fras: Vec<SharedFra> = vec![Arc::new(Fra::new(0.25, 0.5, 0.051).unwrap())];
//! let swaps: Vec<SharedSwap> = vec![
//!     Arc::new(Swap::new(0.0, 2.0, 0.048, Frequency::SemiAnnual).unwrap()),
//!     Arc::new(Swap::new(0.0, 5.0, 0.047, Frequency::SemiAnnual).unwrap()),
//! ];
//!
//! let config = BootstrapConfig::default()
//!     .with_interpolation(InterpolationScheme::FlatForward)
//!     .with_refit_check(true);
//! let curve = CurveBootstrapper::new(config)
//!     .build(0.0, deposits, fras, swaps)
//!     .unwrap();
//!
//! // Discount factor at 18 months
//! let df = curve.discount_factor(1.5).unwrap();
//!
//! // Continuously compounded zero rate
//! let rate = curve.zero_rate(1.5, Compounding::Continuous).unwrap();
//! assert!((df - (-rate * 1.5).exp()).abs() < 1e-12);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::similar_names)]
#![allow(clippy::uninlined_format_args)]

pub mod bootstrap;
pub mod compounding;
pub mod config;
pub mod curve;
pub mod error;
pub mod instruments;
pub mod interpolation;
pub mod repricing;
pub mod traits;
pub mod validation;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::bootstrap::{CurveBootstrapper, CurveBuilder};
    pub use crate::compounding::Compounding;
    pub use crate::config::{BootstrapConfig, SolverSettings};
    pub use crate::curve::{CurveNode, DiscountCurve};
    pub use crate::error::{CurveError, CurveResult};
    pub use crate::instruments::{
        CouponPeriod, CurveInstrument, Deposit, DepositInstrument, Fra, FraInstrument, Frequency,
        InstrumentType, PayReceive, SharedDeposit, SharedFra, SharedSwap, Swap, SwapInstrument,
    };
    pub use crate::interpolation::InterpolationScheme;
    pub use crate::repricing::{RefitTolerances, RefitVerifier, RepricingCheck, RepricingReport};
    pub use crate::traits::Curve;
    pub use crate::validation::{CalibrationSet, InstrumentValidator};
}

pub use bootstrap::CurveBootstrapper;
pub use compounding::Compounding;
pub use config::BootstrapConfig;
pub use curve::{CurveNode, DiscountCurve};
pub use error::{CurveError, CurveResult};
pub use instruments::{SharedDeposit, SharedFra, SharedSwap};
pub use interpolation::InterpolationScheme;
pub use repricing::{RefitTolerances, RefitVerifier, RepricingReport};
pub use traits::Curve;
pub use validation::{CalibrationSet, InstrumentValidator};
