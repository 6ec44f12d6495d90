//! # Parcurve Math
//!
//! Numerical building blocks for the Parcurve discount curve bootstrapper.
//!
//! This crate provides:
//!
//! - **Solvers**: Derivative-free secant (Newton without Jacobian) root search
//! - **Interpolation**: Linear, log-linear, natural cubic and monotone cubic splines
//! - **Linear Algebra**: Tridiagonal solves used by the spline fits
//!
//! Everything here works on plain `f64` slices and has no notion of
//! instruments or curves; the curve crate layers those on top.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::similar_names)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::unreadable_literal)]
#![allow(clippy::uninlined_format_args)]

pub mod error;
pub mod interpolation;
pub mod linear_algebra;
pub mod solvers;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{MathError, MathResult};
    pub use crate::interpolation::{
        CubicSpline, Extrapolation, Interpolator, LinearInterpolator, LogLinearInterpolator,
        MonotoneCubic,
    };
    pub use crate::solvers::{secant, RootFinder, SecantSolver, SolverConfig, SolverResult};
}

pub use error::{MathError, MathResult};
