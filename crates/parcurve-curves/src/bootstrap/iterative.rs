//! General iterative bootstrap.
//!
//! Deposits are placed in closed form. FRAs use their closed-form inversion
//! when the start discount factor is already implied by the curve, and a
//! root search otherwise. Every swap is a root search for the discount
//! factor at its last coupon, valued against all earlier nodes.

use parcurve_math::solvers::{RootFinder, SolverConfig};
use tracing::debug;

use super::builder::CurveBuilder;
use super::solve::SolveContext;
use crate::error::CurveResult;
use crate::instruments::{SharedDeposit, SharedFra, SharedSwap};
use crate::traits::Curve;

/// Appends one node per deposit at its maturity.
pub(crate) fn bootstrap_deposits(
    builder: &mut CurveBuilder,
    deposits: &[SharedDeposit],
) -> CurveResult<()> {
    for deposit in deposits {
        // Settlement may lag the valuation time
        let df_settle = builder.discount_factor_at(deposit.start_time())?;
        let df = deposit.maturity_discount_factor(df_settle);
        builder.push(deposit.pillar_time(), df)?;
    }
    Ok(())
}

/// Appends one node per FRA at its maturity.
pub(crate) fn bootstrap_fras<R: RootFinder>(
    builder: &mut CurveBuilder,
    fras: &[SharedFra],
    finder: &R,
    config: &SolverConfig,
) -> CurveResult<()> {
    let valuation_time = builder.valuation_time();

    for fra in fras {
        let frontier = builder.frontier();
        let df = if fra.start_time() < frontier && frontier <= fra.maturity_time() {
            debug!(fra = %fra.description(), "closed-form FRA inversion");
            fra.invert_for_maturity_df(&*builder)?
        } else {
            let seed = builder.last_discount_factor();
            let ctx = SolveContext::new(builder, fra.pillar_time(), valuation_time, fra.as_ref());
            ctx.solve(finder, seed, config)?.root
        };
        builder.push(fra.pillar_time(), df)?;
    }
    Ok(())
}

/// Appends one node per swap at its last coupon by root search.
pub(crate) fn bootstrap_swaps<R: RootFinder>(
    builder: &mut CurveBuilder,
    swaps: &[SharedSwap],
    finder: &R,
    config: &SolverConfig,
) -> CurveResult<()> {
    let valuation_time = builder.valuation_time();

    for swap in swaps {
        let seed = builder.last_discount_factor();
        let ctx = SolveContext::new(builder, swap.pillar_time(), valuation_time, swap.as_ref());
        let df = ctx.solve(finder, seed, config)?.root;
        builder.push(swap.pillar_time(), df)?;
    }
    Ok(())
}
