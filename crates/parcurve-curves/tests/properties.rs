//! Property-based tests for the bootstrap.

use std::sync::Arc;

use parcurve_curves::instruments::{Deposit, Fra, Frequency, Swap};
use parcurve_curves::{
    BootstrapConfig, Curve, CurveBootstrapper, CurveError, InstrumentValidator,
    InterpolationScheme, RefitVerifier, SharedDeposit, SharedFra, SharedSwap,
};
use proptest::prelude::*;

fn instruments(
    deposit_rate: f64,
    fra_rate: f64,
    swap_rates: [f64; 3],
) -> (Vec<SharedDeposit>, Vec<SharedFra>, Vec<SharedSwap>) {
    let deposits: Vec<SharedDeposit> = vec![Arc::new(Deposit::new(0.0, 0.5, deposit_rate).unwrap())];
    let fras: Vec<SharedFra> = vec![Arc::new(Fra::new(0.5, 1.0, fra_rate).unwrap())];
    let swaps = [2.0, 5.0, 10.0]
        .into_iter()
        .zip(swap_rates)
        .map(|(maturity, rate)| {
            Arc::new(Swap::new(0.0, maturity, rate, Frequency::SemiAnnual).unwrap()) as SharedSwap
        })
        .collect();
    (deposits, fras, swaps)
}

fn scheme_strategy() -> impl Strategy<Value = InterpolationScheme> {
    prop_oneof![
        Just(InterpolationScheme::FlatForward),
        Just(InterpolationScheme::LinearSwapRates),
    ]
}

proptest! {
    #[test]
    fn prop_builds_are_deterministic(
        deposit_rate in 0.005..0.08_f64,
        fra_rate in 0.005..0.08_f64,
        r2 in 0.01..0.06_f64,
        r5 in 0.01..0.06_f64,
        r10 in 0.01..0.06_f64,
        scheme in scheme_strategy(),
    ) {
        let (deposits, fras, swaps) = instruments(deposit_rate, fra_rate, [r2, r5, r10]);
        let set = InstrumentValidator::new(0.0).validate(deposits, fras, swaps).unwrap();
        let bootstrapper =
            CurveBootstrapper::new(BootstrapConfig::default().with_interpolation(scheme));

        let first = bootstrapper.bootstrap(&set).unwrap();
        let second = bootstrapper.bootstrap(&set).unwrap();

        let first_bits: Vec<u64> = first.discount_factors().iter().map(|df| df.to_bits()).collect();
        let second_bits: Vec<u64> = second.discount_factors().iter().map(|df| df.to_bits()).collect();
        prop_assert_eq!(first.times(), second.times());
        prop_assert_eq!(first_bits, second_bits);
    }

    #[test]
    fn prop_calibration_instruments_reprice(
        deposit_rate in 0.005..0.08_f64,
        fra_rate in 0.005..0.08_f64,
        r2 in 0.01..0.06_f64,
        r5 in 0.01..0.06_f64,
        r10 in 0.01..0.06_f64,
        scheme in scheme_strategy(),
    ) {
        let (deposits, fras, swaps) = instruments(deposit_rate, fra_rate, [r2, r5, r10]);
        let curve = CurveBootstrapper::new(BootstrapConfig::default().with_interpolation(scheme))
            .build(0.0, deposits, fras, swaps)
            .unwrap();

        let report = RefitVerifier::default().report(&curve).unwrap();
        prop_assert!(report.all_passed(), "{}", report);
        prop_assert_eq!(curve.discount_factor(0.0).unwrap(), 1.0);
        prop_assert_eq!(curve.times()[0], 0.0);
    }

    #[test]
    fn prop_unsorted_deposits_are_rejected(
        a in 0.1..2.0_f64,
        gap in 0.0..1.0_f64,
    ) {
        // Second deposit matures no later than the first
        let deposits: Vec<SharedDeposit> = vec![
            Arc::new(Deposit::new(0.0, a + gap, 0.04).unwrap()),
            Arc::new(Deposit::new(0.0, a, 0.04).unwrap()),
        ];

        let err = CurveBootstrapper::default()
            .build(0.0, deposits, vec![], vec![])
            .unwrap_err();
        let is_ordering = matches!(err, CurveError::Ordering { .. });
        prop_assert!(is_ordering);
    }

    #[test]
    fn prop_node_times_strictly_increase(
        deposit_rate in 0.005..0.08_f64,
        r2 in 0.01..0.06_f64,
        r5 in 0.01..0.06_f64,
        r10 in 0.01..0.06_f64,
        scheme in scheme_strategy(),
    ) {
        let (deposits, _, swaps) = instruments(deposit_rate, 0.0, [r2, r5, r10]);
        let curve = CurveBootstrapper::new(BootstrapConfig::default().with_interpolation(scheme))
            .build(0.0, deposits, vec![], swaps)
            .unwrap();

        prop_assert!(curve.times().windows(2).all(|w| w[0] < w[1]));
        prop_assert!(curve.discount_factors().iter().all(|df| *df > 0.0));
    }
}
