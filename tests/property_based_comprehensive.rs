//! Property-based tests for the statistics and throughput engines
//!
//! Core properties tested:
//! 1. Confidence intervals are deterministic and widen with the level
//! 2. Subsession partitioning drops the trailing partial block
//! 3. Autocorrelation coefficients stay within [-1, 1]
//! 4. Harmonic mean never exceeds arithmetic mean
//! 5. An exact throughput model has zero fit error

use benchci::statistics::{
    autocorrelation_coefficient, confidence_interval, critical_value, mean, subsession_mean,
    MeanMethod,
};
use benchci::throughput::{fit_error, ThroughputModel, ThroughputObservation};
use proptest::prelude::*;

fn positive_series(min_len: usize) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(0.1f64..1000.0, min_len..200)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_confidence_interval_is_deterministic(series in positive_series(4), q in 1usize..3) {
        let a = confidence_interval(&series, q, 0.95, MeanMethod::Arithmetic);
        let b = confidence_interval(&series, q, 0.95, MeanMethod::Arithmetic);
        match (a, b) {
            (Ok(a), Ok(b)) => {
                prop_assert_eq!(a.point_estimate.to_bits(), b.point_estimate.to_bits());
                prop_assert_eq!(a.half_width.to_bits(), b.half_width.to_bits());
            }
            (Err(a), Err(b)) => prop_assert_eq!(a, b),
            _ => prop_assert!(false, "results differ between identical calls"),
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_width_grows_with_level(
        series in positive_series(6),
        q in 1usize..3,
        low in 0.5f64..0.9,
    ) {
        let high = low + 0.05;
        let narrow = confidence_interval(&series, q, low, MeanMethod::Arithmetic).unwrap();
        let wide = confidence_interval(&series, q, high, MeanMethod::Arithmetic).unwrap();
        prop_assert!(wide.width() >= narrow.width());
        prop_assert!(narrow.contains(narrow.point_estimate));
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_subsession_count_is_floor(series in positive_series(1), q in 1usize..20) {
        prop_assume!(q <= series.len());
        let means = subsession_mean(&series, q, MeanMethod::Arithmetic).unwrap();
        prop_assert_eq!(means.len(), series.len() / q);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_autocorrelation_bounded(series in positive_series(4), q in 1usize..3) {
        prop_assume!(series.len() / q >= 2);
        let m = mean(&series, MeanMethod::Arithmetic).unwrap();
        if let Ok(rho) = autocorrelation_coefficient(&series, q, m, MeanMethod::Arithmetic) {
            prop_assert!(rho.abs() <= 1.0 + 1e-12, "rho {}", rho);
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_harmonic_below_arithmetic(series in positive_series(1)) {
        let am = mean(&series, MeanMethod::Arithmetic).unwrap();
        let hm = mean(&series, MeanMethod::Harmonic).unwrap();
        prop_assert!(hm <= am * (1.0 + 1e-12));
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    #[test]
    fn prop_critical_value_shrinks_with_df(df in 1usize..200) {
        let t1 = critical_value(df, 0.95).unwrap();
        let t2 = critical_value(df + 1, 0.95).unwrap();
        prop_assert!(t2 < t1);
        prop_assert!(t2 > 1.959);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_exact_model_has_zero_error(
        work in prop::collection::vec(1.0f64..1e6, 1..50),
        alpha in 0.0f64..1e4,
        v in 0.01f64..10.0,
    ) {
        let model = ThroughputModel::new(alpha, v).unwrap();
        let rounds: Vec<ThroughputObservation> = work
            .iter()
            .map(|&w| ThroughputObservation::new(w, model.predict_duration(w)).unwrap())
            .collect();
        let report = fit_error(&rounds, &model).unwrap();
        prop_assert_eq!(report.sum_absolute_error(), 0.0);
        prop_assert!(report.naive_error.sum_absolute_error >= 0.0);
    }
}
