// Reference-value tests for the subsession engine
//
// The 48 response times below are the classic serially correlated sample
// from Ferrari (1978). Expected values are pinned in double precision.

use super::*;
use crate::error::AnalysisError;

const RESPONSE_TIMES: [f64; 48] = [
    1.21, 1.67, 1.71, 1.53, 2.03, 2.15, 1.88, 2.02, 1.75, 1.84, 1.61, 1.35, 1.43, 1.64, 1.52, 1.44,
    1.17, 1.42, 1.64, 1.86, 1.68, 1.91, 1.73, 2.18, 2.27, 1.93, 2.19, 2.04, 1.92, 1.97, 1.65, 1.71,
    1.89, 1.70, 1.62, 1.48, 1.55, 1.39, 1.45, 1.67, 1.62, 1.77, 1.88, 1.82, 1.93, 2.09, 2.24, 2.16,
];

#[test]
fn test_reference_mean() {
    let m = mean(&RESPONSE_TIMES, MeanMethod::Arithmetic).unwrap();
    assert_eq!(m, 1.756458333333333);
}

#[test]
fn test_reference_autocorrelation() {
    let m = mean(&RESPONSE_TIMES, MeanMethod::Arithmetic).unwrap();
    let rho1 = autocorrelation_coefficient(&RESPONSE_TIMES, 1, m, MeanMethod::Arithmetic).unwrap();
    let rho2 = autocorrelation_coefficient(&RESPONSE_TIMES, 2, m, MeanMethod::Arithmetic).unwrap();
    assert_eq!(rho1, 0.63655574361384437);
    assert_eq!(rho2, 0.55892351761172487);
    assert!(rho2 < rho1);
}

#[test]
fn test_reference_lag_one_matches_classic_estimator() {
    let m = mean(&RESPONSE_TIMES, MeanMethod::Arithmetic).unwrap();
    let rho = lag_autocorrelation(&RESPONSE_TIMES, 1, m).unwrap();
    assert!((rho - 0.63655574361384437).abs() < 1e-15);
}

#[test]
fn test_reference_confidence_interval() {
    let ci = confidence_interval(&RESPONSE_TIMES, 4, 0.95, MeanMethod::Arithmetic).unwrap();
    assert!(
        ((ci.width() - 0.29157062128900485) / 0.29157062128900485).abs() < 1e-15,
        "width {}",
        ci.width()
    );
    assert_eq!(ci.level, 0.95);
    assert!((ci.point_estimate - 1.756458333333333).abs() < 1e-12);
}

#[test]
fn test_reference_anchors_side_by_side() {
    let sub = confidence_interval_anchored(
        &RESPONSE_TIMES,
        4,
        0.95,
        MeanMethod::Arithmetic,
        PointEstimateAnchor::SubsessionMean,
    )
    .unwrap();
    let sample = confidence_interval_anchored(
        &RESPONSE_TIMES,
        4,
        0.95,
        MeanMethod::Arithmetic,
        PointEstimateAnchor::SampleMean,
    )
    .unwrap();

    // Same width, different anchor
    assert_eq!(sub.half_width, sample.half_width);
    assert_eq!(sub.point_estimate, 1.7564583333333335);
    assert_eq!(sample.point_estimate, 1.756458333333333);
    assert!(((sample.width() - 0.29157062128900485) / 0.29157062128900485).abs() < 1e-15);
}

#[test]
fn test_reference_idempotent() {
    let a = confidence_interval(&RESPONSE_TIMES, 4, 0.95, MeanMethod::Arithmetic).unwrap();
    let b = confidence_interval(&RESPONSE_TIMES, 4, 0.95, MeanMethod::Arithmetic).unwrap();
    assert_eq!(a.half_width.to_bits(), b.half_width.to_bits());
    assert_eq!(a.point_estimate.to_bits(), b.point_estimate.to_bits());
}

#[test]
fn test_reference_full_length_subsession() {
    let n = RESPONSE_TIMES.len();
    let blocks = subsession_mean(&RESPONSE_TIMES, n, MeanMethod::Arithmetic).unwrap();
    assert_eq!(blocks, vec![1.756458333333333]);
    assert!(matches!(
        confidence_interval(&RESPONSE_TIMES, n, 0.95, MeanMethod::Arithmetic),
        Err(AnalysisError::InvalidInput(_))
    ));
}

#[test]
fn test_reference_width_grows_with_level() {
    let widths: Vec<f64> = [0.5, 0.8, 0.9, 0.95, 0.99, 0.999]
        .iter()
        .map(|&level| {
            confidence_interval(&RESPONSE_TIMES, 4, level, MeanMethod::Arithmetic)
                .unwrap()
                .half_width
        })
        .collect();
    for pair in widths.windows(2) {
        assert!(pair[0] < pair[1], "{:?}", widths);
    }
}

#[test]
fn test_reference_harmonic_interval() {
    let hm = mean(&RESPONSE_TIMES, MeanMethod::Harmonic).unwrap();
    let am = mean(&RESPONSE_TIMES, MeanMethod::Arithmetic).unwrap();
    assert!(hm < am);

    let ci = confidence_interval_anchored(
        &RESPONSE_TIMES,
        4,
        0.95,
        MeanMethod::Harmonic,
        PointEstimateAnchor::SampleMean,
    )
    .unwrap();
    assert_eq!(ci.point_estimate, hm);
    assert!(ci.half_width > 0.0);
}

#[test]
fn test_reference_analysis() {
    let analysis = analyze_series(&RESPONSE_TIMES, &AnalysisConfig::quick()).unwrap();
    // lag-1 coefficient 0.64 is already within the quick limit
    assert_eq!(analysis.optimal_subsession_size, Some(1));
    assert_eq!(analysis.mean, 1.756458333333333);
    assert_eq!(
        analysis.autocorrelation_coefficient,
        Some(0.63655574361384437)
    );
}
