// Autocorrelation of a measurement series
//
// Two estimators:
// - autocorrelation_coefficient(): correlation between consecutive
//   subsession means of q samples. At q = 1 this is the lag-1 sample
//   autocorrelation; larger q measures how much correlation survives
//   subsession grouping, which is what the subsession-size search needs.
// - lag_autocorrelation(): the classic lag-k estimator on raw samples.
//
// Both take the mean as an argument so every coefficient in a sweep is
// computed against the same estimate and stays comparable.

use super::mean::validate_for_method;
use super::subsession::{block_means, validate_subsession_size};
use super::{validate_series, MeanMethod};
use crate::error::{AnalysisError, Result};

/// Autocorrelation coefficient of consecutive subsession means
///
/// Splits the series into `h = floor(n / q)` blocks, reduces each with
/// `method`, and returns
///
/// ```text
///   [ 1/(h-1) Σ_{i=1}^{h-1} (u_i - mean)(u_{i+1} - mean) ]
///   / [ 1/(h-1) Σ_{i=1}^{h} (u_i - mean)^2 ]
/// ```
///
/// # Errors
/// - `InvalidInput` if `q == 0`, `q > n`, or fewer than two blocks result
/// - `DivisionUndefined` if every block mean equals `sample_mean`
pub fn autocorrelation_coefficient(
    series: &[f64],
    subsession_size: usize,
    sample_mean: f64,
    method: MeanMethod,
) -> Result<f64> {
    validate_series(series)?;
    validate_subsession_size(series, subsession_size)?;
    validate_for_method(series, method)?;
    if !sample_mean.is_finite() {
        return Err(AnalysisError::invalid(format!(
            "sample mean must be finite, got {}",
            sample_mean
        )));
    }

    let h = series.len() / subsession_size;
    if h < 2 {
        return Err(AnalysisError::invalid(format!(
            "need at least 2 subsessions for autocorrelation, got {} (n={}, q={})",
            h,
            series.len(),
            subsession_size
        )));
    }

    let means = block_means(series, subsession_size, method);

    // Covariance of neighbouring blocks, averaged over the h - 1 pairs
    let mut cov_sum = 0.0;
    for pair in means.windows(2) {
        cov_sum += (pair[0] - sample_mean) * (pair[1] - sample_mean);
    }
    let cov = cov_sum / (h - 1) as f64;

    let mut var_sum = 0.0;
    for &u in &means {
        var_sum += (u - sample_mean).powi(2);
    }
    let var = var_sum / (h - 1) as f64;

    if var == 0.0 {
        return Err(AnalysisError::undefined(format!(
            "subsession means have zero variance around {} (q={})",
            sample_mean, subsession_size
        )));
    }

    let rho = cov / var;
    tracing::trace!(
        subsession_size,
        subsessions = h,
        rho,
        "subsession autocorrelation"
    );
    Ok(rho)
}

/// Classic lag-k sample autocorrelation of raw samples
///
/// With `d_i = x_i - mean`:
/// `rho_k = Σ_{i=1}^{n-k} d_i d_{i+k} / Σ_{i=1}^{n} d_i^2`.
/// The numerator sums the `n - k` valid pairs while the denominator sums
/// all `n` deviations.
///
/// # Errors
/// - `InvalidInput` if `lag >= n`
/// - `DivisionUndefined` if every sample equals `mean`
pub fn lag_autocorrelation(series: &[f64], lag: usize, mean: f64) -> Result<f64> {
    validate_series(series)?;
    if lag >= series.len() {
        return Err(AnalysisError::invalid(format!(
            "lag {} must be smaller than series length {}",
            lag,
            series.len()
        )));
    }
    if !mean.is_finite() {
        return Err(AnalysisError::invalid(format!(
            "mean must be finite, got {}",
            mean
        )));
    }

    let mut denominator = 0.0;
    for &x in series {
        denominator += (x - mean).powi(2);
    }
    if denominator == 0.0 {
        return Err(AnalysisError::undefined(format!(
            "series has zero variance around {}",
            mean
        )));
    }

    let mut numerator = 0.0;
    for (a, b) in series.iter().zip(&series[lag..]) {
        numerator += (a - mean) * (b - mean);
    }
    Ok(numerator / denominator)
}
