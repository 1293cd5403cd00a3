// Subsession partitioning
//
// A subsession is a contiguous, non-overlapping block of q samples. The
// trailing partial block is dropped. Block means form a shorter, less
// autocorrelated surrogate series.

use super::mean::validate_for_method;
use super::{validate_series, MeanAccumulator, MeanMethod};
use crate::error::{AnalysisError, Result};

pub(crate) fn validate_subsession_size(series: &[f64], subsession_size: usize) -> Result<()> {
    if subsession_size < 1 {
        return Err(AnalysisError::invalid("subsession size must be at least 1"));
    }
    if subsession_size > series.len() {
        return Err(AnalysisError::invalid(format!(
            "subsession size {} exceeds series length {}",
            subsession_size,
            series.len()
        )));
    }
    Ok(())
}

/// Block means without validation
pub(crate) fn block_means(series: &[f64], subsession_size: usize, method: MeanMethod) -> Vec<f64> {
    series
        .chunks_exact(subsession_size)
        .map(|block| MeanAccumulator::reduce(method, block))
        .collect()
}

/// Unbiased variance (`m - 1` divisor) of `values` around `center`
///
/// Callers guarantee at least two values.
pub(crate) fn centered_variance(values: &[f64], center: f64) -> f64 {
    let mut sum = 0.0;
    for &v in values {
        sum += (v - center).powi(2);
    }
    sum / (values.len() - 1) as f64
}

/// Per-subsession means, in block order
///
/// Returns `floor(n / q)` values; with `q == n` that is a single block equal
/// to the full-series mean.
///
/// # Example
/// ```
/// use benchci::statistics::{subsession_mean, MeanMethod};
///
/// let blocks = subsession_mean(&[1.0, 3.0, 5.0, 7.0, 9.0], 2, MeanMethod::Arithmetic).unwrap();
/// assert_eq!(blocks, vec![2.0, 6.0]); // trailing 9.0 dropped
/// ```
pub fn subsession_mean(
    series: &[f64],
    subsession_size: usize,
    method: MeanMethod,
) -> Result<Vec<f64>> {
    validate_series(series)?;
    validate_subsession_size(series, subsession_size)?;
    validate_for_method(series, method)?;
    Ok(block_means(series, subsession_size, method))
}

/// Variance of the subsession means around a caller-supplied center
///
/// Uses the `h - 1` divisor, where `h = floor(n / q)`. Requires at least two
/// subsessions.
pub fn subsession_variance(
    series: &[f64],
    subsession_size: usize,
    center: f64,
    method: MeanMethod,
) -> Result<f64> {
    let means = subsession_mean(series, subsession_size, method)?;
    if means.len() < 2 {
        return Err(AnalysisError::invalid(format!(
            "need at least 2 subsessions to estimate variance, got {} (n={}, q={})",
            means.len(),
            series.len(),
            subsession_size
        )));
    }
    if !center.is_finite() {
        return Err(AnalysisError::invalid(format!(
            "variance center must be finite, got {}",
            center
        )));
    }
    Ok(centered_variance(&means, center))
}
