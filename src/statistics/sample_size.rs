// Subsession size search and required sample size
//
// The harness uses these to decide, without human judgment, whether it has
// collected enough readings for an interval of the requested width.

use super::autocorrelation::autocorrelation_coefficient;
use super::student_t::critical_value;
use super::{mean, subsession_variance, validate_level, MeanMethod};
use crate::error::{AnalysisError, Result};
use serde::{Deserialize, Serialize};

/// Required sample size for a target interval width
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleSizeEstimate {
    /// Subsession size whose means are treated as independent
    pub subsession_size: usize,
    /// Number of subsession means required
    pub subsession_count: usize,
    /// Number of raw readings required (`subsession_count * subsession_size`)
    pub reading_count: usize,
}

/// Smallest subsession size whose autocorrelation is within the limit
///
/// Tries `q = 1 ..= n/2` against the full-series mean and returns the first
/// `q` with `|rho| <= max_autocorrelation`, or `None` if none qualifies.
/// A subsession size whose block means have zero variance counts as fully
/// correlated.
///
/// # Example
/// ```
/// use benchci::statistics::{optimal_subsession_size, MeanMethod};
///
/// // A linear trend only decorrelates once blocks get long
/// let series: Vec<f64> = (0..20).map(f64::from).collect();
/// let q = optimal_subsession_size(&series, MeanMethod::Arithmetic, 0.3).unwrap();
/// assert_eq!(q, Some(5));
/// ```
pub fn optimal_subsession_size(
    series: &[f64],
    method: MeanMethod,
    max_autocorrelation: f64,
) -> Result<Option<usize>> {
    if series.len() <= 1 {
        return Err(AnalysisError::invalid(format!(
            "cannot estimate autocorrelation from {} sample(s)",
            series.len()
        )));
    }
    if !(max_autocorrelation >= 0.0) {
        return Err(AnalysisError::invalid(format!(
            "autocorrelation limit must be non-negative, got {}",
            max_autocorrelation
        )));
    }

    let sample_mean = mean(series, method)?;
    for q in 1..=series.len() / 2 {
        let rho = match autocorrelation_coefficient(series, q, sample_mean, method) {
            Ok(rho) => rho,
            Err(AnalysisError::DivisionUndefined(_)) => 1.0,
            Err(e) => return Err(e),
        };
        tracing::debug!(subsession_size = q, rho, "subsession autocorrelation");
        if rho.abs() <= max_autocorrelation {
            return Ok(Some(q));
        }
    }
    Ok(None)
}

/// Readings needed for an interval of full width `ci_width`
///
/// With the optimal subsession size `q`, `h = n / q` subsessions and
/// `T = t(h - 1, level)`, the required number of subsessions is
/// `ceil(var * (T / (ci_width / 2))^2)`. Returns `None` when no subsession
/// size meets the autocorrelation limit.
///
/// # Errors
/// `InvalidInput` when the width is not positive or so small that the
/// required count does not fit in a `usize`.
pub fn optimal_sample_size(
    series: &[f64],
    ci_width: f64,
    method: MeanMethod,
    level: f64,
    max_autocorrelation: f64,
) -> Result<Option<SampleSizeEstimate>> {
    validate_level(level)?;
    if !(ci_width > 0.0 && ci_width.is_finite()) {
        return Err(AnalysisError::invalid(format!(
            "confidence interval width must be positive, got {}",
            ci_width
        )));
    }

    let Some(q) = optimal_subsession_size(series, method, max_autocorrelation)? else {
        return Ok(None);
    };
    let h = series.len() / q;
    let t = critical_value(h - 1, level)?;
    let e = ci_width / 2.0;

    let sample_mean = mean(series, method)?;
    let var = subsession_variance(series, q, sample_mean, method)?;
    let required = (var * (t / e).powi(2)).ceil();
    if !(required.is_finite() && required < usize::MAX as f64) {
        return Err(AnalysisError::invalid(format!(
            "confidence interval width {} needs more subsessions than can be counted",
            ci_width
        )));
    }
    let subsession_count = required as usize;
    let reading_count = subsession_count.checked_mul(q).ok_or_else(|| {
        AnalysisError::invalid(format!(
            "confidence interval width {} needs more readings than can be counted",
            ci_width
        ))
    })?;

    tracing::debug!(
        subsession_size = q,
        t,
        var,
        subsession_count,
        "required sample size"
    );

    Ok(Some(SampleSizeEstimate {
        subsession_size: q,
        subsession_count,
        reading_count,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_independent_series_uses_size_one() {
        let s = [5.0, 1.0, 4.0, 2.0, 6.0, 3.0, 5.0, 2.0, 4.0, 3.0];
        let q = optimal_subsession_size(&s, MeanMethod::Arithmetic, 1.0).unwrap();
        assert_eq!(q, Some(1));
    }

    #[test]
    fn test_trend_needs_long_subsessions() {
        let s: Vec<f64> = (0..20).map(|i| i as f64).collect();
        let q = optimal_subsession_size(&s, MeanMethod::Arithmetic, 0.1).unwrap();
        assert_eq!(q, Some(6));

        let q = optimal_subsession_size(&s, MeanMethod::Arithmetic, 0.01).unwrap();
        assert_eq!(q, None);
    }

    #[test]
    fn test_alternating_pairs_count_as_correlated() {
        // every block of two averages to the mean exactly
        let s = [1.0, 3.0, 1.0, 3.0, 1.0, 3.0, 1.0, 3.0];
        let q = optimal_subsession_size(&s, MeanMethod::Arithmetic, 0.4).unwrap();
        assert_eq!(q, None);
    }

    #[test]
    fn test_too_short_series() {
        assert!(optimal_subsession_size(&[1.0], MeanMethod::Arithmetic, 0.5).is_err());
        assert!(optimal_subsession_size(&[], MeanMethod::Arithmetic, 0.5).is_err());
    }

    #[test]
    fn test_sample_size_shrinks_with_wider_target() {
        let s = [5.0, 1.0, 4.0, 2.0, 6.0, 3.0, 5.0, 2.0, 4.0, 3.0];
        let narrow = optimal_sample_size(&s, 0.5, MeanMethod::Arithmetic, 0.95, 1.0)
            .unwrap()
            .unwrap();
        let wide = optimal_sample_size(&s, 2.0, MeanMethod::Arithmetic, 0.95, 1.0)
            .unwrap()
            .unwrap();
        assert_eq!(narrow.subsession_size, 1);
        assert!(narrow.subsession_count > wide.subsession_count);
        assert_eq!(narrow.reading_count, narrow.subsession_count);
    }

    #[test]
    fn test_unreachable_width_is_an_error() {
        let s: Vec<f64> = (0..20).map(|i| i as f64).collect();
        let result = optimal_sample_size(&s, 1e-300, MeanMethod::Arithmetic, 0.95, 0.1);
        assert!(matches!(result, Err(AnalysisError::InvalidInput(_))));
    }

    #[test]
    fn test_sample_size_rejects_bad_width() {
        let s = [1.0, 2.0, 3.0, 4.0];
        assert!(optimal_sample_size(&s, 0.0, MeanMethod::Arithmetic, 0.95, 0.5).is_err());
    }
}
