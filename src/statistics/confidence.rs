// Subsession-corrected confidence interval for the mean
//
// The width is computed from the m = floor(n/q) subsession means rather than
// the n raw samples: consecutive subsession means are approximately
// independent once q is large relative to the series' autocorrelation decay.

use super::mean::validate_for_method;
use super::student_t::critical_value;
use super::subsession::{block_means, centered_variance, validate_subsession_size};
use super::{validate_level, validate_series, MeanAccumulator, MeanMethod};
use crate::error::{AnalysisError, Result};
use serde::{Deserialize, Serialize};

/// Which quantity anchors the reported point estimate
///
/// The width is identical in both modes; only `point_estimate` differs.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum PointEstimateAnchor {
    /// Arithmetic mean of the subsession means
    #[default]
    SubsessionMean,
    /// Full-series mean computed with the requested [`MeanMethod`]
    SampleMean,
}

/// Symmetric confidence interval `[point_estimate - half_width, point_estimate + half_width]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceInterval {
    pub point_estimate: f64,
    pub half_width: f64,
    /// Confidence level in (0, 1), e.g. 0.95
    pub level: f64,
}

impl ConfidenceInterval {
    pub fn lower(&self) -> f64 {
        self.point_estimate - self.half_width
    }

    pub fn upper(&self) -> f64 {
        self.point_estimate + self.half_width
    }

    /// Full width of the interval (`2 * half_width`)
    pub fn width(&self) -> f64 {
        self.half_width * 2.0
    }

    pub fn contains(&self, value: f64) -> bool {
        self.lower() <= value && value <= self.upper()
    }
}

/// Confidence interval anchored on the mean of subsession means
///
/// Shorthand for [`confidence_interval_anchored`] with
/// [`PointEstimateAnchor::SubsessionMean`].
///
/// # Example
/// ```
/// use benchci::statistics::{confidence_interval, MeanMethod};
///
/// let series = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];
/// let ci = confidence_interval(&series, 2, 0.95, MeanMethod::Arithmetic).unwrap();
/// assert_eq!(ci.point_estimate, 4.5);
/// assert!(ci.contains(4.5));
/// ```
pub fn confidence_interval(
    series: &[f64],
    subsession_size: usize,
    level: f64,
    method: MeanMethod,
) -> Result<ConfidenceInterval> {
    confidence_interval_anchored(
        series,
        subsession_size,
        level,
        method,
        PointEstimateAnchor::default(),
    )
}

/// Subsession-corrected confidence interval with an explicit anchor
///
/// 1. `point = mean(series, method)`
/// 2. `S` = subsession means (`m` values)
/// 3. `mu_S`, `var_S` = sample mean and unbiased variance of `S`
/// 4. `half_width = t(m - 1, level) * sqrt(var_S / m)`
/// 5. report `mu_S` or `point` according to `anchor`
///
/// Zero variance yields `half_width = 0`.
///
/// # Errors
/// `InvalidInput` for an empty or non-finite series, `q` outside `[1, n]`,
/// fewer than two subsessions, or `level` outside `(0, 1)`.
pub fn confidence_interval_anchored(
    series: &[f64],
    subsession_size: usize,
    level: f64,
    method: MeanMethod,
    anchor: PointEstimateAnchor,
) -> Result<ConfidenceInterval> {
    validate_level(level)?;
    validate_series(series)?;
    validate_subsession_size(series, subsession_size)?;
    validate_for_method(series, method)?;
    let m = series.len() / subsession_size;
    if m < 2 {
        return Err(AnalysisError::invalid(format!(
            "need at least 2 subsessions for a confidence interval, got {} (n={}, q={})",
            m,
            series.len(),
            subsession_size
        )));
    }

    let point = MeanAccumulator::reduce(method, series);
    let subsession_means = block_means(series, subsession_size, method);
    let mu_s = MeanAccumulator::reduce(MeanMethod::Arithmetic, &subsession_means);
    let var_s = centered_variance(&subsession_means, mu_s);

    let t = critical_value(m - 1, level)?;
    let half_width = t * (var_s / m as f64).sqrt();

    tracing::debug!(
        n = series.len(),
        subsession_size,
        subsessions = m,
        %method,
        t,
        var_s,
        half_width,
        "subsession confidence interval"
    );

    let point_estimate = match anchor {
        PointEstimateAnchor::SubsessionMean => mu_s,
        PointEstimateAnchor::SampleMean => point,
    };

    Ok(ConfidenceInterval {
        point_estimate,
        half_width,
        level,
    })
}
