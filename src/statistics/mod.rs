// Autocorrelation-aware confidence intervals for benchmark measurement series
//
// Consecutive benchmark readings (request latencies, per-round throughput) are
// serially correlated. A naive interval computed from n correlated samples
// understates the variance of the mean, so the width is computed from the
// means of contiguous subsessions instead of the raw samples.
//
// Scientific Foundation:
// [1] Ferrari, D. (1978). Computer Systems Performance Evaluation.
//     Prentice-Hall. Subsession (batch means) method for correlated samples.
//
// [2] Le Boudec, J.-Y. (2015). Performance Evaluation of Computer and
//     Communication Systems. EPFL Press. Student-t intervals for the mean.
//
// Implementation:
// - Every reduction is a left-to-right fold in sequence order, so results are
//   bit-reproducible across runs and platforms
// - Uses statrs (crates.io) for the Student-t distribution
// - All functions are pure; independent analyses may run in parallel

mod autocorrelation;
mod confidence;
mod config;
mod mean;
mod sample_size;
mod student_t;
mod subsession;
mod summary;

pub use autocorrelation::{autocorrelation_coefficient, lag_autocorrelation};
pub use confidence::{
    confidence_interval, confidence_interval_anchored, ConfidenceInterval, PointEstimateAnchor,
};
pub use config::{AnalysisConfig, Preset};
pub use mean::{mean, MeanMethod};
pub use sample_size::{optimal_sample_size, optimal_subsession_size, SampleSizeEstimate};
pub use student_t::critical_value;
pub use subsession::{subsession_mean, subsession_variance};
pub use summary::{analyze_series, SeriesAnalysis};

pub(crate) use mean::MeanAccumulator;

use crate::error::{AnalysisError, Result};

/// Reject empty series and non-finite samples before any arithmetic runs
pub(crate) fn validate_series(series: &[f64]) -> Result<()> {
    if series.is_empty() {
        return Err(AnalysisError::invalid("series must contain at least one sample"));
    }
    if let Some(pos) = series.iter().position(|x| !x.is_finite()) {
        return Err(AnalysisError::invalid(format!(
            "sample {} is not a finite number ({})",
            pos, series[pos]
        )));
    }
    Ok(())
}

/// Reject confidence levels outside the open interval (0, 1)
pub(crate) fn validate_level(level: f64) -> Result<()> {
    if !(level > 0.0 && level < 1.0) {
        return Err(AnalysisError::invalid(format!(
            "confidence level must lie strictly between 0 and 1, got {}",
            level
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests;
