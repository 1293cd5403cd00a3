// One-shot analysis of a measurement series
//
// Composes the engine the way a benchmarking harness does: point estimate,
// subsession size search, corrected interval and, optionally, how many more
// readings a target width needs.

use super::autocorrelation::autocorrelation_coefficient;
use super::confidence::{confidence_interval_anchored, ConfidenceInterval, PointEstimateAnchor};
use super::sample_size::{optimal_sample_size, optimal_subsession_size, SampleSizeEstimate};
use super::{mean, subsession_variance, AnalysisConfig};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

/// Result of [`analyze_series`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesAnalysis {
    pub sample_size: usize,
    pub mean: f64,
    /// `None` when no subsession size meets the autocorrelation limit
    pub optimal_subsession_size: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence_interval: Option<ConfidenceInterval>,
    /// Unbiased variance of the subsession means around the full-series
    /// `mean`. The interval width instead centres them on their own mean, so
    /// the two differ for harmonic means or when `q` does not divide `n`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autocorrelation_coefficient: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_sample_size: Option<SampleSizeEstimate>,
}

impl SeriesAnalysis {
    /// Whether the interval is already at least as narrow as `target_width`
    pub fn meets_width(&self, target_width: f64) -> bool {
        self.confidence_interval
            .is_some_and(|ci| ci.width() <= target_width)
    }

    /// `key value` lines, one statistic per line
    pub fn to_report_string(&self) -> String {
        let mut report = String::new();
        let _ = writeln!(report, "sample_size {}", self.sample_size);
        let _ = writeln!(report, "mean {}", self.mean);
        match self.optimal_subsession_size {
            Some(q) => {
                let _ = writeln!(report, "optimal_subsession_size {}", q);
            }
            None => {
                let _ = writeln!(report, "optimal_subsession_size none");
            }
        }
        if let Some(ci) = &self.confidence_interval {
            let _ = writeln!(report, "CI {}", ci.width());
            let _ = writeln!(report, "CI_lower {}", ci.lower());
            let _ = writeln!(report, "CI_upper {}", ci.upper());
        }
        if let Some(var) = self.variance {
            let _ = writeln!(report, "variance {}", var);
        }
        if let Some(rho) = self.autocorrelation_coefficient {
            let _ = writeln!(report, "subsession_autocorrelation_coefficient {}", rho);
        }
        if let Some(required) = &self.required_sample_size {
            let _ = writeln!(
                report,
                "required_subsession_count {}",
                required.subsession_count
            );
            let _ = writeln!(report, "required_reading_count {}", required.reading_count);
        }
        report
    }
}

/// Analyze a series with the configured level, limit and mean method
///
/// The interval is anchored on the full-series mean so it is centered on
/// the reported `mean`.
pub fn analyze_series(series: &[f64], config: &AnalysisConfig) -> Result<SeriesAnalysis> {
    config.validate()?;
    let method = config.mean_method;

    let sample_mean = mean(series, method)?;
    let mut analysis = SeriesAnalysis {
        sample_size: series.len(),
        mean: sample_mean,
        optimal_subsession_size: None,
        confidence_interval: None,
        variance: None,
        autocorrelation_coefficient: None,
        required_sample_size: None,
    };
    if series.len() < 2 {
        tracing::info!("a single reading cannot support an interval estimate");
        return Ok(analysis);
    }

    let Some(q) = optimal_subsession_size(series, method, config.max_autocorrelation)? else {
        tracing::info!(
            limit = config.max_autocorrelation,
            "autocorrelation limit cannot be met; more readings are needed"
        );
        return Ok(analysis);
    };
    tracing::info!(subsession_size = q, "optimal subsession size");

    analysis.optimal_subsession_size = Some(q);
    analysis.confidence_interval = Some(confidence_interval_anchored(
        series,
        q,
        config.confidence_level,
        method,
        PointEstimateAnchor::SampleMean,
    )?);
    analysis.variance = Some(subsession_variance(series, q, sample_mean, method)?);
    analysis.autocorrelation_coefficient =
        autocorrelation_coefficient(series, q, sample_mean, method).ok();

    if let Some(width) = config.target_ci_width {
        analysis.required_sample_size = optimal_sample_size(
            series,
            width,
            method,
            config.confidence_level,
            config.max_autocorrelation,
        )?;
    }

    Ok(analysis)
}
