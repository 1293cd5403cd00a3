// Least-squares fit of the throughput model
//
// Rounds are grouped into subsessions (mean work and mean duration over q
// consecutive rounds) before regressing duration on work, so that serially
// correlated rounds do not overstate the fit's confidence. The subsession
// size comes from the autocorrelation of per-round rates.

use super::model::{ThroughputModel, ThroughputObservation};
use crate::error::{AnalysisError, Result};
use crate::statistics::{mean, optimal_subsession_size, subsession_variance, MeanMethod};
use serde::{Deserialize, Serialize};

/// Straight line `y = intercept + slope * x`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearFit {
    pub intercept: f64,
    pub slope: f64,
}

impl LinearFit {
    pub fn predict(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }
}

/// Ordinary least squares of `y` on `x`
///
/// `slope = cov(x, y) / var(x)`, both with the `n - 1` divisor, and
/// `intercept = mean(y) - slope * mean(x)`.
///
/// # Errors
/// - `InvalidInput` if the lengths differ or fewer than two points are given
/// - `DivisionUndefined` if every `x` is identical
pub fn simple_regression(x: &[f64], y: &[f64]) -> Result<LinearFit> {
    if x.len() != y.len() {
        return Err(AnalysisError::invalid(format!(
            "x and y lengths differ ({} vs {})",
            x.len(),
            y.len()
        )));
    }
    if x.len() < 2 {
        return Err(AnalysisError::invalid(format!(
            "need at least 2 points for a regression, got {}",
            x.len()
        )));
    }

    let x_mean = mean(x, MeanMethod::Arithmetic)?;
    let y_mean = mean(y, MeanMethod::Arithmetic)?;
    let x_var = subsession_variance(x, 1, x_mean, MeanMethod::Arithmetic)?;
    if x_var == 0.0 {
        return Err(AnalysisError::undefined(
            "all x values are identical; slope is undefined",
        ));
    }

    let mut cov_sum = 0.0;
    for (xi, yi) in x.iter().zip(y) {
        cov_sum += (xi - x_mean) * (yi - y_mean);
    }
    let xy_cov = cov_sum / (x.len() - 1) as f64;

    let slope = xy_cov / x_var;
    Ok(LinearFit {
        intercept: y_mean - slope * x_mean,
        slope,
    })
}

/// Options for [`fit_throughput_model`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FitOptions {
    /// Rounds not longer than this (ns) are discarded before fitting
    pub duration_threshold: f64,
    /// Autocorrelation limit for the per-round rate subsession search
    pub max_autocorrelation: f64,
}

impl Default for FitOptions {
    fn default() -> Self {
        Self {
            duration_threshold: 0.0,
            max_autocorrelation: 0.1,
        }
    }
}

/// Result of [`fit_throughput_model`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThroughputFit {
    /// Fitted per-round overhead in nanoseconds; may come out negative on
    /// noisy data
    pub alpha: f64,
    /// Fitted rate in work units per nanosecond
    pub v: f64,
    pub subsession_size: usize,
    pub subsession_count: usize,
    /// Rounds kept after the duration threshold
    pub rounds_used: usize,
    /// Sum of squared residuals over the kept rounds, ns²
    pub ssr: f64,
    /// Sum of squared residuals of the subsession means the line was fitted to
    pub subsession_ssr: f64,
    /// Width of the interval for `v` obtained by mapping `1/v ± 2 * se(1/v)`
    /// through `1/x`, work units per nanosecond
    pub v_ci: f64,
}

impl ThroughputFit {
    /// Validated model; fails when the fit produced a negative overhead
    pub fn model(&self) -> Result<ThroughputModel> {
        ThroughputModel::new(self.alpha, self.v)
    }
}

/// Fit `duration = alpha + work / v` to observed rounds
///
/// Returns `Ok(None)` when there is not enough data: fewer than 3 rounds
/// above the threshold, no subsession size meeting the autocorrelation
/// limit, or fewer than 3 subsessions.
pub fn fit_throughput_model(
    observations: &[ThroughputObservation],
    options: &FitOptions,
) -> Result<Option<ThroughputFit>> {
    for (i, obs) in observations.iter().enumerate() {
        obs.validate()
            .map_err(|e| AnalysisError::invalid(format!("observation {}: {}", i, e)))?;
    }

    let kept: Vec<ThroughputObservation> = observations
        .iter()
        .filter(|obs| obs.round_duration > options.duration_threshold)
        .copied()
        .collect();
    if kept.len() < 3 {
        tracing::info!(
            rounds = kept.len(),
            "not enough rounds after duration threshold filtering"
        );
        return Ok(None);
    }

    let rates: Vec<f64> = kept.iter().map(ThroughputObservation::rate).collect();
    let Some(q) = optimal_subsession_size(&rates, MeanMethod::Harmonic, options.max_autocorrelation)?
    else {
        tracing::info!("per-round rates too autocorrelated; more rounds needed");
        return Ok(None);
    };
    let h = kept.len() / q;
    if h < 3 {
        tracing::info!(subsession_size = q, subsessions = h, "fewer than 3 subsessions");
        return Ok(None);
    }

    let (work, duration): (Vec<f64>, Vec<f64>) = kept
        .chunks_exact(q)
        .map(|block| {
            let (w, d) = block.iter().fold((0.0, 0.0), |(w, d), obs| {
                (w + obs.work_amount, d + obs.round_duration)
            });
            (w / q as f64, d / q as f64)
        })
        .unzip();

    // duration = alpha + work * (1 / v)
    let line = simple_regression(&work, &duration)?;
    if !(line.slope > 0.0) {
        return Err(AnalysisError::invalid(format!(
            "fitted duration per unit of work is not positive ({}); rounds do not follow the model",
            line.slope
        )));
    }

    let mut ssr = 0.0;
    for obs in &kept {
        ssr += (line.predict(obs.work_amount) - obs.round_duration).powi(2);
    }

    // slope standard error from the h subsession points, h - 2 residual dof
    let mut subsession_ssr = 0.0;
    for (w, d) in work.iter().zip(&duration) {
        subsession_ssr += (line.predict(*w) - d).powi(2);
    }
    let work_mean = mean(&work, MeanMethod::Arithmetic)?;
    let work_sxx =
        subsession_variance(&work, 1, work_mean, MeanMethod::Arithmetic)? * (h - 1) as f64;
    let slope_se = (subsession_ssr / (h - 2) as f64 / work_sxx).sqrt();
    let slope_ci = 2.0 * slope_se;
    // the lower slope bound may cross zero
    let v_ci = (1.0 / (line.slope - slope_ci) - 1.0 / (line.slope + slope_ci)).abs();

    let fit = ThroughputFit {
        alpha: line.intercept,
        v: 1.0 / line.slope,
        subsession_size: q,
        subsession_count: h,
        rounds_used: kept.len(),
        ssr,
        subsession_ssr,
        v_ci,
    };
    tracing::info!(
        alpha = fit.alpha,
        v = fit.v,
        subsession_size = q,
        ssr,
        v_ci,
        "throughput model fitted"
    );
    Ok(Some(fit))
}
