// Model error accounting over observed rounds
//
// Pure evaluator: model parameters come from whoever fitted them. Sums run
// in observation order so totals are reproducible to the last bit.

use super::model::{ThroughputModel, ThroughputObservation};
use crate::error::{AnalysisError, Result};
use crate::statistics::{mean, MeanMethod};
use serde::{Deserialize, Serialize};

/// Aggregate absolute error of one model
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelError {
    /// `Σ |predicted - observed|` in nanoseconds
    pub sum_absolute_error: f64,
    /// `100 * sum_absolute_error / total_duration`
    pub percent_of_duration: f64,
}

/// Error totals for a fitted model and its naive counterpart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitErrorReport {
    pub rounds: usize,
    pub total_work_amount: f64,
    /// Total observed duration in nanoseconds
    pub total_duration: f64,
    /// `total_work_amount / total_duration`, work units per nanosecond
    pub mean_observed_rate: f64,
    pub model: ThroughputModel,
    pub model_error: ModelError,
    /// Rate of the naive model, work units per nanosecond
    pub naive_v: f64,
    pub naive_error: ModelError,
}

impl FitErrorReport {
    pub fn sum_absolute_error(&self) -> f64 {
        self.model_error.sum_absolute_error
    }

    /// Whether the two-parameter model beats the naive single rate
    pub fn model_improves_on_naive(&self) -> bool {
        self.model_error.sum_absolute_error < self.naive_error.sum_absolute_error
    }

    /// Generate human-readable report
    pub fn to_report_string(&self) -> String {
        let mut report = String::new();
        report.push_str(&format!("rounds: {}\n", self.rounds));
        report.push_str(&format!(
            "naive_v: {} work/s\n",
            self.naive_v * super::ONE_SECOND
        ));
        report.push_str(&format!("alpha: {} ns\n", self.model.alpha));
        report.push_str(&format!("v: {} work/s\n", self.model.v_per_second()));
        report.push_str(&format!(
            "mean calculated from round data: {} work/s\n",
            self.mean_observed_rate * super::ONE_SECOND
        ));
        report.push_str(&format!(
            "naive model error: {} ns, {}%\n",
            self.naive_error.sum_absolute_error, self.naive_error.percent_of_duration
        ));
        report.push_str(&format!(
            "fitted model error: {} ns, {}%\n",
            self.model_error.sum_absolute_error, self.model_error.percent_of_duration
        ));
        report
    }
}

fn validate_observations(observations: &[ThroughputObservation]) -> Result<()> {
    if observations.is_empty() {
        return Err(AnalysisError::invalid("no observations to evaluate"));
    }
    for (i, obs) in observations.iter().enumerate() {
        obs.validate()
            .map_err(|e| AnalysisError::invalid(format!("observation {}: {}", i, e)))?;
    }
    Ok(())
}

fn validate_rate(v: f64, what: &str) -> Result<()> {
    if !(v > 0.0 && v.is_finite()) {
        return Err(AnalysisError::invalid(format!(
            "{} must be positive, got {}",
            what, v
        )));
    }
    Ok(())
}

/// Evaluate `model` against the naive model at the harmonic mean rate
///
/// # Example
/// ```
/// use benchci::throughput::{fit_error, ThroughputModel, ThroughputObservation};
///
/// let rounds = [
///     ThroughputObservation::new(100.0, 60.0).unwrap(),
///     ThroughputObservation::new(200.0, 110.0).unwrap(),
/// ];
/// let model = ThroughputModel::new(10.0, 2.0).unwrap();
/// let report = fit_error(&rounds, &model).unwrap();
/// assert_eq!(report.sum_absolute_error(), 0.0);
/// assert!(report.model_improves_on_naive());
/// ```
pub fn fit_error(
    observations: &[ThroughputObservation],
    model: &ThroughputModel,
) -> Result<FitErrorReport> {
    validate_observations(observations)?;
    let rates: Vec<f64> = observations.iter().map(ThroughputObservation::rate).collect();
    let naive_v = mean(&rates, MeanMethod::Harmonic)?;
    fit_error_with_naive(observations, model, naive_v)
}

/// Evaluate `model` against a naive model with a caller-supplied rate
///
/// `naive_v` is in work units per nanosecond.
pub fn fit_error_with_naive(
    observations: &[ThroughputObservation],
    model: &ThroughputModel,
    naive_v: f64,
) -> Result<FitErrorReport> {
    validate_observations(observations)?;
    model.validate()?;
    validate_rate(naive_v, "naive v")?;

    let mut total_work_amount = 0.0;
    let mut total_duration = 0.0;
    let mut model_sum = 0.0;
    let mut naive_sum = 0.0;
    for obs in observations {
        total_work_amount += obs.work_amount;
        total_duration += obs.round_duration;
        model_sum += (model.predict_duration(obs.work_amount) - obs.round_duration).abs();
        naive_sum += (obs.work_amount / naive_v - obs.round_duration).abs();
    }

    let percent = |sum: f64| sum * 100.0 / total_duration;
    let report = FitErrorReport {
        rounds: observations.len(),
        total_work_amount,
        total_duration,
        mean_observed_rate: total_work_amount / total_duration,
        model: *model,
        model_error: ModelError {
            sum_absolute_error: model_sum,
            percent_of_duration: percent(model_sum),
        },
        naive_v,
        naive_error: ModelError {
            sum_absolute_error: naive_sum,
            percent_of_duration: percent(naive_sum),
        },
    };

    tracing::debug!(
        rounds = report.rounds,
        model_error = model_sum,
        naive_error = naive_sum,
        "throughput model error"
    );
    Ok(report)
}
