// Central tendency of a measurement series
//
// Arithmetic mean for latencies and sizes; harmonic mean for rates, so that
// the aggregate rate over a fixed total duration is summarized correctly.

use super::validate_series;
use crate::error::{AnalysisError, Result};
use serde::{Deserialize, Serialize};

/// How a central tendency is computed from a series
///
/// The same method drives subsession means, so a corrected interval mirrors
/// the semantics of its point estimator.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum MeanMethod {
    /// Simple average, `(1/n) Σ x_i`
    #[default]
    Arithmetic,
    /// Reciprocal of the average of reciprocals, `n / Σ (1/x_i)`
    Harmonic,
}

impl MeanMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            MeanMethod::Arithmetic => "arithmetic",
            MeanMethod::Harmonic => "harmonic",
        }
    }
}

impl std::fmt::Display for MeanMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Running reduction for one [`MeanMethod`]
///
/// Callers guarantee non-empty input and, for the harmonic method, no zero
/// samples; the public entry points validate before accumulating.
#[derive(Debug, Clone)]
pub(crate) struct MeanAccumulator {
    method: MeanMethod,
    count: usize,
    sum: f64,
}

impl MeanAccumulator {
    pub(crate) fn new(method: MeanMethod) -> Self {
        Self {
            method,
            count: 0,
            sum: 0.0,
        }
    }

    pub(crate) fn push(&mut self, x: f64) {
        match self.method {
            MeanMethod::Arithmetic => self.sum += x,
            MeanMethod::Harmonic => self.sum += 1.0 / x,
        }
        self.count += 1;
    }

    pub(crate) fn result(&self) -> f64 {
        match self.method {
            MeanMethod::Arithmetic => self.sum / self.count as f64,
            MeanMethod::Harmonic => self.count as f64 / self.sum,
        }
    }

    /// Reduce a whole slice in sequence order
    pub(crate) fn reduce(method: MeanMethod, samples: &[f64]) -> f64 {
        let mut acc = Self::new(method);
        for &x in samples {
            acc.push(x);
        }
        acc.result()
    }
}

/// Check the samples a [`MeanMethod`] cannot reduce
pub(crate) fn validate_for_method(series: &[f64], method: MeanMethod) -> Result<()> {
    match method {
        MeanMethod::Arithmetic => Ok(()),
        MeanMethod::Harmonic => match series.iter().position(|&x| x == 0.0) {
            Some(pos) => Err(AnalysisError::invalid(format!(
                "harmonic mean is undefined for zero sample at index {}",
                pos
            ))),
            None => Ok(()),
        },
    }
}

/// Mean of a non-empty series
///
/// # Example
/// ```
/// use benchci::statistics::{mean, MeanMethod};
///
/// let rates = [2.0, 2.0, 1.0];
/// assert_eq!(mean(&rates, MeanMethod::Arithmetic).unwrap(), 5.0 / 3.0);
/// assert_eq!(mean(&rates, MeanMethod::Harmonic).unwrap(), 1.5);
/// ```
pub fn mean(series: &[f64], method: MeanMethod) -> Result<f64> {
    validate_series(series)?;
    validate_for_method(series, method)?;
    Ok(MeanAccumulator::reduce(method, series))
}
