// Observation and model types

use crate::error::{AnalysisError, Result};
use serde::{Deserialize, Serialize};

/// Nanoseconds per second
pub const ONE_SECOND: f64 = 1e9;

/// One completed benchmark round
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThroughputObservation {
    /// Units of work performed in the round, > 0
    pub work_amount: f64,
    /// Round duration in nanoseconds, > 0
    pub round_duration: f64,
}

impl ThroughputObservation {
    pub fn new(work_amount: f64, round_duration: f64) -> Result<Self> {
        let obs = Self {
            work_amount,
            round_duration,
        };
        obs.validate()?;
        Ok(obs)
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if !(self.work_amount > 0.0 && self.work_amount.is_finite()) {
            return Err(AnalysisError::invalid(format!(
                "work_amount must be positive, got {}",
                self.work_amount
            )));
        }
        if !(self.round_duration > 0.0 && self.round_duration.is_finite()) {
            return Err(AnalysisError::invalid(format!(
                "round_duration must be positive, got {}",
                self.round_duration
            )));
        }
        Ok(())
    }

    /// Observed rate in work units per nanosecond
    pub fn rate(&self) -> f64 {
        self.work_amount / self.round_duration
    }
}

/// Predicts `duration = alpha + work_amount / v`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThroughputModel {
    /// Fixed per-round overhead in nanoseconds, >= 0
    pub alpha: f64,
    /// Steady-state rate in work units per nanosecond, > 0
    pub v: f64,
}

impl ThroughputModel {
    pub fn new(alpha: f64, v: f64) -> Result<Self> {
        let model = Self { alpha, v };
        model.validate()?;
        Ok(model)
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if !(self.alpha >= 0.0 && self.alpha.is_finite()) {
            return Err(AnalysisError::invalid(format!(
                "alpha must be non-negative, got {}",
                self.alpha
            )));
        }
        if !(self.v > 0.0 && self.v.is_finite()) {
            return Err(AnalysisError::invalid(format!(
                "v must be positive, got {}",
                self.v
            )));
        }
        Ok(())
    }

    /// Single-rate model without per-round overhead
    pub fn naive(v: f64) -> Result<Self> {
        Self::new(0.0, v)
    }

    /// Model from per-second parameters (`alpha` in seconds, `v` in work/s)
    pub fn from_per_second(alpha_seconds: f64, v_per_second: f64) -> Result<Self> {
        Self::new(alpha_seconds * ONE_SECOND, v_per_second / ONE_SECOND)
    }

    pub fn predict_duration(&self, work_amount: f64) -> f64 {
        self.alpha + work_amount / self.v
    }

    /// Rate in work units per second
    pub fn v_per_second(&self) -> f64 {
        self.v * ONE_SECOND
    }
}
