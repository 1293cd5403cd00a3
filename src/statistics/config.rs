// Configuration for series analysis
//
// Presets control how strict the harness is about residual autocorrelation
// before it trusts a confidence interval.

use super::MeanMethod;
use crate::error::{AnalysisError, Result};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Named autocorrelation limits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Preset {
    /// Autocorrelation limit 0.8
    #[default]
    Quick,
    /// Autocorrelation limit 0.2
    Normal,
    /// Autocorrelation limit 0.1
    Strict,
}

impl Preset {
    pub fn max_autocorrelation(&self) -> f64 {
        match self {
            Preset::Quick => 0.8,
            Preset::Normal => 0.2,
            Preset::Strict => 0.1,
        }
    }
}

/// Configuration for [`analyze_series`](super::analyze_series)
///
/// # Example
/// ```
/// use benchci::statistics::AnalysisConfig;
///
/// let config = AnalysisConfig::default();
/// assert_eq!(config.confidence_level, 0.95);
/// assert_eq!(config.max_autocorrelation, 0.8);
/// ```
///
/// A TOML file may set any subset of fields:
///
/// ```toml
/// confidence_level = 0.99
/// max_autocorrelation = 0.1
/// mean_method = "harmonic"
/// target_ci_width = 0.05
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Confidence level for the reported interval, in (0, 1)
    pub confidence_level: f64,

    /// Largest |autocorrelation coefficient| a subsession size may show
    /// before its subsession means are treated as independent, in (0, 1]
    pub max_autocorrelation: f64,

    /// Point estimator, also used for the subsession means
    pub mean_method: MeanMethod,

    /// Desired full interval width; enables the required sample size
    /// estimate when set
    pub target_ci_width: Option<f64>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self::from_preset(Preset::default())
    }
}

impl AnalysisConfig {
    pub fn from_preset(preset: Preset) -> Self {
        Self {
            confidence_level: 0.95,
            max_autocorrelation: preset.max_autocorrelation(),
            mean_method: MeanMethod::Arithmetic,
            target_ci_width: None,
        }
    }

    pub fn quick() -> Self {
        Self::from_preset(Preset::Quick)
    }

    pub fn normal() -> Self {
        Self::from_preset(Preset::Normal)
    }

    pub fn strict() -> Self {
        Self::from_preset(Preset::Strict)
    }

    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        Self::from_toml_str(&content)
    }

    /// Load configuration from a TOML string
    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(content).context("Failed to parse TOML")?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if !(self.confidence_level > 0.0 && self.confidence_level < 1.0) {
            return Err(AnalysisError::invalid(format!(
                "confidence_level must be in (0, 1), got {}",
                self.confidence_level
            )));
        }

        if !(self.max_autocorrelation > 0.0 && self.max_autocorrelation <= 1.0) {
            return Err(AnalysisError::invalid(format!(
                "max_autocorrelation must be in (0, 1], got {}",
                self.max_autocorrelation
            )));
        }

        if let Some(width) = self.target_ci_width {
            if !(width > 0.0 && width.is_finite()) {
                return Err(AnalysisError::invalid(format!(
                    "target_ci_width must be positive, got {}",
                    width
                )));
            }
        }

        Ok(())
    }
}
