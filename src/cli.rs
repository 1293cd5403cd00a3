//! CLI argument parsing for benchci

use crate::statistics::{MeanMethod, Preset};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for analysis reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable `key value` lines (default)
    #[default]
    Text,
    /// JSON format for machine parsing
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "benchci")]
#[command(version)]
#[command(
    about = "Autocorrelation-aware confidence intervals for benchmark measurements",
    long_about = None
)]
pub struct Cli {
    /// Show debug-level diagnostics on stderr
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only show warnings and errors on stderr
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Analyze a measurement series: mean, optimal subsession size and CI
    Analyze(AnalyzeArgs),
    /// Compare a fitted throughput model against per-round data
    FitError(FitErrorArgs),
}

#[derive(clap::Args, Debug)]
pub struct AnalyzeArgs {
    /// Input file with one reading per line, or `-` for stdin
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Zero-based field (column) to read from each line
    #[arg(short, long, value_name = "N", default_value = "0")]
    pub field: usize,

    /// Number of leading lines to skip
    #[arg(long = "ignore-lines", value_name = "N")]
    pub ignore_lines: Option<usize>,

    /// Point estimator used for the sample and subsession means
    #[arg(long = "mean-method", value_enum)]
    pub mean_method: Option<MeanMethod>,

    /// Autocorrelation limit preset
    #[arg(long, value_enum)]
    pub preset: Option<Preset>,

    /// Autocorrelation coefficient limit, in (0, 1]; overrides --preset
    #[arg(long = "ac", value_name = "X")]
    pub max_autocorrelation: Option<f64>,

    /// Confidence level for the interval, in (0, 1)
    #[arg(long = "confidence-level", value_name = "X")]
    pub confidence_level: Option<f64>,

    /// Target CI width; reports the sample size required to reach it
    #[arg(long = "ci-width", value_name = "X")]
    pub ci_width: Option<f64>,

    /// TOML configuration file; command line options take precedence
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output format (text or json)
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(clap::Args, Debug)]
pub struct FitErrorArgs {
    /// Round summary CSV with wps_harmonic_mean, wps_alpha and wps_v columns
    #[arg(value_name = "SUMMARY_CSV")]
    pub summary: PathBuf,

    /// Per-round CSV with work_amount and round_duration (ns) columns
    #[arg(value_name = "ROUND_CSV")]
    pub rounds: PathBuf,

    /// Naive rate in work/s; defaults to the summary's harmonic mean
    #[arg(value_name = "NAIVE_V")]
    pub naive_v: Option<f64>,

    /// Output format (text or json)
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,
}
