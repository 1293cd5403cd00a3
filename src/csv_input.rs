//! CSV ingestion for measurement series and benchmark round data
//!
//! Three inputs are understood:
//! - a plain series: one reading per line, taken from a chosen field
//! - a per-round CSV with `work_amount` and `round_duration` (ns) columns
//! - a round-summary CSV with `wps_harmonic_mean`, `wps_alpha` (s) and
//!   `wps_v` (work/s) columns
//!
//! Extra columns are ignored.

use crate::throughput::{ThroughputModel, ThroughputObservation, ONE_SECOND};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Open a path for reading; `-` means stdin
pub fn open_input(path: &Path) -> Result<Box<dyn Read>> {
    if path.as_os_str() == "-" {
        tracing::debug!("reading data from stdin");
        Ok(Box::new(io::stdin()))
    } else {
        tracing::debug!("reading data from {}", path.display());
        let file =
            File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
        Ok(Box::new(file))
    }
}

/// Read one numeric field per line
///
/// `ignore_lines` skips that many leading lines. When it is `None`, an
/// unparsable first line is taken to be a header and skipped with a warning;
/// any later unparsable line is an error.
pub fn read_series<R: Read>(reader: R, field: usize, ignore_lines: Option<usize>) -> Result<Vec<f64>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut series = Vec::new();
    for (index, record) in csv_reader.records().enumerate() {
        let lineno = index + 1;
        let record = record.with_context(|| format!("Failed to read line {}", lineno))?;
        if let Some(skip) = ignore_lines {
            if index < skip {
                tracing::debug!(lineno, "ignoring line");
                continue;
            }
        }

        let parsed = record.get(field).map(|raw| raw.parse::<f64>());
        match parsed {
            Some(Ok(value)) if value.is_finite() => series.push(value),
            _ if index == 0 && ignore_lines.is_none() => {
                tracing::warn!(
                    "Ignoring first line in input. It might be a header. Use `--ignore-lines 1` to suppress this warning. Line data: {:?}",
                    record.iter().collect::<Vec<_>>().join(",")
                );
            }
            _ => {
                anyhow::bail!(
                    "Failed to extract a number from field {} in line {}: {:?}",
                    field,
                    lineno,
                    record.iter().collect::<Vec<_>>().join(",")
                );
            }
        }
    }

    tracing::debug!(samples = series.len(), "finished loading series");
    Ok(series)
}

#[derive(Debug, Deserialize)]
struct RoundRecord {
    work_amount: f64,
    round_duration: f64,
}

/// Read per-round `(work_amount, round_duration)` records in file order
pub fn read_rounds<R: Read>(reader: R) -> Result<Vec<ThroughputObservation>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut rounds = Vec::new();
    for (index, record) in csv_reader.deserialize::<RoundRecord>().enumerate() {
        let record = record.with_context(|| format!("Malformed round record {}", index + 1))?;
        let obs = ThroughputObservation::new(record.work_amount, record.round_duration)
            .with_context(|| format!("Invalid round record {}", index + 1))?;
        rounds.push(obs);
    }
    Ok(rounds)
}

/// Parameters exported by the harness after a throughput analysis
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct RoundSummary {
    /// Harmonic mean of per-round rates, work/s
    pub wps_harmonic_mean: f64,
    /// Per-round overhead, seconds
    pub wps_alpha: f64,
    /// Steady-state rate, work/s
    pub wps_v: f64,
}

impl RoundSummary {
    /// Fitted model in nanosecond units
    pub fn model(&self) -> Result<ThroughputModel> {
        ThroughputModel::from_per_second(self.wps_alpha, self.wps_v)
            .context("Invalid wps_alpha/wps_v in summary")
    }

    /// Naive rate in work units per nanosecond
    pub fn naive_v(&self) -> f64 {
        self.wps_harmonic_mean / ONE_SECOND
    }
}

/// Read the first record of a round-summary CSV
pub fn read_round_summary<R: Read>(reader: R) -> Result<RoundSummary> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let summary = csv_reader
        .deserialize::<RoundSummary>()
        .next()
        .context("Summary CSV has no data rows")?
        .context("Malformed summary record")?;
    Ok(summary)
}
