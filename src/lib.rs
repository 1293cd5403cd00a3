//! benchci - Autocorrelation-aware confidence intervals for benchmark data
//!
//! This library estimates confidence intervals for serially correlated
//! performance measurements using the subsession (batch means) method, and
//! scores fitted throughput models against observed benchmark rounds.

pub mod cli;
pub mod csv_input;
pub mod error;
pub mod statistics;
pub mod throughput;

pub use error::{AnalysisError, Result};
