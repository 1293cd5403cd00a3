//! Error taxonomy for the statistics and throughput engines
//!
//! Every check runs before any arithmetic, so an error never carries a
//! partially computed result.

use thiserror::Error;

/// Errors raised by the analysis functions
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    /// Malformed or out-of-range parameters
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A required divisor is exactly zero
    #[error("Division undefined: {0}")]
    DivisionUndefined(String),
}

/// Result type for analysis operations
pub type Result<T> = std::result::Result<T, AnalysisError>;

impl AnalysisError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub(crate) fn undefined(msg: impl Into<String>) -> Self {
        Self::DivisionUndefined(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = AnalysisError::invalid("empty series");
        assert_eq!(err.to_string(), "Invalid input: empty series");

        let err = AnalysisError::undefined("zero variance");
        assert_eq!(err.to_string(), "Division undefined: zero variance");
    }
}
