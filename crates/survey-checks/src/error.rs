//! Error types for column checks.

use thiserror::Error;

use crate::kind::ColumnKind;

/// Errors raised while validating inputs to a check.
///
/// Every variant is a caller-input problem; checks never retry and never
/// produce a partial report.
#[derive(Debug, Error)]
pub enum SurveyError {
    /// Column kind is outside the check's allow-list.
    #[error("{expected} columns must be of kind {allowed}; column '{column}' has kind {kind}")]
    Kind {
        column: String,
        kind: ColumnKind,
        expected: &'static str,
        allowed: String,
    },

    /// Numeric parameter is outside its open interval.
    #[error("{name} must be greater than {min} and less than {max}, got {value}")]
    Range {
        name: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    /// Uniqueness requested on columns containing absent values.
    #[error("columns with unique data should not contain nulls: {}", columns.join(", "))]
    NullPresent { columns: Vec<String> },

    /// Input is not a usable single column or table.
    #[error("input must be a single column or a table of columns: {message}")]
    InputKind { message: String },

    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for SurveyError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for survey checks.
pub type Result<T> = std::result::Result<T, SurveyError>;
