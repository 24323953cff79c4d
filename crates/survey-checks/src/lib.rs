//! Per-column data quality checks over Polars data.
//!
//! Checks inspect binary, categorical, general (null) and unique features of
//! a single column or every column of a table, and return a uniform
//! [`CheckReport`].
//!
//! # Example
//!
//! ```ignore
//! use polars::prelude::*;
//! use survey_checks::checks::binary::check_mostly_same;
//!
//! let df = df!(
//!     "b1" => [true, true, true, false],
//!     "b2" => [false, true, false, true],
//! )?;
//! let report = check_mostly_same(&df, 0.7)?;
//! assert_eq!(report.flagged_columns(), vec!["b1"]);
//! ```

pub mod audit;
pub mod checks;
mod error;
mod input;
mod kind;
mod options;
mod report;

// === Error Types ===
pub use error::{Result, SurveyError};

// === Inputs ===
pub use input::{InputShape, SurveyColumn, SurveyInput};
pub use kind::{BINARY_KINDS, CATEGORICAL_KINDS, ColumnKind, KindAllowList, UNIQUE_KINDS};

// === Options ===
pub use options::{
    DEFAULT_FUZZY_NULLS, DEFAULT_THRESH, FuzzyNulls, NullToken, SurveyOptions, validate_thresh,
};

// === Reports ===
pub use report::{COLUMN_FIELD, CheckReport, ReportRow, ReportValue};

// === Audit ===
pub use audit::{AuditReport, ColumnAudit, Finding, Severity, audit_frame};
