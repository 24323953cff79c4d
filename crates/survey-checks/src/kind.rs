//! Column kinds and per-check kind allow-lists.
//!
//! A column's kind is derived once from its Polars element type when it
//! enters the shape adapter. Checks only compare that kind against their
//! allow-list; they never inspect the `DataType` themselves.

use std::fmt;

use polars::prelude::DataType;
use serde::Serialize;

use crate::error::{Result, SurveyError};
use crate::input::SurveyColumn;

/// Primitive kind of a surveyed column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    Boolean,
    Integer,
    Float,
    Text,
    Date,
    Datetime,
}

impl ColumnKind {
    /// Classify a Polars element type, returning `None` for unsupported types.
    pub fn from_dtype(dtype: &DataType) -> Option<Self> {
        match dtype {
            DataType::Boolean => Some(Self::Boolean),
            DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64 => Some(Self::Integer),
            DataType::Float32 | DataType::Float64 => Some(Self::Float),
            DataType::String => Some(Self::Text),
            DataType::Date => Some(Self::Date),
            DataType::Datetime(_, _) => Some(Self::Datetime),
            _ => None,
        }
    }

    /// Lowercase label used in messages and reports.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Text => "text",
            Self::Date => "date",
            Self::Datetime => "datetime",
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Integer | Self::Float)
    }
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Set of kinds a check accepts.
#[derive(Debug, Clone, Copy)]
pub struct KindAllowList {
    /// Feature family named in error messages ("binary", "categorical", ...).
    pub feature: &'static str,
    pub kinds: &'static [ColumnKind],
}

/// Binary checks: booleans and integers.
pub const BINARY_KINDS: KindAllowList = KindAllowList {
    feature: "binary",
    kinds: &[ColumnKind::Boolean, ColumnKind::Integer],
};

/// Categorical checks: text and integers.
pub const CATEGORICAL_KINDS: KindAllowList = KindAllowList {
    feature: "categorical",
    kinds: &[ColumnKind::Text, ColumnKind::Integer],
};

/// Uniqueness checks: text, integers and timestamps.
pub const UNIQUE_KINDS: KindAllowList = KindAllowList {
    feature: "unique",
    kinds: &[
        ColumnKind::Text,
        ColumnKind::Integer,
        ColumnKind::Date,
        ColumnKind::Datetime,
    ],
};

impl KindAllowList {
    pub fn allows(&self, kind: ColumnKind) -> bool {
        self.kinds.contains(&kind)
    }

    /// Human-readable kind set, e.g. "text, integer, date or datetime".
    pub fn describe(&self) -> String {
        let labels: Vec<&str> = self.kinds.iter().map(ColumnKind::label).collect();
        match labels.split_last() {
            None => String::new(),
            Some((last, [])) => (*last).to_string(),
            Some((last, rest)) => format!("{} or {}", rest.join(", "), last),
        }
    }

    /// Reject the first column whose kind is not allowed.
    pub fn validate(&self, columns: &[SurveyColumn<'_>]) -> Result<()> {
        match columns.iter().find(|column| !self.allows(column.kind)) {
            Some(column) => Err(SurveyError::Kind {
                column: column.name.to_string(),
                kind: column.kind,
                expected: self.feature,
                allowed: self.describe(),
            }),
            None => Ok(()),
        }
    }
}
