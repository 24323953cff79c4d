//! Shape adapter for single columns and tables.
//!
//! Every check accepts a [`SurveyInput`] and works against the uniform
//! sequence of [`SurveyColumn`]s it produces, whatever the input shape.

use polars::prelude::{Column, DataFrame, DataType, Series};
use serde::Serialize;

use crate::error::{Result, SurveyError};
use crate::kind::ColumnKind;

/// Input to a check: one named column or a table of columns.
#[derive(Debug, Clone, Copy)]
pub enum SurveyInput<'a> {
    Column(&'a Series),
    Table(&'a DataFrame),
}

/// Shape of the input a report was produced from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InputShape {
    Column,
    Table,
}

/// A column with its kind resolved.
#[derive(Debug, Clone, Copy)]
pub struct SurveyColumn<'a> {
    pub name: &'a str,
    pub kind: ColumnKind,
    pub series: &'a Series,
}

impl<'a> SurveyColumn<'a> {
    fn classify(series: &'a Series) -> Result<Self> {
        let kind = ColumnKind::from_dtype(series.dtype()).ok_or_else(|| SurveyError::InputKind {
            message: format!(
                "column '{}' has unsupported element type {}",
                series.name(),
                series.dtype()
            ),
        })?;
        Ok(Self {
            name: series.name().as_str(),
            kind,
            series,
        })
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    pub fn null_count(&self) -> usize {
        self.series.null_count()
    }

    /// Boolean or integer values widened to `Int64`.
    ///
    /// Fails with [`SurveyError::InputKind`] instead of nulling values that
    /// do not fit, such as `u64` values above `i64::MAX`.
    pub fn integers(&self) -> Result<Series> {
        self.series
            .strict_cast(&DataType::Int64)
            .map_err(|_| SurveyError::InputKind {
                message: format!(
                    "column '{}' holds integers outside the signed 64-bit range",
                    self.name
                ),
            })
    }
}

impl<'a> SurveyInput<'a> {
    pub fn shape(&self) -> InputShape {
        match self {
            Self::Column(_) => InputShape::Column,
            Self::Table(_) => InputShape::Table,
        }
    }

    /// Number of rows shared by every column.
    pub fn row_count(&self) -> usize {
        match self {
            Self::Column(series) => series.len(),
            Self::Table(df) => df.height(),
        }
    }

    /// Resolve the input into kinded columns, in input order.
    pub fn columns(&self) -> Result<Vec<SurveyColumn<'a>>> {
        match *self {
            Self::Column(series) => Ok(vec![SurveyColumn::classify(series)?]),
            Self::Table(df) => {
                if df.width() == 0 {
                    return Err(SurveyError::InputKind {
                        message: "table has no columns".to_string(),
                    });
                }
                df.get_columns()
                    .iter()
                    .map(|column| SurveyColumn::classify(column.as_materialized_series()))
                    .collect()
            }
        }
    }
}

impl<'a> From<&'a Series> for SurveyInput<'a> {
    fn from(series: &'a Series) -> Self {
        Self::Column(series)
    }
}

impl<'a> From<&'a Column> for SurveyInput<'a> {
    fn from(column: &'a Column) -> Self {
        Self::Column(column.as_materialized_series())
    }
}

impl<'a> From<&'a DataFrame> for SurveyInput<'a> {
    fn from(df: &'a DataFrame) -> Self {
        Self::Table(df)
    }
}
