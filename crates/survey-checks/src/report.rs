//! Uniform check reports.
//!
//! Every check packages its per-column verdict and named metrics into a
//! [`CheckReport`]. A table input yields one row per column carrying the
//! column name; a single-column input yields exactly one unnamed row.

use std::fmt;

use polars::prelude::{Column, DataFrame, DataType, NamedFrom, Series};
use serde::Serialize;
use survey_common::format_numeric;

use crate::error::Result;
use crate::input::InputShape;

/// Name of the column-name field in materialized reports.
pub const COLUMN_FIELD: &str = "column";

/// A single cell of a report.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ReportValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl ReportValue {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Numeric view; integers widen to floats.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(v) => Some(*v as f64),
            Self::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(v) => Some(v),
            _ => None,
        }
    }

    /// True only for a `Bool(true)` verdict.
    pub fn is_true(&self) -> bool {
        matches!(self, Self::Bool(true))
    }

    fn class(&self) -> ValueClass {
        match self {
            Self::Null => ValueClass::Null,
            Self::Bool(_) => ValueClass::Bool,
            Self::Int(_) => ValueClass::Int,
            Self::Float(_) => ValueClass::Float,
            Self::Text(_) => ValueClass::Text,
        }
    }
}

impl fmt::Display for ReportValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => f.write_str(&format_numeric(*v)),
            Self::Text(v) => f.write_str(v),
        }
    }
}

impl From<bool> for ReportValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for ReportValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<usize> for ReportValue {
    fn from(value: usize) -> Self {
        i64::try_from(value).map_or(Self::Float(value as f64), Self::Int)
    }
}

impl From<f64> for ReportValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<String> for ReportValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for ReportValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl<T: Into<ReportValue>> From<Option<T>> for ReportValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// Value family used when materializing a metric column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ValueClass {
    Null,
    Bool,
    Int,
    Float,
    Text,
}

impl ValueClass {
    fn widen(self, other: Self) -> Self {
        match (self, other) {
            (a, b) if a == b => a,
            (Self::Null, b) => b,
            (a, Self::Null) => a,
            (Self::Int, Self::Float) | (Self::Float, Self::Int) => Self::Float,
            _ => Self::Text,
        }
    }
}

/// One report row: a verdict plus metrics in the report's metric order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<String>,
    pub verdict: ReportValue,
    pub metrics: Vec<ReportValue>,
}

/// Uniform output of every feature check.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckReport {
    /// Verdict field name, e.g. `all_same` or `nulls_present`.
    pub title: &'static str,
    pub shape: InputShape,
    pub metrics: Vec<&'static str>,
    pub rows: Vec<ReportRow>,
}

impl CheckReport {
    /// Report for a single-column input: one row, no column name.
    pub fn for_column<I>(title: &'static str, verdict: ReportValue, metrics: I) -> Self
    where
        I: IntoIterator<Item = (&'static str, ReportValue)>,
    {
        let (names, values): (Vec<_>, Vec<_>) = metrics.into_iter().unzip();
        Self {
            title,
            shape: InputShape::Column,
            metrics: names,
            rows: vec![ReportRow {
                column: None,
                verdict,
                metrics: values,
            }],
        }
    }

    /// Report for a table input: one named row per column, in input order.
    pub fn for_table<I>(title: &'static str, metrics: &[&'static str], rows: I) -> Self
    where
        I: IntoIterator<Item = (String, ReportValue, Vec<ReportValue>)>,
    {
        let rows = rows
            .into_iter()
            .map(|(column, verdict, values)| {
                debug_assert_eq!(values.len(), metrics.len(), "metric count mismatch");
                ReportRow {
                    column: Some(column),
                    verdict,
                    metrics: values,
                }
            })
            .collect();
        Self {
            title,
            shape: InputShape::Table,
            metrics: metrics.to_vec(),
            rows,
        }
    }

    /// Build a report for either shape from per-column outcomes.
    pub(crate) fn assemble<'a, I>(
        shape: InputShape,
        title: &'static str,
        metrics: &[&'static str],
        outcomes: I,
    ) -> Self
    where
        I: IntoIterator<Item = (&'a str, ReportValue, Vec<ReportValue>)>,
    {
        match shape {
            InputShape::Table => Self::for_table(
                title,
                metrics,
                outcomes
                    .into_iter()
                    .map(|(name, verdict, values)| (name.to_string(), verdict, values)),
            ),
            InputShape::Column => {
                let rows = outcomes
                    .into_iter()
                    .take(1)
                    .map(|(_, verdict, values)| ReportRow {
                        column: None,
                        verdict,
                        metrics: values,
                    })
                    .collect();
                Self {
                    title,
                    shape: InputShape::Column,
                    metrics: metrics.to_vec(),
                    rows,
                }
            }
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The only row of a single-column report (or the first row of a table).
    pub fn first(&self) -> Option<&ReportRow> {
        self.rows.first()
    }

    /// Row for a named column of a table report.
    pub fn row(&self, column: &str) -> Option<&ReportRow> {
        self.rows
            .iter()
            .find(|row| row.column.as_deref() == Some(column))
    }

    /// Verdict for a named column of a table report.
    pub fn verdict(&self, column: &str) -> Option<&ReportValue> {
        self.row(column).map(|row| &row.verdict)
    }

    /// Named metric for a named column of a table report.
    pub fn metric(&self, column: &str, name: &str) -> Option<&ReportValue> {
        let index = self.metric_index(name)?;
        self.row(column).and_then(|row| row.metrics.get(index))
    }

    /// Named metric of the first row.
    pub fn first_metric(&self, name: &str) -> Option<&ReportValue> {
        let index = self.metric_index(name)?;
        self.first().and_then(|row| row.metrics.get(index))
    }

    fn metric_index(&self, name: &str) -> Option<usize> {
        self.metrics.iter().position(|metric| *metric == name)
    }

    /// Column names whose verdict is `true`.
    pub fn flagged_columns(&self) -> Vec<&str> {
        self.rows
            .iter()
            .filter(|row| row.verdict.is_true())
            .filter_map(|row| row.column.as_deref())
            .collect()
    }

    /// Materialize the report as a Polars DataFrame.
    ///
    /// Columns are `column` (table input only), the title, then each metric.
    pub fn to_frame(&self) -> Result<DataFrame> {
        let mut columns: Vec<Column> = Vec::with_capacity(self.metrics.len() + 2);
        if self.shape == InputShape::Table {
            let names: Vec<Option<String>> = self.rows.iter().map(|row| row.column.clone()).collect();
            columns.push(Series::new(COLUMN_FIELD.into(), names).into());
        }
        let verdicts: Vec<&ReportValue> = self.rows.iter().map(|row| &row.verdict).collect();
        columns.push(value_series(self.title, &verdicts).into());
        for (index, name) in self.metrics.iter().enumerate() {
            let values: Vec<&ReportValue> = self
                .rows
                .iter()
                .map(|row| row.metrics.get(index).unwrap_or(&ReportValue::Null))
                .collect();
            columns.push(value_series(name, &values).into());
        }
        Ok(DataFrame::new(columns)?)
    }
}

/// Build a typed series from report values, widening mixed families.
fn value_series(name: &str, values: &[&ReportValue]) -> Series {
    let class = values
        .iter()
        .fold(ValueClass::Null, |acc, value| acc.widen(value.class()));
    match class {
        ValueClass::Null => Series::full_null(name.into(), values.len(), &DataType::Null),
        ValueClass::Bool => {
            let data: Vec<Option<bool>> = values.iter().map(|v| v.as_bool()).collect();
            Series::new(name.into(), data)
        }
        ValueClass::Int => {
            let data: Vec<Option<i64>> = values.iter().map(|v| v.as_i64()).collect();
            Series::new(name.into(), data)
        }
        ValueClass::Float => {
            let data: Vec<Option<f64>> = values.iter().map(|v| v.as_f64()).collect();
            Series::new(name.into(), data)
        }
        ValueClass::Text => {
            let data: Vec<Option<String>> = values
                .iter()
                .map(|v| (!v.is_null()).then(|| v.to_string()))
                .collect();
            Series::new(name.into(), data)
        }
    }
}
