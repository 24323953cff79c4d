//! Null and near-null checks, applicable to columns of any kind.

use polars::prelude::DataType;
use survey_common::proportion;
use tracing::debug;

use crate::error::Result;
use crate::input::{SurveyColumn, SurveyInput};
use crate::kind::ColumnKind;
use crate::options::{FuzzyNulls, NullToken};
use crate::report::{CheckReport, ReportValue};

fn general_columns<'a>(input: SurveyInput<'a>, check: &'static str) -> Result<Vec<SurveyColumn<'a>>> {
    let columns = input.columns()?;
    debug!(
        check,
        columns = columns.len(),
        rows = input.row_count(),
        "running general check"
    );
    Ok(columns)
}

/// Flag columns holding any absent value.
pub fn check_nulls<'a>(input: impl Into<SurveyInput<'a>>) -> Result<CheckReport> {
    const TITLE: &str = "nulls_present";
    let input = input.into();
    let columns = general_columns(input, TITLE)?;
    Ok(CheckReport::assemble(
        input.shape(),
        TITLE,
        &["null_count", "prop_null"],
        columns.iter().map(|column| {
            let nulls = column.null_count();
            (
                column.name,
                ReportValue::from(nulls > 0),
                vec![
                    ReportValue::from(nulls),
                    ReportValue::Float(proportion(nulls, column.len())),
                ],
            )
        }),
    ))
}

/// Count non-null values equal to a fuzzy null token of the column's kind.
pub fn fuzzy_null_count(column: &SurveyColumn<'_>, fuzzy: &FuzzyNulls) -> Result<usize> {
    let count = match column.kind {
        ColumnKind::Text => column
            .series
            .str()?
            .into_iter()
            .flatten()
            .filter(|value| fuzzy.matches_text(value))
            .count(),
        ColumnKind::Integer if fuzzy.has_numeric() => {
            // Unsigned values past i64::MAX cast to null; no token can equal them.
            let values = column.series.cast(&DataType::Int64)?;
            values
                .i64()?
                .into_iter()
                .flatten()
                .filter(|value| fuzzy.matches_integer(*value))
                .count()
        }
        ColumnKind::Float if fuzzy.has_numeric() => {
            let values = column.series.cast(&DataType::Float64)?;
            values
                .f64()?
                .into_iter()
                .flatten()
                .filter(|value| fuzzy.matches_number(*value))
                .count()
        }
        ColumnKind::Boolean => column
            .series
            .bool()?
            .into_iter()
            .flatten()
            .filter(|value| fuzzy.matches_bool(*value))
            .count(),
        _ => 0,
    };
    Ok(count)
}

/// Flag columns holding null-like literals such as `"NULL"` or `" "`.
///
/// `extra` tokens are matched on top of the default vocabulary.
pub fn check_fuzzy_nulls<'a, I, T>(input: impl Into<SurveyInput<'a>>, extra: I) -> Result<CheckReport>
where
    I: IntoIterator<Item = T>,
    T: Into<NullToken>,
{
    check_fuzzy_nulls_with(input, &FuzzyNulls::with_extra(extra))
}

/// [`check_fuzzy_nulls`] against a prepared vocabulary.
pub fn check_fuzzy_nulls_with<'a>(
    input: impl Into<SurveyInput<'a>>,
    fuzzy: &FuzzyNulls,
) -> Result<CheckReport> {
    const TITLE: &str = "fuzzy_nulls_present";
    let input = input.into();
    let columns = general_columns(input, TITLE)?;
    let mut outcomes = Vec::with_capacity(columns.len());
    for column in &columns {
        let count = fuzzy_null_count(column, fuzzy)?;
        outcomes.push((
            column.name,
            ReportValue::from(count > 0),
            vec![
                ReportValue::from(count),
                ReportValue::Float(proportion(count, column.len())),
            ],
        ));
    }
    Ok(CheckReport::assemble(
        input.shape(),
        TITLE,
        &["fuzzy_null_count", "prop_fuzzy_null"],
        outcomes,
    ))
}
