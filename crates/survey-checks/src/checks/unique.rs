//! Uniqueness checks for identifier-like columns.

use survey_common::proportion;
use tracing::debug;

use crate::error::{Result, SurveyError};
use crate::input::{SurveyColumn, SurveyInput};
use crate::kind::UNIQUE_KINDS;
use crate::report::{CheckReport, ReportValue};

/// Fail unless every column is text, integer, date or datetime.
pub fn validate_unique_kind<'a>(input: impl Into<SurveyInput<'a>>) -> Result<()> {
    let input = input.into();
    UNIQUE_KINDS.validate(&input.columns()?)
}

/// Reject columns holding absent values, naming all of them.
fn reject_nulls(columns: &[SurveyColumn<'_>]) -> Result<()> {
    let offending: Vec<String> = columns
        .iter()
        .filter(|column| column.null_count() > 0)
        .map(|column| column.name.to_string())
        .collect();
    if offending.is_empty() {
        Ok(())
    } else {
        Err(SurveyError::NullPresent { columns: offending })
    }
}

/// Rows whose value already appeared earlier in the column.
pub fn duplicate_count(column: &SurveyColumn<'_>) -> Result<usize> {
    Ok(column.len() - column.series.n_unique()?)
}

/// Flag columns with repeated values.
///
/// # Errors
///
/// Returns [`SurveyError::NullPresent`] when any column holds an absent
/// value.
pub fn check_uniqueness<'a>(input: impl Into<SurveyInput<'a>>) -> Result<CheckReport> {
    const TITLE: &str = "dupes_present";
    let input = input.into();
    let columns = input.columns()?;
    UNIQUE_KINDS.validate(&columns)?;
    reject_nulls(&columns)?;
    debug!(
        check = TITLE,
        columns = columns.len(),
        rows = input.row_count(),
        "running uniqueness check"
    );
    let mut outcomes = Vec::with_capacity(columns.len());
    for column in &columns {
        let dupes = duplicate_count(column)?;
        outcomes.push((
            column.name,
            ReportValue::from(dupes > 0),
            vec![
                ReportValue::from(dupes),
                ReportValue::Float(proportion(dupes, column.len())),
            ],
        ));
    }
    Ok(CheckReport::assemble(
        input.shape(),
        TITLE,
        &["dupe_count", "prop_dupe"],
        outcomes,
    ))
}
