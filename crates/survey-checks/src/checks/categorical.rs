//! Categorical feature checks.
//!
//! Text and integer columns whose values name categories.

use std::collections::HashMap;
use std::hash::Hash;

use survey_common::proportion;
use tracing::debug;

use crate::error::Result;
use crate::input::{SurveyColumn, SurveyInput};
use crate::kind::{CATEGORICAL_KINDS, ColumnKind};
use crate::options::validate_thresh;
use crate::report::{CheckReport, ReportValue};

/// Most frequent value of a column and how often it occurs.
#[derive(Debug, Clone, PartialEq)]
pub struct Mode {
    /// `Null` when absent values are the most frequent.
    pub value: ReportValue,
    pub count: usize,
}

/// Fail unless every column is text or integer.
pub fn validate_categorical_kind<'a>(input: impl Into<SurveyInput<'a>>) -> Result<()> {
    let input = input.into();
    CATEGORICAL_KINDS.validate(&input.columns()?)
}

fn categorical_columns<'a>(
    input: SurveyInput<'a>,
    check: &'static str,
) -> Result<Vec<SurveyColumn<'a>>> {
    let columns = input.columns()?;
    CATEGORICAL_KINDS.validate(&columns)?;
    debug!(
        check,
        columns = columns.len(),
        rows = input.row_count(),
        "running categorical check"
    );
    Ok(columns)
}

/// Number of distinct values; an absent value counts once unless `dropna`.
pub fn category_count(column: &SurveyColumn<'_>, dropna: bool) -> Result<usize> {
    let present = column.series.drop_nulls().n_unique()?;
    let absent = usize::from(!dropna && column.null_count() > 0);
    Ok(present + absent)
}

/// Tally values in column order, returning the most frequent one.
///
/// Ties go to the value encountered first.
fn mode_of<K, I>(values: I, dropna: bool) -> Option<(Option<K>, usize)>
where
    K: Eq + Hash,
    I: IntoIterator<Item = Option<K>>,
{
    let mut counts: HashMap<Option<K>, (usize, usize)> = HashMap::new();
    for (position, value) in values.into_iter().enumerate() {
        if dropna && value.is_none() {
            continue;
        }
        counts.entry(value).or_insert((0, position)).0 += 1;
    }
    counts
        .into_iter()
        .max_by(|(_, (count_a, first_a)), (_, (count_b, first_b))| {
            count_a.cmp(count_b).then(first_b.cmp(first_a))
        })
        .map(|(value, (count, _))| (value, count))
}

/// Most frequent value of a categorical column, `None` if nothing qualifies.
pub fn column_mode(column: &SurveyColumn<'_>, dropna: bool) -> Result<Option<Mode>> {
    let mode = match column.kind {
        ColumnKind::Text => mode_of(column.series.str()?, dropna)
            .map(|(value, count)| (ReportValue::from(value), count)),
        _ => {
            let values = column.integers()?;
            mode_of(values.i64()?, dropna)
                .map(|(value, count)| (ReportValue::from(value), count))
        }
    };
    Ok(mode.map(|(value, count)| Mode { value, count }))
}

/// Count the categories of each column.
pub fn check_n_categories<'a>(
    input: impl Into<SurveyInput<'a>>,
    dropna: bool,
) -> Result<CheckReport> {
    const TITLE: &str = "n_categories";
    let input = input.into();
    let columns = categorical_columns(input, TITLE)?;
    let mut outcomes = Vec::with_capacity(columns.len());
    for column in &columns {
        let count = category_count(column, dropna)?;
        outcomes.push((column.name, ReportValue::from(count), Vec::new()));
    }
    Ok(CheckReport::assemble(input.shape(), TITLE, &[], outcomes))
}

/// Flag columns where the most common category covers at least `thresh`
/// of all rows.
///
/// # Errors
///
/// Returns [`SurveyError::Range`](crate::SurveyError::Range) unless
/// `0.0 < thresh < 1.0`.
pub fn check_mostly_same<'a>(
    input: impl Into<SurveyInput<'a>>,
    thresh: f64,
    dropna: bool,
) -> Result<CheckReport> {
    const TITLE: &str = "mostly_same";
    validate_thresh(thresh)?;
    let input = input.into();
    let columns = categorical_columns(input, TITLE)?;
    let mut outcomes = Vec::with_capacity(columns.len());
    for column in &columns {
        let Mode { value, count } = column_mode(column, dropna)?.unwrap_or(Mode {
            value: ReportValue::Null,
            count: 0,
        });
        let prop = proportion(count, column.len());
        outcomes.push((
            column.name,
            ReportValue::from(count > 0 && prop >= thresh),
            vec![
                ReportValue::Float(thresh),
                value,
                ReportValue::from(count),
                ReportValue::Float(prop),
            ],
        ));
    }
    Ok(CheckReport::assemble(
        input.shape(),
        TITLE,
        &["thresh", "most_common", "count", "prop"],
        outcomes,
    ))
}
