//! Binary feature checks.
//!
//! Boolean and integer columns that should hold only 0/1 (false/true).
//! Booleans are read as 0/1 and every statistic skips absent values.

use polars::prelude::{ChunkAgg, DataType};
use tracing::debug;

use crate::error::Result;
use crate::input::{SurveyColumn, SurveyInput};
use crate::kind::BINARY_KINDS;
use crate::options::validate_thresh;
use crate::report::{CheckReport, ReportValue};

/// Aggregates of a binary column over its non-null values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BinaryStats {
    pub min: Option<i64>,
    pub max: Option<i64>,
    pub mean: Option<f64>,
}

impl BinaryStats {
    pub fn of(column: &SurveyColumn<'_>) -> Result<Self> {
        let series = column.integers()?;
        let values = series.i64()?;
        let present = values.len() - values.null_count();
        // Summed as floats so wide integer columns cannot wrap.
        let floats = series.cast(&DataType::Float64)?;
        let mean = match (present, floats.f64()?.sum()) {
            (0, _) | (_, None) => None,
            (n, Some(sum)) => Some(sum / n as f64),
        };
        Ok(Self {
            min: values.min(),
            max: values.max(),
            mean,
        })
    }

    /// Every non-null value is identical.
    pub fn all_same(&self) -> bool {
        matches!((self.min, self.max), (Some(min), Some(max)) if min == max)
    }

    /// The mean sits at or beyond `thresh` towards either value.
    pub fn mostly_same(&self, thresh: f64) -> bool {
        self.mean
            .is_some_and(|mean| mean >= thresh || mean <= 1.0 - thresh)
    }

    pub fn outside_range(&self) -> bool {
        self.min.is_some_and(|min| min < 0) || self.max.is_some_and(|max| max > 1)
    }
}

/// Fail unless every column is boolean or integer.
pub fn validate_binary_kind<'a>(input: impl Into<SurveyInput<'a>>) -> Result<()> {
    let input = input.into();
    BINARY_KINDS.validate(&input.columns()?)
}

/// Resolve columns, validate their kind and compute stats for each.
fn binary_stats<'a>(
    input: SurveyInput<'a>,
    check: &'static str,
) -> Result<Vec<(SurveyColumn<'a>, BinaryStats)>> {
    let columns = input.columns()?;
    BINARY_KINDS.validate(&columns)?;
    debug!(
        check,
        columns = columns.len(),
        rows = input.row_count(),
        "running binary check"
    );
    columns
        .into_iter()
        .map(|column| Ok((column, BinaryStats::of(&column)?)))
        .collect()
}

/// Flag columns whose values are all the same.
pub fn check_all_same<'a>(input: impl Into<SurveyInput<'a>>) -> Result<CheckReport> {
    const TITLE: &str = "all_same";
    let input = input.into();
    let stats = binary_stats(input, TITLE)?;
    Ok(CheckReport::assemble(
        input.shape(),
        TITLE,
        &[],
        stats
            .into_iter()
            .map(|(column, stats)| (column.name, ReportValue::from(stats.all_same()), Vec::new())),
    ))
}

/// Flag columns where at least `thresh` of the values are the same.
///
/// # Errors
///
/// Returns [`SurveyError::Range`](crate::SurveyError::Range) unless
/// `0.0 < thresh < 1.0`.
pub fn check_mostly_same<'a>(input: impl Into<SurveyInput<'a>>, thresh: f64) -> Result<CheckReport> {
    const TITLE: &str = "mostly_same";
    validate_thresh(thresh)?;
    let input = input.into();
    let stats = binary_stats(input, TITLE)?;
    Ok(CheckReport::assemble(
        input.shape(),
        TITLE,
        &["thresh", "mean"],
        stats.into_iter().map(|(column, stats)| {
            (
                column.name,
                ReportValue::from(stats.mostly_same(thresh)),
                vec![ReportValue::Float(thresh), ReportValue::from(stats.mean)],
            )
        }),
    ))
}

/// Flag columns holding values below 0 or above 1.
pub fn check_outside_range<'a>(input: impl Into<SurveyInput<'a>>) -> Result<CheckReport> {
    const TITLE: &str = "outside_range";
    let input = input.into();
    let stats = binary_stats(input, TITLE)?;
    Ok(CheckReport::assemble(
        input.shape(),
        TITLE,
        &[],
        stats
            .into_iter()
            .map(|(column, stats)| (column.name, ReportValue::from(stats.outside_range()), Vec::new())),
    ))
}

#[cfg(test)]
mod tests {
    use polars::prelude::{NamedFrom, Series};

    use super::*;

    #[test]
    fn test_stats_boolean() {
        let series = Series::new("b".into(), &[true, true, true, false]);
        let column = SurveyInput::from(&series).columns().unwrap()[0];
        let stats = BinaryStats::of(&column).unwrap();
        assert_eq!(stats.min, Some(0));
        assert_eq!(stats.max, Some(1));
        assert_eq!(stats.mean, Some(0.75));
        assert!(stats.mostly_same(0.7));
        assert!(!stats.mostly_same(0.8));
    }

    #[test]
    fn test_stats_skip_nulls() {
        let series = Series::new("b".into(), &[Some(1i64), None, Some(1)]);
        let column = SurveyInput::from(&series).columns().unwrap()[0];
        let stats = BinaryStats::of(&column).unwrap();
        assert!(stats.all_same());
        assert_eq!(stats.mean, Some(1.0));
    }

    #[test]
    fn test_stats_all_null() {
        let series = Series::new("b".into(), &[None::<i64>, None]);
        let column = SurveyInput::from(&series).columns().unwrap()[0];
        let stats = BinaryStats::of(&column).unwrap();
        assert_eq!(stats.mean, None);
        assert!(!stats.all_same());
        assert!(!stats.mostly_same(0.5));
        assert!(!stats.outside_range());
    }
}
