//! Whole-table audit.
//!
//! Runs every check that applies to each column's kind and collects the
//! findings per column. Checks that do not apply to a kind are skipped.

use polars::prelude::DataFrame;
use serde::Serialize;
use survey_common::proportion;
use tracing::debug;

use crate::checks::binary::BinaryStats;
use crate::checks::categorical::{Mode, category_count, column_mode};
use crate::checks::general::{check_fuzzy_nulls_with, check_nulls};
use crate::checks::unique::duplicate_count;
use crate::error::Result;
use crate::input::{SurveyColumn, SurveyInput};
use crate::kind::{CATEGORICAL_KINDS, ColumnKind, UNIQUE_KINDS};
use crate::options::{FuzzyNulls, SurveyOptions};
use crate::report::{CheckReport, ReportValue};

/// How much attention a finding deserves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Likely data problem; flags the column.
    Warning,
    /// Informational only.
    Note,
}

impl Severity {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Warning => "Warning",
            Self::Note => "Note",
        }
    }
}

/// Something an audit noticed about a column.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "finding", rename_all = "snake_case")]
pub enum Finding {
    /// Every non-null value is identical
    Constant,
    /// One value covers at least the threshold share of rows
    MostlySame { most_common: ReportValue, prop: f64 },
    /// Two-valued integer column with values other than 0 and 1
    OutsideBinaryRange { min: Option<i64>, max: Option<i64> },
    NullsPresent { null_count: usize, prop_null: f64 },
    FuzzyNullsPresent {
        fuzzy_null_count: usize,
        prop_fuzzy_null: f64,
    },
    /// Mostly distinct values with a few repeats
    Duplicates { dupe_count: usize, prop_dupe: f64 },
    /// Every value distinct; a candidate identifier
    AllUnique,
}

impl Finding {
    pub fn severity(&self) -> Severity {
        match self {
            Self::AllUnique => Severity::Note,
            _ => Severity::Warning,
        }
    }

    /// Short snake_case name, matching the serialized tag.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Constant => "constant",
            Self::MostlySame { .. } => "mostly_same",
            Self::OutsideBinaryRange { .. } => "outside_binary_range",
            Self::NullsPresent { .. } => "nulls_present",
            Self::FuzzyNullsPresent { .. } => "fuzzy_nulls_present",
            Self::Duplicates { .. } => "duplicates",
            Self::AllUnique => "all_unique",
        }
    }

    pub fn message(&self) -> String {
        match self {
            Self::Constant => "all values are the same".to_string(),
            Self::MostlySame { most_common, prop } => {
                format!("{:.1}% of rows hold {most_common}", prop * 100.0)
            }
            Self::OutsideBinaryRange { min, max } => format!(
                "two-valued column outside 0/1 (min {}, max {})",
                ReportValue::from(*min),
                ReportValue::from(*max)
            ),
            Self::NullsPresent {
                null_count,
                prop_null,
            } => format!("{null_count} null values ({:.1}%)", prop_null * 100.0),
            Self::FuzzyNullsPresent {
                fuzzy_null_count,
                prop_fuzzy_null,
            } => format!(
                "{fuzzy_null_count} null-like values ({:.1}%)",
                prop_fuzzy_null * 100.0
            ),
            Self::Duplicates {
                dupe_count,
                prop_dupe,
            } => format!(
                "{dupe_count} repeated values ({:.1}%) in an otherwise distinct column",
                prop_dupe * 100.0
            ),
            Self::AllUnique => "every value is distinct".to_string(),
        }
    }
}

/// Audit outcome for one column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnAudit {
    pub column: String,
    pub kind: ColumnKind,
    pub row_count: usize,
    pub findings: Vec<Finding>,
}

impl ColumnAudit {
    /// At least one finding of warning severity.
    pub fn is_flagged(&self) -> bool {
        self.findings
            .iter()
            .any(|finding| finding.severity() == Severity::Warning)
    }

    pub fn has(&self, name: &str) -> bool {
        self.findings.iter().any(|finding| finding.name() == name)
    }
}

/// Audit outcome for a whole table, one entry per column in input order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuditReport {
    pub row_count: usize,
    pub columns: Vec<ColumnAudit>,
}

impl AuditReport {
    /// Columns with at least one warning.
    pub fn flagged(&self) -> Vec<&ColumnAudit> {
        self.columns
            .iter()
            .filter(|audit| audit.is_flagged())
            .collect()
    }

    pub fn column(&self, name: &str) -> Option<&ColumnAudit> {
        self.columns.iter().find(|audit| audit.column == name)
    }

    pub fn is_clean(&self) -> bool {
        self.columns.iter().all(|audit| !audit.is_flagged())
    }
}

/// Audit every column of `df`.
///
/// # Errors
///
/// Fails on an out-of-range threshold, an empty table, or a column whose
/// element type has no kind.
pub fn audit_frame(df: &DataFrame, options: &SurveyOptions) -> Result<AuditReport> {
    options.validate()?;
    let fuzzy = options.fuzzy_null_set();
    let columns = SurveyInput::from(df).columns()?;
    debug!(
        columns = columns.len(),
        rows = df.height(),
        thresh = options.thresh,
        dropna = options.dropna,
        "auditing table"
    );
    let columns = columns
        .iter()
        .map(|column| audit_column(column, options, &fuzzy))
        .collect::<Result<Vec<_>>>()?;
    Ok(AuditReport {
        row_count: df.height(),
        columns,
    })
}

fn audit_column(
    column: &SurveyColumn<'_>,
    options: &SurveyOptions,
    fuzzy: &FuzzyNulls,
) -> Result<ColumnAudit> {
    let mut findings = Vec::new();
    let single = SurveyInput::Column(column.series);

    let nulls = check_nulls(single)?;
    if verdict(&nulls) {
        findings.push(Finding::NullsPresent {
            null_count: count_metric(&nulls, "null_count"),
            prop_null: float_metric(&nulls, "prop_null"),
        });
    }
    let fuzzy_nulls = check_fuzzy_nulls_with(single, fuzzy)?;
    if verdict(&fuzzy_nulls) {
        findings.push(Finding::FuzzyNullsPresent {
            fuzzy_null_count: count_metric(&fuzzy_nulls, "fuzzy_null_count"),
            prop_fuzzy_null: float_metric(&fuzzy_nulls, "prop_fuzzy_null"),
        });
    }

    let binary = treats_as_binary(column)?;
    if binary {
        binary_findings(column, options.thresh, &mut findings)?;
    } else if CATEGORICAL_KINDS.allows(column.kind) {
        categorical_findings(column, options, &mut findings)?;
    }
    if !binary && UNIQUE_KINDS.allows(column.kind) {
        unique_findings(column, options.thresh, &mut findings)?;
    }

    debug!(
        column = column.name,
        kind = %column.kind,
        findings = findings.len(),
        "audited column"
    );
    Ok(ColumnAudit {
        column: column.name.to_string(),
        kind: column.kind,
        row_count: column.len(),
        findings,
    })
}

/// Booleans, and integer columns with at most two distinct non-null values
/// of which at least one is 0 or 1.
fn treats_as_binary(column: &SurveyColumn<'_>) -> Result<bool> {
    match column.kind {
        ColumnKind::Boolean => Ok(true),
        ColumnKind::Integer => {
            let present = column.series.drop_nulls();
            if present.is_empty() || present.n_unique()? > 2 {
                return Ok(false);
            }
            let stats = BinaryStats::of(column)?;
            let touches = |value: Option<i64>| value.is_some_and(|v| v == 0 || v == 1);
            Ok(touches(stats.min) || touches(stats.max))
        }
        _ => Ok(false),
    }
}

fn binary_findings(
    column: &SurveyColumn<'_>,
    thresh: f64,
    findings: &mut Vec<Finding>,
) -> Result<()> {
    let stats = BinaryStats::of(column)?;
    if stats.all_same() {
        findings.push(Finding::Constant);
    } else if !stats.outside_range()
        && stats.mostly_same(thresh)
        && let Some(mean) = stats.mean
    {
        let ones = mean >= thresh;
        let most_common = match (column.kind, ones) {
            (ColumnKind::Boolean, ones) => ReportValue::Bool(ones),
            (_, true) => ReportValue::from(stats.max),
            (_, false) => ReportValue::from(stats.min),
        };
        let present = column.len() - column.null_count();
        let share = if ones { mean } else { 1.0 - mean };
        findings.push(Finding::MostlySame {
            most_common,
            prop: share * proportion(present, column.len()),
        });
    }
    if stats.outside_range() {
        findings.push(Finding::OutsideBinaryRange {
            min: stats.min,
            max: stats.max,
        });
    }
    Ok(())
}

fn categorical_findings(
    column: &SurveyColumn<'_>,
    options: &SurveyOptions,
    findings: &mut Vec<Finding>,
) -> Result<()> {
    if category_count(column, options.dropna)? == 1 {
        findings.push(Finding::Constant);
        return Ok(());
    }
    if let Some(Mode { value, count }) = column_mode(column, options.dropna)? {
        let prop = proportion(count, column.len());
        if prop >= options.thresh {
            findings.push(Finding::MostlySame {
                most_common: value,
                prop,
            });
        }
    }
    Ok(())
}

/// Uniqueness only runs on complete columns with more than one row.
fn unique_findings(
    column: &SurveyColumn<'_>,
    thresh: f64,
    findings: &mut Vec<Finding>,
) -> Result<()> {
    if column.null_count() > 0 || column.len() < 2 {
        return Ok(());
    }
    let dupes = duplicate_count(column)?;
    let prop_dupe = proportion(dupes, column.len());
    if dupes == 0 {
        findings.push(Finding::AllUnique);
    } else if prop_dupe <= 1.0 - thresh {
        findings.push(Finding::Duplicates {
            dupe_count: dupes,
            prop_dupe,
        });
    }
    Ok(())
}

fn verdict(report: &CheckReport) -> bool {
    report.first().is_some_and(|row| row.verdict.is_true())
}

fn count_metric(report: &CheckReport, name: &str) -> usize {
    report
        .first_metric(name)
        .and_then(ReportValue::as_i64)
        .and_then(|value| usize::try_from(value).ok())
        .unwrap_or_default()
}

fn float_metric(report: &CheckReport, name: &str) -> f64 {
    report
        .first_metric(name)
        .and_then(ReportValue::as_f64)
        .unwrap_or_default()
}
