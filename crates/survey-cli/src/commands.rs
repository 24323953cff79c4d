//! Command implementations: load the table, run checks, return outcomes.
//!
//! Rendering lives in the binary; everything here returns data so it can be
//! tested without capturing stdout.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use polars::prelude::DataFrame;
use survey_checks::checks::{binary, categorical, general, unique};
use survey_checks::{AuditReport, CheckReport, NullToken, SurveyInput, SurveyOptions, audit_frame};
use survey_ingest::{IngestOptions, read_csv_frame, select_columns};
use tracing::{info, info_span};

use crate::cli::{AuditArgs, CheckArgs, CheckName, SourceArgs, SurveyArgs};

/// Result of `column-survey check`.
#[derive(Debug)]
pub struct CheckOutcome {
    pub source: PathBuf,
    pub check: CheckName,
    pub report: CheckReport,
}

/// Result of `column-survey audit`.
#[derive(Debug)]
pub struct AuditOutcome {
    pub source: PathBuf,
    pub report: AuditReport,
}

impl AuditOutcome {
    pub fn has_flags(&self) -> bool {
        !self.report.is_clean()
    }
}

/// Build ingestion options from the source flags.
pub fn ingest_options(args: &SourceArgs) -> IngestOptions {
    IngestOptions::default()
        .with_missing_is_null(!args.keep_empty)
        .with_try_parse_dates(!args.no_parse_dates)
}

/// Build check options from the survey flags.
///
/// Raw fuzzy null tokens also match numerically when they parse as numbers.
pub fn survey_options(args: &SurveyArgs) -> SurveyOptions {
    args.fuzzy_nulls
        .iter()
        .flat_map(|raw| NullToken::from_raw(raw))
        .fold(
            SurveyOptions::new()
                .with_thresh(args.thresh)
                .with_dropna(args.dropna),
            |options, token| options.with_fuzzy_null(token),
        )
}

fn load_frame(args: &SourceArgs) -> Result<DataFrame> {
    read_csv_frame(&args.path, &ingest_options(args))
        .with_context(|| format!("load {}", args.path.display()))
}

/// Run one named check against an input.
pub fn run_named_check(
    check: CheckName,
    input: SurveyInput<'_>,
    options: &SurveyOptions,
) -> survey_checks::Result<CheckReport> {
    match check {
        CheckName::AllSame => binary::check_all_same(input),
        CheckName::BinaryMostlySame => binary::check_mostly_same(input, options.thresh),
        CheckName::OutsideRange => binary::check_outside_range(input),
        CheckName::NCategories => categorical::check_n_categories(input, options.dropna),
        CheckName::CategoricalMostlySame => {
            categorical::check_mostly_same(input, options.thresh, options.dropna)
        }
        CheckName::Nulls => general::check_nulls(input),
        CheckName::FuzzyNulls => {
            general::check_fuzzy_nulls_with(input, &options.fuzzy_null_set())
        }
        CheckName::Uniqueness => unique::check_uniqueness(input),
    }
}

pub fn run_check(args: &CheckArgs) -> Result<CheckOutcome> {
    let span = info_span!("check", path = %args.source.path.display(), check = args.check.label());
    let _guard = span.enter();
    let start = Instant::now();

    let options = survey_options(&args.survey);
    let df = load_frame(&args.source)?;
    let df = if args.columns.is_empty() {
        df
    } else {
        select_columns(&df, &args.columns).context("select columns")?
    };
    let input = match args.columns.as_slice() {
        [single] => SurveyInput::from(
            df.column(single)
                .with_context(|| format!("column {single}"))?,
        ),
        _ => SurveyInput::from(&df),
    };
    let report = run_named_check(args.check, input, &options)
        .with_context(|| format!("run {} check", args.check.label()))?;

    info!(
        columns = report.len(),
        flagged = report.flagged_columns().len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "check complete"
    );
    Ok(CheckOutcome {
        source: args.source.path.clone(),
        check: args.check,
        report,
    })
}

pub fn run_audit(args: &AuditArgs) -> Result<AuditOutcome> {
    let span = info_span!("audit", path = %args.source.path.display());
    let _guard = span.enter();
    let start = Instant::now();

    let options = survey_options(&args.survey);
    let df = load_frame(&args.source)?;
    let report = audit_frame(&df, &options).context("audit table")?;

    info!(
        columns = report.columns.len(),
        flagged = report.flagged().len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "audit complete"
    );
    Ok(AuditOutcome {
        source: args.source.path.clone(),
        report,
    })
}

/// File name used in headings, falling back to the full path.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
