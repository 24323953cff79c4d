//! CLI argument definitions for the column survey tool.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use survey_checks::DEFAULT_THRESH;

#[derive(Parser)]
#[command(
    name = "column-survey",
    version,
    about = "Column survey - data quality checks for CSV tables",
    long_about = "Survey the columns of a CSV table before modeling.\n\n\
                  Checks binary, categorical, null and unique features and\n\
                  reports per-column verdicts with supporting metrics."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run a single check over some or all columns.
    Check(CheckArgs),

    /// Run every applicable check on every column.
    ///
    /// Exits with status 1 when any column is flagged.
    Audit(AuditArgs),
}

/// Where the table comes from and how it is read.
#[derive(Args, Clone)]
pub struct SourceArgs {
    /// Path to the CSV file (first row holds column names).
    #[arg(value_name = "CSV")]
    pub path: PathBuf,

    /// Keep empty fields as empty strings instead of absent values.
    ///
    /// Lets the "" fuzzy null token match text columns.
    #[arg(long = "keep-empty")]
    pub keep_empty: bool,

    /// Leave date-like text unparsed.
    #[arg(long = "no-parse-dates")]
    pub no_parse_dates: bool,
}

/// Parameters shared by the checks.
#[derive(Args, Clone)]
pub struct SurveyArgs {
    /// Threshold for the "mostly same" checks, strictly between 0 and 1.
    #[arg(long = "thresh", value_name = "F", default_value_t = DEFAULT_THRESH)]
    pub thresh: f64,

    /// Exclude absent values from category counts and modes.
    #[arg(long = "dropna")]
    pub dropna: bool,

    /// Extra value to treat as null-equivalent (repeatable).
    #[arg(long = "fuzzy-null", value_name = "TOKEN", allow_hyphen_values = true)]
    pub fuzzy_nulls: Vec<String>,

    /// Output format.
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: OutputFormatArg,
}

#[derive(Args)]
pub struct CheckArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Check to run.
    #[arg(long = "check", value_enum)]
    pub check: CheckName,

    /// Comma-separated columns to check (default: all).
    ///
    /// A single column runs the check in single-column mode.
    #[arg(long = "columns", value_name = "NAMES", value_delimiter = ',')]
    pub columns: Vec<String>,

    #[command(flatten)]
    pub survey: SurveyArgs,
}

#[derive(Args)]
pub struct AuditArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub survey: SurveyArgs,
}

/// Checks available from the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum CheckName {
    /// Binary: every value identical
    AllSame,
    /// Binary: mean beyond the threshold towards 0 or 1
    BinaryMostlySame,
    /// Binary: values below 0 or above 1
    OutsideRange,
    /// Categorical: distinct value count
    NCategories,
    /// Categorical: most common value covers the threshold share
    CategoricalMostlySame,
    /// Any kind: absent values
    Nulls,
    /// Any kind: null-like literals
    FuzzyNulls,
    /// Unique: repeated values
    Uniqueness,
}

impl CheckName {
    /// Name as typed on the command line.
    pub fn label(&self) -> &'static str {
        match self {
            Self::AllSame => "all-same",
            Self::BinaryMostlySame => "binary-mostly-same",
            Self::OutsideRange => "outside-range",
            Self::NCategories => "n-categories",
            Self::CategoricalMostlySame => "categorical-mostly-same",
            Self::Nulls => "nulls",
            Self::FuzzyNulls => "fuzzy-nulls",
            Self::Uniqueness => "uniqueness",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormatArg {
    Table,
    Json,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
