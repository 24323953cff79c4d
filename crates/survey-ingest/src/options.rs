//! CSV loading options.

use serde::{Deserialize, Serialize};

/// Maximum file size for CSV loading (500 MB default).
pub const MAX_CSV_FILE_SIZE: u64 = 500 * 1024 * 1024;

/// Rows sampled when inferring column types.
pub const DEFAULT_INFER_SCHEMA_LENGTH: usize = 100;

/// Column count above which a load logs a performance warning.
pub const WIDE_DATASET_COLUMNS: usize = 500;

/// How a CSV file is turned into a DataFrame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestOptions {
    /// Reject files larger than this many bytes.
    pub max_file_size: u64,
    /// Rows sampled for type inference; `None` scans the whole file.
    pub infer_schema_length: Option<usize>,
    /// Parse ISO-like date and datetime text into temporal columns.
    pub try_parse_dates: bool,
    /// Read empty fields as absent values instead of empty strings.
    pub missing_is_null: bool,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            max_file_size: MAX_CSV_FILE_SIZE,
            infer_schema_length: Some(DEFAULT_INFER_SCHEMA_LENGTH),
            try_parse_dates: true,
            missing_is_null: true,
        }
    }
}

impl IngestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_max_file_size(mut self, bytes: u64) -> Self {
        self.max_file_size = bytes;
        self
    }

    #[must_use]
    pub fn with_infer_schema_length(mut self, rows: Option<usize>) -> Self {
        self.infer_schema_length = rows;
        self
    }

    #[must_use]
    pub fn with_try_parse_dates(mut self, enabled: bool) -> Self {
        self.try_parse_dates = enabled;
        self
    }

    #[must_use]
    pub fn with_missing_is_null(mut self, enabled: bool) -> Self {
        self.missing_is_null = enabled;
        self
    }
}
