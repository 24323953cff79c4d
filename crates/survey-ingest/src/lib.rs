//! CSV ingestion for column surveys.
//!
//! Loads a CSV file with a single header row into a Polars DataFrame,
//! guarding file size and encoding, and narrows it to requested columns.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use survey_ingest::{IngestOptions, read_csv_frame, select_columns};
//!
//! let df = read_csv_frame(Path::new("customers.csv"), &IngestOptions::default())?;
//! let df = select_columns(&df, &["state", "lylty"])?;
//! ```

mod csv;
mod error;
mod frame;
mod options;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Reading ===
pub use csv::{check_file_size, read_csv_frame, validate_dataframe_shape, validate_encoding};

// === Frame Helpers ===
pub use frame::select_columns;

// === Options ===
pub use options::{
    DEFAULT_INFER_SCHEMA_LENGTH, IngestOptions, MAX_CSV_FILE_SIZE, WIDE_DATASET_COLUMNS,
};
