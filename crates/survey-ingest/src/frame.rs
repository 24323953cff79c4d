//! DataFrame helpers applied after loading.

use polars::prelude::DataFrame;

use crate::error::{IngestError, Result};

/// Restrict `df` to the named columns, in the order given.
pub fn select_columns<S: AsRef<str>>(df: &DataFrame, names: &[S]) -> Result<DataFrame> {
    if let Some(missing) = names
        .iter()
        .map(|name| name.as_ref())
        .find(|name| df.column(name).is_err())
    {
        return Err(IngestError::ColumnNotFound {
            column: missing.to_string(),
        });
    }
    Ok(df.select(names.iter().map(|name| name.as_ref()))?)
}
