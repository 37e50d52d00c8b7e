//! Error types for dataset access and statistics.

use polars::prelude::PolarsError;
use thiserror::Error;

/// Errors raised while reading columns out of the survey dataset.
#[derive(Debug, Error)]
pub enum DashboardError {
    /// A column referenced directly by name is absent from the dataset.
    #[error("Column '{column}' not found in dataset")]
    ColumnNotFound { column: String },

    /// A column exists but cannot be read as numbers.
    #[error("Column '{column}' is not numeric (found {dtype})")]
    NotNumeric { column: String, dtype: String },

    /// Input file extension is not supported.
    #[error("Unsupported file format: {extension}. Supported formats: csv")]
    UnsupportedFormat { extension: String },

    #[error(transparent)]
    Polars(#[from] PolarsError),
}

impl DashboardError {
    pub fn column_not_found(column: &str) -> Self {
        Self::ColumnNotFound {
            column: column.to_string(),
        }
    }
}
