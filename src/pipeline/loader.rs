//! Dataset loader and load-once cache for the survey CSV

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use anyhow::{Context, Result};
use polars::prelude::*;
use tracing::{debug, info};

use crate::error::DashboardError;
use crate::utils::{create_spinner, finish_with_success};

/// Fail unless the file has a `.csv` extension (case-insensitive)
fn ensure_csv(path: &Path) -> Result<()> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    if extension != "csv" {
        return Err(DashboardError::UnsupportedFormat { extension }.into());
    }
    Ok(())
}

fn csv_reader(path: &Path, infer_schema_length: usize) -> Result<LazyFrame> {
    ensure_csv(path)?;

    // 0 means full table scan
    let schema_length = if infer_schema_length == 0 {
        None
    } else {
        Some(infer_schema_length)
    };

    LazyCsvReader::new(path)
        .with_infer_schema_length(schema_length)
        .finish()
        .with_context(|| format!("Failed to load CSV file: {}", path.display()))
}

/// Load the survey dataset into memory
pub fn load_dataset(path: &Path, infer_schema_length: usize) -> Result<DataFrame> {
    let df = csv_reader(path, infer_schema_length)?
        .collect()
        .with_context(|| format!("Failed to parse CSV file: {}", path.display()))?;

    debug!(rows = df.height(), cols = df.width(), "dataset parsed");
    Ok(df)
}

/// Load the dataset behind a spinner.
///
/// Returns the frame together with its row count, column count and
/// estimated memory footprint in MB.
pub fn load_dataset_with_progress(
    path: &Path,
    infer_schema_length: usize,
) -> Result<(DataFrame, usize, usize, f64)> {
    let spinner = create_spinner(&format!("Loading {}...", path.display()));
    let df = match load_dataset(path, infer_schema_length) {
        Ok(df) => df,
        Err(e) => {
            spinner.finish_and_clear();
            return Err(e);
        }
    };
    finish_with_success(&spinner, "Dataset loaded");

    let (rows, cols) = df.shape();
    let memory_mb = df.estimated_size() as f64 / (1024.0 * 1024.0);
    info!(rows, cols, memory_mb, "loaded {}", path.display());

    Ok((df, rows, cols, memory_mb))
}

/// Read only the header of the CSV and return its column names
pub fn get_column_names(path: &Path) -> Result<Vec<String>> {
    let mut lf = csv_reader(path, 100)?;
    let schema = lf
        .collect_schema()
        .with_context(|| format!("Failed to read CSV schema: {}", path.display()))?;

    Ok(schema.iter_names().map(|name| name.to_string()).collect())
}

/// Process-lifetime cache of the survey dataset.
///
/// The file is read on the first call to [`DatasetCache::get`]; every
/// later call hands out the same immutable frame.
#[derive(Debug)]
pub struct DatasetCache {
    path: PathBuf,
    infer_schema_length: usize,
    cell: OnceLock<DataFrame>,
}

impl DatasetCache {
    pub fn new(path: impl Into<PathBuf>, infer_schema_length: usize) -> Self {
        Self {
            path: path.into(),
            infer_schema_length,
            cell: OnceLock::new(),
        }
    }

    /// Pre-populate the cache with an already loaded frame
    pub fn with_frame(path: impl Into<PathBuf>, df: DataFrame) -> Self {
        let cell = OnceLock::new();
        let _ = cell.set(df);
        Self {
            path: path.into(),
            infer_schema_length: 0,
            cell,
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.cell.get().is_some()
    }

    pub fn get(&self) -> Result<&DataFrame> {
        if let Some(df) = self.cell.get() {
            return Ok(df);
        }
        let df = load_dataset(&self.path, self.infer_schema_length)?;
        Ok(self.cell.get_or_init(|| df))
    }
}
