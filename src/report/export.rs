//! JSON export of a dashboard pass

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;

use crate::pipeline::DashboardData;

/// Metadata about the export run
#[derive(Debug, Serialize)]
pub struct ExportMetadata {
    /// Timestamp of the export (RFC 3339)
    pub timestamp: String,
    pub rewardlens_version: String,
    pub input_file: String,
    /// Columns removed by the privacy filter before any statistic was computed
    pub dropped_private_columns: Vec<String>,
}

/// Complete dashboard export
#[derive(Debug, Serialize)]
pub struct DashboardExport<'a> {
    pub metadata: ExportMetadata,
    pub dashboard: &'a DashboardData,
}

impl<'a> DashboardExport<'a> {
    pub fn new(data: &'a DashboardData, input_file: &str, dropped_private_columns: &[String]) -> Self {
        Self {
            metadata: ExportMetadata {
                timestamp: Utc::now().to_rfc3339(),
                rewardlens_version: env!("CARGO_PKG_VERSION").to_string(),
                input_file: input_file.to_string(),
                dropped_private_columns: dropped_private_columns.to_vec(),
            },
            dashboard: data,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize dashboard to JSON")
    }
}

/// Write the dashboard pass to `output_path` as pretty-printed JSON
pub fn export_dashboard(
    data: &DashboardData,
    input_file: &str,
    dropped_private_columns: &[String],
    output_path: &Path,
) -> Result<()> {
    let json = DashboardExport::new(data, input_file, dropped_private_columns).to_json()?;

    std::fs::write(output_path, json)
        .with_context(|| format!("Failed to write dashboard export to {}", output_path.display()))?;

    Ok(())
}
