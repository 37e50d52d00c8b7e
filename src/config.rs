//! Survey schema configuration.
//!
//! The dashboard reads a CSV with a fixed, implicit schema. `SurveySchema`
//! names those columns; its defaults describe the self-reward survey and
//! any field can be overridden from a `rewardlens.toml` file.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::pipeline::{strip_group_prefix, DEFAULT_TOP_N};

/// Default schema file looked up in the working directory.
pub const DEFAULT_SCHEMA_FILE: &str = "rewardlens.toml";

/// One multi-select survey question rendered as a bar chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryGroup {
    /// Column name prefix shared by every indicator of the question
    pub prefix: String,
    /// Chart title
    pub title: String,
}

impl CategoryGroup {
    pub fn new(prefix: &str, title: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
            title: title.to_string(),
        }
    }
}

/// Column layout of the survey CSV.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurveySchema {
    /// Numeric answers, in display order (histograms and correlation)
    pub numeric_columns: Vec<String>,
    pub budget_column: String,
    pub frequency_column: String,
    pub importance_column: String,
    /// Upper bound of the importance scale, used for the percentage card
    pub importance_scale_max: f64,
    pub scatter_x: String,
    pub scatter_y: String,
    /// Indicator columns compared against the budget (skipped when absent)
    pub comparison_columns: Vec<String>,
    /// Column name fragments marking personally identifying columns
    pub private_markers: Vec<String>,
    pub top_n: usize,
    pub histogram_bins: usize,
    pub preview_rows: usize,
    /// Kept last so the TOML array of tables follows the plain values
    pub category_groups: Vec<CategoryGroup>,
}

impl Default for SurveySchema {
    fn default() -> Self {
        Self {
            numeric_columns: strings(&[
                "Freq_Reward",
                "Freq_InginReward",
                "Budget_Reward",
                "Durasi_Reward",
                "Skala_Penting",
            ]),
            budget_column: "Budget_Reward".to_string(),
            frequency_column: "Freq_Reward".to_string(),
            importance_column: "Skala_Penting".to_string(),
            importance_scale_max: 5.0,
            scatter_x: "Freq_Reward".to_string(),
            scatter_y: "Freq_InginReward".to_string(),
            comparison_columns: strings(&[
                "Bentuk_Reward_membeli benda yang diinginkan",
                "Bentuk_Reward_traveling",
                "Bentuk_Reward_membeli makanan atau minuman favorit",
            ]),
            private_markers: strings(&["Nama", "Whatsapp"]),
            top_n: DEFAULT_TOP_N,
            histogram_bins: 20,
            preview_rows: 5,
            category_groups: vec![
                CategoryGroup::new("Bentuk_Reward", "Top Bentuk Reward"),
                CategoryGroup::new("Trigger_Reward", "Top Trigger Reward"),
                CategoryGroup::new("Efek_Reward", "Top Efek Reward"),
            ],
        }
    }
}

impl SurveySchema {
    /// Load a schema from a TOML file. Missing fields keep their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read schema file: {}", path.display()))?;

        let schema: SurveySchema = toml::from_str(&content)
            .with_context(|| format!("Failed to parse schema file: {}", path.display()))?;

        Ok(schema)
    }

    /// Load from an explicit path, else from `rewardlens.toml` if present, else defaults.
    pub fn resolve(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => {
                let default_path = Path::new(DEFAULT_SCHEMA_FILE);
                if default_path.exists() {
                    Self::load(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize schema to TOML")
    }

    /// Strip the category group prefix (and the joining underscore) from a column name.
    pub fn short_label<'a>(&self, column: &'a str) -> &'a str {
        self.category_groups
            .iter()
            .find(|g| column.starts_with(g.prefix.as_str()))
            .map(|g| strip_group_prefix(column, &g.prefix))
            .unwrap_or(column)
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}
