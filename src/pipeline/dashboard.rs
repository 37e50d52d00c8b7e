//! One render pass of the dashboard
//!
//! `DashboardData::compute` derives every statistic the dashboard shows
//! from the unmodified dataset. Callers run it again to re-render; nothing
//! is carried over between passes.

use polars::prelude::*;
use serde::Serialize;
use tracing::debug;

use crate::config::SurveySchema;
use crate::error::DashboardError;
use crate::pipeline::aggregate::top_counts;
use crate::pipeline::correlation::{correlation_matrix, CorrelationMatrix};
use crate::pipeline::stats::{
    box_stats, budget_comparisons, histogram, numeric_values, scatter_points, summary_metrics,
    BoxStats, BudgetComparison, Histogram, SummaryMetrics,
};

/// First rows of the dataset rendered as text
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TablePreview {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl TablePreview {
    pub fn from_frame(df: &DataFrame, rows: usize) -> Result<Self, DashboardError> {
        let head = df.head(Some(rows));
        let columns: Vec<String> = head
            .get_column_names()
            .iter()
            .map(|n| n.to_string())
            .collect();

        let mut out = Vec::with_capacity(head.height());
        for i in 0..head.height() {
            let row = head
                .get_columns()
                .iter()
                .map(|col| col.get(i).map(|v| format_cell(&v)))
                .collect::<PolarsResult<Vec<String>>>()?;
            out.push(row);
        }

        Ok(Self { columns, rows: out })
    }
}

fn format_cell(value: &AnyValue) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::String(s) => s.to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        other => other.to_string(),
    }
}

/// Histogram of one numeric column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumericDistribution {
    pub column: String,
    pub histogram: Option<Histogram>,
}

/// Top categories of one prefix group
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryChart {
    pub prefix: String,
    pub title: String,
    pub counts: Vec<(String, f64)>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterData {
    pub x_label: String,
    pub y_label: String,
    pub points: Vec<(f64, f64)>,
}

/// Everything one dashboard render needs
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardData {
    pub metrics: SummaryMetrics,
    pub preview: TablePreview,
    pub distributions: Vec<NumericDistribution>,
    pub budget_box: Option<BoxStats>,
    pub categories: Vec<CategoryChart>,
    pub comparisons: Vec<BudgetComparison>,
    pub correlation: CorrelationMatrix,
    pub scatter: ScatterData,
}

impl DashboardData {
    pub fn compute(df: &DataFrame, schema: &SurveySchema) -> Result<Self, DashboardError> {
        debug!(rows = df.height(), "computing dashboard pass");

        let metrics = summary_metrics(df, schema)?;
        let preview = TablePreview::from_frame(df, schema.preview_rows)?;

        let distributions = schema
            .numeric_columns
            .iter()
            .map(|column| {
                let values = numeric_values(df, column)?;
                Ok(NumericDistribution {
                    column: column.clone(),
                    histogram: histogram(&values, schema.histogram_bins),
                })
            })
            .collect::<Result<Vec<_>, DashboardError>>()?;

        let budget_box = box_stats(&numeric_values(df, &schema.budget_column)?);

        let categories = schema
            .category_groups
            .iter()
            .map(|group| CategoryChart {
                prefix: group.prefix.clone(),
                title: group.title.clone(),
                counts: top_counts(df, &group.prefix, schema.top_n),
            })
            .collect();

        let comparisons = budget_comparisons(df, schema)?;
        let correlation = correlation_matrix(df, &schema.numeric_columns)?;
        let scatter = ScatterData {
            x_label: schema.scatter_x.clone(),
            y_label: schema.scatter_y.clone(),
            points: scatter_points(df, &schema.scatter_x, &schema.scatter_y)?,
        };

        Ok(Self {
            metrics,
            preview,
            distributions,
            budget_box,
            categories,
            comparisons,
            correlation,
            scatter,
        })
    }
}
