//! Descriptive statistics over survey columns
//!
//! Everything here is a pure function of the dataset: numeric extraction,
//! central tendency, boxplot summaries, histogram binning and the small
//! derived views (metric cards, budget comparisons, scatter points) that
//! the dashboard renders.

use polars::prelude::*;
use serde::Serialize;
use tracing::debug;

use crate::config::SurveySchema;
use crate::error::DashboardError;

/// Whisker reach in multiples of the interquartile range
pub const WHISKER_IQR: f64 = 1.5;

/// Values of a column cast to f64, nulls kept as `None` so rows stay aligned
pub fn column_as_f64(df: &DataFrame, column: &str) -> Result<Vec<Option<f64>>, DashboardError> {
    let col = df
        .column(column)
        .map_err(|_| DashboardError::column_not_found(column))?;

    let dtype = col.dtype();
    if !(dtype.is_primitive_numeric() || matches!(dtype, DataType::Boolean)) {
        return Err(DashboardError::NotNumeric {
            column: column.to_string(),
            dtype: dtype.to_string(),
        });
    }

    let casted = col.cast(&DataType::Float64)?;
    Ok(casted.f64()?.iter().collect())
}

/// Non-null values of a numeric column
pub fn numeric_values(df: &DataFrame, column: &str) -> Result<Vec<f64>, DashboardError> {
    Ok(column_as_f64(df, column)?.into_iter().flatten().collect())
}

pub fn has_column(df: &DataFrame, column: &str) -> bool {
    df.get_column_names().iter().any(|name| name.as_str() == column)
}

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

pub fn median(values: &[f64]) -> Option<f64> {
    quantile(values, 0.5)
}

/// Quantile with linear interpolation between order statistics
pub fn quantile(values: &[f64], q: f64) -> Option<f64> {
    let sorted = sorted_copy(values);
    quantile_sorted(&sorted, q)
}

fn sorted_copy(values: &[f64]) -> Vec<f64> {
    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    sorted
}

fn quantile_sorted(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let q = q.clamp(0.0, 1.0);
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}

/// Five-number summary of a boxplot
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxStats {
    pub count: usize,
    pub lower_whisker: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub upper_whisker: f64,
    pub outliers: Vec<f64>,
}

impl BoxStats {
    /// Smallest value drawn, outliers included
    pub fn min(&self) -> f64 {
        self.outliers
            .iter()
            .copied()
            .fold(self.lower_whisker, f64::min)
    }

    /// Largest value drawn, outliers included
    pub fn max(&self) -> f64 {
        self.outliers
            .iter()
            .copied()
            .fold(self.upper_whisker, f64::max)
    }
}

/// Boxplot summary; whiskers stop at the last point within 1.5 IQR of the box
pub fn box_stats(values: &[f64]) -> Option<BoxStats> {
    let sorted = sorted_copy(values);
    let q1 = quantile_sorted(&sorted, 0.25)?;
    let median = quantile_sorted(&sorted, 0.5)?;
    let q3 = quantile_sorted(&sorted, 0.75)?;

    let reach = WHISKER_IQR * (q3 - q1);
    let low_fence = q1 - reach;
    let high_fence = q3 + reach;

    let lower_whisker = sorted
        .iter()
        .copied()
        .find(|v| *v >= low_fence)
        .unwrap_or(q1);
    let upper_whisker = sorted
        .iter()
        .rev()
        .copied()
        .find(|v| *v <= high_fence)
        .unwrap_or(q3);

    let outliers = sorted
        .iter()
        .copied()
        .filter(|v| *v < lower_whisker || *v > upper_whisker)
        .collect();

    Some(BoxStats {
        count: sorted.len(),
        lower_whisker,
        q1,
        median,
        q3,
        upper_whisker,
        outliers,
    })
}

/// Equal-width histogram
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    /// `counts.len() + 1` bin boundaries
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
}

impl Histogram {
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    pub fn max_count(&self) -> usize {
        self.counts.iter().copied().max().unwrap_or(0)
    }
}

/// Bin values over `[min, max]` with the last bin closed on the right.
///
/// A constant sample is spread over `[v - 0.5, v + 0.5]`.
pub fn histogram(values: &[f64], bins: usize) -> Option<Histogram> {
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.is_empty() || bins == 0 {
        return None;
    }

    let mut lo = finite.iter().copied().fold(f64::INFINITY, f64::min);
    let mut hi = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if lo == hi {
        lo -= 0.5;
        hi += 0.5;
    }

    let width = (hi - lo) / bins as f64;
    let edges: Vec<f64> = (0..=bins).map(|i| lo + width * i as f64).collect();

    let mut counts = vec![0usize; bins];
    for v in finite {
        let idx = (((v - lo) / width).floor() as usize).min(bins - 1);
        counts[idx] += 1;
    }

    Some(Histogram { edges, counts })
}

/// Headline numbers shown as metric cards
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryMetrics {
    pub respondents: usize,
    pub median_budget: Option<f64>,
    pub mean_frequency: Option<f64>,
    pub mean_importance: Option<f64>,
    /// Mean importance as a percentage of the scale maximum
    pub importance_percent: Option<f64>,
}

pub fn summary_metrics(
    df: &DataFrame,
    schema: &SurveySchema,
) -> Result<SummaryMetrics, DashboardError> {
    let budget = numeric_values(df, &schema.budget_column)?;
    let frequency = numeric_values(df, &schema.frequency_column)?;
    let importance = numeric_values(df, &schema.importance_column)?;

    let mean_importance = mean(&importance);
    let importance_percent = match mean_importance {
        Some(m) if schema.importance_scale_max > 0.0 => {
            Some(m / schema.importance_scale_max * 100.0)
        }
        _ => None,
    };

    Ok(SummaryMetrics {
        respondents: df.height(),
        median_budget: median(&budget),
        mean_frequency: mean(&frequency),
        mean_importance,
        importance_percent,
    })
}

/// Budget distribution of respondents who did and did not pick one option
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetComparison {
    pub column: String,
    pub label: String,
    pub selected: Option<BoxStats>,
    pub not_selected: Option<BoxStats>,
}

/// Split the budget by each comparison indicator. Absent columns are skipped.
pub fn budget_comparisons(
    df: &DataFrame,
    schema: &SurveySchema,
) -> Result<Vec<BudgetComparison>, DashboardError> {
    let mut comparisons = Vec::new();

    for column in &schema.comparison_columns {
        if !has_column(df, column) {
            debug!(%column, "comparison column absent, skipping");
            continue;
        }

        let budget = column_as_f64(df, &schema.budget_column)?;
        let indicator = column_as_f64(df, column)?;

        let mut picked = Vec::new();
        let mut not_picked = Vec::new();
        for (flag, value) in indicator.iter().zip(budget.iter()) {
            match (flag, value) {
                (Some(f), Some(v)) if *f == 1.0 => picked.push(*v),
                (Some(f), Some(v)) if *f == 0.0 => not_picked.push(*v),
                _ => {}
            }
        }

        comparisons.push(BudgetComparison {
            column: column.clone(),
            label: schema.short_label(column).to_string(),
            selected: box_stats(&picked),
            not_selected: box_stats(&not_picked),
        });
    }

    Ok(comparisons)
}

/// Rows where both coordinates are present
pub fn scatter_points(df: &DataFrame, x: &str, y: &str) -> Result<Vec<(f64, f64)>, DashboardError> {
    let xs = column_as_f64(df, x)?;
    let ys = column_as_f64(df, y)?;

    Ok(xs
        .into_iter()
        .zip(ys)
        .filter_map(|pair| match pair {
            (Some(a), Some(b)) => Some((a, b)),
            _ => None,
        })
        .collect())
}
