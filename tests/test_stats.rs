//! Tests for descriptive statistics

use polars::prelude::*;
use rewardlens::config::SurveySchema;
use rewardlens::pipeline::{
    box_stats, budget_comparisons, histogram, mean, median, numeric_values, scatter_points,
    summary_metrics,
};
use rewardlens::DashboardError;

#[path = "common/mod.rs"]
mod common;

#[test]
fn test_summary_metrics() {
    let df = common::create_survey_dataframe();
    let schema = SurveySchema::default();

    let metrics = summary_metrics(&df, &schema).unwrap();

    assert_eq!(metrics.respondents, 6);
    assert_eq!(metrics.median_budget, Some(175000.0));
    assert_eq!(metrics.mean_frequency, Some(3.5));
    assert_eq!(metrics.mean_importance, Some(4.0));
    let pct = metrics.importance_percent.unwrap();
    assert!((pct - 80.0).abs() < 1e-9, "Importance percent should be 80, got {}", pct);
}

#[test]
fn test_summary_metrics_missing_column_is_error() {
    let df = df! { "Freq_Reward" => [1i64, 2] }.unwrap();

    let result = summary_metrics(&df, &SurveySchema::default());

    assert!(matches!(result, Err(DashboardError::ColumnNotFound { .. })));
}

#[test]
fn test_numeric_values_rejects_text() {
    let df = df! { "Nama" => ["a", "b"] }.unwrap();

    let result = numeric_values(&df, "Nama");

    assert!(matches!(result, Err(DashboardError::NotNumeric { .. })));
}

#[test]
fn test_numeric_values_skips_nulls() {
    let df = df! { "x" => [Some(1.0f64), None, Some(3.0)] }.unwrap();

    let values = numeric_values(&df, "x").unwrap();

    assert_eq!(values, vec![1.0, 3.0]);
    assert_eq!(mean(&values), Some(2.0));
    assert_eq!(median(&values), Some(2.0));
}

#[test]
fn test_budget_box_stats_with_outlier() {
    let df = common::create_survey_dataframe();
    let budget = numeric_values(&df, "Budget_Reward").unwrap();

    let stats = box_stats(&budget).unwrap();

    assert_eq!(stats.count, 6);
    assert_eq!(stats.q1, 112500.0);
    assert_eq!(stats.median, 175000.0);
    assert_eq!(stats.q3, 237500.0);
    assert_eq!(stats.lower_whisker, 50000.0);
    assert_eq!(stats.upper_whisker, 250000.0);
    assert_eq!(stats.outliers, vec![2000000.0]);
    assert_eq!(stats.max(), 2000000.0);
    assert_eq!(stats.min(), 50000.0);
}

#[test]
fn test_box_stats_single_value() {
    let stats = box_stats(&[7.0]).unwrap();

    assert_eq!(stats.q1, 7.0);
    assert_eq!(stats.median, 7.0);
    assert_eq!(stats.q3, 7.0);
    assert_eq!(stats.lower_whisker, 7.0);
    assert_eq!(stats.upper_whisker, 7.0);
    assert!(stats.outliers.is_empty());
}

#[test]
fn test_histogram_bins() {
    let values = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];

    let hist = histogram(&values, 5).unwrap();

    assert_eq!(hist.edges, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    assert_eq!(hist.counts, vec![1, 1, 1, 1, 2], "Max value belongs to the last bin");
    assert_eq!(hist.total(), values.len());
}

#[test]
fn test_histogram_total_matches_non_null_count() {
    let df = common::create_survey_dataframe();

    for column in SurveySchema::default().numeric_columns {
        let values = numeric_values(&df, &column).unwrap();
        let hist = histogram(&values, 20).unwrap();
        assert_eq!(hist.counts.len(), 20);
        assert_eq!(hist.total(), values.len(), "Histogram of {} lost values", column);
    }
}

#[test]
fn test_budget_comparisons_skip_absent_columns() {
    let df = common::create_survey_dataframe();
    let schema = SurveySchema::default();

    let comparisons = budget_comparisons(&df, &schema).unwrap();

    assert_eq!(comparisons.len(), 2, "Absent comparison column should be skipped");
    assert_eq!(comparisons[0].column, "Bentuk_Reward_traveling");
    assert_eq!(comparisons[0].label, "traveling");
    assert_eq!(comparisons[1].label, "membeli makanan atau minuman favorit");

    let picked = comparisons[0].selected.as_ref().unwrap();
    let not_picked = comparisons[0].not_selected.as_ref().unwrap();
    assert_eq!(picked.count, 3);
    assert_eq!(picked.median, 150000.0);
    assert_eq!(not_picked.count, 3);
    assert_eq!(not_picked.median, 200000.0);
}

#[test]
fn test_budget_comparison_without_any_selection() {
    let df = df! {
        "Budget_Reward" => [10i64, 20],
        "Bentuk_Reward_traveling" => [0i64, 0],
    }
    .unwrap();

    let comparisons = budget_comparisons(&df, &SurveySchema::default()).unwrap();

    assert_eq!(comparisons.len(), 1);
    assert!(comparisons[0].selected.is_none());
    assert_eq!(comparisons[0].not_selected.as_ref().unwrap().count, 2);
}

#[test]
fn test_scatter_points_drop_incomplete_rows() {
    let df = df! {
        "Freq_Reward" => [Some(1.0f64), Some(2.0), None],
        "Freq_InginReward" => [Some(2.0f64), None, Some(3.0)],
    }
    .unwrap();

    let points = scatter_points(&df, "Freq_Reward", "Freq_InginReward").unwrap();

    assert_eq!(points, vec![(1.0, 2.0)]);
}
