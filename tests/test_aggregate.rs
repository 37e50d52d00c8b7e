//! Tests for categorical top counts

use polars::prelude::*;
use rewardlens::pipeline::{top_counts, DEFAULT_TOP_N};

#[path = "common/mod.rs"]
mod common;

#[test]
fn test_top_counts_example() {
    let df = common::create_indicator_dataframe();

    let counts = top_counts(&df, "Bentuk_Reward", 2);

    assert_eq!(
        counts,
        vec![
            ("Bentuk_Reward_B".to_string(), 3.0),
            ("Bentuk_Reward_A".to_string(), 2.0),
        ]
    );
}

#[test]
fn test_no_matching_prefix_is_empty() {
    let df = common::create_indicator_dataframe();

    let counts = top_counts(&df, "Nonexistent_", DEFAULT_TOP_N);

    assert!(counts.is_empty(), "Unmatched prefix should yield an empty result");
}

#[test]
fn test_fewer_columns_than_top_n_returns_all() {
    let df = common::create_indicator_dataframe();

    let counts = top_counts(&df, "Bentuk_Reward", DEFAULT_TOP_N);

    assert_eq!(counts.len(), 3);
    assert_eq!(counts[2], ("Bentuk_Reward_C".to_string(), 0.0));
}

#[test]
fn test_prefix_match_is_case_sensitive_and_anchored() {
    let df = df! {
        "Bentuk_Reward_A" => [1i64, 1],
        "bentuk_reward_B" => [1i64, 1],
        "X_Bentuk_Reward_C" => [1i64, 1],
    }
    .unwrap();

    let counts = top_counts(&df, "Bentuk_Reward", DEFAULT_TOP_N);

    assert_eq!(counts.len(), 1);
    assert_eq!(counts[0].0, "Bentuk_Reward_A");
}

#[test]
fn test_result_properties_on_random_data() {
    let df = common::create_random_indicator_dataframe(200, &[("Trigger_Reward", 15), ("Efek_Reward", 4)]);

    for (prefix, matching) in [("Trigger_Reward", 15usize), ("Efek_Reward", 4)] {
        for top_n in [1usize, 4, 10, 20] {
            let counts = top_counts(&df, prefix, top_n);

            assert_eq!(counts.len(), top_n.min(matching), "length for {} top {}", prefix, top_n);
            for (name, _) in &counts {
                assert!(name.starts_with(prefix), "{} does not start with {}", name, prefix);
            }
            for pair in counts.windows(2) {
                assert!(
                    pair[0].1 >= pair[1].1,
                    "Counts should be sorted descending: {} >= {}",
                    pair[0].1,
                    pair[1].1
                );
            }
        }
    }
}

#[test]
fn test_sum_equals_number_of_ones() {
    let df = common::create_random_indicator_dataframe(50, &[("Bentuk_Reward", 3)]);

    for (name, count) in top_counts(&df, "Bentuk_Reward", DEFAULT_TOP_N) {
        let ones = df
            .column(&name)
            .unwrap()
            .i64()
            .unwrap()
            .into_iter()
            .filter(|v| *v == Some(1))
            .count();
        assert_eq!(count, ones as f64, "Sum of {} should equal its number of ones", name);
    }
}

#[test]
fn test_repeated_aggregation_is_identical() {
    let df = common::create_survey_dataframe();
    let before = df.clone();

    let first = top_counts(&df, "Bentuk_Reward", DEFAULT_TOP_N);
    let second = top_counts(&df, "Bentuk_Reward", DEFAULT_TOP_N);

    assert_eq!(first, second);
    assert!(df.equals(&before), "Aggregation must not mutate the dataset");
}

#[test]
fn test_nulls_are_ignored_and_strings_skipped() {
    let df = df! {
        "Efek_Reward_senang" => [Some(1i64), None, Some(1)],
        "Efek_Reward_catatan" => ["a", "b", "c"],
    }
    .unwrap();

    let counts = top_counts(&df, "Efek_Reward", DEFAULT_TOP_N);

    assert_eq!(counts, vec![("Efek_Reward_senang".to_string(), 2.0)]);
}

#[test]
fn test_survey_groups() {
    let df = common::create_survey_dataframe();

    let bentuk = top_counts(&df, "Bentuk_Reward", DEFAULT_TOP_N);
    assert_eq!(bentuk[0].0, "Bentuk_Reward_membeli makanan atau minuman favorit");
    assert_eq!(bentuk[0].1, 4.0);
    assert_eq!(bentuk[1], ("Bentuk_Reward_traveling".to_string(), 3.0));
    assert_eq!(bentuk[2], ("Bentuk_Reward_hobi".to_string(), 1.0));

    assert!(top_counts(&df, "Efek_Reward", DEFAULT_TOP_N).is_empty());
}

#[test]
fn test_nan_cells_are_skipped_in_totals() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("nan.csv");
    std::fs::write(&csv_path, "P_a,P_b,P_c\n1,NaN,1\n0,1,1\n0,1,1\n").unwrap();
    let df = rewardlens::pipeline::load_dataset(&csv_path, 100).unwrap();

    let counts = top_counts(&df, "P_", DEFAULT_TOP_N);

    assert_eq!(
        counts,
        vec![
            ("P_c".to_string(), 3.0),
            ("P_b".to_string(), 2.0),
            ("P_a".to_string(), 1.0),
        ]
    );
}
