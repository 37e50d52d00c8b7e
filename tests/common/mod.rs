//! Shared test utilities and fixture generators

#![allow(dead_code)]

use polars::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;

/// Small survey in the dashboard's default schema.
///
/// - 6 respondents, `Budget_Reward` has one large outlier (2,000,000)
/// - `Bentuk_Reward_*`: traveling picked 3×, food 4×, hobby 1×
/// - `Trigger_Reward_*`: stress 5×, success 2×
/// - no `Efek_Reward_*` columns
/// - two private columns (`Nama`, `No_Whatsapp`)
pub fn create_survey_dataframe() -> DataFrame {
    df! {
        "Nama" => ["Ayu", "Budi", "Citra", "Dewi", "Eko", "Fajar"],
        "No_Whatsapp" => ["0811", "0812", "0813", "0814", "0815", "0816"],
        "Freq_Reward" => [1i64, 2, 3, 4, 5, 6],
        "Freq_InginReward" => [2i64, 4, 6, 8, 10, 12],
        "Budget_Reward" => [50000i64, 100000, 150000, 200000, 250000, 2000000],
        "Durasi_Reward" => [1i64, 2, 2, 3, 1, 4],
        "Skala_Penting" => [3i64, 4, 5, 4, 3, 5],
        "Bentuk_Reward_traveling" => [1i64, 0, 1, 0, 0, 1],
        "Bentuk_Reward_membeli makanan atau minuman favorit" => [1i64, 1, 1, 1, 0, 0],
        "Bentuk_Reward_hobi" => [0i64, 0, 0, 0, 1, 0],
        "Trigger_Reward_stres" => [1i64, 1, 1, 1, 1, 0],
        "Trigger_Reward_sukses" => [0i64, 1, 0, 0, 0, 1],
    }
    .unwrap()
}

/// The three-column indicator example: A=[1,0,1], B=[1,1,1], C=[0,0,0]
pub fn create_indicator_dataframe() -> DataFrame {
    df! {
        "Bentuk_Reward_A" => [1i64, 0, 1],
        "Bentuk_Reward_B" => [1i64, 1, 1],
        "Bentuk_Reward_C" => [0i64, 0, 0],
        "Freq_Reward" => [3i64, 4, 5],
    }
    .unwrap()
}

/// Indicator columns with random 0/1 values
pub fn create_random_indicator_dataframe(rows: usize, groups: &[(&str, usize)]) -> DataFrame {
    use rand::Rng;
    let mut rng = rand::thread_rng();

    let mut columns: Vec<Column> = Vec::new();
    for (prefix, count) in groups {
        for i in 0..*count {
            let values: Vec<i64> = (0..rows).map(|_| rng.gen_range(0..2)).collect();
            columns.push(Column::new(format!("{}_{}", prefix, i).into(), values));
        }
    }

    DataFrame::new(columns).unwrap()
}

/// Create a temporary directory with a test CSV file
pub fn create_temp_csv(df: &mut DataFrame) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("survey.csv");

    let mut file = std::fs::File::create(&csv_path).unwrap();
    CsvWriter::new(&mut file).finish(df).unwrap();

    (temp_dir, csv_path)
}

/// Assert that a DataFrame contains specific columns
pub fn assert_has_columns(df: &DataFrame, expected_cols: &[&str]) {
    let actual_cols: Vec<String> = df.get_column_names().iter().map(|s| s.to_string()).collect();
    for col in expected_cols {
        assert!(
            actual_cols.contains(&col.to_string()),
            "Missing expected column: '{}'. Actual columns: {:?}",
            col,
            actual_cols
        );
    }
}

/// Assert that a DataFrame does NOT contain specific columns
pub fn assert_missing_columns(df: &DataFrame, unexpected_cols: &[&str]) {
    let actual_cols: Vec<String> = df.get_column_names().iter().map(|s| s.to_string()).collect();
    for col in unexpected_cols {
        assert!(
            !actual_cols.contains(&col.to_string()),
            "Unexpected column still present: '{}'",
            col
        );
    }
}
