//! End-to-end tests running the rewardlens binary

use assert_cmd::Command;
use predicates::prelude::*;

#[path = "common/mod.rs"]
mod common;

fn rewardlens(dir: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("rewardlens").unwrap();
    cmd.current_dir(dir).env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_static_report() {
    let mut df = common::create_survey_dataframe();
    let (temp_dir, csv_path) = common::create_temp_csv(&mut df);

    rewardlens(temp_dir.path())
        .args(["--no-interactive", "-i"])
        .arg(&csv_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Jumlah Responden"))
        .stdout(predicate::str::contains("Lihat Data (5 Baris Pertama)"))
        .stdout(predicate::str::contains("Rp175,000"))
        .stdout(predicate::str::contains("Top Bentuk Reward"))
        .stdout(predicate::str::contains("traveling"))
        .stdout(predicate::str::contains("Ayu").not());
}

#[test]
fn test_keep_private_shows_names() {
    let mut df = common::create_survey_dataframe();
    let (temp_dir, csv_path) = common::create_temp_csv(&mut df);

    rewardlens(temp_dir.path())
        .args(["--no-interactive", "--keep-private", "-i"])
        .arg(&csv_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Ayu"));
}

#[test]
fn test_export_json() {
    let mut df = common::create_survey_dataframe();
    let (temp_dir, csv_path) = common::create_temp_csv(&mut df);
    let out = temp_dir.path().join("out.json");

    rewardlens(temp_dir.path())
        .arg("export")
        .arg(&csv_path)
        .arg(&out)
        .assert()
        .success();

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(json["dashboard"]["metrics"]["respondents"], 6);
    assert_eq!(json["dashboard"]["metrics"]["median_budget"], 175000.0);
    assert_eq!(json["dashboard"]["categories"][0]["counts"][0][1], 4.0);
    assert_eq!(
        json["metadata"]["dropped_private_columns"],
        serde_json::json!(["Nama", "No_Whatsapp"])
    );
}

#[test]
fn test_missing_numeric_column_fails() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("broken.csv");
    std::fs::write(&csv_path, "Freq_Reward,Bentuk_Reward_a\n1,0\n2,1\n").unwrap();

    rewardlens(temp_dir.path())
        .args(["--no-interactive", "-i"])
        .arg(&csv_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_requires_input() {
    let temp_dir = tempfile::TempDir::new().unwrap();

    rewardlens(temp_dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file is required"));
}

#[test]
fn test_init_schema_writes_file_once() {
    let temp_dir = tempfile::TempDir::new().unwrap();

    rewardlens(temp_dir.path()).arg("init-schema").assert().success();
    assert!(temp_dir.path().join("rewardlens.toml").exists());

    rewardlens(temp_dir.path())
        .arg("init-schema")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_schema_file_overrides_defaults() {
    let mut df = common::create_survey_dataframe();
    let (temp_dir, csv_path) = common::create_temp_csv(&mut df);
    std::fs::write(
        temp_dir.path().join("rewardlens.toml"),
        "top_n = 1\n\n[[category_groups]]\nprefix = \"Trigger_Reward\"\ntitle = \"Pemicu Utama\"\n",
    )
    .unwrap();
    let out = temp_dir.path().join("out.json");

    rewardlens(temp_dir.path())
        .arg("export")
        .arg(&csv_path)
        .arg(&out)
        .assert()
        .success();

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    let categories = json["dashboard"]["categories"].as_array().unwrap();
    assert_eq!(categories.len(), 1);
    assert_eq!(categories[0]["title"], "Pemicu Utama");
    assert_eq!(categories[0]["counts"].as_array().unwrap().len(), 1);
    assert_eq!(categories[0]["counts"][0][0], "Trigger_Reward_stres");
}

#[test]
fn test_export_accepts_shared_flags_after_subcommand() {
    let mut df = common::create_survey_dataframe();
    let (temp_dir, csv_path) = common::create_temp_csv(&mut df);
    let out = temp_dir.path().join("out.json");

    rewardlens(temp_dir.path())
        .arg("export")
        .arg(&csv_path)
        .arg(&out)
        .args(["--keep-private", "--top-n", "1"])
        .assert()
        .success();

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(json["metadata"]["dropped_private_columns"], serde_json::json!([]));
    assert_eq!(json["dashboard"]["preview"]["columns"][0], "Nama");
    assert_eq!(
        json["dashboard"]["categories"][0]["counts"].as_array().unwrap().len(),
        1
    );
}

#[test]
fn test_rust_log_enables_library_logging() {
    let mut df = common::create_survey_dataframe();
    let (temp_dir, csv_path) = common::create_temp_csv(&mut df);

    rewardlens(temp_dir.path())
        .env("RUST_LOG", "debug")
        .args(["--no-interactive", "-i"])
        .arg(&csv_path)
        .assert()
        .success()
        .stderr(predicate::str::contains("computing dashboard pass"));

    rewardlens(temp_dir.path())
        .args(["--no-interactive", "-i"])
        .arg(&csv_path)
        .assert()
        .success()
        .stderr(predicate::str::contains("computing dashboard pass").not());
}
