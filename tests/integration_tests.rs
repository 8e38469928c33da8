mod common;

use common::{TWO_DAY_BATCH, aranet, config_path, data_dir, init_workspace, write_file};
use predicates::prelude::*;
use predicates::str::contains;
use serde_json::Value;
use std::fs;

#[test]
fn test_init_creates_config_and_data_dir() {
    let ws = init_workspace("init_creates");

    assert!(ws.join("aranetlog.yaml").exists());
    assert!(data_dir(&ws).is_dir());

    // a second init must not clobber the existing file
    aranet()
        .args(["--config", &config_path(&ws), "init"])
        .assert()
        .failure()
        .stderr(contains("already exists"));

    aranet()
        .args(["--config", &config_path(&ws), "init", "--force"])
        .assert()
        .success();
}

#[test]
fn test_ingest_then_list_and_summarise() {
    let ws = init_workspace("ingest_flow");
    let cfg = config_path(&ws);
    let batch = write_file(&ws.join("batch.json"), TWO_DAY_BATCH);

    aranet()
        .args(["--config", &cfg, "ingest", "--input", &batch])
        .assert()
        .success()
        .stdout(contains("aranet4_data_2025-03-01.csv"))
        .stdout(contains("aranet4_data_2025-03-02.csv"))
        .stdout(contains("3 readings stored in 2 file(s)"));

    aranet()
        .args(["--config", &cfg, "files"])
        .assert()
        .success()
        .stdout(contains("aranet4_data_2025-03-01.csv"))
        .stdout(contains("aranet4_data_2025-03-02.csv"));

    aranet()
        .args(["--config", &cfg, "files", "--range", "2025-03-02"])
        .assert()
        .success()
        .stdout(contains("aranet4_data_2025-03-02.csv"))
        .stdout(contains("aranet4_data_2025-03-01.csv").not());

    let out = aranet()
        .args([
            "--config",
            &cfg,
            "summary",
            "--json",
            "--file",
            "aranet4_data_2025-03-01.csv",
        ])
        .output()
        .expect("run summary");
    assert!(out.status.success());

    let json: Value = serde_json::from_slice(&out.stdout).expect("summary prints JSON");
    assert_eq!(json["readings"], 2);
    assert_eq!(json["stats"]["co2"]["avg"], 647.5);
    assert_eq!(json["stats"]["co2"]["current"], 655.0);
    assert_eq!(json["chart_data"]["co2"]["data"].as_array().map(Vec::len), Some(2));
    assert_eq!(json["timestamp_range"]["end"], "2025-03-01 23:55:00");
}

#[test]
fn test_reingesting_the_same_batch_adds_nothing() {
    let ws = init_workspace("reingest");
    let cfg = config_path(&ws);
    let batch = write_file(&ws.join("batch.json"), TWO_DAY_BATCH);

    for _ in 0..2 {
        aranet()
            .args(["--config", &cfg, "ingest", "--input", &batch])
            .assert()
            .success();
    }

    let day1 = fs::read_to_string(data_dir(&ws).join("aranet4_data_2025-03-01.csv"))
        .expect("day file written");
    // header plus two readings
    assert_eq!(day1.lines().count(), 3);
}

#[test]
fn test_ingest_from_stdin() {
    let ws = init_workspace("stdin_ingest");
    let cfg = config_path(&ws);

    aranet()
        .args(["--config", &cfg, "ingest", "--input", "-"])
        .write_stdin(TWO_DAY_BATCH)
        .assert()
        .success();

    assert!(
        data_dir(&ws)
            .join("aranet4_data_2025-03-02.csv")
            .exists()
    );
}

#[test]
fn test_ingest_reports_skipped_readings() {
    let ws = init_workspace("skipped_ingest");
    let cfg = config_path(&ws);
    let batch = write_file(
        &ws.join("batch.json"),
        r#"[{"timestamp": "2025-03-01T10:00:00", "co2": 400}, {"co2": 999}]"#,
    );

    aranet()
        .args(["--config", &cfg, "ingest", "--input", &batch])
        .assert()
        .success()
        .stdout(contains("1 skipped"))
        .stderr(contains("Malformed reading"));
}

#[test]
fn test_dry_run_leaves_data_dir_empty() {
    let ws = init_workspace("dry_run_cli");
    let cfg = config_path(&ws);
    let batch = write_file(&ws.join("batch.json"), TWO_DAY_BATCH);

    aranet()
        .args(["--config", &cfg, "ingest", "--input", &batch, "--dry-run"])
        .assert()
        .success()
        .stdout(contains("Dry run"));

    let entries = fs::read_dir(data_dir(&ws)).expect("data dir").count();
    assert_eq!(entries, 0);
}

#[test]
fn test_summary_without_data_is_not_a_failure() {
    let ws = init_workspace("summary_empty");
    let cfg = config_path(&ws);

    aranet()
        .args(["--config", &cfg, "summary", "--json"])
        .assert()
        .success()
        .stdout(contains("\"error\""));

    aranet()
        .args(["--config", &cfg, "summary"])
        .assert()
        .success()
        .stderr(contains("No data available"));
}

#[test]
fn test_summary_with_wrong_format_fails() {
    let ws = init_workspace("summary_format");
    let cfg = config_path(&ws);
    write_file(
        &data_dir(&ws).join("day.json"),
        r#"[{"timestamp": "2025-03-01T10:00:00", "co2": 400}]"#,
    );

    aranet()
        .args([
            "--config", &cfg, "summary", "--file", "day.json", "--format", "csv",
        ])
        .assert()
        .failure()
        .stderr(contains("Format error"));
}

#[test]
fn test_data_dir_override() {
    let ws = init_workspace("data_dir_override");
    let cfg = config_path(&ws);
    let other = ws.join("elsewhere");
    let batch = write_file(&ws.join("batch.json"), TWO_DAY_BATCH);

    aranet()
        .args([
            "--config",
            &cfg,
            "--data-dir",
            &other.to_string_lossy(),
            "ingest",
            "--input",
            &batch,
        ])
        .assert()
        .success();

    assert!(other.join("aranet4_data_2025-03-01.csv").exists());
    assert!(!data_dir(&ws).join("aranet4_data_2025-03-01.csv").exists());
}

#[test]
fn test_log_print_shows_ingest_entries() {
    let ws = init_workspace("log_print");
    let cfg = config_path(&ws);
    let batch = write_file(&ws.join("batch.json"), TWO_DAY_BATCH);

    aranet()
        .args(["--config", &cfg, "ingest", "--input", &batch])
        .assert()
        .success();

    let log = fs::read_to_string(ws.join("aranetlog.log")).expect("log written");
    assert!(log.contains(" - aranetlog - INFO - [ingest] "));

    aranet()
        .args(["--config", &cfg, "log", "--print"])
        .assert()
        .success()
        .stdout(contains("ingest"))
        .stdout(contains("init"));
}

#[test]
fn test_config_check_rejects_bad_values() {
    let ws = init_workspace("config_check");
    let cfg = config_path(&ws);

    aranet()
        .args(["--config", &cfg, "config", "--check"])
        .assert()
        .success()
        .stdout(contains("Configuration is valid"));

    let yaml = fs::read_to_string(&cfg).expect("config written");
    let yaml = yaml.replace("mac_address: null", "mac_address: not-a-mac");
    fs::write(&cfg, yaml).expect("rewrite config");

    aranet()
        .args(["--config", &cfg, "config", "--check"])
        .assert()
        .failure()
        .stderr(contains("not-a-mac"));
}
