#![allow(dead_code)]
use aranetlog::models::{Metric, RawReading, Reading};
use aranetlog::utils::date::parse_timestamp;
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::NaiveDateTime;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub fn aranet() -> Command {
    cargo_bin_cmd!("aranetlog")
}

/// Create a fresh, empty directory inside the system temp dir
pub fn temp_workspace(name: &str) -> PathBuf {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("aranetlog_test_{name}"));
    fs::remove_dir_all(&path).ok();
    fs::create_dir_all(&path).expect("create temp workspace");
    path
}

pub fn config_path(ws: &Path) -> String {
    ws.join("aranetlog.yaml").to_string_lossy().to_string()
}

pub fn data_dir(ws: &Path) -> PathBuf {
    ws.join("data")
}

/// Run `init` so the config, data dir and log file all live inside `ws`
pub fn init_workspace(name: &str) -> PathBuf {
    let ws = temp_workspace(name);
    aranet()
        .args(["--config", &config_path(&ws), "init"])
        .assert()
        .success();
    ws
}

pub fn write_file(path: &Path, content: &str) -> String {
    fs::write(path, content).expect("write fixture");
    path.to_string_lossy().to_string()
}

pub fn ts(s: &str) -> NaiveDateTime {
    parse_timestamp(s).expect("valid test timestamp")
}

pub fn reading(t: &str, co2: f64, temperature: f64) -> Reading {
    Reading::at(ts(t))
        .with(Metric::Co2, co2)
        .with(Metric::Temperature, temperature)
}

pub fn raw(t: &str, co2: f64) -> RawReading {
    RawReading::new(t).with(Metric::Co2, co2)
}

/// A poller batch spanning two days, as JSON
pub const TWO_DAY_BATCH: &str = r#"[
  {"timestamp": "2025-03-01T23:50:00", "co2": 640, "temperature": 21.5, "humidity": 41, "pressure": 1012.3},
  {"timestamp": "2025-03-01T23:55:00", "co2": 655, "temperature": 21.4, "humidity": 41, "pressure": 1012.2},
  {"timestamp": "2025-03-02T00:00:00", "co2": 660, "temperature": 21.3, "humidity": 42, "pressure": 1012.2}
]"#;
