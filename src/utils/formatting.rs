//! Formatting utilities used for CLI outputs.

use crate::models::Metric;
use chrono::{DateTime, Local};
use std::time::SystemTime;

pub fn bold(s: &str) -> String {
    format!("\x1b[1m{}\x1b[0m", s)
}

/// Value with the metric's display precision, e.g. `412` ppm or `21.4` °C.
pub fn format_value(metric: Metric, value: f64) -> String {
    format!("{:.*}", metric.precision(), value)
}

pub fn format_value_with_unit(metric: Metric, value: f64) -> String {
    format!("{} {}", format_value(metric, value), metric.unit())
}

/// File size in B / KB / MB.
pub fn human_size(bytes: u64) -> String {
    const KB: f64 = 1024.0;
    let b = bytes as f64;

    if b < KB {
        format!("{bytes} B")
    } else if b < KB * KB {
        format!("{:.1} KB", b / KB)
    } else {
        format!("{:.2} MB", b / (KB * KB))
    }
}

pub fn format_modified(t: SystemTime) -> String {
    DateTime::<Local>::from(t).format("%Y-%m-%d %H:%M").to_string()
}
