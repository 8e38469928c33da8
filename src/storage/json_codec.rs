// src/storage/json_codec.rs

use super::parse_number;
use crate::errors::{AppError, AppResult};
use crate::models::{Metric, RawReading, Reading};
use serde_json::Value;
use std::io;

/// Read a JSON array of reading objects.
///
/// Numbers may also be given as numeric strings; anything else in a metric
/// slot counts as absent.
pub(crate) fn decode(file: &str, content: &str) -> AppResult<Vec<RawReading>> {
    let doc: Value = serde_json::from_str(content)
        .map_err(|e| AppError::format(file, format!("invalid JSON: {e}")))?;

    let items = doc
        .as_array()
        .ok_or_else(|| AppError::format(file, "expected a JSON array of readings"))?;

    let mut out = Vec::with_capacity(items.len());

    for (i, item) in items.iter().enumerate() {
        let obj = item
            .as_object()
            .ok_or_else(|| AppError::format(file, format!("entry {i} is not an object")))?;

        let mut raw = RawReading {
            timestamp: obj.get("timestamp").and_then(text),
            device_mac: obj.get("device_mac").and_then(text),
            ..RawReading::default()
        };
        for metric in Metric::ALL {
            raw.set(metric, obj.get(metric.key()).and_then(number));
        }

        out.push(raw);
    }

    Ok(out)
}

/// Pretty-printed array; absent metrics are left out of each object.
pub(crate) fn encode(readings: &[Reading]) -> io::Result<Vec<u8>> {
    let mut json = serde_json::to_vec_pretty(readings)
        .map_err(|e| io::Error::other(format!("JSON serialization error: {e}")))?;
    json.push(b'\n');
    Ok(json)
}

fn text(v: &Value) -> Option<String> {
    v.as_str()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn number(v: &Value) -> Option<f64> {
    match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_number(s),
        _ => None,
    }
}
