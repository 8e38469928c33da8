use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Serializer;

/// Format written to disk (ISO 8601, fraction only when non-zero).
pub const STORAGE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Format used for chart points and time ranges.
pub const CHART_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parse a sensor timestamp.
///
/// Naive ISO forms are taken as-is; RFC 3339 values with an offset keep
/// their local wall-clock part.
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();

    for fmt in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }

    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.naive_local())
}

pub fn format_storage(ts: &NaiveDateTime) -> String {
    ts.format(STORAGE_FORMAT).to_string()
}

pub fn format_chart(ts: &NaiveDateTime) -> String {
    ts.format(CHART_FORMAT).to_string()
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// serde helper: render a timestamp in [`CHART_FORMAT`].
pub fn serialize_chart<S: Serializer>(ts: &NaiveDateTime, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(&ts.format(CHART_FORMAT))
}
