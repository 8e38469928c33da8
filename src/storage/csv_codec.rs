// src/storage/csv_codec.rs

use super::parse_number;
use crate::errors::{AppError, AppResult};
use crate::models::{Metric, RawReading, Reading};
use crate::utils::date::format_storage;
use csv::{ReaderBuilder, Trim, Writer};
use std::io;

const TIMESTAMP_COLUMN: &str = "timestamp";
const DEVICE_COLUMN: &str = "device_mac";

/// Read CSV rows by header name. Unknown columns are ignored and short rows
/// simply leave the missing cells absent.
pub(crate) fn decode(file: &str, content: &str) -> AppResult<Vec<RawReading>> {
    let mut rdr = ReaderBuilder::new()
        .flexible(true)
        .trim(Trim::All)
        .from_reader(content.as_bytes());

    let headers = rdr
        .headers()
        .map_err(|e| AppError::format(file, format!("CSV header: {e}")))?
        .clone();

    let column = |name: &str| headers.iter().position(|h| h.eq_ignore_ascii_case(name));

    let ts_idx = column(TIMESTAMP_COLUMN)
        .ok_or_else(|| AppError::format(file, "CSV header has no 'timestamp' column"))?;
    let mac_idx = column(DEVICE_COLUMN);
    // older files use short names like `temp` / `humi`
    let metric_idx: Vec<(Metric, usize)> = headers
        .iter()
        .enumerate()
        .filter_map(|(i, h)| Metric::from_key(h).map(|m| (m, i)))
        .collect();

    let mut out = Vec::new();

    for (line, record) in rdr.records().enumerate() {
        let record =
            record.map_err(|e| AppError::format(file, format!("CSV row {}: {e}", line + 2)))?;

        let cell = |idx: usize| {
            record
                .get(idx)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };

        let mut raw = RawReading {
            timestamp: cell(ts_idx),
            device_mac: mac_idx.and_then(cell),
            ..RawReading::default()
        };
        for (metric, idx) in &metric_idx {
            raw.set(*metric, record.get(*idx).and_then(parse_number));
        }

        out.push(raw);
    }

    Ok(out)
}

/// Header: `timestamp`, `device_mac` when any reading has one, then every
/// metric with at least one value. Absent values are empty cells.
pub(crate) fn encode(readings: &[Reading]) -> io::Result<Vec<u8>> {
    let with_device = readings.iter().any(|r| r.device_mac.is_some());
    let metrics: Vec<Metric> = Metric::ALL
        .into_iter()
        .filter(|m| readings.iter().any(|r| r.value(*m).is_some()))
        .collect();

    let mut header = vec![TIMESTAMP_COLUMN];
    if with_device {
        header.push(DEVICE_COLUMN);
    }
    header.extend(metrics.iter().map(|m| m.key()));

    let mut wtr = Writer::from_writer(Vec::new());
    wtr.write_record(&header)?;

    for r in readings {
        let mut row = vec![format_storage(&r.timestamp)];
        if with_device {
            row.push(r.device_mac.clone().unwrap_or_default());
        }
        for m in &metrics {
            row.push(r.value(*m).map(|v| v.to_string()).unwrap_or_default());
        }
        wtr.write_record(&row)?;
    }

    wtr.flush()?;
    wtr.into_inner().map_err(|e| e.into_error())
}
