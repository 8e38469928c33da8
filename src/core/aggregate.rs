//! Summaries and chart series for the dashboard.
//!
//! Aggregation is a pure function of a [`DataFile`]: no clock, no I/O,
//! ordered maps only, so the same file always serialises to the same JSON.

use crate::errors::{AppError, AppResult};
use crate::models::{DataFile, Metric, Reading};
use crate::utils::date::serialize_chart;
use chrono::NaiveDateTime;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricSummary {
    /// Value of the last reading that has this metric.
    pub current: f64,
    pub min: f64,
    pub max: f64,
    pub avg: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    #[serde(serialize_with = "serialize_chart")]
    pub x: NaiveDateTime,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub metric: Metric,
    pub label: &'static str,
    pub unit: &'static str,
    pub color: &'static str,
    #[serde(rename = "data")]
    pub points: Vec<ChartPoint>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeRange {
    #[serde(serialize_with = "serialize_chart")]
    pub start: NaiveDateTime,
    #[serde(serialize_with = "serialize_chart")]
    pub end: NaiveDateTime,
}

/// Everything the dashboard needs for one file.
///
/// A metric with no values in the file has no key in either map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Aggregation {
    pub file: String,
    pub readings: usize,
    #[serde(rename = "stats")]
    pub per_metric: BTreeMap<Metric, MetricSummary>,
    #[serde(rename = "chart_data")]
    pub series: BTreeMap<Metric, ChartSeries>,
    #[serde(rename = "timestamp_range")]
    pub range: TimeRange,
}

#[derive(Default)]
struct Accumulator {
    sum: f64,
    min: f64,
    max: f64,
    last: f64,
    points: Vec<ChartPoint>,
}

impl Accumulator {
    fn push(&mut self, x: NaiveDateTime, y: f64) {
        if self.points.is_empty() {
            self.min = y;
            self.max = y;
        } else {
            self.min = self.min.min(y);
            self.max = self.max.max(y);
        }
        self.sum += y;
        self.last = y;
        self.points.push(ChartPoint { x, y });
    }

    fn summary(&self) -> MetricSummary {
        MetricSummary {
            current: self.last,
            min: self.min,
            max: self.max,
            avg: self.sum / self.points.len() as f64,
        }
    }
}

/// Summarise a file. An empty file is [`AppError::NoData`].
///
/// Rows are visited in timestamp order even if the file on disk was not
/// sorted (files written by older tools were plain appends).
pub fn aggregate(file: &DataFile) -> AppResult<Aggregation> {
    let mut rows: Vec<&Reading> = file.readings.iter().collect();
    rows.sort_by_key(|r| r.timestamp);

    let (Some(first), Some(last)) = (rows.first(), rows.last()) else {
        return Err(AppError::NoData(file.name.clone()));
    };
    let range = TimeRange {
        start: first.timestamp,
        end: last.timestamp,
    };

    let mut acc: BTreeMap<Metric, Accumulator> = BTreeMap::new();
    for r in &rows {
        for metric in Metric::ALL {
            if let Some(v) = r.value(metric) {
                acc.entry(metric).or_default().push(r.timestamp, v);
            }
        }
    }

    let mut per_metric = BTreeMap::new();
    let mut series = BTreeMap::new();

    for (metric, a) in acc {
        per_metric.insert(metric, a.summary());
        series.insert(
            metric,
            ChartSeries {
                metric,
                label: metric.label(),
                unit: metric.unit(),
                color: metric.color(),
                points: a.points,
            },
        );
    }

    Ok(Aggregation {
        file: file.name.clone(),
        readings: rows.len(),
        per_metric,
        series,
        range,
    })
}
