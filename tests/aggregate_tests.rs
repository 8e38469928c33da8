mod common;

use aranetlog::core::aggregate::{MetricSummary, aggregate};
use aranetlog::models::{DataFile, Metric, Reading};
use aranetlog::storage::FileFormat;
use common::{reading, ts};
use serde_json::Value;

fn file_with(readings: Vec<Reading>) -> DataFile {
    DataFile::new("aranet4_data_2025-03-01.json", FileFormat::Json).with_readings(readings)
}

#[test]
fn test_summary_skips_absent_values() {
    let file = file_with(vec![
        Reading::at(ts("2025-03-01T10:00:00")).with(Metric::Co2, 400.0),
        Reading::at(ts("2025-03-01T10:05:00")).with(Metric::Co2, 420.0),
        Reading::at(ts("2025-03-01T10:10:00")).with(Metric::Temperature, 21.0),
    ]);

    let agg = aggregate(&file).expect("file has data");

    assert_eq!(
        agg.per_metric[&Metric::Co2],
        MetricSummary {
            current: 420.0,
            min: 400.0,
            max: 420.0,
            avg: 410.0,
        }
    );
    assert_eq!(agg.series[&Metric::Co2].points.len(), 2);
    // range still covers the last row, even though it has no CO2
    assert_eq!(agg.range.end, ts("2025-03-01T10:10:00"));
    assert_eq!(agg.readings, 3);
}

#[test]
fn test_metrics_without_values_are_omitted() {
    let file = file_with(vec![
        Reading::at(ts("2025-03-01T10:00:00")).with(Metric::Temperature, 20.5),
        Reading::at(ts("2025-03-01T10:05:00")).with(Metric::Temperature, 21.5),
    ]);

    let agg = aggregate(&file).expect("file has data");

    assert_eq!(agg.per_metric.len(), 1);
    assert!(agg.per_metric.contains_key(&Metric::Temperature));
    for missing in [Metric::Co2, Metric::Humidity, Metric::Pressure] {
        assert!(!agg.per_metric.contains_key(&missing));
        assert!(!agg.series.contains_key(&missing));
    }

    let json = serde_json::to_value(&agg).expect("serializable");
    let stats = json["stats"].as_object().expect("stats object");
    assert_eq!(stats.keys().collect::<Vec<_>>(), vec!["temperature"]);
    assert!(json["chart_data"].get("co2").is_none());
}

#[test]
fn test_empty_file_is_no_data() {
    let err = aggregate(&file_with(Vec::new())).expect_err("empty file has no data");
    assert!(err.is_no_data());
}

#[test]
fn test_current_is_last_present_value_in_time_order() {
    // stored out of order, as older append-only files can be
    let file = file_with(vec![
        reading("2025-03-01T10:10:00", 800.0, 22.0),
        reading("2025-03-01T10:00:00", 600.0, 20.0),
        Reading::at(ts("2025-03-01T10:20:00")).with(Metric::Temperature, 23.0),
        reading("2025-03-01T10:05:00", 700.0, 21.0),
    ]);

    let agg = aggregate(&file).expect("file has data");

    assert_eq!(agg.per_metric[&Metric::Co2].current, 800.0);
    assert_eq!(agg.per_metric[&Metric::Temperature].current, 23.0);
    assert_eq!(agg.range.start, ts("2025-03-01T10:00:00"));
    assert_eq!(agg.range.end, ts("2025-03-01T10:20:00"));

    let xs: Vec<_> = agg.series[&Metric::Co2].points.iter().map(|p| p.x).collect();
    let mut sorted = xs.clone();
    sorted.sort();
    assert_eq!(xs, sorted);
}

#[test]
fn test_aggregation_is_deterministic() {
    let file = file_with(vec![
        reading("2025-03-01T10:00:00", 600.0, 20.0),
        reading("2025-03-01T10:05:00", 700.0, 21.0),
    ]);

    let a = serde_json::to_string(&aggregate(&file).expect("data")).expect("json");
    let b = serde_json::to_string(&aggregate(&file.clone()).expect("data")).expect("json");
    assert_eq!(a, b);
}

#[test]
fn test_dashboard_payload_shape() {
    let file = file_with(vec![
        Reading::at(ts("2025-03-01T10:00:00")).with(Metric::Co2, 400.0),
        Reading::at(ts("2025-03-01T10:05:00")).with(Metric::Co2, 420.0),
    ]);

    let json: Value = serde_json::to_value(aggregate(&file).expect("data")).expect("json");

    assert_eq!(json["file"], "aranet4_data_2025-03-01.json");
    assert_eq!(json["readings"], 2);
    assert_eq!(json["stats"]["co2"]["avg"], 410.0);
    assert_eq!(json["chart_data"]["co2"]["label"], "CO2 (ppm)");
    assert_eq!(json["chart_data"]["co2"]["unit"], "ppm");
    assert_eq!(json["chart_data"]["co2"]["data"][0]["x"], "2025-03-01 10:00:00");
    assert_eq!(json["chart_data"]["co2"]["data"][1]["y"], 420.0);
    assert_eq!(json["timestamp_range"]["start"], "2025-03-01 10:00:00");
    assert_eq!(json["timestamp_range"]["end"], "2025-03-01 10:05:00");
}
