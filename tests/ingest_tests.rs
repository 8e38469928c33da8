mod common;

use aranetlog::core::ingest::{ingest, merge, parse_batch};
use aranetlog::errors::AppError;
use aranetlog::models::{DataFile, Metric, RawReading};
use aranetlog::storage::FileFormat;
use common::{raw, reading, ts};

fn empty_file() -> DataFile {
    DataFile::new("aranet4_data_2025-03-01.csv", FileFormat::Csv)
}

#[test]
fn test_ingest_sorts_out_of_order_readings() {
    let batch = vec![
        raw("2025-03-01T10:10:00", 430.0),
        raw("2025-03-01T10:00:00", 410.0),
        raw("2025-03-01T10:05:00", 420.0),
    ];

    let out = ingest(empty_file(), batch);

    assert_eq!(out.accepted, 3);
    assert_eq!(out.skipped, 0);
    assert!(out.file.is_sorted());
    let co2: Vec<f64> = out.file.readings.iter().filter_map(|r| r.co2).collect();
    assert_eq!(co2, vec![410.0, 420.0, 430.0]);
}

#[test]
fn test_ingest_is_idempotent_without_new_readings() {
    let batch = vec![
        raw("2025-03-01T10:05:00", 420.0),
        raw("2025-03-01T10:00:00", 410.0),
    ];

    let once = ingest(empty_file(), batch).file;
    let twice = ingest(once.clone(), Vec::new());

    assert_eq!(twice.file, once);
    assert_eq!(twice.accepted, 0);
    assert_eq!(twice.replaced, 0);
}

#[test]
fn test_second_batch_wins_on_overlapping_timestamps() {
    let r1 = vec![
        raw("2025-03-01T10:00:00", 400.0),
        raw("2025-03-01T10:05:00", 405.0),
    ];
    let r2 = vec![
        raw("2025-03-01T10:05:00", 999.0),
        raw("2025-03-01T10:10:00", 410.0),
    ];

    let first = ingest(empty_file(), r1).file;
    let out = ingest(first, r2);

    assert_eq!(out.replaced, 1);
    assert_eq!(out.file.len(), 3);

    let overlapped = out
        .file
        .readings
        .iter()
        .find(|r| r.timestamp == ts("2025-03-01T10:05:00"))
        .expect("overlapping reading present");
    assert_eq!(overlapped.co2, Some(999.0));
}

#[test]
fn test_incoming_reading_replaces_the_whole_stored_row() {
    let stored = empty_file().with_readings(vec![reading("2025-03-01T10:00:00", 400.0, 21.0)]);
    // device re-sends the sample without temperature
    let (merged, replaced) = merge(
        stored,
        vec![aranetlog::models::Reading::at(ts("2025-03-01T10:00:00")).with(Metric::Co2, 401.0)],
    );

    assert_eq!(replaced, 1);
    assert_eq!(merged.readings[0].co2, Some(401.0));
    assert_eq!(merged.readings[0].temperature, None);
}

#[test]
fn test_duplicates_inside_stored_file_collapse() {
    let stored = empty_file().with_readings(vec![
        reading("2025-03-01T10:00:00", 400.0, 21.0),
        reading("2025-03-01T10:00:00", 402.0, 21.0),
        reading("2025-03-01T09:55:00", 398.0, 21.0),
    ]);

    let (merged, replaced) = merge(stored, Vec::new());

    assert_eq!(replaced, 0);
    assert_eq!(merged.len(), 2);
    assert!(merged.is_sorted());
    assert_eq!(merged.readings[1].co2, Some(402.0));
}

#[test]
fn test_one_malformed_reading_out_of_five_is_skipped_and_counted() {
    let batch = vec![
        raw("2025-03-01T10:00:00", 400.0),
        raw("2025-03-01T10:05:00", 405.0),
        raw("yesterday-ish", 999.0),
        raw("2025-03-01T10:10:00", 410.0),
        raw("2025-03-01T10:15:00", 415.0),
    ];

    let out = ingest(empty_file(), batch);

    assert_eq!(out.file.len(), 4);
    assert_eq!(out.accepted, 4);
    assert_eq!(out.skipped, 1);
    assert!(matches!(out.rejections[0], AppError::MalformedReading(_)));
    assert!(out.file.readings.iter().all(|r| r.co2 != Some(999.0)));
}

#[test]
fn test_missing_timestamp_is_malformed() {
    let no_ts = RawReading {
        co2: Some(500.0),
        ..RawReading::default()
    };
    let blank_ts = RawReading::new("   ").with(Metric::Co2, 500.0);

    let (readings, rejections) = parse_batch(vec![no_ts, blank_ts, raw("2025-03-01 10:00", 1.0)]);

    assert_eq!(readings.len(), 1);
    assert_eq!(rejections.len(), 2);
}

#[test]
fn test_accepted_timestamp_shapes() {
    let (readings, rejections) = parse_batch(vec![
        raw("2025-03-01T10:00:00", 1.0),
        raw("2025-03-01T10:00:01.250000", 2.0),
        raw("2025-03-01 10:00:02", 3.0),
        raw("2025-03-01T10:01", 4.0),
        raw("2025-03-01T10:00:03+01:00", 5.0),
    ]);

    assert!(rejections.is_empty());
    assert_eq!(readings.len(), 5);
    // offset is dropped, wall-clock time kept
    assert_eq!(readings[4].timestamp, ts("2025-03-01T10:00:03"));
}
