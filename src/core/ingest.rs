//! Merging freshly polled readings into data files.

use crate::config::{CollectFlags, Config};
use crate::errors::{AppError, AppResult};
use crate::logging::OpLog;
use crate::models::{DataFile, RawReading, Reading};
use crate::storage::DataStore;
use chrono::NaiveDateTime;
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

/// Result of merging one batch into one file.
#[derive(Debug)]
pub struct IngestOutcome {
    pub file: DataFile,
    /// Incoming readings with a valid timestamp.
    pub accepted: usize,
    /// Incoming readings dropped for a bad timestamp.
    pub skipped: usize,
    /// Stored readings overwritten by an incoming one.
    pub replaced: usize,
    pub rejections: Vec<AppError>,
}

/// Validate timestamps, keeping the good readings and the reasons for the
/// bad ones.
pub fn parse_batch(incoming: Vec<RawReading>) -> (Vec<Reading>, Vec<AppError>) {
    let mut readings = Vec::with_capacity(incoming.len());
    let mut rejections = Vec::new();

    for raw in incoming {
        match raw.parse() {
            Ok(r) => readings.push(r),
            Err(e) => rejections.push(e),
        }
    }

    (readings, rejections)
}

/// Union by timestamp, incoming wins on collision, result sorted ascending.
///
/// Returns the merged file and how many stored timestamps were overwritten.
pub fn merge(existing: DataFile, readings: Vec<Reading>) -> (DataFile, usize) {
    let DataFile {
        name,
        format,
        readings: stored,
    } = existing;

    let mut by_ts: BTreeMap<NaiveDateTime, Reading> =
        stored.into_iter().map(|r| (r.timestamp, r)).collect();
    let stored_keys: BTreeSet<NaiveDateTime> = by_ts.keys().copied().collect();
    let mut replaced = BTreeSet::new();

    for r in readings {
        if stored_keys.contains(&r.timestamp) {
            replaced.insert(r.timestamp);
        }
        by_ts.insert(r.timestamp, r);
    }

    let merged = DataFile::new(name, format).with_readings(by_ts.into_values().collect());
    (merged, replaced.len())
}

/// Merge a raw batch into `existing`. Malformed readings are skipped and
/// counted; they never abort the batch.
pub fn ingest(existing: DataFile, incoming: Vec<RawReading>) -> IngestOutcome {
    let (readings, rejections) = parse_batch(incoming);
    let accepted = readings.len();
    let (file, replaced) = merge(existing, readings);

    IngestOutcome {
        file,
        accepted,
        skipped: rejections.len(),
        replaced,
        rejections,
    }
}

/// Knobs for a store-level ingest run.
#[derive(Debug, Clone, Default)]
pub struct IngestOptions {
    pub collect: CollectFlags,
    /// Stamped on readings that arrive without a device MAC.
    pub device_mac: Option<String>,
    /// Merge and report, but write nothing.
    pub dry_run: bool,
}

impl IngestOptions {
    pub fn from_config(cfg: &Config) -> Self {
        Self {
            collect: cfg.data_collection.collect,
            device_mac: cfg.device.mac_address.clone(),
            dry_run: false,
        }
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

/// What happened to one target file.
#[derive(Debug, Clone)]
pub struct FileReport {
    pub name: String,
    pub path: PathBuf,
    pub accepted: usize,
    pub replaced: usize,
    /// Readings in the file after the merge.
    pub total: usize,
    /// Stored rows dropped because their own timestamp was unreadable.
    pub dropped_existing: usize,
}

#[derive(Debug, Clone, Default)]
pub struct IngestReport {
    pub files: Vec<FileReport>,
    pub accepted: usize,
    pub skipped: usize,
    pub replaced: usize,
    pub rejections: Vec<String>,
}

/// High-level ingest: one read-merge-write cycle per target file.
pub struct IngestLogic;

impl IngestLogic {
    pub fn run(
        store: &DataStore,
        incoming: Vec<RawReading>,
        opts: &IngestOptions,
        log: &OpLog,
    ) -> AppResult<IngestReport> {
        let received = incoming.len();
        let (mut readings, rejections) = parse_batch(incoming);

        for r in &mut readings {
            r.retain_collected(&opts.collect);
            if r.device_mac.is_none() {
                r.device_mac = opts.device_mac.clone();
            }
        }

        let mut report = IngestReport {
            skipped: rejections.len(),
            rejections: rejections.iter().map(|e| e.to_string()).collect(),
            ..IngestReport::default()
        };

        for reason in &report.rejections {
            log.warning("ingest", &format!("skipped reading: {reason}"));
        }

        // Partition by target file; BTreeMap keeps the write order stable.
        let mut batches: BTreeMap<String, Vec<Reading>> = BTreeMap::new();
        for r in readings {
            batches.entry(store.target_name(&r)).or_default().push(r);
        }

        for (name, batch) in batches {
            let loaded = store.load_or_empty(&name)?;
            if loaded.skipped > 0 {
                log.warning(
                    "ingest",
                    &format!(
                        "{name}: dropping {} stored rows with unreadable timestamps",
                        loaded.skipped
                    ),
                );
            }

            let accepted = batch.len();
            let (merged, replaced) = merge(loaded.file, batch);

            let path = if opts.dry_run {
                store.path_of(&name)?
            } else {
                store.save(&merged)?
            };

            log.info(
                "ingest",
                &format!(
                    "{name}: +{accepted} readings ({replaced} replaced), {} total{}",
                    merged.len(),
                    if opts.dry_run { " [dry run]" } else { "" }
                ),
            );

            report.accepted += accepted;
            report.replaced += replaced;
            report.files.push(FileReport {
                name,
                path,
                accepted,
                replaced,
                total: merged.len(),
                dropped_existing: loaded.skipped,
            });
        }

        log.debug(
            "ingest",
            &format!(
                "batch of {received}: {} accepted, {} skipped, {} file(s)",
                report.accepted,
                report.skipped,
                report.files.len()
            ),
        );

        Ok(report)
    }
}
