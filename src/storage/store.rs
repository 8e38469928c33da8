// src/storage/store.rs

use super::{FileFormat, decode, encode};
use crate::config::{Config, DEFAULT_FILE_PATTERN};
use crate::errors::{AppError, AppResult};
use crate::models::{DataFile, Reading};
use crate::utils::date::parse_date;
use chrono::NaiveDate;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

const FALLBACK_STEM: &str = "aranet4_data";

/// The data directory and the rules for naming the files inside it.
#[derive(Debug, Clone)]
pub struct DataStore {
    dir: PathBuf,
    format: FileFormat,
    pattern: String,
    daily_files: bool,
    device_name: Option<String>,
}

/// A data file found on disk by [`DataStore::list_files`].
#[derive(Debug, Clone)]
pub struct DataFileEntry {
    pub name: String,
    pub path: PathBuf,
    pub format: FileFormat,
    pub modified: SystemTime,
    pub size: u64,
    /// Date carried in the file name, if any.
    pub date: Option<NaiveDate>,
}

/// A decoded file plus the number of stored rows that had to be dropped
/// because their timestamp could not be parsed.
#[derive(Debug, Clone)]
pub struct LoadedFile {
    pub file: DataFile,
    pub skipped: usize,
}

impl DataStore {
    pub fn new(dir: impl Into<PathBuf>, format: FileFormat) -> Self {
        Self {
            dir: dir.into(),
            format,
            pattern: DEFAULT_FILE_PATTERN.to_string(),
            daily_files: true,
            device_name: None,
        }
    }

    pub fn from_config(cfg: &Config) -> Self {
        Self::new(cfg.data_dir(), cfg.storage.file_format)
            .with_pattern(cfg.storage.file_pattern.clone())
            .with_daily_files(cfg.storage.daily_files)
            .with_device_name(cfg.device_name())
    }

    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = pattern.into();
        self
    }

    pub fn with_daily_files(mut self, daily: bool) -> Self {
        self.daily_files = daily;
        self
    }

    pub fn with_device_name(mut self, name: Option<String>) -> Self {
        self.device_name = name;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File name for the readings of `date`.
    ///
    /// With daily files off the `{date}` token and one adjacent separator are
    /// dropped, so every reading lands in the same file. A name left without
    /// a stem (`{date}.{format}`) falls back to `aranet4_data`.
    pub fn file_name_for(&self, date: NaiveDate) -> String {
        let mut name = self.pattern.clone();

        if self.daily_files {
            name = name.replace("{date}", &date.format("%Y-%m-%d").to_string());
        } else if let Some(token) = ["_{date}", "-{date}", "{date}_", "{date}-", "{date}"]
            .into_iter()
            .find(|t| name.contains(t))
        {
            name = name.replacen(token, "", 1);
        }

        let name = name
            .replace("{format}", self.format.as_str())
            .replace("{device_name}", self.device_name.as_deref().unwrap_or("aranet4"));

        if name.starts_with('.') {
            format!("{FALLBACK_STEM}{name}")
        } else {
            name
        }
    }

    /// Name of the file a reading belongs to.
    pub fn target_name(&self, reading: &Reading) -> String {
        self.file_name_for(reading.timestamp.date())
    }

    /// Resolve a bare file name inside the data directory.
    pub fn path_of(&self, name: &str) -> AppResult<PathBuf> {
        let bare = !name.is_empty()
            && !name.contains(['/', '\\'])
            && name != "."
            && name != ".."
            && !name.starts_with("..");

        if !bare {
            return Err(AppError::InvalidFileName(name.to_string()));
        }
        Ok(self.dir.join(name))
    }

    /// Every CSV/JSON file in the data directory, newest first.
    ///
    /// With `range`, only files whose name carries a date inside it are kept.
    pub fn list_files(&self, range: Option<(NaiveDate, NaiveDate)>) -> AppResult<Vec<DataFileEntry>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(&self.dir).map_err(|e| AppError::storage(&self.dir, e))?;
        let mut files = Vec::new();

        for entry in entries {
            let entry = entry.map_err(|e| AppError::storage(&self.dir, e))?;
            let path = entry.path();

            let Some(name) = path.file_name().and_then(|n| n.to_str()).map(str::to_string) else {
                continue;
            };
            if name.starts_with('.') {
                continue;
            }
            let Ok(format) = FileFormat::from_path(&path) else {
                continue;
            };

            let meta = entry.metadata().map_err(|e| AppError::storage(&path, e))?;
            if !meta.is_file() {
                continue;
            }

            let date = date_in_name(&name);
            if let Some((start, end)) = range {
                match date {
                    Some(d) if d >= start && d <= end => {}
                    _ => continue,
                }
            }

            files.push(DataFileEntry {
                name,
                path,
                format,
                modified: meta.modified().unwrap_or(SystemTime::UNIX_EPOCH),
                size: meta.len(),
                date,
            });
        }

        files.sort_by(|a, b| {
            b.modified
                .cmp(&a.modified)
                .then_with(|| b.name.cmp(&a.name))
        });

        Ok(files)
    }

    /// The most recently modified data file.
    pub fn latest(&self) -> AppResult<Option<DataFileEntry>> {
        Ok(self.list_files(None)?.into_iter().next())
    }

    /// Load a file for reading. A missing file is [`AppError::NoData`].
    ///
    /// `format` overrides the extension-derived format; a mismatch surfaces
    /// as a format error rather than being guessed around.
    pub fn load(&self, name: &str, format: Option<FileFormat>) -> AppResult<LoadedFile> {
        let path = self.path_of(name)?;
        if !path.exists() {
            return Err(AppError::NoData(name.to_string()));
        }
        let format = match format {
            Some(f) => f,
            None => FileFormat::from_path(&path)?,
        };
        read_file(name, &path, format)
    }

    /// Load a file about to be merged into; a missing file is empty.
    pub fn load_or_empty(&self, name: &str) -> AppResult<LoadedFile> {
        let path = self.path_of(name)?;
        if !path.exists() {
            return Ok(LoadedFile {
                file: DataFile::new(name, self.format),
                skipped: 0,
            });
        }
        read_file(name, &path, self.format)
    }

    /// Write a file in its own format.
    ///
    /// Content goes to a hidden sibling first and is renamed into place, so
    /// readers never see a half-written file.
    pub fn save(&self, file: &DataFile) -> AppResult<PathBuf> {
        let path = self.path_of(&file.name)?;
        fs::create_dir_all(&self.dir).map_err(|e| AppError::storage(&self.dir, e))?;

        let bytes = encode(&file.readings, file.format).map_err(|e| AppError::storage(&path, e))?;

        let tmp = self.dir.join(format!(".{}.tmp", file.name));
        fs::write(&tmp, bytes).map_err(|e| AppError::storage(&tmp, e))?;

        if let Err(e) = fs::rename(&tmp, &path) {
            let _ = fs::remove_file(&tmp);
            return Err(AppError::storage(&path, e));
        }

        Ok(path)
    }
}

fn read_file(name: &str, path: &Path, format: FileFormat) -> AppResult<LoadedFile> {
    let bytes = fs::read(path).map_err(|e| AppError::storage(path, e))?;
    let content =
        String::from_utf8(bytes).map_err(|_| AppError::format(name, "file is not valid UTF-8"))?;

    let mut readings = Vec::new();
    let mut skipped = 0;

    for raw in decode(name, &content, format)? {
        match raw.parse() {
            Ok(r) => readings.push(r),
            Err(_) => skipped += 1,
        }
    }

    Ok(LoadedFile {
        file: DataFile::new(name, format).with_readings(readings),
        skipped,
    })
}

/// First `YYYY-MM-DD` found in a file name.
fn date_in_name(name: &str) -> Option<NaiveDate> {
    (0..name.len().saturating_sub(9)).find_map(|i| name.get(i..i + 10).and_then(parse_date))
}
