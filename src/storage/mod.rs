// src/storage/mod.rs

mod csv_codec;
mod json_codec;
pub mod range;
pub mod store;

pub use store::{DataFileEntry, DataStore, LoadedFile};

use crate::errors::{AppError, AppResult};
use crate::models::{RawReading, Reading};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::io;
use std::path::Path;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileFormat {
    #[serde(alias = "CSV")]
    Csv,
    #[serde(alias = "JSON")]
    Json,
}

impl FileFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileFormat::Csv => "csv",
            FileFormat::Json => "json",
        }
    }

    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "csv" => Some(FileFormat::Csv),
            "json" => Some(FileFormat::Json),
            _ => None,
        }
    }

    /// Format implied by a file name's extension.
    pub fn from_path(path: &Path) -> AppResult<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
            .ok_or_else(|| AppError::UnsupportedFormat(path.display().to_string()))
    }
}

/// Decode file content into raw readings with the codec for `format`.
///
/// `file` only names the source in error messages. Blank content is an
/// empty file in either format.
pub fn decode(file: &str, content: &str, format: FileFormat) -> AppResult<Vec<RawReading>> {
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }

    match format {
        FileFormat::Csv => csv_codec::decode(file, content),
        FileFormat::Json => json_codec::decode(file, content),
    }
}

/// Encode readings (already merged and sorted) for writing to disk.
pub fn encode(readings: &[Reading], format: FileFormat) -> io::Result<Vec<u8>> {
    match format {
        FileFormat::Csv => csv_codec::encode(readings),
        FileFormat::Json => json_codec::encode(readings),
    }
}

/// Coerce a textual cell to a number; blanks and garbage become absent.
pub(crate) fn parse_number(s: &str) -> Option<f64> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}
