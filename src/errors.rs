//! Unified application error type.
//! Every module (core, storage, config, cli) returns AppError so that the
//! CLI reports failures the same way regardless of where they happened.

use std::io;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Any persistence failure on a data file or the data directory.
    #[error("Storage error on {path}: {source}")]
    Storage {
        path: String,
        #[source]
        source: io::Error,
    },

    // ---------------------------
    // Reading / file format errors
    // ---------------------------
    #[error("Malformed reading: {0}")]
    MalformedReading(String),

    #[error("Format error in {file}: {reason}")]
    Format { file: String, reason: String },

    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid data file name: {0}")]
    InvalidFileName(String),

    // ---------------------------
    // Aggregation
    // ---------------------------
    #[error("No data available in {0}")]
    NoData(String),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid range: {0}")]
    InvalidRange(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration from {0}")]
    ConfigLoad(String),
}

impl AppError {
    pub fn storage(path: &Path, source: io::Error) -> Self {
        AppError::Storage {
            path: path.display().to_string(),
            source,
        }
    }

    pub fn format(file: impl Into<String>, reason: impl ToString) -> Self {
        AppError::Format {
            file: file.into(),
            reason: reason.to_string(),
        }
    }

    /// True when the error only means "nothing to show yet".
    pub fn is_no_data(&self) -> bool {
        matches!(self, AppError::NoData(_))
    }
}

pub type AppResult<T> = Result<T, AppError>;
