//! Append-only operation log.
//!
//! Console feedback goes through `ui::messages`; this file keeps a durable
//! trace of what each batch run did, one line per event:
//!
//! `2025-03-01T10:00:00+01:00 - aranetlog - INFO - [ingest] message`

use crate::config::Config;
use crate::ui::messages::warning;
use chrono::Local;
use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub const LOGGER_NAME: &str = "aranetlog";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Debug => write!(f, "DEBUG"),
            LogLevel::Info => write!(f, "INFO"),
            LogLevel::Warning => write!(f, "WARNING"),
            LogLevel::Error => write!(f, "ERROR"),
        }
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "DEBUG" => Ok(LogLevel::Debug),
            "INFO" => Ok(LogLevel::Info),
            "WARNING" | "WARN" => Ok(LogLevel::Warning),
            "ERROR" | "CRITICAL" => Ok(LogLevel::Error),
            other => Err(format!("unknown log level '{other}'")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct OpLog {
    level: LogLevel,
    path: Option<PathBuf>,
}

impl OpLog {
    pub fn new(level: LogLevel, path: Option<PathBuf>) -> Self {
        Self { level, path }
    }

    /// A logger that writes nothing.
    pub fn disabled() -> Self {
        Self::new(LogLevel::Error, None)
    }

    /// Build from the `logging` section; an unknown level falls back to INFO.
    pub fn from_config(cfg: &Config) -> Self {
        let level = cfg.logging.level.parse().unwrap_or(LogLevel::Info);
        Self::new(level, cfg.log_file())
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn enabled(&self, level: LogLevel) -> bool {
        self.path.is_some() && level >= self.level
    }

    /// Append one line. Never fails the caller: a write error only produces
    /// a console warning.
    pub fn log(&self, level: LogLevel, operation: &str, message: &str) {
        if !self.enabled(level) {
            return;
        }
        let Some(path) = &self.path else {
            return;
        };

        if let Err(e) = append_line(path, &format_line(level, operation, message)) {
            warning(format!(
                "Failed to write operation log {}: {e}",
                path.display()
            ));
        }
    }

    pub fn debug(&self, operation: &str, message: &str) {
        self.log(LogLevel::Debug, operation, message);
    }

    pub fn info(&self, operation: &str, message: &str) {
        self.log(LogLevel::Info, operation, message);
    }

    pub fn warning(&self, operation: &str, message: &str) {
        self.log(LogLevel::Warning, operation, message);
    }

    pub fn error(&self, operation: &str, message: &str) {
        self.log(LogLevel::Error, operation, message);
    }
}

fn format_line(level: LogLevel, operation: &str, message: &str) -> String {
    // Messages are single-line so the printer can parse them back.
    let message = message.replace(['\n', '\r'], " ");
    format!(
        "{} - {LOGGER_NAME} - {level} - [{operation}] {message}",
        Local::now().to_rfc3339()
    )
}

fn append_line(path: &Path, line: &str) -> std::io::Result<()> {
    if let Some(dir) = path.parent()
        && !dir.as_os_str().is_empty()
    {
        fs::create_dir_all(dir)?;
    }

    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "{line}")
}
