use crate::errors::{AppError, AppResult};
use crate::logging::LogLevel;
use crate::models::Metric;
use crate::storage::FileFormat;
use crate::utils::path::expand_tilde;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

static MAC_ADDRESS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9A-Fa-f]{2}[:-]){5}[0-9A-Fa-f]{2}$").expect("valid MAC pattern")
});

static DEVICE_UUID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9A-Fa-f]{8}-[0-9A-Fa-f]{4}-[0-9A-Fa-f]{4}-[0-9A-Fa-f]{4}-[0-9A-Fa-f]{12}$")
        .expect("valid UUID pattern")
});

pub const DEFAULT_FILE_PATTERN: &str = "aranet4_data_{date}.{format}";

/// Top-level YAML configuration.
///
/// Every section is defaulted so a partial file still loads. Keys that only
/// matter to the device poller (`polling_interval`, `buffer_size`, ...) are
/// ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub device: DeviceConfig,
    pub data_collection: CollectionConfig,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceConfig {
    pub mac_address: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectionConfig {
    pub collect: CollectFlags,
}

/// Which metrics are kept when readings are ingested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectFlags {
    pub co2: bool,
    pub temperature: bool,
    pub humidity: bool,
    pub pressure: bool,
}

impl Default for CollectFlags {
    fn default() -> Self {
        Self {
            co2: true,
            temperature: true,
            humidity: true,
            pressure: true,
        }
    }
}

impl CollectFlags {
    pub fn enabled(&self, metric: Metric) -> bool {
        match metric {
            Metric::Co2 => self.co2,
            Metric::Temperature => self.temperature,
            Metric::Humidity => self.humidity,
            Metric::Pressure => self.pressure,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub data_dir: String,
    pub file_format: FileFormat,
    pub file_pattern: String,
    pub daily_files: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub file: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults_in(&Self::config_dir())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Config::default().storage
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Config::default().logging
    }
}

impl Config {
    /// Return the standard configuration directory (`~/.aranetlog`).
    pub fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".aranetlog")
    }

    /// Return the full path of the default config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("aranetlog.yaml")
    }

    /// Defaults with the data directory and log file placed under `dir`.
    pub fn defaults_in(dir: &Path) -> Self {
        Self {
            device: DeviceConfig::default(),
            data_collection: CollectionConfig::default(),
            storage: StorageConfig {
                data_dir: dir.join("data").to_string_lossy().to_string(),
                file_format: FileFormat::Csv,
                file_pattern: DEFAULT_FILE_PATTERN.to_string(),
                daily_files: true,
            },
            logging: LoggingConfig {
                level: "INFO".to_string(),
                file: Some(dir.join("aranetlog.log").to_string_lossy().to_string()),
            },
        }
    }

    /// Load configuration from `path`, or defaults next to it if the file
    /// does not exist.
    ///
    /// Values the file leaves out come from the same defaults, so the data
    /// directory and log file stay next to the config unless set.
    pub fn load(path: &Path) -> AppResult<Self> {
        let dir = path.parent().unwrap_or_else(|| Path::new("."));
        if !path.exists() {
            return Ok(Self::defaults_in(dir));
        }

        let content =
            fs::read_to_string(path).map_err(|_| AppError::ConfigLoad(path.display().to_string()))?;

        if content.trim().is_empty() {
            return Ok(Self::defaults_in(dir));
        }

        let invalid = |e: serde_yaml::Error| AppError::Config(format!("{}: {e}", path.display()));

        let user: Value = serde_yaml::from_str(&content).map_err(invalid)?;
        let mut merged = serde_yaml::to_value(Self::defaults_in(dir)).map_err(invalid)?;
        overlay(&mut merged, user);

        serde_yaml::from_value(merged).map_err(invalid)
    }

    /// Write the configuration as YAML, creating the parent directory.
    pub fn save(&self, path: &Path) -> AppResult<()> {
        if let Some(dir) = path.parent()
            && !dir.as_os_str().is_empty()
        {
            fs::create_dir_all(dir).map_err(|e| AppError::storage(dir, e))?;
        }

        let yaml = self.to_yaml()?;
        fs::write(path, yaml).map_err(|e| AppError::storage(path, e))
    }

    pub fn to_yaml(&self) -> AppResult<String> {
        serde_yaml::to_string(self).map_err(|e| AppError::Config(e.to_string()))
    }

    pub fn data_dir(&self) -> PathBuf {
        expand_tilde(&self.storage.data_dir)
    }

    pub fn log_file(&self) -> Option<PathBuf> {
        self.logging
            .file
            .as_deref()
            .filter(|f| !f.trim().is_empty())
            .map(expand_tilde)
    }

    /// MAC address with the separators stripped, used for `{device_name}`.
    pub fn device_name(&self) -> Option<String> {
        self.device
            .mac_address
            .as_deref()
            .map(|mac| mac.replace([':', '-'], ""))
            .filter(|name| !name.is_empty())
    }

    /// Check the configuration for values that would misbehave at runtime.
    /// Returns one message per problem; empty means the file is fine.
    pub fn validate(&self) -> Vec<String> {
        let mut problems = Vec::new();

        if let Some(mac) = self.device.mac_address.as_deref()
            && !is_device_address(mac)
        {
            problems.push(format!(
                "device.mac_address '{mac}' is neither a MAC (XX:XX:XX:XX:XX:XX) nor a UUID"
            ));
        }

        let pattern = &self.storage.file_pattern;
        if !pattern.contains("{format}") {
            problems.push(format!(
                "storage.file_pattern '{pattern}' does not contain {{format}}"
            ));
        }
        if self.storage.daily_files && !pattern.contains("{date}") {
            problems.push(format!(
                "storage.file_pattern '{pattern}' has no {{date}} but daily_files is enabled"
            ));
        }
        if !self.storage.daily_files {
            let stem = pattern.split("{format}").next().unwrap_or("").replace("{date}", "");
            if stem.trim_matches(['.', '_', '-']).is_empty() {
                problems.push(format!(
                    "storage.file_pattern '{pattern}' leaves no file name when daily_files is off"
                ));
            }
        }
        if pattern.contains('/') || pattern.contains('\\') {
            problems.push(format!(
                "storage.file_pattern '{pattern}' must be a file name, not a path"
            ));
        }

        if self.logging.level.parse::<LogLevel>().is_err() {
            problems.push(format!(
                "logging.level '{}' is not one of DEBUG, INFO, WARNING, ERROR",
                self.logging.level
            ));
        }

        if !Metric::ALL
            .iter()
            .any(|m| self.data_collection.collect.enabled(*m))
        {
            problems.push("data_collection.collect disables every metric".to_string());
        }

        problems
    }
}

/// Aranet4 devices show up as a MAC on Linux/Windows and as a UUID on macOS.
fn is_device_address(s: &str) -> bool {
    MAC_ADDRESS.is_match(s) || DEVICE_UUID.is_match(s)
}

/// Overlay `user` onto `base`, recursing into mappings. Keys missing from
/// `user` keep the base value; an explicit `null` still overrides.
fn overlay(base: &mut Value, user: Value) {
    match (base, user) {
        (Value::Mapping(base), Value::Mapping(user)) => {
            for (key, value) in user {
                match base.get_mut(&key) {
                    Some(slot) => overlay(slot, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => *slot = value,
    }
}
