use super::metric::Metric;
use crate::config::CollectFlags;
use crate::errors::{AppError, AppResult};
use crate::utils::date;
use chrono::NaiveDateTime;
use serde::Serialize;

/// One timestamped sample from the sensor.
///
/// Absent metrics stay `None` all the way to disk: CSV writes an empty cell,
/// JSON omits the key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reading {
    pub timestamp: NaiveDateTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_mac: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub co2: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub humidity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pressure: Option<f64>,
}

impl Reading {
    /// A reading with no metric values yet.
    pub fn at(timestamp: NaiveDateTime) -> Self {
        Self {
            timestamp,
            device_mac: None,
            co2: None,
            temperature: None,
            humidity: None,
            pressure: None,
        }
    }

    /// Builder-style setter, handy when assembling readings in code.
    pub fn with(mut self, metric: Metric, value: f64) -> Self {
        self.set(metric, Some(value));
        self
    }

    pub fn value(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::Co2 => self.co2,
            Metric::Temperature => self.temperature,
            Metric::Humidity => self.humidity,
            Metric::Pressure => self.pressure,
        }
    }

    pub fn set(&mut self, metric: Metric, value: Option<f64>) {
        let slot = match metric {
            Metric::Co2 => &mut self.co2,
            Metric::Temperature => &mut self.temperature,
            Metric::Humidity => &mut self.humidity,
            Metric::Pressure => &mut self.pressure,
        };
        *slot = value;
    }

    pub fn has_any_metric(&self) -> bool {
        Metric::ALL.iter().any(|m| self.value(*m).is_some())
    }

    /// Drop the values of metrics whose collection is switched off.
    pub fn retain_collected(&mut self, collect: &CollectFlags) {
        for metric in Metric::ALL {
            if !collect.enabled(metric) {
                self.set(metric, None);
            }
        }
    }
}

/// A reading as decoded from CSV/JSON, before its timestamp is validated.
///
/// Metric cells that are not numbers have already been coerced to `None`
/// by the codec; only the timestamp can still make the reading invalid.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawReading {
    pub timestamp: Option<String>,
    pub device_mac: Option<String>,
    pub co2: Option<f64>,
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub pressure: Option<f64>,
}

impl RawReading {
    pub fn new(timestamp: impl Into<String>) -> Self {
        Self {
            timestamp: Some(timestamp.into()),
            ..Self::default()
        }
    }

    pub fn with(mut self, metric: Metric, value: f64) -> Self {
        self.set(metric, Some(value));
        self
    }

    pub fn set(&mut self, metric: Metric, value: Option<f64>) {
        let slot = match metric {
            Metric::Co2 => &mut self.co2,
            Metric::Temperature => &mut self.temperature,
            Metric::Humidity => &mut self.humidity,
            Metric::Pressure => &mut self.pressure,
        };
        *slot = value;
    }

    /// Validate the timestamp and turn this into a [`Reading`].
    pub fn parse(self) -> AppResult<Reading> {
        let raw_ts = match self.timestamp.as_deref().map(str::trim) {
            Some(ts) if !ts.is_empty() => ts,
            _ => return Err(AppError::MalformedReading("missing timestamp".into())),
        };

        let timestamp = date::parse_timestamp(raw_ts).ok_or_else(|| {
            AppError::MalformedReading(format!("unparseable timestamp '{raw_ts}'"))
        })?;

        Ok(Reading {
            timestamp,
            device_mac: self
                .device_mac
                .map(|m| m.trim().to_string())
                .filter(|m| !m.is_empty()),
            co2: self.co2,
            temperature: self.temperature,
            humidity: self.humidity,
            pressure: self.pressure,
        })
    }
}
