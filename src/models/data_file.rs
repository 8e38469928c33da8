use super::reading::Reading;
use crate::storage::FileFormat;

/// The ordered readings of one day (or of the single continuous log).
#[derive(Debug, Clone, PartialEq)]
pub struct DataFile {
    pub name: String,
    pub format: FileFormat,
    pub readings: Vec<Reading>,
}

impl DataFile {
    pub fn new(name: impl Into<String>, format: FileFormat) -> Self {
        Self {
            name: name.into(),
            format,
            readings: Vec::new(),
        }
    }

    pub fn with_readings(mut self, readings: Vec<Reading>) -> Self {
        self.readings = readings;
        self
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    /// Non-decreasing timestamps, as the ingest path guarantees.
    pub fn is_sorted(&self) -> bool {
        self.readings
            .windows(2)
            .all(|w| w[0].timestamp <= w[1].timestamp)
    }
}
