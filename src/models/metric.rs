use serde::Serialize;

/// The four quantities an Aranet4 reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    Co2,         // ppm
    Temperature, // °C
    Humidity,    // %
    Pressure,    // hPa
}

impl Metric {
    /// Fixed order used for CSV columns, tables and JSON maps.
    pub const ALL: [Metric; 4] = [
        Metric::Co2,
        Metric::Temperature,
        Metric::Humidity,
        Metric::Pressure,
    ];

    /// Column / JSON key used on disk.
    pub fn key(&self) -> &'static str {
        match self {
            Metric::Co2 => "co2",
            Metric::Temperature => "temperature",
            Metric::Humidity => "humidity",
            Metric::Pressure => "pressure",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            Metric::Co2 => "ppm",
            Metric::Temperature => "°C",
            Metric::Humidity => "%",
            Metric::Pressure => "hPa",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Metric::Co2 => "CO2 (ppm)",
            Metric::Temperature => "Temperature (°C)",
            Metric::Humidity => "Humidity (%)",
            Metric::Pressure => "Pressure (hPa)",
        }
    }

    /// Line colour used by the dashboard charts.
    pub fn color(&self) -> &'static str {
        match self {
            Metric::Co2 => "rgb(255, 99, 132)",
            Metric::Temperature => "rgb(255, 159, 64)",
            Metric::Humidity => "rgb(54, 162, 235)",
            Metric::Pressure => "rgb(75, 192, 192)",
        }
    }

    /// Decimal places shown in human-readable output.
    pub fn precision(&self) -> usize {
        match self {
            Metric::Co2 | Metric::Humidity => 0,
            Metric::Temperature | Metric::Pressure => 1,
        }
    }

    /// Parse a column / key name (case-insensitive).
    pub fn from_key(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "co2" => Some(Metric::Co2),
            "temperature" | "temp" => Some(Metric::Temperature),
            "humidity" | "humi" => Some(Metric::Humidity),
            "pressure" | "pres" => Some(Metric::Pressure),
            _ => None,
        }
    }
}
