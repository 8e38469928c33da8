/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const BLUE: &str = "\x1b[34m";

/// CO2 traffic light, using the thresholds shown on the Aranet4 display:
/// green below 1000 ppm, yellow up to 1400 ppm, red above.
pub fn color_for_co2(ppm: f64) -> &'static str {
    if ppm < 1000.0 {
        GREEN
    } else if ppm <= 1400.0 {
        YELLOW
    } else {
        RED
    }
}
