pub mod data_file;
pub mod metric;
pub mod reading;

pub use data_file::DataFile;
pub use metric::Metric;
pub use reading::{RawReading, Reading};
