pub mod aggregate;
pub mod ingest;
pub mod log;
pub mod summary;

pub use aggregate::{Aggregation, ChartPoint, ChartSeries, MetricSummary, TimeRange, aggregate};
pub use ingest::{IngestLogic, IngestOptions, IngestOutcome, IngestReport, ingest, merge, parse_batch};
