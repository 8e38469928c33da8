use crate::core::aggregate::{Aggregation, aggregate};
use crate::errors::{AppError, AppResult};
use crate::logging::OpLog;
use crate::storage::{DataStore, FileFormat};

pub struct SummaryLogic;

impl SummaryLogic {
    /// Load `file` (or the newest data file) and aggregate it.
    ///
    /// No file at all, a missing file and an empty file all come back as
    /// [`AppError::NoData`].
    pub fn build(
        store: &DataStore,
        file: Option<&str>,
        format: Option<FileFormat>,
        log: &OpLog,
    ) -> AppResult<Aggregation> {
        let name = match file {
            Some(name) => name.to_string(),
            None => store
                .latest()?
                .map(|entry| entry.name)
                .ok_or_else(|| AppError::NoData(store.dir().display().to_string()))?,
        };

        let loaded = store.load(&name, format)?;
        if loaded.skipped > 0 {
            log.warning(
                "summary",
                &format!(
                    "{name}: ignored {} rows with unreadable timestamps",
                    loaded.skipped
                ),
            );
        }

        let result = aggregate(&loaded.file)?;
        log.debug(
            "summary",
            &format!(
                "{name}: {} readings, metrics: {}",
                result.readings,
                result
                    .per_metric
                    .keys()
                    .map(|m| m.key())
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        );

        Ok(result)
    }
}
