use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::ingest::{IngestLogic, IngestOptions, IngestReport};
use crate::errors::{AppError, AppResult};
use crate::logging::OpLog;
use crate::models::RawReading;
use crate::storage::{self, DataStore, FileFormat};
use crate::ui::messages::{info, success, warning};
use crate::utils::table::{Column, Table};
use std::io::{self, Read};
use std::path::Path;

pub fn handle(cmd: &Commands, cfg: &Config, log: &OpLog) -> AppResult<()> {
    if let Commands::Ingest {
        input,
        format,
        dry_run,
    } = cmd
    {
        let raw = read_input(input, *format)?;
        if raw.is_empty() {
            info("No readings in input, nothing to do.");
            return Ok(());
        }

        let store = DataStore::from_config(cfg);
        let opts = IngestOptions::from_config(cfg).dry_run(*dry_run);

        let report = IngestLogic::run(&store, raw, &opts, log).inspect_err(|e| {
            log.error("ingest", &e.to_string());
        })?;

        print_report(&report, *dry_run);
    }
    Ok(())
}

/// Read and decode the poller's batch from a file or stdin.
fn read_input(input: &str, format: Option<FileFormat>) -> AppResult<Vec<RawReading>> {
    if input == "-" {
        let mut content = String::new();
        io::stdin().read_to_string(&mut content)?;
        return storage::decode("<stdin>", &content, format.unwrap_or(FileFormat::Json));
    }

    let path = Path::new(input);
    let format = match format {
        Some(f) => f,
        None => FileFormat::from_path(path)?,
    };

    let bytes = std::fs::read(path).map_err(|e| AppError::storage(path, e))?;
    let content =
        String::from_utf8(bytes).map_err(|_| AppError::format(input, "input is not valid UTF-8"))?;

    storage::decode(input, &content, format)
}

fn print_report(report: &IngestReport, dry_run: bool) {
    if !report.files.is_empty() {
        let mut table = Table::new(vec![
            Column::left("File"),
            Column::right("Added"),
            Column::right("Replaced"),
            Column::right("Total"),
        ]);
        for f in &report.files {
            table.add_row(vec![
                f.name.clone(),
                f.accepted.to_string(),
                f.replaced.to_string(),
                f.total.to_string(),
            ]);
        }
        print!("{}", table.render());
    }

    for f in report.files.iter().filter(|f| f.dropped_existing > 0) {
        warning(format!(
            "{}: dropped {} stored rows with unreadable timestamps",
            f.name, f.dropped_existing
        ));
    }

    for reason in &report.rejections {
        warning(reason);
    }

    let summary = format!(
        "{} readings stored in {} file(s), {} replaced, {} skipped",
        report.accepted,
        report.files.len(),
        report.replaced,
        report.skipped
    );

    if dry_run {
        info(format!("Dry run: {summary}"));
    } else {
        success(summary);
    }
}
