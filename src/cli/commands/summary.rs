use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::aggregate::Aggregation;
use crate::core::summary::SummaryLogic;
use crate::errors::{AppError, AppResult};
use crate::logging::OpLog;
use crate::models::Metric;
use crate::storage::DataStore;
use crate::ui::messages::{header, warning};
use crate::utils::colors::{RESET, color_for_co2};
use crate::utils::date::format_chart;
use crate::utils::formatting::{bold, format_value, format_value_with_unit};
use crate::utils::table::{Column, Table};
use std::io;

pub fn handle(cmd: &Commands, cfg: &Config, log: &OpLog) -> AppResult<()> {
    if let Commands::Summary { file, format, json } = cmd {
        let store = DataStore::from_config(cfg);

        match SummaryLogic::build(&store, file.as_deref(), *format, log) {
            Ok(agg) if *json => print_json(&serde_json::to_value(&agg).map_err(json_error)?)?,
            Ok(agg) => print_text(&agg),
            Err(e) if e.is_no_data() => {
                if *json {
                    print_json(&serde_json::json!({ "error": e.to_string() }))?;
                } else {
                    warning(e);
                }
            }
            Err(e) => {
                log.error("summary", &e.to_string());
                return Err(e);
            }
        }
    }
    Ok(())
}

fn json_error(e: serde_json::Error) -> AppError {
    AppError::from(io::Error::other(format!("JSON serialization error: {e}")))
}

fn print_json(value: &serde_json::Value) -> AppResult<()> {
    println!("{}", serde_json::to_string_pretty(value).map_err(json_error)?);
    Ok(())
}

fn print_text(agg: &Aggregation) {
    header(&agg.file);
    println!(
        "{} {} → {}  ({} readings)\n",
        bold("Range:"),
        format_chart(&agg.range.start),
        format_chart(&agg.range.end),
        agg.readings
    );

    let mut table = Table::new(vec![
        Column::left("Metric"),
        Column::right("Current"),
        Column::right("Min"),
        Column::right("Max"),
        Column::right("Avg"),
        Column::right("Points"),
    ]);

    for (metric, s) in &agg.per_metric {
        let points = agg.series.get(metric).map(|c| c.points.len()).unwrap_or(0);
        table.add_row(vec![
            metric.label().to_string(),
            format_value(*metric, s.current),
            format_value(*metric, s.min),
            format_value(*metric, s.max),
            format_value(*metric, s.avg),
            points.to_string(),
        ]);
    }

    print!("{}", table.render());

    if let Some(co2) = agg.per_metric.get(&Metric::Co2) {
        println!(
            "\nCO2 now: {}{}{}",
            color_for_co2(co2.current),
            format_value_with_unit(Metric::Co2, co2.current),
            RESET
        );
    }
}
