use crate::errors::{AppError, AppResult};
use crate::ui::messages::info;
use ansi_term::Colour;
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

/// `<date> - <logger> - <LEVEL> - [<operation>] <message>`
static LOG_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\S+) - \S+ - (\w+) - \[([^\]]*)\] (.*)$").expect("valid log line pattern")
});

/// Colour for the level column.
fn color_for_level(level: &str) -> Colour {
    match level {
        "DEBUG" => Colour::Fixed(244),
        "INFO" => Colour::Blue,
        "WARNING" => Colour::Yellow,
        "ERROR" => Colour::Red,
        _ => Colour::White,
    }
}

/// Colour for the operation column.
fn color_for_operation(op: &str) -> Colour {
    match op {
        "ingest" => Colour::Green,
        "summary" => Colour::Cyan,
        "init" => Colour::RGB(255, 153, 51),
        "config" => Colour::Purple,
        _ => Colour::White,
    }
}

/// One parsed line of the operation log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub date: String,
    pub level: String,
    pub operation: String,
    pub message: String,
}

pub struct LogLogic;

impl LogLogic {
    /// Parse log content, keeping only the last `tail` entries if given.
    /// Lines that do not follow the log format are kept verbatim as
    /// messages without level or operation.
    pub fn parse(content: &str, tail: Option<usize>) -> Vec<LogEntry> {
        let mut entries: Vec<LogEntry> = content
            .lines()
            .filter(|l| !l.trim().is_empty())
            .map(|line| match LOG_LINE.captures(line) {
                Some(c) => LogEntry {
                    date: c[1].to_string(),
                    level: c[2].to_string(),
                    operation: c[3].to_string(),
                    message: c[4].to_string(),
                },
                None => LogEntry {
                    date: String::new(),
                    level: String::new(),
                    operation: String::new(),
                    message: line.to_string(),
                },
            })
            .collect();

        if let Some(n) = tail
            && entries.len() > n
        {
            entries.drain(..entries.len() - n);
        }

        entries
    }

    pub fn print_log(path: Option<&Path>, tail: Option<usize>) -> AppResult<()> {
        let Some(path) = path else {
            info("Operation log is disabled (logging.file is not set).");
            return Ok(());
        };

        if !path.exists() {
            info(format!("No log entries yet ({}).", path.display()));
            return Ok(());
        }

        let content = fs::read_to_string(path).map_err(|e| AppError::storage(path, e))?;
        let entries = Self::parse(&content, tail);

        let date_w = entries.iter().map(|e| e.date.len()).max().unwrap_or(0);
        let op_w = entries
            .iter()
            .map(|e| e.operation.len())
            .max()
            .unwrap_or(0)
            .min(20);

        println!("📜 Operation log:\n");

        for e in entries {
            if e.level.is_empty() {
                println!("{}", e.message);
                continue;
            }

            // colour after padding so ANSI codes do not skew the widths
            let level = color_for_level(&e.level).paint(format!("{:<7}", e.level));
            let op = color_for_operation(&e.operation).paint(format!("{:<op_w$}", e.operation));

            println!(
                "{:<date_w$} | {} | {} => {}",
                e.date,
                level,
                op,
                e.message,
                date_w = date_w
            );
        }

        Ok(())
    }
}
