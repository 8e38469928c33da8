use crate::config::Config;
use crate::storage::FileFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line interface definition for aranetlog
/// Batch tool that merges Aranet4 readings into daily files and summarises them
#[derive(Parser)]
#[command(
    name = "aranetlog",
    version = env!("CARGO_PKG_VERSION"),
    about = "Store Aranet4 air-quality readings in daily CSV/JSON files and summarise them for a dashboard",
    long_about = None
)]
pub struct Cli {
    /// Configuration file (default: ~/.aranetlog/aranetlog.yaml)
    #[arg(global = true, long = "config", value_name = "FILE")]
    pub config: Option<String>,

    /// Override storage.data_dir from the configuration
    #[arg(global = true, long = "data-dir", value_name = "DIR")]
    pub data_dir: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn config_path(&self) -> PathBuf {
        self.config
            .as_deref()
            .map(PathBuf::from)
            .unwrap_or_else(Config::config_file)
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a default configuration file and create the data directory
    Init {
        /// Overwrite an existing configuration file
        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Manage the configuration file (view, check or edit)
    Config {
        #[arg(long = "print", help = "Print the effective configuration")]
        print_config: bool,

        #[arg(long = "check", help = "Check the configuration for invalid values")]
        check: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Merge a batch of polled readings into the data files
    Ingest {
        /// Readings produced by the poller ("-" reads stdin)
        #[arg(long, short, value_name = "FILE")]
        input: String,

        /// Input format (default: from the file extension, JSON for stdin)
        #[arg(long, value_enum, value_name = "FORMAT")]
        format: Option<FileFormat>,

        /// Merge and report without writing any file
        #[arg(long = "dry-run")]
        dry_run: bool,
    },

    /// List data files, newest first
    Files {
        /// Keep only files dated in a period.
        ///
        /// Supported formats:
        /// - YYYY                  → entire year (e.g. "2025")
        /// - YYYY-MM              → entire month (e.g. "2025-06")
        /// - YYYY-MM-DD           → specific day (e.g. "2025-06-18")
        ///
        /// Ranges (start:end) in the same format:
        /// - YYYY-MM:YYYY-MM      → month range (e.g. "2025-06:2025-08")
        /// - YYYY-MM-DD:YYYY-MM-DD→ day range   (e.g. "2025-06-01:2025-06-10")
        #[arg(
            long,
            short,
            value_name = "RANGE",
            help = "Filter by year/month/day or a custom range (YYYY, YYYY-MM, YYYY-MM-DD, or ranges)"
        )]
        range: Option<String>,
    },

    /// Summarise a data file: current/min/max/avg per metric
    Summary {
        /// Data file name inside the data directory (default: newest)
        #[arg(long, value_name = "NAME")]
        file: Option<String>,

        /// Parse the file as this format instead of using its extension
        #[arg(long, value_enum, value_name = "FORMAT")]
        format: Option<FileFormat>,

        /// Print the dashboard JSON payload (stats, chart data, time range)
        #[arg(long)]
        json: bool,
    },

    /// Print the operation log
    Log {
        #[arg(long = "print", help = "Print the operation log file")]
        print: bool,

        /// Show only the last N entries
        #[arg(long, value_name = "N")]
        tail: Option<usize>,
    },
}
