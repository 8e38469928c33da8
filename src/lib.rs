//! aranetlog library root.
//! Exposes the CLI parser, the high-level run() function, and the ingest /
//! aggregate core used by the batch job and the dashboard.

pub mod cli;
pub mod config;
pub mod core;
pub mod errors;
pub mod logging;
pub mod models;
pub mod storage;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;
use logging::OpLog;
use std::path::Path;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config, config_path: &Path, log: &OpLog) -> AppResult<()> {
    match &cli.command {
        Commands::Init { force } => {
            cli::commands::init::handle(config_path, cli.data_dir.as_deref(), *force)
        }
        Commands::Config { .. } => {
            cli::commands::config::handle(&cli.command, cfg, config_path, log)
        }
        Commands::Ingest { .. } => cli::commands::ingest::handle(&cli.command, cfg, log),
        Commands::Files { .. } => cli::commands::files::handle(&cli.command, cfg),
        Commands::Summary { .. } => cli::commands::summary::handle(&cli.command, cfg, log),
        Commands::Log { .. } => cli::commands::log::handle(&cli.command, log),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    // 1️⃣ parse CLI
    let cli = Cli::parse();
    let config_path = cli.config_path();

    // 2️⃣ `init` writes the config, so it must not require a readable one
    let mut cfg = if matches!(cli.command, Commands::Init { .. }) {
        Config::default()
    } else {
        Config::load(&config_path)?
    };

    // 3️⃣ apply a data directory override from the command line
    if let Some(dir) = &cli.data_dir {
        cfg.storage.data_dir = dir.clone();
    }

    let log = OpLog::from_config(&cfg);

    // 4️⃣ hand everything to the dispatcher
    dispatch(&cli, &cfg, &config_path, &log)
}
