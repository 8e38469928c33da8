use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::logging::OpLog;
use crate::ui::messages::success;
use std::fs;
use std::path::Path;

/// Handle the `init` command
///
/// This creates:
///  - the configuration file, with the data directory and log file placed
///    next to it (unless `--data-dir` says otherwise)
///  - the data directory
pub fn handle(config_path: &Path, data_dir: Option<&str>, force: bool) -> AppResult<()> {
    if config_path.exists() && !force {
        return Err(AppError::Config(format!(
            "{} already exists (use --force to overwrite)",
            config_path.display()
        )));
    }

    let dir = config_path.parent().unwrap_or_else(|| Path::new("."));
    let mut cfg = Config::defaults_in(dir);
    if let Some(d) = data_dir {
        cfg.storage.data_dir = d.to_string();
    }

    println!("⚙️  Initializing aranetlog…");

    cfg.save(config_path)?;
    println!("📄 Config file : {}", config_path.display());

    let data = cfg.data_dir();
    fs::create_dir_all(&data).map_err(|e| AppError::storage(&data, e))?;
    println!("🗂️  Data dir    : {}", data.display());

    OpLog::from_config(&cfg).info(
        "init",
        &format!("configuration written to {}", config_path.display()),
    );

    success("aranetlog initialization completed!");
    Ok(())
}
