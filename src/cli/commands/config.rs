use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::logging::OpLog;
use crate::ui::messages::{success, warning};
use std::path::Path;
use std::process::Command;

/// Handle the `config` subcommand
pub fn handle(cmd: &Commands, cfg: &Config, path: &Path, log: &OpLog) -> AppResult<()> {
    if let Commands::Config {
        print_config,
        check,
        edit_config,
        editor,
    } = cmd
    {
        // ---- PRINT CONFIG ----
        if *print_config {
            println!("📄 Current configuration ({}):\n", path.display());
            println!("{}", cfg.to_yaml()?);
        }

        // ---- CHECK CONFIG ----
        if *check {
            let problems = cfg.validate();
            if problems.is_empty() {
                success("Configuration is valid.");
            } else {
                for p in &problems {
                    warning(p);
                }
                log.warning(
                    "config",
                    &format!("{} problem(s) found in {}", problems.len(), path.display()),
                );
                return Err(AppError::Config(format!(
                    "{} problem(s) found in {}",
                    problems.len(),
                    path.display()
                )));
            }
        }

        // ---- EDIT CONFIG ----
        if *edit_config {
            if !path.exists() {
                cfg.save(path)?;
            }

            let default_editor = std::env::var("EDITOR")
                .or_else(|_| std::env::var("VISUAL"))
                .unwrap_or_else(|_| {
                    if cfg!(target_os = "windows") {
                        "notepad".to_string()
                    } else {
                        "nano".to_string()
                    }
                });

            let editor_to_use = editor.clone().unwrap_or_else(|| default_editor.clone());

            match Command::new(&editor_to_use).arg(path).status() {
                Ok(s) if s.success() => {
                    success(format!(
                        "Configuration file edited successfully using '{editor_to_use}'"
                    ));
                }
                _ if editor_to_use != default_editor => {
                    warning(format!(
                        "Editor '{editor_to_use}' not available, falling back to '{default_editor}'"
                    ));
                    let status = Command::new(&default_editor).arg(path).status()?;
                    if !status.success() {
                        return Err(AppError::Config(format!(
                            "editor '{default_editor}' exited with {status}"
                        )));
                    }
                }
                Ok(s) => {
                    return Err(AppError::Config(format!(
                        "editor '{editor_to_use}' exited with {s}"
                    )));
                }
                Err(e) => return Err(AppError::Io(e)),
            }

            // Re-validate after editing so mistakes show up immediately.
            for p in Config::load(path)?.validate() {
                warning(p);
            }
        }
    }

    Ok(())
}
