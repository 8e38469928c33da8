use crate::cli::parser::Commands;
use crate::core::log::LogLogic;
use crate::errors::AppResult;
use crate::logging::OpLog;

pub fn handle(cmd: &Commands, log: &OpLog) -> AppResult<()> {
    if let Commands::Log { print, tail } = cmd
        && (*print || tail.is_some())
    {
        LogLogic::print_log(log.path(), *tail)?;
    }

    Ok(())
}
