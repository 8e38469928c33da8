use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::storage::DataStore;
use crate::storage::range::parse_range;
use crate::ui::messages::{info, warning};
use crate::utils::formatting::{format_modified, human_size};
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Files { range } = cmd {
        let store = DataStore::from_config(cfg);

        let bounds = match range.as_deref() {
            None => None,
            Some(r) if r.eq_ignore_ascii_case("all") => None,
            Some(r) => Some(parse_range(r)?),
        };

        if !store.dir().exists() {
            warning(format!(
                "Data directory does not exist: {}",
                store.dir().display()
            ));
            return Ok(());
        }

        let files = store.list_files(bounds)?;
        if files.is_empty() {
            info("No data files found.");
            return Ok(());
        }

        let mut table = Table::new(vec![
            Column::left("File"),
            Column::left("Format"),
            Column::left("Modified"),
            Column::right("Size"),
        ]);

        for f in &files {
            table.add_row(vec![
                f.name.clone(),
                f.format.as_str().to_string(),
                format_modified(f.modified),
                human_size(f.size),
            ]);
        }

        print!("{}", table.render());
    }
    Ok(())
}
