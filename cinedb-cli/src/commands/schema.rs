use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use cinedb_db::list_schema;

use crate::CliError;
use crate::settings::Settings;

use super::open_store;

/// Print every table with its columns.
pub(crate) fn run_schema(settings: &Settings, json: bool) -> Result<(), CliError> {
    let store = open_store(settings)?;
    let schema = list_schema(&store)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&schema)?);
        return Ok(());
    }

    let mut current: Option<&str> = None;
    for entry in &schema {
        if current != Some(entry.table_name.as_str()) {
            if current.is_some() {
                println!();
            }
            println!(
                "{}",
                entry.table_name.if_supports_color(Stdout, |t| t.bold()),
            );
            current = Some(entry.table_name.as_str());
        }
        println!("  {}", entry.table_column);
    }

    Ok(())
}
