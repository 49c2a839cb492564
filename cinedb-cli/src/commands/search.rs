use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use cinedb_query::QueryDispatcher;

use crate::CliError;
use crate::settings::Settings;

use super::open_store;

/// Answer a question and print the property bags.
pub(crate) fn run_search(settings: &Settings, question: &str, json: bool) -> Result<(), CliError> {
    let store = open_store(settings)?;
    let items = QueryDispatcher::new(&store).answer(question)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&items)?);
        return Ok(());
    }

    if items.is_empty() {
        log::info!("No results.");
        return Ok(());
    }

    let width = items
        .iter()
        .flat_map(|item| item.properties.iter())
        .map(|p| p.property_name.chars().count())
        .max()
        .unwrap_or(0);

    for item in &items {
        println!(
            "{}",
            format!("[{}]", item.item_type).if_supports_color(Stdout, |t| t.cyan()),
        );
        for property in &item.properties {
            println!(
                "  {:<width$}  {}",
                property.property_name,
                property.property_value,
                width = width,
            );
        }
    }
    crate::log_blank();
    log::info!("{} result(s)", items.len());

    Ok(())
}
