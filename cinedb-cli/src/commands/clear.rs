use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use cinedb_db::{catalog_stats, clear_catalog, with_unit_of_work};

use crate::CliError;
use crate::settings::Settings;

use super::open_store;

/// Delete every row from the catalog tables.
pub(crate) fn run_clear(settings: &Settings, confirm: bool) -> Result<(), CliError> {
    let db_path = &settings.db_path.value;

    if !confirm {
        log::warn!(
            "This will permanently delete every movie, director and platform link in:\n  {}",
            db_path.display(),
        );
        log::info!("Re-run with --confirm to proceed:");
        log::info!("  cinedb clear --confirm");
        return Ok(());
    }

    let store = open_store(settings)?;
    let before = catalog_stats(&store)?;
    if before.is_empty() {
        log::info!("Catalog at {} is already empty.", db_path.display());
        return Ok(());
    }

    with_unit_of_work(&store, "clear_catalog", || clear_catalog(&store))?;

    log::info!(
        "{}",
        "Catalog cleared.".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("  Path:      {}", db_path.display());
    log::info!(
        "  Removed:   {} movies, {} directors, {} platform links",
        before.movies,
        before.directors,
        before.platform_links,
    );
    crate::log_blank();
    log::info!("Run 'cinedb init' to reload from the source.");

    Ok(())
}
