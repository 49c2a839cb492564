use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use cinedb_db::catalog_stats;

use crate::CliError;
use crate::settings::Settings;

use super::open_store;

pub(crate) fn run_stats(settings: &Settings) -> Result<(), CliError> {
    let store = open_store(settings)?;
    let stats = catalog_stats(&store)?;

    log::info!(
        "{}",
        "Catalog Statistics".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("  Database: {}", settings.db_path.value.display());
    crate::log_blank();
    log::info!("  Directors:      {:>8}", stats.directors);
    log::info!("  Movies:         {:>8}", stats.movies);
    log::info!("  Platform links: {:>8}", stats.platform_links);

    Ok(())
}
