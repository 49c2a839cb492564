use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use cinedb_db::catalog_stats;
use cinedb_import::{ImportProgress, Ingestor, LogProgress, read_source};

use crate::CliError;
use crate::progress::BarProgress;
use crate::settings::Settings;

use super::open_store;

/// Create the database and bootstrap it from the source file if it is empty.
pub(crate) fn run_init(settings: &Settings, quiet: bool, verbose: bool) -> Result<(), CliError> {
    let db_path = &settings.db_path.value;
    let store = open_store(settings)?;

    log::info!(
        "{}",
        "Catalog Initialization".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("  Database: {}", db_path.display());

    let stats = catalog_stats(&store)?;
    if !stats.is_empty() {
        log::info!(
            "  Already initialized: {} movies, {} directors.",
            stats.movies,
            stats.directors,
        );
        log::info!("Run 'cinedb clear --confirm' first to reload from the source.");
        return Ok(());
    }

    let source = &settings.data_file.value;
    if !source.exists() {
        log::warn!(
            "No bootstrap source at {} ({}); the catalog stays empty.",
            source.display(),
            settings.data_file.source,
        );
        log::info!("Add records with 'cinedb add' or re-run with --data <file>.");
        return Ok(());
    }
    log::info!("  Source:   {}", source.display());
    crate::log_blank();

    let rows = read_source(source)?;
    let progress: Box<dyn ImportProgress> = if verbose {
        Box::new(LogProgress::default())
    } else {
        Box::new(BarProgress::new(quiet))
    };
    let loaded = Ingestor::new(&store).bootstrap(&rows, progress.as_ref())?;

    crate::log_blank();
    log::info!(
        "{} Loaded {} records",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        loaded.records,
    );
    log::info!("  Directors:      {:>8}", loaded.directors_inserted);
    log::info!("  Movies:         {:>8}", loaded.movies_inserted);
    log::info!("  Platform links: {:>8}", loaded.platform_links_inserted);

    Ok(())
}
