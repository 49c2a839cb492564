use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use cinedb_import::Ingestor;

use crate::CliError;
use crate::settings::Settings;

use super::{mark, open_store};

/// Ingest one raw record line and print which tables changed.
pub(crate) fn run_add(settings: &Settings, line: &str) -> Result<(), CliError> {
    let store = open_store(settings)?;
    let report = Ingestor::new(&store).ingest_line(line, settings.delimiter.value)?;

    log::info!(
        "{} Record applied",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
    );
    log::info!("  Director:  {}", mark(report.director_changed));
    log::info!("  Movie:     {}", mark(report.movie_changed));
    log::info!("  Platforms: {}", mark(report.platform_changed));

    Ok(())
}
