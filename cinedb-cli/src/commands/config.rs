use std::fmt::Display;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::settings::{SettingSource, Settings, settings_path};

/// Show effective settings and their sources.
pub(crate) fn run_config_show(settings: &Settings) {
    let path = settings_path();

    log::info!(
        "{}",
        "cinedb Configuration".if_supports_color(Stdout, |t| t.bold()),
    );
    crate::log_blank();

    if path.exists() {
        log::info!(
            "  Settings file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(exists)".if_supports_color(Stdout, |t| t.green()),
        );
    } else {
        log::info!(
            "  Settings file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(not found)".if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
    crate::log_blank();

    show_field("database.path", settings.db_path.value.display(), settings.db_path.source);
    show_field(
        "bootstrap.source",
        settings.data_file.value.display(),
        settings.data_file.source,
    );
    show_field(
        "ingest.delimiter",
        format!("{:?}", settings.delimiter.value),
        settings.delimiter.source,
    );
}

fn show_field(name: &str, value: impl Display, source: SettingSource) {
    let source_str = format!("({})", source);
    log::info!(
        "  {} {} {}",
        format!("{}:", name).if_supports_color(Stdout, |t| t.cyan()),
        value,
        source_str.if_supports_color(Stdout, |t| t.dimmed()),
    );
}

/// Print the settings file path.
pub(crate) fn run_config_path() {
    println!("{}", settings_path().display());
}
