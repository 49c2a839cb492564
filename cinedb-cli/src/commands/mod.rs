pub(crate) mod add;
pub(crate) mod clear;
pub(crate) mod config;
pub(crate) mod init;
pub(crate) mod patterns;
pub(crate) mod schema;
pub(crate) mod search;
pub(crate) mod stats;

use cinedb_db::SqliteStore;

use crate::CliError;
use crate::settings::Settings;

/// Open (or create) the configured catalog database.
pub(crate) fn open_store(settings: &Settings) -> Result<SqliteStore, CliError> {
    Ok(SqliteStore::open(&settings.db_path.value)?)
}

/// Render a flag as a check mark or a dash.
pub(crate) fn mark(changed: bool) -> &'static str {
    if changed { "\u{2714}" } else { "-" }
}
