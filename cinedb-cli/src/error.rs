use cinedb_core::ErrorClass;
use cinedb_db::StoreError;
use cinedb_import::IngestError;
use cinedb_query::QueryError;
use thiserror::Error;

use crate::settings::SettingsError;

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// I/O error
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// Database could not be opened or queried
    #[error("Database error: {0}")]
    Database(#[from] StoreError),

    /// Record ingestion failed
    #[error("{0}")]
    Ingest(#[from] IngestError),

    /// Question dispatch failed
    #[error("{0}")]
    Query(#[from] QueryError),

    /// Settings could not be loaded
    #[error("Config error: {0}")]
    Config(#[from] SettingsError),

    /// JSON output failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    pub(crate) fn class(&self) -> ErrorClass {
        match self {
            Self::Database(e) => e.class(),
            Self::Ingest(e) => e.class(),
            Self::Query(e) => e.class(),
            Self::Config(_) => ErrorClass::ClientInput,
            Self::Io(_) | Self::Json(_) => ErrorClass::Server,
        }
    }

    /// Process exit status for this error.
    pub(crate) fn exit_code(&self) -> i32 {
        match self.class() {
            ErrorClass::ClientInput => 2,
            ErrorClass::Conflict => 3,
            ErrorClass::Server => 1,
        }
    }
}
