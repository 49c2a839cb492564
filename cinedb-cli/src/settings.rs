//! Application settings: database path, bootstrap source, record delimiter.
//!
//! Values come from `~/.config/cinedb/settings.toml`, environment variables,
//! and command-line flags. Priority: flag > env var > settings file > default.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

pub(crate) const ENV_DB_PATH: &str = "CINEDB_DB_PATH";
pub(crate) const ENV_DATA_FILE: &str = "CINEDB_DATA_FILE";
pub(crate) const ENV_DELIMITER: &str = "CINEDB_DELIMITER";

const DEFAULT_DATA_FILE: &str = "data.tsv";
const DEFAULT_DELIMITER: char = ',';

#[derive(Debug, Error)]
pub(crate) enum SettingsError {
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("Invalid delimiter '{value}' from {origin}: expected a single character")]
    InvalidDelimiter { value: String, origin: SettingSource },
}

/// Canonical path to the settings file: `~/.config/cinedb/settings.toml`.
pub(crate) fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("cinedb").join("settings.toml")
}

/// Default database location: `<data dir>/cinedb/catalog.db`.
pub(crate) fn default_db_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("cinedb")
        .join("catalog.db")
}

/// Where a setting's value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SettingSource {
    /// Given on the command line.
    Flag(&'static str),
    /// Loaded from an environment variable.
    EnvVar(&'static str),
    /// Loaded from the settings file.
    ConfigFile,
    /// Built-in default.
    Default,
}

impl fmt::Display for SettingSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flag(flag) => write!(f, "flag --{}", flag),
            Self::EnvVar(var) => write!(f, "env ${}", var),
            Self::ConfigFile => write!(f, "settings file"),
            Self::Default => write!(f, "default"),
        }
    }
}

/// A resolved value together with its provenance.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Setting<T> {
    pub value: T,
    pub source: SettingSource,
}

/// TOML settings file format.
#[derive(Debug, Default, Deserialize)]
struct SettingsFile {
    database: Option<DatabaseSection>,
    bootstrap: Option<BootstrapSection>,
    ingest: Option<IngestSection>,
}

#[derive(Debug, Default, Deserialize)]
struct DatabaseSection {
    path: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
struct BootstrapSection {
    source: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
struct IngestSection {
    delimiter: Option<String>,
}

/// Values given on the command line.
#[derive(Debug, Default)]
pub(crate) struct Overrides {
    pub db: Option<PathBuf>,
    pub data: Option<PathBuf>,
    pub delimiter: Option<char>,
}

/// Effective settings.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Settings {
    pub db_path: Setting<PathBuf>,
    pub data_file: Setting<PathBuf>,
    pub delimiter: Setting<char>,
}

impl Settings {
    /// Load settings from the settings file, the environment, and `overrides`.
    pub(crate) fn load(overrides: &Overrides) -> Result<Self, SettingsError> {
        let path = settings_path();
        let file = read_settings_file(&path)?;
        Self::resolve(file.as_deref(), overrides, |var| std::env::var(var).ok())
    }

    fn resolve(
        file_contents: Option<&str>,
        overrides: &Overrides,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, SettingsError> {
        let file: SettingsFile = match file_contents {
            Some(contents) => toml::from_str(contents).map_err(|source| SettingsError::Parse {
                path: settings_path(),
                source,
            })?,
            None => SettingsFile::default(),
        };
        let env = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

        let db_path = pick(
            overrides.db.clone().map(|v| (v, SettingSource::Flag("db"))),
            env(ENV_DB_PATH).map(|v| (PathBuf::from(v), SettingSource::EnvVar(ENV_DB_PATH))),
            file.database.and_then(|d| d.path),
            default_db_path,
        );

        let data_file = pick(
            overrides.data.clone().map(|v| (v, SettingSource::Flag("data"))),
            env(ENV_DATA_FILE).map(|v| (PathBuf::from(v), SettingSource::EnvVar(ENV_DATA_FILE))),
            file.bootstrap.and_then(|b| b.source),
            || PathBuf::from(DEFAULT_DATA_FILE),
        );

        let delimiter = match (overrides.delimiter, env(ENV_DELIMITER)) {
            (Some(c), _) => Setting {
                value: c,
                source: SettingSource::Flag("delimiter"),
            },
            (None, Some(v)) => Setting {
                value: parse_delimiter(&v, SettingSource::EnvVar(ENV_DELIMITER))?,
                source: SettingSource::EnvVar(ENV_DELIMITER),
            },
            (None, None) => match file.ingest.and_then(|i| i.delimiter) {
                Some(v) => Setting {
                    value: parse_delimiter(&v, SettingSource::ConfigFile)?,
                    source: SettingSource::ConfigFile,
                },
                None => Setting {
                    value: DEFAULT_DELIMITER,
                    source: SettingSource::Default,
                },
            },
        };

        Ok(Self {
            db_path,
            data_file,
            delimiter,
        })
    }
}

fn pick<T>(
    flag: Option<(T, SettingSource)>,
    env: Option<(T, SettingSource)>,
    file: Option<T>,
    default: impl FnOnce() -> T,
) -> Setting<T> {
    let (value, source) = flag
        .or(env)
        .or_else(|| file.map(|v| (v, SettingSource::ConfigFile)))
        .unwrap_or_else(|| (default(), SettingSource::Default));
    Setting { value, source }
}

/// Accepts a single character, or `\t` / `tab` for a tab.
fn parse_delimiter(value: &str, origin: SettingSource) -> Result<char, SettingsError> {
    if value == "\\t" || value.eq_ignore_ascii_case("tab") {
        return Ok('\t');
    }
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(SettingsError::InvalidDelimiter {
            value: value.to_string(),
            origin,
        }),
    }
}

/// Read the settings file, or `None` if it doesn't exist.
fn read_settings_file(path: &Path) -> Result<Option<String>, SettingsError> {
    match std::fs::read_to_string(path) {
        Ok(contents) => Ok(Some(contents)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(SettingsError::Read {
            path: path.to_path_buf(),
            source,
        }),
    }
}
