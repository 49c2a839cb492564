//! Record ingestion: one record at a time, or a whole source table at once.
//!
//! Each record is applied to the three catalog tables in dependency order
//! (director → movie → platform links). Incremental ingestion reconciles with
//! existing rows via the decisions in [`crate::decide`]; bootstrap assumes an
//! empty catalog and bulk-inserts without per-row checks.

use std::fmt;

use cinedb_core::{
    ChangeReport, ErrorClass, MovieField, MovieRecord, PlatformLink, RecordError, split_record,
};
use cinedb_db::operations;
use cinedb_db::{DataAccess, SqlValue, StoreError, TABLES, with_unit_of_work};
use thiserror::Error;

use crate::decide::{
    DirectorAction, MovieAction, PlatformAction, decide_director, decide_movie, decide_platforms,
    dedup_directors,
};
use crate::progress::{BootstrapPhase, ImportProgress, SilentProgress};

/// The two ways records enter the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestMode {
    /// Bulk load of a full source table into empty tables.
    Bootstrap,
    /// A single record reconciled against what is already stored.
    Incremental,
}

/// The write step an ingestion was in when the store failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestStep {
    Director,
    Movie,
    Platforms,
    Transaction,
}

impl fmt::Display for IngestStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Director => write!(f, "director"),
            Self::Movie => write!(f, "movie"),
            Self::Platforms => write!(f, "platform"),
            Self::Transaction => write!(f, "transaction"),
        }
    }
}

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Invalid source row at line {line}: {source}")]
    InvalidRow {
        line: usize,
        #[source]
        source: RecordError,
    },
    #[error("Nothing added: '{0}' is already in the catalog as submitted")]
    NoOpConflict(String),
    #[error("{entity} not found: '{key}'")]
    NotFound { entity: &'static str, key: String },
    #[error("Table '{0}' already has rows; bootstrap needs an empty catalog")]
    AlreadyPopulated(&'static str),
    #[error("Database error in {step} step: {source}")]
    DataAccess {
        step: IngestStep,
        #[source]
        source: StoreError,
    },
    #[error("Failed to read bootstrap source: {0}")]
    Source(#[from] csv::Error),
}

impl IngestError {
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::InvalidInput(_) | Self::InvalidRow { .. } => ErrorClass::ClientInput,
            Self::NoOpConflict(_) | Self::AlreadyPopulated(_) => ErrorClass::Conflict,
            Self::DataAccess { source, .. } => source.class(),
            Self::NotFound { .. } | Self::Source(_) => ErrorClass::Server,
        }
    }
}

impl From<RecordError> for IngestError {
    fn from(e: RecordError) -> Self {
        Self::InvalidInput(e.to_string())
    }
}

impl From<StoreError> for IngestError {
    fn from(source: StoreError) -> Self {
        Self::DataAccess {
            step: IngestStep::Transaction,
            source,
        }
    }
}

fn at(step: IngestStep) -> impl FnOnce(StoreError) -> IngestError {
    move |source| IngestError::DataAccess { step, source }
}

/// Statistics from a bootstrap load.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BootstrapStats {
    pub records: usize,
    pub directors_inserted: usize,
    pub movies_inserted: usize,
    pub platform_links_inserted: usize,
}

impl BootstrapStats {
    /// The bootstrap expressed as a change report.
    pub fn report(&self) -> ChangeReport {
        ChangeReport {
            director_changed: self.directors_inserted > 0,
            movie_changed: self.movies_inserted > 0,
            platform_changed: self.platform_links_inserted > 0,
        }
    }
}

/// Writes records into the catalog through a [`DataAccess`] store.
pub struct Ingestor<'a, D: DataAccess + ?Sized> {
    store: &'a D,
}

impl<'a, D: DataAccess + ?Sized> Ingestor<'a, D> {
    pub fn new(store: &'a D) -> Self {
        Self { store }
    }

    /// Ingest `rows` in the given mode.
    ///
    /// `Incremental` takes exactly one record; `Bootstrap` takes a full source
    /// table whose first row is a header. Fails with
    /// [`IngestError::NoOpConflict`] when nothing was written.
    pub fn ingest<S: AsRef<str>>(
        &self,
        rows: &[Vec<S>],
        mode: IngestMode,
    ) -> Result<ChangeReport, IngestError> {
        match mode {
            IngestMode::Incremental => match rows {
                [record] => self.ingest_record(record),
                _ => Err(IngestError::InvalidInput(format!(
                    "incremental ingestion takes exactly one record, got {}",
                    rows.len()
                ))),
            },
            IngestMode::Bootstrap => {
                let report = self.bootstrap(rows, &SilentProgress)?.report();
                if report.is_noop() {
                    return Err(IngestError::NoOpConflict("bootstrap source".to_string()));
                }
                Ok(report)
            }
        }
    }

    /// Split a raw line on `delimiter` and ingest it incrementally.
    pub fn ingest_line(&self, raw_line: &str, delimiter: char) -> Result<ChangeReport, IngestError> {
        self.ingest_record(&split_record(raw_line, delimiter))
    }

    /// Ingest a single record, inserting or updating only what differs.
    pub fn ingest_record<S: AsRef<str>>(&self, fields: &[S]) -> Result<ChangeReport, IngestError> {
        let record = MovieRecord::from_fields(fields)?;
        log::debug!("Ingesting '{}' ({})", record.title, record.director);

        let report = with_unit_of_work(self.store, "ingest_record", || {
            Ok::<_, IngestError>(ChangeReport {
                director_changed: self.director_step(&record)?,
                movie_changed: self.movie_step(&record)?,
                platform_changed: self.platform_step(&record)?,
            })
        })?;

        if report.is_noop() {
            return Err(IngestError::NoOpConflict(record.title));
        }
        log::info!(
            "Ingested '{}': director={} movie={} platforms={}",
            record.title,
            report.director_changed,
            report.movie_changed,
            report.platform_changed,
        );
        Ok(report)
    }

    fn director_step(&self, record: &MovieRecord) -> Result<bool, IngestError> {
        let incoming = record.director();
        let existing =
            operations::find_director(self.store, &incoming.name).map_err(at(IngestStep::Director))?;
        let action = decide_director(existing.as_ref(), &incoming);
        log::debug!("  director '{}': {:?}", incoming.name, action);

        let written = match &action {
            DirectorAction::Insert => operations::insert_director(self.store, &incoming),
            DirectorAction::UpdateAge(age) => {
                operations::update_director_age(self.store, &incoming.name, *age)
            }
            DirectorAction::NoOp => Ok(()),
        };
        written.map_err(at(IngestStep::Director))?;

        Ok(action.is_change())
    }

    fn movie_step(&self, record: &MovieRecord) -> Result<bool, IngestError> {
        let existing =
            operations::find_movie(self.store, &record.title).map_err(at(IngestStep::Movie))?;
        let action = decide_movie(existing.as_ref(), record);
        log::debug!("  movie '{}': {:?}", record.title, action);

        let written = match &action {
            MovieAction::Insert => operations::insert_movie(self.store, record),
            MovieAction::Update(fields) => {
                let changes: Vec<(MovieField, SqlValue)> = fields
                    .iter()
                    .map(|field| {
                        let value = match field {
                            MovieField::Director => SqlValue::from(record.director.as_str()),
                            MovieField::Year => SqlValue::from(record.year),
                            MovieField::Genre => SqlValue::from(record.genre.as_str()),
                        };
                        (*field, value)
                    })
                    .collect();
                operations::update_movie_fields(self.store, &record.title, &changes)
            }
            MovieAction::NoOp => Ok(()),
        };
        written.map_err(at(IngestStep::Movie))?;

        Ok(action.is_change())
    }

    fn platform_step(&self, record: &MovieRecord) -> Result<bool, IngestError> {
        let movie_id = operations::movie_id(self.store, &record.title)
            .map_err(at(IngestStep::Platforms))?
            .ok_or_else(|| IngestError::NotFound {
                entity: "Movie",
                key: record.title.clone(),
            })?;
        let current =
            operations::platforms_for_movie(self.store, movie_id).map_err(at(IngestStep::Platforms))?;
        let action = decide_platforms(&current, &record.platforms);
        log::debug!("  platforms of '{}': {:?}", record.title, action);

        let written = match &action {
            PlatformAction::Replace(platforms) => {
                operations::replace_platforms(self.store, movie_id, platforms)
            }
            PlatformAction::Clear => operations::delete_platforms(self.store, movie_id),
            PlatformAction::Keep => Ok(()),
        };
        written.map_err(at(IngestStep::Platforms))?;

        Ok(action.is_change())
    }

    /// Bulk-load a full source table into an empty catalog.
    ///
    /// Row 0 is the header and is skipped. Every data row is validated before
    /// anything is written; the load itself is one unit of work.
    pub fn bootstrap<S: AsRef<str>>(
        &self,
        table: &[Vec<S>],
        progress: &dyn ImportProgress,
    ) -> Result<BootstrapStats, IngestError> {
        for name in TABLES {
            if !self.store.table_is_empty(name)? {
                return Err(IngestError::AlreadyPopulated(name));
            }
        }

        let data = table.get(1..).unwrap_or_default();
        let records = data
            .iter()
            .enumerate()
            // +1 for the header, +1 for 1-based line numbers
            .map(|(i, row)| {
                MovieRecord::from_fields(row).map_err(|source| IngestError::InvalidRow {
                    line: i + 2,
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let stats = with_unit_of_work(self.store, "bootstrap", || self.bulk_load(&records, progress))?;

        progress.on_complete(&stats);
        Ok(stats)
    }

    fn bulk_load(
        &self,
        records: &[MovieRecord],
        progress: &dyn ImportProgress,
    ) -> Result<BootstrapStats, IngestError> {
        let mut stats = BootstrapStats {
            records: records.len(),
            ..Default::default()
        };

        let directors = dedup_directors(records);
        progress.on_phase(BootstrapPhase::Directors, directors.len());
        operations::insert_directors(self.store, &directors).map_err(at(IngestStep::Director))?;
        stats.directors_inserted = directors.len();

        progress.on_phase(BootstrapPhase::Movies, records.len());
        let refs: Vec<&MovieRecord> = records.iter().collect();
        operations::insert_movies(self.store, &refs).map_err(at(IngestStep::Movie))?;
        stats.movies_inserted = refs.len();

        progress.on_phase(BootstrapPhase::PlatformLinks, records.len());
        let mut links = Vec::new();
        for (i, record) in records.iter().enumerate() {
            let movie_id = operations::movie_id(self.store, &record.title)
                .map_err(at(IngestStep::Platforms))?
                .ok_or_else(|| IngestError::NotFound {
                    entity: "Movie",
                    key: record.title.clone(),
                })?;
            links.extend(record.platforms.iter().map(|platform| PlatformLink {
                movie_id,
                platform: platform.clone(),
            }));
            progress.on_record(i + 1, records.len(), &record.title);
        }
        operations::insert_platform_links(self.store, &links).map_err(at(IngestStep::Platforms))?;
        stats.platform_links_inserted = links.len();

        Ok(stats)
    }
}
