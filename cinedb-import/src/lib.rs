//! Load movie records into the catalog database.
//!
//! This crate owns all write-side logic: deciding per table whether an
//! incoming record inserts, updates, or leaves a row alone, running those
//! writes as one unit of work, and bulk-loading the tab-separated source
//! into an empty catalog.

pub mod decide;
pub mod ingest;
pub mod progress;
pub mod source;

pub use decide::{
    DirectorAction, MovieAction, PlatformAction, decide_director, decide_movie, decide_platforms,
    dedup_directors,
};
pub use ingest::{BootstrapStats, IngestError, IngestMode, IngestStep, Ingestor};
pub use progress::{BootstrapPhase, ImportProgress, LogProgress, SilentProgress};
pub use source::{parse_source, read_source};
