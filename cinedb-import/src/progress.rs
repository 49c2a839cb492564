//! Bootstrap progress reporting.
//!
//! A bootstrap runs three phases in referential order. Within the platform
//! phase each source record is reported as its links are resolved.

use std::fmt;

use crate::ingest::BootstrapStats;

/// The stages of a bootstrap load, in the order they run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapPhase {
    /// Bulk insert of the name-deduplicated directors.
    Directors,
    /// Bulk insert of every movie row.
    Movies,
    /// Movie id lookup and bulk insert of platform links.
    PlatformLinks,
}

impl fmt::Display for BootstrapPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Directors => write!(f, "Loading directors"),
            Self::Movies => write!(f, "Loading movies"),
            Self::PlatformLinks => write!(f, "Linking platforms"),
        }
    }
}

/// Receives bootstrap progress.
pub trait ImportProgress {
    /// A phase starts; `items` is how many rows it will write or resolve.
    fn on_phase(&self, phase: BootstrapPhase, items: usize);

    /// Record `current` of `total` had its platform links resolved.
    fn on_record(&self, current: usize, total: usize, title: &str);

    /// The load committed.
    fn on_complete(&self, stats: &BootstrapStats);
}

/// Discards all updates.
pub struct SilentProgress;

impl ImportProgress for SilentProgress {
    fn on_phase(&self, _phase: BootstrapPhase, _items: usize) {}
    fn on_record(&self, _current: usize, _total: usize, _title: &str) {}
    fn on_complete(&self, _stats: &BootstrapStats) {}
}

/// Logs phases and every `every`-th record through the `log` crate.
pub struct LogProgress {
    pub every: usize,
}

impl Default for LogProgress {
    fn default() -> Self {
        Self { every: 500 }
    }
}

impl ImportProgress for LogProgress {
    fn on_phase(&self, phase: BootstrapPhase, items: usize) {
        log::info!("{} ({})", phase, items);
    }

    fn on_record(&self, current: usize, total: usize, title: &str) {
        if current.is_multiple_of(self.every.max(1)) || current == total {
            log::info!("  [{}/{}] {}", current, total, title);
        }
    }

    fn on_complete(&self, stats: &BootstrapStats) {
        log::info!(
            "Loaded {} records: {} directors, {} movies, {} platform links",
            stats.records,
            stats.directors_inserted,
            stats.movies_inserted,
            stats.platform_links_inserted,
        );
    }
}
