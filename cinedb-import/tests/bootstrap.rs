use std::io::Write;

use cinedb_core::*;
use cinedb_db::*;
use cinedb_import::*;

const SOURCE: &str = "\
title\tdirector\tage\tyear\tgenre\tplatform_1\tplatform_2
Matrix\tWachowski\t56\t1999\tSci-Fi\tNetflix\tHBO
Inception\tChristopher Nolan\t54\t2010\tSci-Fi\tPrime
Interstellar\tChristopher Nolan\t54\t2014\tSci-Fi
Heat\tMichael Mann\t81\t1995\tCrime\t\tNetflix
";

fn source_rows() -> Vec<Vec<String>> {
    parse_source(SOURCE).unwrap()
}

#[test]
fn parse_source_keeps_header_and_ragged_rows() {
    let rows = source_rows();
    assert_eq!(rows.len(), 5);
    assert_eq!(rows[0][0], "title");
    assert_eq!(rows[1].len(), 7);
    assert_eq!(rows[3].len(), 5);
    assert_eq!(rows[4][5], "");
}

#[test]
fn read_source_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(SOURCE.as_bytes()).unwrap();
    let rows = read_source(file.path()).unwrap();
    assert_eq!(rows, source_rows());
}

#[test]
fn missing_source_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = read_source(&dir.path().join("data.tsv")).unwrap_err();
    assert!(matches!(err, IngestError::Source(_)));
    assert_eq!(err.class(), ErrorClass::Server);
}

#[test]
fn bootstrap_loads_every_table() {
    let store = SqliteStore::open_memory().unwrap();
    let stats = Ingestor::new(&store)
        .bootstrap(&source_rows(), &SilentProgress)
        .unwrap();

    assert_eq!(
        stats,
        BootstrapStats {
            records: 4,
            directors_inserted: 3,
            movies_inserted: 4,
            platform_links_inserted: 4,
        }
    );
    let counts = catalog_stats(&store).unwrap();
    assert_eq!(counts.directors, 3);
    assert_eq!(counts.movies, 4);
    assert_eq!(counts.platform_links, 4);

    let heat = movie_id(&store, "Heat").unwrap().unwrap();
    assert_eq!(platforms_for_movie(&store, heat).unwrap(), vec!["Netflix"]);
}

#[test]
fn bootstrap_skips_the_header() {
    let store = SqliteStore::open_memory().unwrap();
    Ingestor::new(&store)
        .bootstrap(&source_rows(), &SilentProgress)
        .unwrap();
    assert_eq!(find_movie(&store, "title").unwrap(), None);
}

#[test]
fn bootstrap_requires_empty_catalog() {
    let store = SqliteStore::open_memory().unwrap();
    let ingestor = Ingestor::new(&store);
    ingestor.bootstrap(&source_rows(), &SilentProgress).unwrap();

    let err = ingestor.bootstrap(&source_rows(), &SilentProgress).unwrap_err();
    assert!(matches!(err, IngestError::AlreadyPopulated("directors")));
    assert_eq!(err.class(), ErrorClass::Conflict);
}

#[test]
fn bootstrap_rejects_bad_rows_before_writing() {
    let store = SqliteStore::open_memory().unwrap();
    let mut rows = source_rows();
    rows.push(vec!["Broken".to_string(), "Nobody".to_string()]);

    let err = Ingestor::new(&store)
        .bootstrap(&rows, &SilentProgress)
        .unwrap_err();
    assert!(matches!(err, IngestError::InvalidRow { line: 6, .. }), "got {err:?}");
    assert!(store.table_is_empty("directors").unwrap());
}

#[test]
fn bootstrap_duplicate_title_rolls_back() {
    let store = SqliteStore::open_memory().unwrap();
    let mut rows = source_rows();
    rows.push(
        ["Matrix", "Wachowski", "56", "2003", "Sci-Fi"]
            .iter()
            .map(|s| s.to_string())
            .collect(),
    );

    let err = Ingestor::new(&store)
        .bootstrap(&rows, &SilentProgress)
        .unwrap_err();
    assert!(
        matches!(
            err,
            IngestError::DataAccess {
                step: IngestStep::Movie,
                source: StoreError::Conflict(_),
            }
        ),
        "got {err:?}"
    );
    assert_eq!(err.class(), ErrorClass::Conflict);
    assert!(catalog_stats(&store).unwrap().is_empty());
}

#[test]
fn bootstrap_mode_through_ingest() {
    let store = SqliteStore::open_memory().unwrap();
    let report = Ingestor::new(&store)
        .ingest(&source_rows(), IngestMode::Bootstrap)
        .unwrap();
    assert_eq!(
        report,
        ChangeReport {
            director_changed: true,
            movie_changed: true,
            platform_changed: true,
        }
    );
}

#[test]
fn header_only_bootstrap_is_a_noop() {
    let store = SqliteStore::open_memory().unwrap();
    let rows = vec![source_rows().remove(0)];
    let err = Ingestor::new(&store)
        .ingest(&rows, IngestMode::Bootstrap)
        .unwrap_err();
    assert!(matches!(err, IngestError::NoOpConflict(_)));
}

#[test]
fn incremental_after_bootstrap_reconciles() {
    let store = SqliteStore::open_memory().unwrap();
    let ingestor = Ingestor::new(&store);
    ingestor.bootstrap(&source_rows(), &SilentProgress).unwrap();

    let err = ingestor
        .ingest_line("Inception,Christopher Nolan,54,2010,Sci-Fi,Prime", ',')
        .unwrap_err();
    assert!(matches!(err, IngestError::NoOpConflict(_)));

    let report = ingestor
        .ingest_line("Inception,Christopher Nolan,55,2010,Sci-Fi,Prime", ',')
        .unwrap();
    assert!(report.director_changed);
    assert!(!report.movie_changed);
}

#[derive(Default)]
struct RecordingProgress {
    phases: std::cell::RefCell<Vec<(BootstrapPhase, usize)>>,
    records: std::cell::RefCell<Vec<(usize, usize)>>,
    completed: std::cell::RefCell<Option<BootstrapStats>>,
}

impl ImportProgress for RecordingProgress {
    fn on_phase(&self, phase: BootstrapPhase, items: usize) {
        self.phases.borrow_mut().push((phase, items));
    }

    fn on_record(&self, current: usize, total: usize, _title: &str) {
        self.records.borrow_mut().push((current, total));
    }

    fn on_complete(&self, stats: &BootstrapStats) {
        *self.completed.borrow_mut() = Some(*stats);
    }
}

#[test]
fn bootstrap_reports_phases_in_order() {
    let store = SqliteStore::open_memory().unwrap();
    let progress = RecordingProgress::default();
    let stats = Ingestor::new(&store)
        .bootstrap(&source_rows(), &progress)
        .unwrap();

    assert_eq!(
        *progress.phases.borrow(),
        vec![
            (BootstrapPhase::Directors, 3),
            (BootstrapPhase::Movies, 4),
            (BootstrapPhase::PlatformLinks, 4),
        ]
    );
    assert_eq!(*progress.records.borrow(), vec![(1, 4), (2, 4), (3, 4), (4, 4)]);
    assert_eq!(*progress.completed.borrow(), Some(stats));
}

#[test]
fn failed_bootstrap_never_completes() {
    let store = SqliteStore::open_memory().unwrap();
    let mut rows = source_rows();
    rows.push(
        ["Heat", "Michael Mann", "81", "1995", "Crime"]
            .iter()
            .map(|s| s.to_string())
            .collect(),
    );
    let progress = RecordingProgress::default();
    Ingestor::new(&store).bootstrap(&rows, &progress).unwrap_err();
    assert!(progress.completed.borrow().is_none());
}
