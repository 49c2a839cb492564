//! Reading the tab-separated bootstrap source.
//!
//! The source is a plain TSV file: no quoting, rows may have a varying number
//! of trailing platform columns, and the first row is a header. The header is
//! returned like any other row; [`Ingestor::bootstrap`](crate::Ingestor::bootstrap)
//! skips it.

use std::path::Path;

use crate::ingest::IngestError;

/// Read every row of a TSV source file.
pub fn read_source(path: &Path) -> Result<Vec<Vec<String>>, IngestError> {
    log::debug!("Reading bootstrap source {}", path.display());
    let reader = source_reader().from_path(path)?;
    collect_rows(reader)
}

/// Parse TSV source content from a string.
pub fn parse_source(content: &str) -> Result<Vec<Vec<String>>, IngestError> {
    collect_rows(source_reader().from_reader(content.as_bytes()))
}

fn source_reader() -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    builder
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .quoting(false);
    builder
}

fn collect_rows<R: std::io::Read>(mut reader: csv::Reader<R>) -> Result<Vec<Vec<String>>, IngestError> {
    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        rows.push(record.iter().map(str::to_string).collect());
    }
    Ok(rows)
}
