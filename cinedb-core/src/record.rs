//! Positional catalog records.
//!
//! A record is a flat list of fields:
//!
//! ```text
//! 0: title
//! 1: director
//! 2: director age (non-numeric values such as "-" mean unknown)
//! 3: year
//! 4: genre
//! 5: platform (optional)
//! 6: platform (optional)
//! ```

use thiserror::Error;

use crate::types::Director;

/// Fewest fields a record may carry (no platforms).
pub const MIN_FIELDS: usize = 5;
/// Most fields a record may carry (two platforms).
pub const MAX_FIELDS: usize = 7;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("Expected between 5 and 7 fields, found {0}")]
    FieldCount(usize),
    #[error("Field '{0}' must not be empty")]
    EmptyField(&'static str),
    #[error("Year must be an integer, got '{0}'")]
    InvalidYear(String),
}

/// A validated record ready for ingestion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieRecord {
    pub title: String,
    pub director: String,
    pub director_age: Option<i64>,
    pub year: i64,
    pub genre: String,
    /// Non-empty, de-duplicated platform names in source order (0 to 2).
    pub platforms: Vec<String>,
}

impl MovieRecord {
    /// Validate and convert a positional field list.
    pub fn from_fields<S: AsRef<str>>(fields: &[S]) -> Result<Self, RecordError> {
        if fields.len() < MIN_FIELDS || fields.len() > MAX_FIELDS {
            return Err(RecordError::FieldCount(fields.len()));
        }
        let get = |i: usize| fields[i].as_ref().trim();

        let title = get(0);
        if title.is_empty() {
            return Err(RecordError::EmptyField("title"));
        }
        let director = get(1);
        if director.is_empty() {
            return Err(RecordError::EmptyField("director"));
        }
        let year = get(3)
            .parse::<i64>()
            .map_err(|_| RecordError::InvalidYear(get(3).to_string()))?;

        let mut platforms: Vec<String> = Vec::with_capacity(2);
        for p in fields[MIN_FIELDS..].iter().map(|f| f.as_ref().trim()) {
            if !p.is_empty() && !platforms.iter().any(|existing| existing == p) {
                platforms.push(p.to_string());
            }
        }

        Ok(Self {
            title: title.to_string(),
            director: director.to_string(),
            director_age: parse_age(get(2)),
            year,
            genre: get(4).to_string(),
            platforms,
        })
    }

    /// The director half of the record.
    pub fn director(&self) -> Director {
        Director {
            name: self.director.clone(),
            age: self.director_age,
        }
    }
}

/// Parse an age field; anything that is not an integer is treated as unknown.
pub fn parse_age(field: &str) -> Option<i64> {
    field.trim().parse().ok()
}

/// Split a raw line on `delimiter`, dropping a trailing line break.
pub fn split_record(line: &str, delimiter: char) -> Vec<String> {
    line.trim_end_matches(['\r', '\n'])
        .split(delimiter)
        .map(str::to_string)
        .collect()
}
