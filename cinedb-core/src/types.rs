//! Data model types for the movie catalog.
//!
//! These types represent the persistent catalog schema (directors, movies,
//! platform availability) and the generic shapes returned to callers.

use serde::{Deserialize, Serialize};

// ── Director ────────────────────────────────────────────────────────────────

/// A film director, keyed by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Director {
    pub name: String,
    /// `None` when the source row carried no usable age.
    pub age: Option<i64>,
}

// ── Movie ───────────────────────────────────────────────────────────────────

/// A movie row as stored. `title` is the natural key, `id` the surrogate one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Movie {
    pub id: i64,
    pub title: String,
    pub director: String,
    pub year: i64,
    pub genre: String,
}

/// Mutable movie attributes, used when diffing an incoming record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MovieField {
    Director,
    Year,
    Genre,
}

impl MovieField {
    /// Column name in the `movies` table.
    pub fn column(&self) -> &'static str {
        match self {
            Self::Director => "director",
            Self::Year => "year",
            Self::Genre => "genre",
        }
    }
}

// ── Platform Availability ───────────────────────────────────────────────────

/// A movie being available on a streaming platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformLink {
    pub movie_id: i64,
    pub platform: String,
}

// ── Ingestion Outcome ───────────────────────────────────────────────────────

/// Which tables a single ingestion actually mutated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeReport {
    pub director_changed: bool,
    pub movie_changed: bool,
    pub platform_changed: bool,
}

impl ChangeReport {
    /// True when nothing was written at all.
    pub fn is_noop(&self) -> bool {
        !(self.director_changed || self.movie_changed || self.platform_changed)
    }
}

// ── Query Results ───────────────────────────────────────────────────────────

/// One column of a result row, stringified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    pub property_name: String,
    pub property_value: String,
}

/// A result row in the generic property-bag shape.
///
/// `properties` keeps the column order of the query that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultItem {
    pub item_type: String,
    pub properties: Vec<Property>,
}

impl ResultItem {
    /// Look up a property value by column name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.properties
            .iter()
            .find(|p| p.property_name == name)
            .map(|p| p.property_value.as_str())
    }
}

// ── Schema Summary ──────────────────────────────────────────────────────────

/// One `(table, column)` pair of the schema summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSchema {
    pub table_name: String,
    pub table_column: String,
}
