//! First-match dispatch from a question to its SQL template.

use cinedb_core::{ErrorClass, Property, ResultItem};
use cinedb_db::{DataAccess, Rows, SqlValue, StoreError};
use thiserror::Error;

use crate::patterns::{QueryPattern, canonical_patterns};

#[derive(Debug, Error)]
pub enum QueryError {
    #[error("Unrecognized query: '{0}'")]
    UnrecognizedQuery(String),
    #[error("Database error: {0}")]
    DataAccess(#[from] StoreError),
}

impl QueryError {
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::UnrecognizedQuery(_) => ErrorClass::ClientInput,
            Self::DataAccess(e) => e.class(),
        }
    }
}

/// Answers catalog questions through a [`DataAccess`] store.
pub struct QueryDispatcher<'a, D: DataAccess + ?Sized> {
    store: &'a D,
    patterns: Vec<QueryPattern>,
}

impl<'a, D: DataAccess + ?Sized> QueryDispatcher<'a, D> {
    /// A dispatcher over the canonical Italian questions.
    pub fn new(store: &'a D) -> Self {
        Self::with_patterns(store, canonical_patterns())
    }

    /// A dispatcher over a custom ordered pattern list.
    pub fn with_patterns(store: &'a D, patterns: Vec<QueryPattern>) -> Self {
        Self { store, patterns }
    }

    pub fn patterns(&self) -> &[QueryPattern] {
        &self.patterns
    }

    /// Find the first pattern matching `question` and bind its captures.
    pub fn match_question(&self, question: &str) -> Result<(&QueryPattern, Vec<SqlValue>), QueryError> {
        self.patterns
            .iter()
            .find_map(|p| p.bind(question).map(|params| (p, params)))
            .ok_or_else(|| QueryError::UnrecognizedQuery(question.to_string()))
    }

    /// Answer a question as a list of property bags.
    pub fn answer(&self, question: &str) -> Result<Vec<ResultItem>, QueryError> {
        let (pattern, params) = self.match_question(question)?;
        log::debug!("'{}' matched '{}' with {:?}", question, pattern.pattern(), params);

        let rows = self.store.run_query(pattern.sql(), &params)?;
        Ok(format_response(pattern.item_type(), &rows))
    }
}

/// Turn every row into a property bag, keeping the column order.
pub fn format_response(item_type: &str, rows: &Rows) -> Vec<ResultItem> {
    rows.rows
        .iter()
        .map(|row| ResultItem {
            item_type: item_type.to_string(),
            properties: rows
                .columns
                .iter()
                .zip(row)
                .map(|(column, value)| Property {
                    property_name: column.clone(),
                    property_value: value.to_string(),
                })
                .collect(),
        })
        .collect()
}
