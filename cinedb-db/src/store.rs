//! The data-access contract and its SQLite implementation.

use std::path::Path;

use cinedb_core::ErrorClass;
use rusqlite::{Connection, ErrorCode, ffi, params_from_iter};
use thiserror::Error;

use crate::schema::create_schema;
use crate::value::{Rows, SqlValue};

#[derive(Debug, Error)]
pub enum StoreError {
    /// A unique or primary key already holds the value.
    #[error("Constraint violation: {0}")]
    Conflict(String),
    #[error("SQLite error: {0}")]
    Sqlite(rusqlite::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid table name: '{0}'")]
    InvalidTable(String),
}

impl StoreError {
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::Conflict(_) => ErrorClass::Conflict,
            _ => ErrorClass::Server,
        }
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(e: rusqlite::Error) -> Self {
        match &e {
            rusqlite::Error::SqliteFailure(failure, msg)
                if failure.code == ErrorCode::ConstraintViolation
                    && matches!(
                        failure.extended_code,
                        ffi::SQLITE_CONSTRAINT_UNIQUE | ffi::SQLITE_CONSTRAINT_PRIMARYKEY
                    ) =>
            {
                Self::Conflict(msg.clone().unwrap_or_else(|| failure.to_string()))
            }
            _ => Self::Sqlite(e),
        }
    }
}

/// The three primitives the catalog needs from a relational store.
pub trait DataAccess {
    /// Run a read query with positional parameters.
    fn run_query(&self, sql: &str, params: &[SqlValue]) -> Result<Rows, StoreError>;

    /// Run a write statement once per parameter set.
    ///
    /// An empty `param_sets` runs `sql` exactly once with nothing bound.
    fn run_statement(&self, sql: &str, param_sets: &[Vec<SqlValue>]) -> Result<(), StoreError>;

    /// Whether `table` currently holds no rows.
    fn table_is_empty(&self, table: &str) -> Result<bool, StoreError> {
        if table.is_empty() || !table.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(StoreError::InvalidTable(table.to_string()));
        }
        let rows = self.run_query(&format!("SELECT EXISTS(SELECT 1 FROM {table})"), &[])?;
        Ok(rows.scalar().and_then(SqlValue::as_i64) == Some(0))
    }
}

impl<T: DataAccess + ?Sized> DataAccess for &T {
    fn run_query(&self, sql: &str, params: &[SqlValue]) -> Result<Rows, StoreError> {
        (**self).run_query(sql, params)
    }

    fn run_statement(&self, sql: &str, param_sets: &[Vec<SqlValue>]) -> Result<(), StoreError> {
        (**self).run_statement(sql, param_sets)
    }

    fn table_is_empty(&self, table: &str) -> Result<bool, StoreError> {
        (**self).table_is_empty(table)
    }
}

/// Run `f` as one unit of work.
///
/// Everything `f` writes is rolled back if it returns an error.
pub fn with_unit_of_work<D, T, E, F>(store: &D, name: &str, f: F) -> Result<T, E>
where
    D: DataAccess + ?Sized,
    E: From<StoreError>,
    F: FnOnce() -> Result<T, E>,
{
    store.run_statement(&format!("SAVEPOINT {name}"), &[])?;
    match f() {
        Ok(value) => {
            store.run_statement(&format!("RELEASE {name}"), &[])?;
            Ok(value)
        }
        Err(e) => {
            let rollback = store
                .run_statement(&format!("ROLLBACK TO {name}"), &[])
                .and_then(|_| store.run_statement(&format!("RELEASE {name}"), &[]));
            if let Err(rb) = rollback {
                log::error!("Failed to roll back '{name}': {rb}");
            }
            Err(e)
        }
    }
}

/// A catalog store backed by a single SQLite connection.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open or create a catalog database at the given path.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;
        create_schema(&conn)?;
        log::debug!("Opened catalog database at {}", path.display());
        Ok(Self { conn })
    }

    /// Open an in-memory database with the full schema. Useful for testing.
    pub fn open_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        create_schema(&conn)?;
        Ok(Self { conn })
    }

    /// Borrow the underlying connection.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl DataAccess for SqliteStore {
    fn run_query(&self, sql: &str, params: &[SqlValue]) -> Result<Rows, StoreError> {
        log::trace!("query: {sql} {params:?}");
        let mut stmt = self.conn.prepare(sql)?;
        let columns: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();
        let width = columns.len();

        let mut out = Vec::new();
        let mut rows = stmt.query(params_from_iter(params.iter()))?;
        while let Some(row) = rows.next()? {
            let mut values = Vec::with_capacity(width);
            for i in 0..width {
                values.push(SqlValue::from(row.get_ref(i)?));
            }
            out.push(values);
        }

        Ok(Rows { columns, rows: out })
    }

    fn run_statement(&self, sql: &str, param_sets: &[Vec<SqlValue>]) -> Result<(), StoreError> {
        log::trace!("statement: {sql} ({} parameter sets)", param_sets.len());
        if param_sets.is_empty() {
            self.conn.execute_batch(sql)?;
            return Ok(());
        }
        let mut stmt = self.conn.prepare_cached(sql)?;
        for params in param_sets {
            stmt.execute(params_from_iter(params.iter()))?;
        }
        Ok(())
    }
}
