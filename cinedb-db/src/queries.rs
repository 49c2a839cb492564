//! Read queries for the catalog database: schema summary and statistics.

use cinedb_core::TableSchema;

use crate::schema::TABLES;
use crate::store::{DataAccess, StoreError};
use crate::value::SqlValue;

/// Every user table with its columns, in declaration order.
pub fn list_schema<D: DataAccess + ?Sized>(store: &D) -> Result<Vec<TableSchema>, StoreError> {
    let rows = store.run_query(
        "SELECT m.name, p.name
         FROM sqlite_master m
         JOIN pragma_table_info(m.name) p
         WHERE m.type = 'table' AND m.name NOT LIKE 'sqlite_%'
         ORDER BY m.name, p.cid",
        &[],
    )?;
    Ok(rows
        .rows
        .into_iter()
        .map(|row| TableSchema {
            table_name: row[0].to_string(),
            table_column: row[1].to_string(),
        })
        .collect())
}

/// Row counts for the catalog tables.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CatalogStats {
    pub directors: i64,
    pub movies: i64,
    pub platform_links: i64,
}

impl CatalogStats {
    pub fn is_empty(&self) -> bool {
        self.directors == 0 && self.movies == 0 && self.platform_links == 0
    }
}

/// Count the rows of each catalog table.
pub fn catalog_stats<D: DataAccess + ?Sized>(store: &D) -> Result<CatalogStats, StoreError> {
    let count = |table: &str| -> Result<i64, StoreError> {
        let rows = store.run_query(&format!("SELECT COUNT(*) FROM {table}"), &[])?;
        Ok(rows.scalar().and_then(SqlValue::as_i64).unwrap_or(0))
    };
    let [directors, movies, platforms] = TABLES;
    Ok(CatalogStats {
        directors: count(directors)?,
        movies: count(movies)?,
        platform_links: count(platforms)?,
    })
}
