//! CRUD operations for all catalog entity types.
//!
//! Every function works against any [`DataAccess`] implementation so the
//! ingestion engine never touches a driver directly.

use cinedb_core::{Director, Movie, MovieField, MovieRecord, PlatformLink};

use crate::schema::TABLES;
use crate::store::{DataAccess, StoreError};
use crate::value::SqlValue;

// ── Director Operations ─────────────────────────────────────────────────────

/// Find a director by name.
pub fn find_director<D: DataAccess + ?Sized>(
    store: &D,
    name: &str,
) -> Result<Option<Director>, StoreError> {
    let rows = store.run_query(
        "SELECT name, age FROM directors WHERE name = ?1",
        &[SqlValue::from(name)],
    )?;
    Ok(rows.rows.into_iter().next().map(|row| {
        let mut values = row.into_iter();
        let name = values.next().map(|v| v.to_string()).unwrap_or_default();
        let age = values.next().and_then(|v| v.as_i64());
        Director { name, age }
    }))
}

/// Insert a single director.
pub fn insert_director<D: DataAccess + ?Sized>(
    store: &D,
    director: &Director,
) -> Result<(), StoreError> {
    insert_directors(store, std::slice::from_ref(director))
}

/// Insert many directors with one prepared statement.
pub fn insert_directors<D: DataAccess + ?Sized>(
    store: &D,
    directors: &[Director],
) -> Result<(), StoreError> {
    if directors.is_empty() {
        return Ok(());
    }
    let params: Vec<Vec<SqlValue>> = directors
        .iter()
        .map(|d| vec![SqlValue::from(d.name.as_str()), SqlValue::from(d.age)])
        .collect();
    store.run_statement("INSERT INTO directors (name, age) VALUES (?1, ?2)", &params)
}

/// Update a director's age.
pub fn update_director_age<D: DataAccess + ?Sized>(
    store: &D,
    name: &str,
    age: Option<i64>,
) -> Result<(), StoreError> {
    store.run_statement(
        "UPDATE directors SET age = ?1 WHERE name = ?2",
        &[vec![SqlValue::from(age), SqlValue::from(name)]],
    )
}

// ── Movie Operations ────────────────────────────────────────────────────────

/// Find a movie by title (exact match).
pub fn find_movie<D: DataAccess + ?Sized>(
    store: &D,
    title: &str,
) -> Result<Option<Movie>, StoreError> {
    let rows = store.run_query(
        "SELECT id, title, director, year, genre FROM movies WHERE title = ?1",
        &[SqlValue::from(title)],
    )?;
    Ok(rows.rows.into_iter().next().map(|row| Movie {
        id: row[0].as_i64().unwrap_or_default(),
        title: row[1].to_string(),
        director: row[2].to_string(),
        year: row[3].as_i64().unwrap_or_default(),
        genre: row[4].to_string(),
    }))
}

/// Insert a single movie from a record.
pub fn insert_movie<D: DataAccess + ?Sized>(
    store: &D,
    record: &MovieRecord,
) -> Result<(), StoreError> {
    insert_movies(store, &[record])
}

/// Insert many movies with one prepared statement.
pub fn insert_movies<D: DataAccess + ?Sized>(
    store: &D,
    records: &[&MovieRecord],
) -> Result<(), StoreError> {
    if records.is_empty() {
        return Ok(());
    }
    let params: Vec<Vec<SqlValue>> = records
        .iter()
        .map(|r| {
            vec![
                SqlValue::from(r.title.as_str()),
                SqlValue::from(r.director.as_str()),
                SqlValue::from(r.year),
                SqlValue::from(r.genre.as_str()),
            ]
        })
        .collect();
    store.run_statement(
        "INSERT INTO movies (title, director, year, genre) VALUES (?1, ?2, ?3, ?4)",
        &params,
    )
}

/// Update only the given fields of the movie with this title.
///
/// An empty `changes` list writes nothing.
pub fn update_movie_fields<D: DataAccess + ?Sized>(
    store: &D,
    title: &str,
    changes: &[(MovieField, SqlValue)],
) -> Result<(), StoreError> {
    if changes.is_empty() {
        return Ok(());
    }
    let assignments: Vec<String> = changes
        .iter()
        .enumerate()
        .map(|(i, (field, _))| format!("{} = ?{}", field.column(), i + 1))
        .collect();
    let sql = format!(
        "UPDATE movies SET {} WHERE title = ?{}",
        assignments.join(", "),
        changes.len() + 1
    );
    let mut params: Vec<SqlValue> = changes.iter().map(|(_, v)| v.clone()).collect();
    params.push(SqlValue::from(title));
    store.run_statement(&sql, &[params])
}

/// Get the surrogate id of a movie by title.
pub fn movie_id<D: DataAccess + ?Sized>(store: &D, title: &str) -> Result<Option<i64>, StoreError> {
    let rows = store.run_query(
        "SELECT id FROM movies WHERE title = ?1",
        &[SqlValue::from(title)],
    )?;
    Ok(rows.scalar().and_then(SqlValue::as_i64))
}

// ── Platform Operations ─────────────────────────────────────────────────────

/// Platforms a movie is currently available on, sorted by name.
pub fn platforms_for_movie<D: DataAccess + ?Sized>(
    store: &D,
    movie_id: i64,
) -> Result<Vec<String>, StoreError> {
    let rows = store.run_query(
        "SELECT platform FROM platform_availability WHERE movie_id = ?1 ORDER BY platform",
        &[SqlValue::from(movie_id)],
    )?;
    Ok(rows
        .rows
        .into_iter()
        .filter_map(|row| row.into_iter().next())
        .map(|v| v.to_string())
        .collect())
}

/// Remove every platform link of a movie.
pub fn delete_platforms<D: DataAccess + ?Sized>(store: &D, movie_id: i64) -> Result<(), StoreError> {
    store.run_statement(
        "DELETE FROM platform_availability WHERE movie_id = ?1",
        &[vec![SqlValue::from(movie_id)]],
    )
}

/// Insert platform links with one prepared statement.
pub fn insert_platform_links<D: DataAccess + ?Sized>(
    store: &D,
    links: &[PlatformLink],
) -> Result<(), StoreError> {
    if links.is_empty() {
        return Ok(());
    }
    let params: Vec<Vec<SqlValue>> = links
        .iter()
        .map(|l| vec![SqlValue::from(l.movie_id), SqlValue::from(l.platform.as_str())])
        .collect();
    store.run_statement(
        "INSERT INTO platform_availability (movie_id, platform) VALUES (?1, ?2)",
        &params,
    )
}

/// Clear and re-insert the platform set of a movie.
pub fn replace_platforms<D: DataAccess + ?Sized>(
    store: &D,
    movie_id: i64,
    platforms: &[String],
) -> Result<(), StoreError> {
    delete_platforms(store, movie_id)?;
    let links: Vec<PlatformLink> = platforms
        .iter()
        .map(|p| PlatformLink {
            movie_id,
            platform: p.clone(),
        })
        .collect();
    insert_platform_links(store, &links)
}

// ── Bulk Operations ─────────────────────────────────────────────────────────

/// Delete every row of every catalog table, dependents first.
pub fn clear_catalog<D: DataAccess + ?Sized>(store: &D) -> Result<(), StoreError> {
    for table in TABLES.iter().rev() {
        store.run_statement(&format!("DELETE FROM {table}"), &[])?;
    }
    Ok(())
}
