//! SQLite schema creation.

use rusqlite::Connection;

/// Catalog tables in dependency order (referenced tables first).
pub const TABLES: [&str; 3] = ["directors", "movies", "platform_availability"];

/// Create all tables and indexes if they don't exist.
///
/// Idempotent: safe to call on an existing database.
pub fn create_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(SCHEMA_SQL)
}

const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS directors (
    name TEXT PRIMARY KEY,
    age INTEGER
);

CREATE TABLE IF NOT EXISTS movies (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL UNIQUE,
    director TEXT NOT NULL REFERENCES directors(name),
    year INTEGER NOT NULL,
    genre TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_movies_director ON movies(director);
CREATE INDEX IF NOT EXISTS idx_movies_year ON movies(year);
CREATE INDEX IF NOT EXISTS idx_movies_genre ON movies(genre);

CREATE TABLE IF NOT EXISTS platform_availability (
    movie_id INTEGER NOT NULL REFERENCES movies(id) ON DELETE CASCADE,
    platform TEXT NOT NULL,
    PRIMARY KEY (movie_id, platform)
);
CREATE INDEX IF NOT EXISTS idx_platform_name ON platform_availability(platform);
"#;
