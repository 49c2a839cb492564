use cinedb_db::schema::create_schema;
use cinedb_db::*;

#[test]
fn schema_is_idempotent() {
    let store = SqliteStore::open_memory().unwrap();
    // Creating again should not error
    create_schema(store.connection()).unwrap();
}

#[test]
fn foreign_keys_enabled() {
    let store = SqliteStore::open_memory().unwrap();
    let fk: i32 = store
        .connection()
        .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
        .unwrap();
    assert_eq!(fk, 1);
}

#[test]
fn all_tables_exist() {
    let store = SqliteStore::open_memory().unwrap();
    for table in TABLES {
        let exists: bool = store
            .connection()
            .query_row(
                "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name=?1)",
                [table],
                |row| row.get(0),
            )
            .unwrap();
        assert!(exists, "Table '{}' should exist", table);
    }
}

#[test]
fn schema_summary_lists_columns_in_order() {
    let store = SqliteStore::open_memory().unwrap();
    let schema = list_schema(&store).unwrap();
    let pairs: Vec<(&str, &str)> = schema
        .iter()
        .map(|s| (s.table_name.as_str(), s.table_column.as_str()))
        .collect();
    assert_eq!(
        pairs,
        vec![
            ("directors", "name"),
            ("directors", "age"),
            ("movies", "id"),
            ("movies", "title"),
            ("movies", "director"),
            ("movies", "year"),
            ("movies", "genre"),
            ("platform_availability", "movie_id"),
            ("platform_availability", "platform"),
        ]
    );
}

#[test]
fn open_on_disk_creates_parent_dirs() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("catalog.db");
    let store = SqliteStore::open(&path).unwrap();
    assert!(path.exists());
    assert!(store.table_is_empty("movies").unwrap());

    // Reopening keeps the schema
    drop(store);
    let store = SqliteStore::open(&path).unwrap();
    assert!(store.table_is_empty("directors").unwrap());
}
