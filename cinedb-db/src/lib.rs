//! SQLite persistence layer for the movie catalog.
//!
//! Everything above this crate talks to the database through the
//! [`DataAccess`] trait; [`SqliteStore`] is the production implementation
//! (via rusqlite with the bundled feature).

pub mod operations;
pub mod queries;
pub mod schema;
pub mod store;
pub mod value;

pub use operations::{
    clear_catalog, delete_platforms, find_director, find_movie, insert_director,
    insert_directors, insert_movie, insert_movies, insert_platform_links, movie_id,
    platforms_for_movie, replace_platforms, update_director_age, update_movie_fields,
};
pub use queries::{CatalogStats, catalog_stats, list_schema};
pub use schema::{TABLES, create_schema};
pub use store::{DataAccess, SqliteStore, StoreError, with_unit_of_work};
pub use value::{Rows, SqlValue};
