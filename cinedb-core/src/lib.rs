//! Movie catalog data model types, record parsing, and error classes.
//!
//! This crate defines the catalog entities and the property-bag response
//! shape without any database dependencies. Consumers pass these types to
//! `cinedb-db` for persistence or serialize them straight to JSON.

pub mod error;
pub mod record;
pub mod types;

pub use error::ErrorClass;
pub use record::{
    MAX_FIELDS, MIN_FIELDS, MovieRecord, RecordError, parse_age, split_record,
};
pub use types::*;
