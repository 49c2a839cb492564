//! Natural-language questions over the movie catalog.
//!
//! A question is matched against an ordered list of Italian phrasings; the
//! first pattern that matches picks the SQL template, its capture groups
//! become the template's parameters, and the rows come back as property bags.

pub mod dispatcher;
pub mod patterns;

pub use dispatcher::{QueryDispatcher, QueryError, format_response};
pub use patterns::{ParamKind, QueryPattern, canonical_patterns};
