//! Per-table insert/update/no-op decisions.
//!
//! Each function compares what is stored (or `None` when absent) against the
//! incoming record and returns the action to take. Nothing here touches the
//! database, so the branching can be tested in isolation.

use std::collections::HashMap;

use cinedb_core::{Director, Movie, MovieField, MovieRecord};

/// What to do with the `directors` row of a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectorAction {
    Insert,
    UpdateAge(Option<i64>),
    NoOp,
}

impl DirectorAction {
    pub fn is_change(&self) -> bool {
        !matches!(self, Self::NoOp)
    }
}

/// What to do with the `movies` row of a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MovieAction {
    Insert,
    /// Only the listed fields differ from the stored row.
    Update(Vec<MovieField>),
    NoOp,
}

impl MovieAction {
    pub fn is_change(&self) -> bool {
        !matches!(self, Self::NoOp)
    }
}

/// What to do with the platform links of a movie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlatformAction {
    Keep,
    /// Delete the current links and insert these.
    Replace(Vec<String>),
    /// Delete the current links; the record names no platform.
    Clear,
}

impl PlatformAction {
    pub fn is_change(&self) -> bool {
        !matches!(self, Self::Keep)
    }
}

pub fn decide_director(existing: Option<&Director>, incoming: &Director) -> DirectorAction {
    match existing {
        None => DirectorAction::Insert,
        Some(d) if d.age != incoming.age => DirectorAction::UpdateAge(incoming.age),
        Some(_) => DirectorAction::NoOp,
    }
}

pub fn decide_movie(existing: Option<&Movie>, incoming: &MovieRecord) -> MovieAction {
    let Some(movie) = existing else {
        return MovieAction::Insert;
    };

    let mut changed = Vec::new();
    if movie.director != incoming.director {
        changed.push(MovieField::Director);
    }
    if movie.year != incoming.year {
        changed.push(MovieField::Year);
    }
    if movie.genre != incoming.genre {
        changed.push(MovieField::Genre);
    }

    if changed.is_empty() {
        MovieAction::NoOp
    } else {
        MovieAction::Update(changed)
    }
}

/// `current` is the stored link set; a movie that did not exist yet has none.
///
/// Sets are compared without regard to order.
pub fn decide_platforms(current: &[String], incoming: &[String]) -> PlatformAction {
    if incoming.is_empty() {
        return if current.is_empty() {
            PlatformAction::Keep
        } else {
            PlatformAction::Clear
        };
    }

    let mut have: Vec<&str> = current.iter().map(String::as_str).collect();
    let mut want: Vec<&str> = incoming.iter().map(String::as_str).collect();
    have.sort_unstable();
    have.dedup();
    want.sort_unstable();
    want.dedup();

    if have == want {
        PlatformAction::Keep
    } else {
        PlatformAction::Replace(incoming.to_vec())
    }
}

/// Collapse the directors of many records to one entry per name.
///
/// The first age seen for a name wins; later conflicting ages are logged.
pub fn dedup_directors<'a>(records: impl IntoIterator<Item = &'a MovieRecord>) -> Vec<Director> {
    let mut seen: HashMap<&str, usize> = HashMap::new();
    let mut directors: Vec<Director> = Vec::new();

    for record in records {
        match seen.get(record.director.as_str()) {
            Some(&i) => {
                if directors[i].age != record.director_age {
                    log::warn!(
                        "Director '{}' listed with age {:?} and {:?}; keeping {:?}",
                        record.director,
                        directors[i].age,
                        record.director_age,
                        directors[i].age,
                    );
                }
            }
            None => {
                seen.insert(record.director.as_str(), directors.len());
                directors.push(record.director());
            }
        }
    }

    directors
}
