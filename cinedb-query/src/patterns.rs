//! Question patterns and their SQL templates.

use std::sync::LazyLock;

use cinedb_db::SqlValue;
use regex::Regex;

/// How a capture group is bound to its SQL placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    Text,
    /// Bound as an integer; falls back to text if the capture doesn't parse.
    Integer,
}

/// One `(pattern, item type, SQL template)` entry of the dispatch list.
///
/// The pattern is anchored at the start of the question only, so trailing
/// text after a match is ignored.
#[derive(Debug, Clone)]
pub struct QueryPattern {
    source: String,
    regex: Regex,
    item_type: String,
    sql: String,
    params: Vec<ParamKind>,
}

impl QueryPattern {
    pub fn new(
        pattern: &str,
        item_type: &str,
        sql: &str,
        params: &[ParamKind],
    ) -> Result<Self, regex::Error> {
        Ok(Self {
            source: pattern.to_string(),
            regex: Regex::new(&format!("^(?:{pattern})"))?,
            item_type: item_type.to_string(),
            sql: sql.to_string(),
            params: params.to_vec(),
        })
    }

    /// The pattern as written, without the start anchor.
    pub fn pattern(&self) -> &str {
        &self.source
    }

    pub fn item_type(&self) -> &str {
        &self.item_type
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Match `question` and return the captured groups as bound parameters.
    ///
    /// A group that did not participate in the match binds as `NULL`.
    pub fn bind(&self, question: &str) -> Option<Vec<SqlValue>> {
        let caps = self.regex.captures(question)?;
        let params = (1..caps.len())
            .map(|i| match caps.get(i) {
                None => SqlValue::Null,
                Some(m) => {
                    let kind = self.params.get(i - 1).copied().unwrap_or(ParamKind::Text);
                    match kind {
                        ParamKind::Integer => m
                            .as_str()
                            .parse::<i64>()
                            .map(SqlValue::Integer)
                            .unwrap_or_else(|_| SqlValue::from(m.as_str())),
                        ParamKind::Text => SqlValue::from(m.as_str()),
                    }
                }
            })
            .collect();
        Some(params)
    }
}

struct PatternDef {
    pattern: &'static str,
    item_type: &'static str,
    sql: &'static str,
    params: &'static [ParamKind],
}

const CANONICAL: [PatternDef; 5] = [
    PatternDef {
        pattern: r"Elenca i film del (\d{4})",
        item_type: "film",
        sql: "SELECT title AS name, year, genre
              FROM movies
              WHERE year = ?1
              ORDER BY title",
        params: &[ParamKind::Integer],
    },
    PatternDef {
        pattern: r"Quali sono i registi presenti su (.+)\?",
        item_type: "director",
        sql: "SELECT DISTINCT d.name AS name, d.age AS age
              FROM directors d
              JOIN movies m ON d.name = m.director
              JOIN platform_availability p ON m.id = p.movie_id
              WHERE p.platform = ?1
              ORDER BY d.name",
        params: &[ParamKind::Text],
    },
    // The final unescaped `.` swallows one trailing character (normally the
    // full stop), so "Elenca tutti i film di Sci-Fi." captures "Sci-Fi".
    PatternDef {
        pattern: r"Elenca tutti i film di (.+).",
        item_type: "film",
        sql: "SELECT title AS name, year, genre
              FROM movies
              WHERE genre = ?1
              ORDER BY title",
        params: &[ParamKind::Text],
    },
    PatternDef {
        pattern: r"Quali film sono stati fatti da un regista di almeno (\d+) anni\?",
        item_type: "film",
        sql: "SELECT m.title AS name, m.director AS director, m.year AS year
              FROM movies m
              JOIN directors d ON m.director = d.name
              WHERE d.age >= ?1
              ORDER BY m.title",
        params: &[ParamKind::Integer],
    },
    PatternDef {
        pattern: r"Quali registi hanno fatto più di un film\?",
        item_type: "director",
        sql: r#"SELECT m.director AS name, d.age AS age, COUNT(*) AS "Numero film"
              FROM movies m
              JOIN directors d ON d.name = m.director
              GROUP BY m.director, d.age
              HAVING COUNT(*) > 1
              ORDER BY m.director"#,
        params: &[],
    },
];

static COMPILED: LazyLock<Vec<QueryPattern>> = LazyLock::new(|| {
    CANONICAL
        .iter()
        .map(|def| {
            QueryPattern::new(def.pattern, def.item_type, def.sql, def.params)
                .expect("canonical query patterns must compile")
        })
        .collect()
});

/// The supported questions, in matching order.
pub fn canonical_patterns() -> Vec<QueryPattern> {
    COMPILED.clone()
}
