use cinedb_core::*;
use cinedb_db::*;
use cinedb_import::Ingestor;
use cinedb_query::*;

fn setup_db() -> SqliteStore {
    let store = SqliteStore::open_memory().unwrap();
    let ingestor = Ingestor::new(&store);
    for line in [
        "Matrix,Wachowski,-,1999,Sci-Fi,Netflix,HBO",
        "Inception,Christopher Nolan,54,2010,Sci-Fi,Prime",
        "Interstellar,Christopher Nolan,54,2014,Sci-Fi,Netflix",
        "Heat,Michael Mann,81,1995,Crime",
        "Fight Club,David Fincher,61,1999,Drama,Prime",
    ] {
        ingestor.ingest_line(line, ',').unwrap();
    }
    store
}

fn names(items: &[ResultItem]) -> Vec<&str> {
    items.iter().filter_map(|i| i.get("name")).collect()
}

fn prop(name: &str, value: &str) -> Property {
    Property {
        property_name: name.to_string(),
        property_value: value.to_string(),
    }
}

#[test]
fn movies_by_year() {
    let store = SqliteStore::open_memory().unwrap();
    Ingestor::new(&store)
        .ingest_record(&["Matrix", "Wachowski", "-", "1999", "Sci-Fi", "Netflix", "HBO"])
        .unwrap();

    let items = QueryDispatcher::new(&store)
        .answer("Elenca i film del 1999")
        .unwrap();
    assert_eq!(
        items,
        vec![ResultItem {
            item_type: "film".to_string(),
            properties: vec![
                prop("name", "Matrix"),
                prop("year", "1999"),
                prop("genre", "Sci-Fi"),
            ],
        }]
    );
}

#[test]
fn year_with_several_movies() {
    let store = setup_db();
    let items = QueryDispatcher::new(&store)
        .answer("Elenca i film del 1999")
        .unwrap();
    assert_eq!(names(&items), vec!["Fight Club", "Matrix"]);
}

#[test]
fn year_with_no_movies_is_empty() {
    let store = setup_db();
    let items = QueryDispatcher::new(&store)
        .answer("Elenca i film del 1980")
        .unwrap();
    assert!(items.is_empty());
}

#[test]
fn directors_on_platform() {
    let store = setup_db();
    let items = QueryDispatcher::new(&store)
        .answer("Quali sono i registi presenti su Netflix?")
        .unwrap();
    assert!(items.iter().all(|i| i.item_type == "director"));
    assert_eq!(names(&items), vec!["Christopher Nolan", "Wachowski"]);
    // Unknown age stringifies as empty
    assert_eq!(items[1].get("age"), Some(""));
    assert_eq!(items[0].get("age"), Some("54"));
}

#[test]
fn movies_by_genre_drops_trailing_character() {
    let store = setup_db();
    let items = QueryDispatcher::new(&store)
        .answer("Elenca tutti i film di Sci-Fi.")
        .unwrap();
    assert_eq!(names(&items), vec!["Inception", "Interstellar", "Matrix"]);

    // Without the full stop the last letter of the genre is consumed
    let items = QueryDispatcher::new(&store)
        .answer("Elenca tutti i film di Crime")
        .unwrap();
    assert!(items.is_empty());
}

#[test]
fn movies_by_director_age() {
    let store = setup_db();
    let items = QueryDispatcher::new(&store)
        .answer("Quali film sono stati fatti da un regista di almeno 60 anni?")
        .unwrap();
    assert_eq!(names(&items), vec!["Fight Club", "Heat"]);
    let columns: Vec<&str> = items[0]
        .properties
        .iter()
        .map(|p| p.property_name.as_str())
        .collect();
    assert_eq!(columns, vec!["name", "director", "year"]);
    assert_eq!(items[1].get("director"), Some("Michael Mann"));
}

#[test]
fn directors_with_more_than_one_movie() {
    let store = setup_db();
    let items = QueryDispatcher::new(&store)
        .answer("Quali registi hanno fatto più di un film?")
        .unwrap();
    assert_eq!(
        items,
        vec![ResultItem {
            item_type: "director".to_string(),
            properties: vec![
                prop("name", "Christopher Nolan"),
                prop("age", "54"),
                prop("Numero film", "2"),
            ],
        }]
    );
}

#[test]
fn match_is_anchored_at_start_only() {
    let store = setup_db();
    let dispatcher = QueryDispatcher::new(&store);

    let items = dispatcher.answer("Elenca i film del 1999 per favore").unwrap();
    assert_eq!(items.len(), 2);

    let err = dispatcher.answer("Per favore, elenca i film del 1999").unwrap_err();
    assert!(matches!(err, QueryError::UnrecognizedQuery(_)));
}

#[test]
fn unknown_question_is_unrecognized() {
    let store = setup_db();
    let err = QueryDispatcher::new(&store)
        .answer("Questa domanda non esiste")
        .unwrap_err();
    assert!(matches!(err, QueryError::UnrecognizedQuery(ref q) if q == "Questa domanda non esiste"));
    assert_eq!(err.class(), ErrorClass::ClientInput);
}

#[test]
fn first_matching_pattern_wins() {
    let store = setup_db();
    let patterns = vec![
        QueryPattern::new(
            r"Elenca (.+)",
            "first",
            "SELECT ?1 AS captured",
            &[ParamKind::Text],
        )
        .unwrap(),
        QueryPattern::new(
            r"Elenca i film del (\d{4})",
            "second",
            "SELECT title AS name FROM movies WHERE year = ?1",
            &[ParamKind::Integer],
        )
        .unwrap(),
    ];
    let dispatcher = QueryDispatcher::with_patterns(&store, patterns);

    let (pattern, params) = dispatcher.match_question("Elenca i film del 1999").unwrap();
    assert_eq!(pattern.item_type(), "first");
    assert_eq!(params, vec![SqlValue::from("i film del 1999")]);

    let items = dispatcher.answer("Elenca i film del 1999").unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].item_type, "first");
    assert_eq!(items[0].get("captured"), Some("i film del 1999"));
}

#[test]
fn canonical_patterns_are_ordered() {
    let patterns = canonical_patterns();
    let kinds: Vec<&str> = patterns.iter().map(|p| p.item_type()).collect();
    assert_eq!(kinds, vec!["film", "director", "film", "film", "director"]);
    assert_eq!(patterns[0].pattern(), r"Elenca i film del (\d{4})");
}

#[test]
fn integer_captures_bind_as_integers() {
    let patterns = canonical_patterns();
    let params = patterns[3]
        .bind("Quali film sono stati fatti da un regista di almeno 70 anni?")
        .unwrap();
    assert_eq!(params, vec![SqlValue::Integer(70)]);
    assert!(patterns[4].bind("Quali registi hanno fatto più di un film?").unwrap().is_empty());
}

#[test]
fn store_failures_propagate() {
    let store = SqliteStore::open_memory().unwrap();
    let patterns = vec![
        QueryPattern::new("Rotto", "broken", "SELECT * FROM missing_table", &[]).unwrap(),
    ];
    let err = QueryDispatcher::with_patterns(&store, patterns)
        .answer("Rotto")
        .unwrap_err();
    assert!(matches!(err, QueryError::DataAccess(_)));
    assert_eq!(err.class(), ErrorClass::Server);
}

#[test]
fn format_zero_rows_is_empty() {
    let rows = Rows {
        columns: vec!["name".to_string(), "year".to_string(), "genre".to_string()],
        rows: vec![],
    };
    assert!(format_response("film", &rows).is_empty());
}

#[test]
fn format_one_row_zips_columns() {
    let rows = Rows {
        columns: vec!["name".to_string(), "year".to_string(), "genre".to_string()],
        rows: vec![vec![
            SqlValue::from("Inception"),
            SqlValue::Integer(2010),
            SqlValue::from("Sci-Fi"),
        ]],
    };
    assert_eq!(
        format_response("movies", &rows),
        vec![ResultItem {
            item_type: "movies".to_string(),
            properties: vec![
                prop("name", "Inception"),
                prop("year", "2010"),
                prop("genre", "Sci-Fi"),
            ],
        }]
    );
}

#[test]
fn every_canonical_pattern_compiles_and_matches_its_question() {
    let questions = [
        "Elenca i film del 1999",
        "Quali sono i registi presenti su Netflix?",
        "Elenca tutti i film di Sci-Fi.",
        "Quali film sono stati fatti da un regista di almeno 60 anni?",
        "Quali registi hanno fatto più di un film?",
    ];
    let patterns = canonical_patterns();
    assert_eq!(patterns.len(), questions.len());
    for (pattern, question) in patterns.iter().zip(questions) {
        assert!(
            pattern.bind(question).is_some(),
            "'{}' should match '{}'",
            pattern.pattern(),
            question
        );
    }
}
