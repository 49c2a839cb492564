use cinedb_core::*;

#[test]
fn full_record_with_two_platforms() {
    let r = MovieRecord::from_fields(&[
        "Matrix", "Wachowski", "-", "1999", "Sci-Fi", "Netflix", "HBO",
    ])
    .unwrap();
    assert_eq!(r.title, "Matrix");
    assert_eq!(r.director, "Wachowski");
    assert_eq!(r.director_age, None);
    assert_eq!(r.year, 1999);
    assert_eq!(r.genre, "Sci-Fi");
    assert_eq!(r.platforms, vec!["Netflix", "HBO"]);
}

#[test]
fn record_without_platforms() {
    let r = MovieRecord::from_fields(&["Heat", "Michael Mann", "81", "1995", "Crime"]).unwrap();
    assert_eq!(r.director_age, Some(81));
    assert!(r.platforms.is_empty());
}

#[test]
fn empty_platform_fields_are_ignored() {
    let r = MovieRecord::from_fields(&["Heat", "Michael Mann", "81", "1995", "Crime", "", "Prime"])
        .unwrap();
    assert_eq!(r.platforms, vec!["Prime"]);
}

#[test]
fn duplicate_platforms_collapse() {
    let r = MovieRecord::from_fields(&[
        "Heat", "Michael Mann", "81", "1995", "Crime", "Netflix", " Netflix ",
    ])
    .unwrap();
    assert_eq!(r.platforms, vec!["Netflix"]);
}

#[test]
fn fields_are_trimmed() {
    let r = MovieRecord::from_fields(&[" Heat ", "Michael Mann ", "81", " 1995", "Crime\n"]).unwrap();
    assert_eq!(r.title, "Heat");
    assert_eq!(r.director, "Michael Mann");
    assert_eq!(r.year, 1995);
    assert_eq!(r.genre, "Crime");
}

#[test]
fn too_few_fields() {
    let err = MovieRecord::from_fields(&["Heat", "Michael Mann", "81", "1995"]).unwrap_err();
    assert_eq!(err, RecordError::FieldCount(4));
}

#[test]
fn too_many_fields() {
    let fields = ["a", "b", "1", "2000", "g", "p1", "p2", "p3"];
    let err = MovieRecord::from_fields(&fields).unwrap_err();
    assert_eq!(err, RecordError::FieldCount(8));
}

#[test]
fn non_numeric_year_is_rejected() {
    let err = MovieRecord::from_fields(&["Heat", "Michael Mann", "81", "nineties", "Crime"])
        .unwrap_err();
    assert_eq!(err, RecordError::InvalidYear("nineties".to_string()));
}

#[test]
fn empty_title_is_rejected() {
    let err = MovieRecord::from_fields(&["", "Michael Mann", "81", "1995", "Crime"]).unwrap_err();
    assert_eq!(err, RecordError::EmptyField("title"));
}

#[test]
fn split_then_parse_comma_line() {
    let fields = split_record("Matrix,Wachowski,-,1999,Sci-Fi,Netflix,HBO", ',');
    let r = MovieRecord::from_fields(&fields).unwrap();
    assert_eq!(r.platforms.len(), 2);
}

#[test]
fn change_report_noop() {
    assert!(ChangeReport::default().is_noop());
    let r = ChangeReport {
        platform_changed: true,
        ..Default::default()
    };
    assert!(!r.is_noop());
}

#[test]
fn result_item_serializes_as_property_bag() {
    let item = ResultItem {
        item_type: "film".to_string(),
        properties: vec![Property {
            property_name: "name".to_string(),
            property_value: "Matrix".to_string(),
        }],
    };
    let json = serde_json::to_value(&item).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "item_type": "film",
            "properties": [{"property_name": "name", "property_value": "Matrix"}]
        })
    );
    assert_eq!(item.get("name"), Some("Matrix"));
}

#[test]
fn error_class_status_codes() {
    assert_eq!(ErrorClass::ClientInput.status_code(), 422);
    assert_eq!(ErrorClass::Conflict.status_code(), 409);
    assert_eq!(ErrorClass::Server.status_code(), 500);
}
