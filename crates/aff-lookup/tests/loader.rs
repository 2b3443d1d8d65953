//! Loading persisted lookup documents from disk.

use std::collections::BTreeMap;
use std::fs;

use aff_lookup::{LookupError, LookupTables, states_from_reference, topics_from_facets};

#[test]
fn loads_document_from_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("transform_data.json");
    fs::write(
        &path,
        r#"{
    "states": { "35": "New Mexico" },
    "topics": { "002": "002 - White alone" }
}"#,
    )
    .unwrap();

    let tables = LookupTables::from_path(&path).unwrap();
    assert_eq!(tables.state_name("35"), Some("New Mexico"));
    assert_eq!(tables.topic("002"), Some("002 - White alone"));
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.json");
    let err = LookupTables::from_path(&path).unwrap_err();
    assert!(matches!(err, LookupError::Io { .. }));
    assert!(err.to_string().contains("absent.json"));
}

#[test]
fn derived_document_round_trips_through_disk() {
    let facets = serde_json::json!([
        { "code": "001 - Total population" },
        { "code": "012 - Asian alone" }
    ]);
    let states =
        states_from_reference("STATE|STATE_NAME\n06|California\n", "state.txt").unwrap();
    let tables = LookupTables::new(topics_from_facets(&facets), states);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("transform_data.json");
    fs::write(&path, tables.to_json_pretty().unwrap()).unwrap();

    let loaded = LookupTables::from_path(&path).unwrap();
    assert_eq!(loaded, tables);
    assert_eq!(loaded.topic("012"), Some("012 - Asian alone"));
}

#[test]
fn empty_document_yields_empty_tables() {
    let tables = LookupTables::from_json_str("{}", "empty").unwrap();
    assert_eq!(tables, LookupTables::new(BTreeMap::new(), BTreeMap::new()));
}
