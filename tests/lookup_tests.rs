use anyhow::Result;
use serde_json::json;
use std::fs;

use archive_collections::data_models::{CollectionRecord, SearchResult};
use archive_collections::lookup::{collection_id_by_name, load_collections};

#[test]
fn test_exact_name_returns_id() {
    let data = json!({"collections": [{"id": "12", "name": "X"}]});
    assert_eq!(collection_id_by_name(&data, "X"), Some("12".to_string()));
}

#[test]
fn test_missing_name_returns_none() {
    let data = json!({"collections": [{"id": "12", "name": "X"}]});
    assert_eq!(collection_id_by_name(&data, "Y"), None);
}

#[test]
fn test_match_is_case_sensitive_and_exact() {
    let data = json!({"collections": [{"id": "4780", "name": "2013 Boston Marathon Bombing"}]});
    assert_eq!(collection_id_by_name(&data, "2013 boston marathon bombing"), None);
    assert_eq!(collection_id_by_name(&data, "Boston Marathon"), None);
    assert_eq!(collection_id_by_name(&data, "2013 Boston Marathon Bombing "), None);
}

#[test]
fn test_first_match_wins() {
    let data = json!({"collections": [
        {"id": "1", "name": "Dup", "url": "https://archive-it.org/collections/1"},
        {"id": "2", "name": "Dup"}
    ]});
    assert_eq!(collection_id_by_name(&data, "Dup"), Some("1".to_string()));
}

#[test]
fn test_numeric_ids_are_stringified() {
    let data = json!({"collections": [{"id": 3181, "name": "Numeric"}]});
    assert_eq!(collection_id_by_name(&data, "Numeric"), Some("3181".to_string()));
}

#[test]
fn test_malformed_documents() {
    assert_eq!(collection_id_by_name(&json!({}), "X"), None);
    assert_eq!(collection_id_by_name(&json!({"collections": "nope"}), "X"), None);
    assert_eq!(collection_id_by_name(&json!({"collections": [{"name": "X"}]}), "X"), None);
    assert_eq!(collection_id_by_name(&json!({"collections": [{"id": null, "name": "X"}]}), "X"), None);
}

#[test]
fn test_search_result_id_for_name() {
    let result = SearchResult::new(
        "boston".to_string(),
        "https://archive-it.org/explore?q=boston&show=Collections".to_string(),
        vec![
            CollectionRecord::new("4780".to_string(), "Boston".to_string(), "u1".to_string()),
            CollectionRecord::new("12".to_string(), "X".to_string(), "u2".to_string()),
        ],
    );
    assert_eq!(result.id_for_name("X"), Some("12"));
    assert_eq!(result.id_for_name("x"), None);
}

#[test]
fn test_load_saved_file() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("boston_collections.json");
    fs::write(
        &path,
        r#"{"query": "boston", "collections": [{"id": "4780", "name": "2013 Boston Marathon Bombing"}]}"#,
    )?;

    let data = load_collections(&path)?;
    assert_eq!(
        collection_id_by_name(&data, "2013 Boston Marathon Bombing"),
        Some("4780".to_string())
    );
    Ok(())
}

#[test]
fn test_load_errors_name_the_file() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let missing = dir.path().join("missing.json");
    let err = load_collections(&missing).unwrap_err();
    assert!(format!("{err:#}").contains("missing.json"));

    let broken = dir.path().join("broken.json");
    fs::write(&broken, "{not json")?;
    let err = load_collections(&broken).unwrap_err();
    assert!(format!("{err:#}").contains("broken.json"));
    Ok(())
}
