use serde_json::Value;
use std::path::{Path, PathBuf};

fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .expect("CLI crate should be inside workspace")
        .to_path_buf()
}

fn load_fixture(name: &str) -> Value {
    let path = workspace_root().join("bazar_api/tests/fixtures").join(name);
    let text = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("read fixture {}: {}", path.display(), e));
    serde_json::from_str(&text).expect("fixture is valid JSON")
}

fn load_schema(name: &str) -> Value {
    let path = workspace_root().join("schema").join(name);
    let text = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("read schema {}: {}", path.display(), e));
    serde_json::from_str(&text).expect("schema is valid JSON")
}

fn assert_valid(fixture: &str, schema: &str) {
    let data = load_fixture(fixture);
    let schema = load_schema(schema);
    let validator = jsonschema::draft202012::new(&schema).expect("schema compiles");
    if let Err(e) = validator.validate(&data) {
        panic!("{fixture} failed validation: {e}");
    }
}

// ---------------------------------------------------------------------------
// Positive validation: fixtures conform to their schemas
// ---------------------------------------------------------------------------

#[test]
fn test_search_fixture_conforms_to_schema() {
    assert_valid("search.json", "search_results.schema.json");
}

#[test]
fn test_empty_search_fixture_conforms_to_schema() {
    assert_valid("search_empty.json", "search_results.schema.json");
}

#[test]
fn test_item_fixture_conforms_to_schema() {
    assert_valid("item.json", "item.schema.json");
}

#[test]
fn test_created_fixture_conforms_to_schema() {
    assert_valid("created.json", "item.schema.json");
}

// ---------------------------------------------------------------------------
// Negative validation: schemas reject invalid data
// ---------------------------------------------------------------------------

#[test]
fn test_item_schema_rejects_missing_id() {
    let mut data = load_fixture("item.json");
    data.as_object_mut()
        .expect("item is an object")
        .remove("_id");

    let validator =
        jsonschema::draft202012::new(&load_schema("item.schema.json")).expect("schema compiles");
    assert!(
        validator.validate(&data).is_err(),
        "schema should reject item missing _id"
    );
}

#[test]
fn test_item_schema_rejects_fractional_stock() {
    let mut data = load_fixture("item.json");
    data["stock"] = serde_json::json!(2.5);

    let validator =
        jsonschema::draft202012::new(&load_schema("item.schema.json")).expect("schema compiles");
    assert!(validator.validate(&data).is_err());
}

#[test]
fn test_search_schema_rejects_bad_nested_item() {
    let mut data = load_fixture("search.json");
    data["results"][1]["price"] = Value::String("19.50".to_string());

    let validator = jsonschema::draft202012::new(&load_schema("search_results.schema.json"))
        .expect("schema compiles");
    assert!(
        validator.validate(&data).is_err(),
        "schema should reject a string price inside results"
    );
}

#[test]
fn test_search_schema_rejects_missing_paging_field() {
    let mut data = load_fixture("search.json");
    data.as_object_mut()
        .expect("page is an object")
        .remove("totalPages");

    let validator = jsonschema::draft202012::new(&load_schema("search_results.schema.json"))
        .expect("schema compiles");
    assert!(validator.validate(&data).is_err());
}

// ---------------------------------------------------------------------------
// Edge cases
// ---------------------------------------------------------------------------

#[test]
fn test_item_schema_rejects_additional_properties() {
    let mut data = load_fixture("item.json");
    data.as_object_mut()
        .expect("item is an object")
        .insert("bogusField".to_string(), Value::Number(123.into()));

    let validator =
        jsonschema::draft202012::new(&load_schema("item.schema.json")).expect("schema compiles");
    assert!(validator.validate(&data).is_err());
}

#[test]
fn test_item_without_images_conforms() {
    let mut data = load_fixture("item.json");
    data.as_object_mut()
        .expect("item is an object")
        .remove("images");

    let validator =
        jsonschema::draft202012::new(&load_schema("item.schema.json")).expect("schema compiles");
    assert!(validator.validate(&data).is_ok());
}
