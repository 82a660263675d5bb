use bazar_api::types::{Item, SearchResults};

fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(format!("tests/fixtures/{}", name)).unwrap()
}

#[test]
fn deserialize_search_results() {
    let json = load_fixture("search.json");
    let resp: SearchResults = serde_json::from_str(&json).unwrap();
    assert_eq!(resp.results.len(), 2);
    assert_eq!(resp.total_items, 12);
    assert_eq!(resp.total_pages, 6);
    assert_eq!(resp.current_page, 2);

    let shoes = &resp.results[0];
    assert_eq!(shoes.id, "66a1f0c2e4b0a1b2c3d4e5f6");
    assert_eq!(shoes.brand, "Rápido");
    assert_eq!(shoes.price, 59.99);
    assert_eq!(shoes.stock, 25);
    assert_eq!(shoes.rating, 4.5);
    assert_eq!(shoes.images.len(), 3);
}

#[test]
fn deserialize_search_results_empty() {
    let json = load_fixture("search_empty.json");
    let resp: SearchResults = serde_json::from_str(&json).unwrap();
    assert!(resp.is_empty());
    assert_eq!(resp.total_pages, 0);
}

#[test]
fn deserialize_item_without_images_or_rating() {
    let json = r#"{
        "_id": "abc",
        "title": "Libro",
        "description": "Una novela corta.",
        "price": 9.5,
        "category": "books",
        "brand": "Editorial",
        "stock": 3
    }"#;
    let item: Item = serde_json::from_str(json).unwrap();
    assert!(item.images.is_empty());
    assert_eq!(item.rating, 0.0);
}

#[test]
fn item_serializes_id_with_underscore() {
    let json = load_fixture("item.json");
    let item: Item = serde_json::from_str(&json).unwrap();
    let value = serde_json::to_value(&item).unwrap();
    assert_eq!(value["_id"], "66a1f0c2e4b0a1b2c3d4e5f6");
    assert!(value.get("id").is_none());
}

#[test]
fn deserialize_malformed_json_returns_error() {
    let bad_json = r#"{"results": not valid json}"#;
    assert!(serde_json::from_str::<SearchResults>(bad_json).is_err());
}

#[test]
fn deserialize_missing_required_fields_returns_error() {
    let json = r#"{"results": [], "totalItems": 0}"#;
    assert!(serde_json::from_str::<SearchResults>(json).is_err());
}
