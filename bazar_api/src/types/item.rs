//! Catalog item records as served by `/items` and `/items/{id}`.

use serde::{Deserialize, Serialize};

/// Server-assigned item identifier (a document id string).
pub type ItemID = String;

/// A catalog product record. Owned by the server; the client never mutates one.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Item {
    /// Unique item identifier.
    #[serde(rename = "_id")]
    pub id: ItemID,

    pub title: String,

    pub description: String,

    /// Unit price in the store currency.
    pub price: f64,

    /// Category slug (e.g. `electronics`). Kept as a string because the server
    /// may carry categories this client does not know about.
    pub category: String,

    pub brand: String,

    /// Units in stock.
    pub stock: i64,

    /// Average rating on a 0-5 scale.
    #[serde(default)]
    pub rating: f64,

    /// Image URLs, primary image first. Absent on some records.
    #[serde(default)]
    pub images: Vec<String>,
}
