use serde::{Deserialize, Serialize};

use super::Item;

/// One page of `GET /items` results plus the paging metadata.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SearchResults {
    pub results: Vec<Item>,
    pub total_items: i64,
    pub total_pages: i64,
    pub current_page: i64,
}

impl SearchResults {
    /// True when the page carries no items.
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}
