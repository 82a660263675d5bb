//! The seam between views and the network.

use bazar_api::types::{Item, NewItem, SearchResults};
use bazar_api::{Client, ItemQuery};

use crate::error::BazarError;

/// The three catalog calls the storefront makes. These are the only
/// suspension points of any view.
#[allow(async_fn_in_trait)]
pub trait Catalog {
    async fn search(&self, query: &ItemQuery) -> Result<SearchResults, BazarError>;
    async fn item(&self, id: &str) -> Result<Item, BazarError>;
    async fn create(&self, item: &NewItem) -> Result<Item, BazarError>;
}

impl Catalog for Client {
    async fn search(&self, query: &ItemQuery) -> Result<SearchResults, BazarError> {
        Ok(self.search_items(query).await?)
    }

    async fn item(&self, id: &str) -> Result<Item, BazarError> {
        Ok(self.get_item(id).await?)
    }

    async fn create(&self, item: &NewItem) -> Result<Item, BazarError> {
        Ok(self.create_item(item).await?)
    }
}
