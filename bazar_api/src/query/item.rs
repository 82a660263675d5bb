use url::Url;

use super::{common::QueryCommon, Query};

/// Query for `GET /items`: free-text search plus pagination.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ItemQuery {
    pub common: QueryCommon,
    pub search: String,
}

impl Query for ItemQuery {
    fn get_common(&mut self) -> &mut QueryCommon {
        &mut self.common
    }

    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = url.clone();
        url.query_pairs_mut()
            .append_pair("search", self.search.as_str());
        self.common.add_to_url(&url)
    }
}

impl ItemQuery {
    pub fn with_search(mut self, search: &str) -> Self {
        self.search = search.to_string();
        self
    }
}
