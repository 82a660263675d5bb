//! Client-side locations and the in-memory history they live in.
//!
//! [`History`] is the single mutable store for "the URL". Pagination is its
//! only writer; routing and the search view only read from it.

use percent_encoding::percent_decode_str;
use url::{form_urlencoded, Url};

/// Origin used to resolve relative hrefs. Never shown.
const ORIGIN: &str = "http://bazar.local";

/// A path plus ordered, decoded query parameters (`/items?search=a&page=2`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Location {
    path: String,
    query: Vec<(String, String)>,
}

impl Default for Location {
    fn default() -> Self {
        Self {
            path: "/".to_string(),
            query: Vec::new(),
        }
    }
}

impl Location {
    /// Parses an href such as `/items?search=caf%C3%A9&page=2`. Fragments are
    /// dropped, a missing leading slash is tolerated, and a trailing slash on
    /// any path other than `/` is removed. The href is always a path, so
    /// `//items` stays on this origin.
    pub fn parse(href: &str) -> Self {
        let href = href.trim();
        let href = href.split('#').next().unwrap_or_default();
        let (path, query) = href.split_once('?').unwrap_or((href, ""));
        let mut url = match Url::parse(ORIGIN) {
            Ok(url) => url,
            Err(e) => {
                tracing::warn!("Unparsable origin {}: {}", ORIGIN, e);
                return Self::default();
            }
        };
        if path.starts_with('/') {
            url.set_path(path);
        } else {
            url.set_path(&format!("/{}", path));
        }
        if !query.is_empty() {
            url.set_query(Some(query));
        }
        let mut path = url.path().to_string();
        if path.len() > 1 && path.ends_with('/') {
            path.pop();
        }
        let query = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        Self { path, query }
    }

    /// The href of the search results page for `term`.
    pub fn search_href(term: &str) -> String {
        let mut location = Self::parse("/items");
        location.set_param("search", term);
        location.href()
    }

    /// The href of the detail page for item `id`.
    pub fn detail_href(id: &str) -> String {
        let mut url = match Url::parse(ORIGIN) {
            Ok(url) => url,
            Err(_) => return format!("/items/{}", id),
        };
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.clear().push("items").push(id);
        }
        url.path().to_string()
    }

    /// Percent-encoded path, always starting with `/`.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Path segments, percent-decoded. Empty segments are kept, so `/` has
    /// none and `/items//x` has three.
    pub fn segments(&self) -> Vec<String> {
        match self.path.strip_prefix('/') {
            None | Some("") => Vec::new(),
            Some(rest) => rest
                .split('/')
                .map(|s| percent_decode_str(s).decode_utf8_lossy().into_owned())
                .collect(),
        }
    }

    /// First value of query parameter `key`.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Sets `key` to `value`, replacing the first existing occurrence in place
    /// (and dropping duplicates) or appending it at the end.
    pub fn set_param(&mut self, key: &str, value: &str) {
        let mut found = false;
        self.query.retain_mut(|(k, v)| {
            if k != key {
                return true;
            }
            if found {
                return false;
            }
            found = true;
            *v = value.to_string();
            true
        });
        if !found {
            self.query.push((key.to_string(), value.to_string()));
        }
    }

    /// Ordered query parameters.
    pub fn params(&self) -> &[(String, String)] {
        &self.query
    }

    /// Serializes back to an href. Parameters keep their order.
    pub fn href(&self) -> String {
        if self.query.is_empty() {
            return self.path.clone();
        }
        let query = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.query.iter())
            .finish();
        format!("{}?{}", self.path, query)
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.href())
    }
}

/// Browser-style session history: a list of entries and a cursor.
///
/// `version` increases on every change so readers can tell whether the
/// current location moved since they last looked.
#[derive(Debug)]
pub struct History {
    entries: Vec<Location>,
    index: usize,
    version: u64,
}

impl Default for History {
    fn default() -> Self {
        Self::new(Location::default())
    }
}

impl History {
    pub fn new(initial: Location) -> Self {
        Self {
            entries: vec![initial],
            index: 0,
            version: 0,
        }
    }

    pub fn current(&self) -> &Location {
        &self.entries[self.index]
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Navigates to `location`, discarding any forward entries.
    pub fn push(&mut self, location: Location) {
        tracing::debug!("history push {}", location);
        self.entries.truncate(self.index + 1);
        self.entries.push(location);
        self.index = self.entries.len() - 1;
        self.version += 1;
    }

    /// Replaces the current entry without adding a new one.
    pub fn replace(&mut self, location: Location) {
        tracing::debug!("history replace {}", location);
        self.entries[self.index] = location;
        self.version += 1;
    }

    pub fn can_go_back(&self) -> bool {
        self.index > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.index + 1 < self.entries.len()
    }

    pub fn back(&mut self) -> bool {
        if !self.can_go_back() {
            return false;
        }
        self.index -= 1;
        self.version += 1;
        true
    }

    pub fn forward(&mut self) -> bool {
        if !self.can_go_forward() {
            return false;
        }
        self.index += 1;
        self.version += 1;
        true
    }
}
