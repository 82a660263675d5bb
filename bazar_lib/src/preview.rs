//! Object URLs for image previews.
//!
//! A selected file is exposed to the renderer through an object URL
//! (`blob:bazar/<n>`) that resolves to the file's bytes. Each URL is owned by
//! an [`ObjectUrl`] handle and revoked when the handle is dropped, so a
//! preview can never outlive the selection it was made for.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use dashmap::DashMap;

use crate::form::SelectedFile;

const URL_PREFIX: &str = "blob:bazar/";

#[derive(Debug, Default)]
struct StoreInner {
    entries: DashMap<String, Arc<[u8]>>,
    next_id: AtomicU64,
}

/// Registry of live object URLs. Cheap to clone; clones share the registry.
#[derive(Clone, Debug, Default)]
pub struct ObjectUrlStore {
    inner: Arc<StoreInner>,
}

impl ObjectUrlStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `file` and returns the handle that keeps its URL alive.
    pub fn create(&self, file: &SelectedFile) -> ObjectUrl {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        let url = format!("{}{}", URL_PREFIX, id);
        self.inner.entries.insert(url.clone(), file.shared_bytes());
        tracing::trace!("created {} for {}", url, file.name());
        ObjectUrl {
            url,
            store: Arc::clone(&self.inner),
        }
    }

    /// The bytes behind a live URL; `None` once revoked.
    pub fn resolve(&self, url: &str) -> Option<Arc<[u8]>> {
        self.inner.entries.get(url).map(|e| Arc::clone(e.value()))
    }

    /// Number of URLs not yet revoked.
    pub fn live_count(&self) -> usize {
        self.inner.entries.len()
    }
}

/// Owning handle for one object URL. Dropping it revokes the URL.
#[derive(Debug)]
pub struct ObjectUrl {
    url: String,
    store: Arc<StoreInner>,
}

impl ObjectUrl {
    pub fn as_str(&self) -> &str {
        &self.url
    }
}

impl Drop for ObjectUrl {
    fn drop(&mut self) {
        self.store.entries.remove(&self.url);
        tracing::trace!("revoked {}", self.url);
    }
}

/// Preview of one selected image.
#[derive(Debug)]
pub struct Preview {
    file_name: String,
    url: Option<ObjectUrl>,
}

impl Preview {
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// The object URL, until the image has loaded.
    pub fn url(&self) -> Option<&str> {
        self.url.as_ref().map(ObjectUrl::as_str)
    }

    pub fn is_released(&self) -> bool {
        self.url.is_none()
    }
}

/// One preview per selected file, in selection order.
#[derive(Debug, Default)]
pub struct PreviewSet {
    previews: Vec<Preview>,
}

impl PreviewSet {
    pub fn build(store: &ObjectUrlStore, files: &[SelectedFile]) -> Self {
        Self {
            previews: files
                .iter()
                .map(|file| Preview {
                    file_name: file.name().to_string(),
                    url: Some(store.create(file)),
                })
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.previews.len()
    }

    pub fn is_empty(&self) -> bool {
        self.previews.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Preview> {
        self.previews.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Preview> {
        self.previews.iter()
    }

    /// The image at `index` finished loading; its URL is no longer needed.
    /// Returns false if there is no such preview or it was already released.
    pub fn mark_loaded(&mut self, index: usize) -> bool {
        match self.previews.get_mut(index) {
            Some(preview) => preview.url.take().is_some(),
            None => false,
        }
    }

    /// Drops every preview, revoking any remaining URLs.
    pub fn clear(&mut self) {
        self.previews.clear();
    }
}
