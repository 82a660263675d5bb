//! HTTP client for the catalog API.

use std::time::Duration;

use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use url::Url;

use crate::{
    query::{ItemQuery, Query},
    types::{Item, NewItem, SearchResults},
    Error,
};

/// Request timeout for every catalog call.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for the catalog API.
///
/// Holds one `reqwest::Client` for the lifetime of the value so connections
/// are pooled across searches, lookups and uploads.
pub struct Client {
    http: reqwest::Client,
    /// Base URL for the API, without a trailing slash.
    base_api_url: String,
}

impl Client {
    /// Creates a client pointing at `base_url` (e.g. `https://api.example.com`).
    pub fn with_base_url(base_url: &str) -> Result<Self, Error> {
        let base_api_url = base_url.trim_end_matches('/').to_string();
        Url::parse(&base_api_url).map_err(|e| {
            tracing::error!("Invalid base URL {}: {}", base_api_url, e);
            Error::InvalidUrl(format!("{}: {}", base_api_url, e))
        })?;
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                Error::RequestFailed(e.to_string())
            })?;
        Ok(Self { http, base_api_url })
    }

    /// The base URL every path is appended to.
    pub fn base_url(&self) -> &str {
        &self.base_api_url
    }

    fn get_url(&self, path: &str) -> Result<Url, Error> {
        Url::parse(format!("{}{}", &self.base_api_url, path).as_str()).map_err(|e| {
            tracing::error!("Invalid URL constructed: {}", e);
            Error::InvalidUrl(e.to_string())
        })
    }

    async fn get<T>(&self, url: Url) -> Result<T, Error>
    where
        T: DeserializeOwned,
    {
        tracing::debug!("GET {}", url);
        let resp = self
            .http
            .get(url)
            .header("accept", "application/json")
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to get resource: {}", e);
                Error::RequestFailed(e.to_string())
            })?;
        read_json(resp).await
    }

    /// Searches the catalog: `GET /items?search=..&page=..&limit=..`.
    pub async fn search_items(&self, query: &ItemQuery) -> Result<SearchResults, Error> {
        let url = query.add_to_url(&self.get_url("/items")?);
        self.get::<SearchResults>(url).await
    }

    /// Fetches a single item by id: `GET /items/{id}`.
    pub async fn get_item(&self, id: &str) -> Result<Item, Error> {
        let mut url = self.get_url("/items")?;
        url.path_segments_mut()
            .map_err(|_| Error::InvalidUrl(self.base_api_url.clone()))?
            .push(id);
        self.get::<Item>(url).await
    }

    /// Creates a new item: `POST /create` with a multipart body.
    pub async fn create_item(&self, item: &NewItem) -> Result<Item, Error> {
        let url = self.get_url("/create")?;
        let form = multipart_form(item)?;
        tracing::debug!("POST {} ({} images)", url, item.images.len());
        let resp = self
            .http
            .post(url)
            .header("accept", "application/json")
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to create item: {}", e);
                Error::RequestFailed(e.to_string())
            })?;
        read_json(resp).await
    }
}

fn multipart_form(item: &NewItem) -> Result<Form, Error> {
    let mut form = Form::new();
    for (name, value) in item.text_fields() {
        form = form.text(name, value);
    }
    for image in &item.images {
        let part = Part::bytes(image.bytes.clone())
            .file_name(image.file_name.clone())
            .mime_str(&image.content_type)
            .map_err(|e| {
                tracing::error!("Invalid content type {}: {}", image.content_type, e);
                Error::RequestFailed(e.to_string())
            })?;
        form = form.part("images", part);
    }
    Ok(form)
}

async fn read_json<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
    let status = resp.status();
    let body = resp.text().await.map_err(|e| {
        tracing::error!("Failed to read response body: {}", e);
        Error::RequestFailed(e.to_string())
    })?;

    if !status.is_success() {
        let message = error_message(&body);
        tracing::error!("Request failed with status {}: {}", status, message);
        return Err(Error::HttpStatus {
            status: status.as_u16(),
            message,
        });
    }

    serde_json::from_str::<T>(&body).map_err(|e| {
        let snippet = truncate_body(&body);
        tracing::error!("Failed to parse resource: {} | body: {}", e, snippet);
        Error::Decode(e.to_string())
    })
}

/// Pulls the server's `message` (or `error`) field out of an error body,
/// falling back to a truncated copy of the raw body.
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            ["message", "error"]
                .iter()
                .find_map(|key| v.get(key).and_then(|m| m.as_str()).map(str::to_string))
        })
        .unwrap_or_else(|| truncate_body(body))
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        body.to_string()
    } else {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...[truncated]", &body[..end])
    }
}
