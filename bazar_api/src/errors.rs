//! Error types for the API client.

/// Errors that can occur when talking to the catalog API.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The request never produced a response (connection refused, timeout, TLS).
    #[error("Request failed: {0}")]
    RequestFailed(String),
    /// The API answered with a non-success status. `message` is the server's
    /// own error message when the body carried one, else a body snippet.
    #[error("Request failed with status {status}: {message}")]
    HttpStatus { status: u16, message: String },
    /// The response body could not be decoded into the expected type.
    #[error("Failed to decode response: {0}")]
    Decode(String),
    /// The configured base URL (or a path built from it) is not a valid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}
