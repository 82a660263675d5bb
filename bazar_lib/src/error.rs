//! Error types for the library layer.

use std::fmt;

use crate::config::ConfigError;

/// Errors produced by the library layer, wrapping upstream API errors
/// and adding configuration, file and input validation failures.
#[derive(Debug)]
pub enum BazarError {
    /// An error from the underlying API client.
    Api(bazar_api::Error),
    /// The API base URL is missing or malformed.
    Config(ConfigError),
    /// A local file (e.g. an image to upload) could not be read.
    Io(std::io::Error),
    /// User-provided input failed validation.
    InvalidInput(String),
}

impl BazarError {
    /// The text shown to the user in an error state or notification.
    pub fn user_message(&self) -> String {
        match self {
            Self::Api(bazar_api::Error::HttpStatus { message, .. }) if !message.is_empty() => {
                message.clone()
            }
            Self::Api(e) => e.to_string(),
            Self::Config(e) => e.to_string(),
            Self::Io(e) => e.to_string(),
            Self::InvalidInput(msg) => msg.clone(),
        }
    }
}

impl fmt::Display for BazarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Api(e) => write!(f, "API error: {}", e),
            Self::Config(e) => write!(f, "Configuration error: {}", e),
            Self::Io(e) => write!(f, "I/O error: {}", e),
            Self::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
        }
    }
}

impl std::error::Error for BazarError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Api(e) => Some(e),
            Self::Config(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<bazar_api::Error> for BazarError {
    fn from(e: bazar_api::Error) -> Self {
        Self::Api(e)
    }
}

impl From<ConfigError> for BazarError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<std::io::Error> for BazarError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
