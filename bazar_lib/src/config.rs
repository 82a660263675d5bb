//! Runtime configuration: the catalog API base URL.

use thiserror::Error;
use url::Url;

use crate::notify::Notification;

/// Environment variable holding the catalog API base URL.
pub const API_URL_VAR: &str = "BAZAR_API_URL";

/// Configuration failures. Both are reported to the user, never panicked on.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("BAZAR_API_URL is not set")]
    MissingApiUrl,
    #[error("BAZAR_API_URL is not a valid URL: {0}")]
    InvalidApiUrl(String),
}

impl ConfigError {
    /// The blocking notification shown when configuration is unusable.
    pub fn notification(&self) -> Notification {
        Notification::error(
            "Error de configuración",
            Some("Configura la URL de la API en las variables de entorno"),
        )
    }
}

/// Resolved client configuration.
#[derive(Clone, Debug)]
pub struct Config {
    api_url: Url,
}

impl Config {
    /// Reads configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`, which maps a variable name to its value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw = lookup(API_URL_VAR)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::MissingApiUrl)?;
        let api_url =
            Url::parse(&raw).map_err(|e| ConfigError::InvalidApiUrl(format!("{}: {}", raw, e)))?;
        if !matches!(api_url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidApiUrl(format!(
                "{}: scheme must be http or https",
                raw
            )));
        }
        tracing::debug!("Using catalog API at {}", api_url);
        Ok(Self { api_url })
    }

    /// The API base URL without a trailing slash.
    pub fn api_url(&self) -> &str {
        self.api_url.as_str().trim_end_matches('/')
    }
}
