//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `HEARTWOOD_API_BASE_URL` - Base URL of the REST backend
//!   (default: `http://localhost:8000/api`)
//! - `HEARTWOOD_DATA_DIR` - Directory for durable client storage such as the
//!   guest cart (default: `.heartwood`)

use std::path::PathBuf;

use thiserror::Error;
use url::Url;

const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api";
const DEFAULT_DATA_DIR: &str = ".heartwood";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront client configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Base URL of the REST backend (no trailing slash).
    pub api_base_url: Url,
    /// Directory used for durable client storage.
    pub data_dir: PathBuf,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_base_url = parse_base_url(&get_env_or_default(
            "HEARTWOOD_API_BASE_URL",
            DEFAULT_API_BASE_URL,
        ))?;
        let data_dir = PathBuf::from(get_env_or_default("HEARTWOOD_DATA_DIR", DEFAULT_DATA_DIR));

        Ok(Self {
            api_base_url,
            data_dir,
        })
    }
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse and normalize the API base URL.
///
/// A trailing slash is stripped so endpoint paths can be appended uniformly.
fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let trimmed = raw.trim_end_matches('/');
    let url = Url::parse(trimmed).map_err(|e| {
        ConfigError::InvalidEnvVar("HEARTWOOD_API_BASE_URL".to_string(), e.to_string())
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEnvVar(
            "HEARTWOOD_API_BASE_URL".to_string(),
            format!("unsupported scheme '{}'", url.scheme()),
        ));
    }
    Ok(url)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_base_url_default() {
        let url = parse_base_url(DEFAULT_API_BASE_URL).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api");
    }

    #[test]
    fn test_parse_base_url_strips_trailing_slash() {
        let url = parse_base_url("https://shop.example.com/api/").unwrap();
        assert_eq!(url.as_str(), "https://shop.example.com/api");
    }

    #[test]
    fn test_parse_base_url_rejects_garbage() {
        let result = parse_base_url("not a url");
        assert!(matches!(result, Err(ConfigError::InvalidEnvVar(_, _))));
    }

    #[test]
    fn test_parse_base_url_rejects_non_http_scheme() {
        let result = parse_base_url("ftp://shop.example.com/api");
        assert!(matches!(result, Err(ConfigError::InvalidEnvVar(_, _))));
    }
}
