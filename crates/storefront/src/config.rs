//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `RK_BACKEND_URL` - Base URL of the backend; API calls go to `{RK_BACKEND_URL}/api`
//!
//! ## Optional
//! - `RK_STATE_DIR` - Directory for persisted client state (default: `$HOME/.rk-industry`)
//! - `RK_REQUEST_TIMEOUT_SECS` - Per-request timeout in seconds (default: 30)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const STATE_DIR_NAME: &str = ".rk-industry";
const STORAGE_FILE_NAME: &str = "storage.json";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront client configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Backend origin (without the `/api` prefix)
    pub backend_url: Url,
    /// Directory holding the persisted key/value storage
    pub state_dir: PathBuf,
    /// Timeout applied to every backend request
    pub request_timeout: Duration,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g. "production")
    pub sentry_environment: Option<String>,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let raw_url = lookup("RK_BACKEND_URL")
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar("RK_BACKEND_URL".to_string()))?;
        let backend_url = parse_backend_url(&raw_url)?;

        let state_dir = lookup("RK_STATE_DIR").map_or_else(
            || {
                lookup("HOME").map_or_else(
                    || PathBuf::from(STATE_DIR_NAME),
                    |home| PathBuf::from(home).join(STATE_DIR_NAME),
                )
            },
            PathBuf::from,
        );

        let timeout_secs = match lookup("RK_REQUEST_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse::<u64>().map_err(|e| {
                ConfigError::InvalidEnvVar("RK_REQUEST_TIMEOUT_SECS".to_string(), e.to_string())
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };
        if timeout_secs == 0 {
            return Err(ConfigError::InvalidEnvVar(
                "RK_REQUEST_TIMEOUT_SECS".to_string(),
                "must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            backend_url,
            state_dir,
            request_timeout: Duration::from_secs(timeout_secs),
            sentry_dsn: lookup("SENTRY_DSN").filter(|v| !v.is_empty()),
            sentry_environment: lookup("SENTRY_ENVIRONMENT").filter(|v| !v.is_empty()),
        })
    }

    /// Configuration pointing at `backend_url` with defaults everywhere else.
    #[must_use]
    pub fn for_backend(backend_url: Url, state_dir: PathBuf) -> Self {
        Self {
            backend_url,
            state_dir,
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            sentry_dsn: None,
            sentry_environment: None,
        }
    }

    /// Root of the REST surface: `{backend_url}/api/`.
    #[must_use]
    pub fn api_base_url(&self) -> Url {
        let mut url = self.backend_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push("api").push("");
        }
        url
    }

    /// File backing the persisted key/value storage.
    #[must_use]
    pub fn storage_path(&self) -> PathBuf {
        self.state_dir.join(STORAGE_FILE_NAME)
    }
}

/// Parse and validate the backend URL.
fn parse_backend_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw.trim())
        .map_err(|e| ConfigError::InvalidEnvVar("RK_BACKEND_URL".to_string(), e.to_string()))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEnvVar(
            "RK_BACKEND_URL".to_string(),
            format!("unsupported scheme '{}'", url.scheme()),
        ));
    }

    if url.query().is_some() || url.fragment().is_some() {
        return Err(ConfigError::InvalidEnvVar(
            "RK_BACKEND_URL".to_string(),
            "must not contain a query or fragment".to_string(),
        ));
    }

    Ok(url)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_missing_backend_url() {
        let result = StorefrontConfig::from_lookup(lookup_from(&[]));
        assert!(matches!(result, Err(ConfigError::MissingEnvVar(ref k)) if k == "RK_BACKEND_URL"));
    }

    #[test]
    fn test_rejects_non_http_scheme() {
        let result =
            StorefrontConfig::from_lookup(lookup_from(&[("RK_BACKEND_URL", "ftp://shop.test")]));
        assert!(matches!(result, Err(ConfigError::InvalidEnvVar(_, _))));
    }

    #[test]
    fn test_defaults() {
        let config = StorefrontConfig::from_lookup(lookup_from(&[
            ("RK_BACKEND_URL", "https://shop.test"),
            ("HOME", "/home/ann"),
        ]))
        .unwrap();

        assert_eq!(config.state_dir, PathBuf::from("/home/ann/.rk-industry"));
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert!(config.sentry_dsn.is_none());
        assert_eq!(
            config.storage_path(),
            PathBuf::from("/home/ann/.rk-industry/storage.json")
        );
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let result = StorefrontConfig::from_lookup(lookup_from(&[
            ("RK_BACKEND_URL", "https://shop.test"),
            ("RK_REQUEST_TIMEOUT_SECS", "0"),
        ]));
        assert!(matches!(result, Err(ConfigError::InvalidEnvVar(_, _))));
    }

    #[test]
    fn test_api_base_url_appends_api_segment() {
        let config = StorefrontConfig::from_lookup(lookup_from(&[(
            "RK_BACKEND_URL",
            "https://shop.test",
        )]))
        .unwrap();
        assert_eq!(config.api_base_url().as_str(), "https://shop.test/api/");

        let config = StorefrontConfig::from_lookup(lookup_from(&[(
            "RK_BACKEND_URL",
            "https://shop.test/store/",
        )]))
        .unwrap();
        assert_eq!(config.api_base_url().as_str(), "https://shop.test/store/api/");
    }
}
