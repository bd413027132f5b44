//! Connection settings for `CrudClient`.

use crate::error::ConfigError;

/// Base URL used when `CRUDAPI_BASE_URL` is not set.
pub const DEFAULT_BASE_URL: &str = "https://crudapi.co.uk/api/v1/";

pub const ENV_BASE_URL: &str = "CRUDAPI_BASE_URL";
pub const ENV_API_KEY: &str = "CRUDAPI_API_KEY";
pub const ENV_DEBUG: &str = "CRUDAPI_DEBUG";

/// Where to send requests and how to authenticate them.
///
/// The base URL is used verbatim: paths are appended without inserting or
/// stripping slashes, so it should carry whatever trailing structure the
/// remote API expects (e.g. `https://crudapi.co.uk/api/v1/`). Nothing is
/// validated here; a malformed URL surfaces as a network error on first use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub api_key: String,
    pub debug: bool,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            debug: false,
        }
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Load settings from `CRUDAPI_BASE_URL`, `CRUDAPI_API_KEY` and
    /// `CRUDAPI_DEBUG`. Only the API key is required.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_key = lookup(ENV_API_KEY).ok_or(ConfigError::MissingVar(ENV_API_KEY))?;
        let base_url = lookup(ENV_BASE_URL).unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let debug = lookup(ENV_DEBUG)
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);
        Ok(Self::new(base_url, api_key).with_debug(debug))
    }

    /// Headers attached to every request, in send order.
    pub fn headers(&self) -> Vec<(String, String)> {
        vec![
            ("Content-Type".to_string(), "application/json".to_string()),
            ("Authorization".to_string(), format!("Bearer {}", self.api_key)),
        ]
    }
}
