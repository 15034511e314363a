//! Client configuration.

/// Production API root.
pub const DEFAULT_BASE_URL: &str = "https://api.idfy.io/";

/// Environment variable overriding the base URL.
pub const BASE_URL_ENV: &str = "SIGNICAT_BASE_URL";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Root that relative endpoint paths are resolved against. Keep the
    /// trailing `/` when the root has a path prefix such as `/api/`.
    pub base_url: String,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Read `SIGNICAT_BASE_URL`, falling back to the production root.
    pub fn from_env() -> Self {
        let base_url = std::env::var(BASE_URL_ENV)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Self { base_url }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
