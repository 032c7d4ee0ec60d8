//! Client configuration.

use std::env;
use std::time::Duration;

/// Environment variable holding the API base URL.
pub const API_URL_VAR: &str = "POSTBOARD_API_URL";

/// Environment variable holding the request timeout in seconds.
pub const API_TIMEOUT_VAR: &str = "POSTBOARD_API_TIMEOUT_SECS";

/// Base URL used when the environment names none (local development server).
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000/api";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Resolved client settings. Built once and handed to the API client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Read settings from the environment, falling back to
    /// [`DEFAULT_BASE_URL`] when the variable is unset or blank.
    pub fn from_env() -> Self {
        let base_url = env::var(API_URL_VAR)
            .ok()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let timeout = env::var(API_TIMEOUT_VAR)
            .ok()
            .and_then(|secs| secs.trim().parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TIMEOUT);

        Self::new(base_url.trim()).with_timeout(timeout)
    }

    /// Absolute URL for an API path such as `"/posts"`.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slashes_are_dropped() {
        let config = ClientConfig::new("http://api.example/api//");
        assert_eq!(config.url("/posts/3"), "http://api.example/api/posts/3");
    }

    #[test]
    fn default_points_at_local_dev_server() {
        assert_eq!(ClientConfig::default().url("/posts"), "http://127.0.0.1:8000/api/posts");
    }
}
