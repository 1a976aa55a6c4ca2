//! Client configuration.

use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use crate::error::{ClientError, ClientResult};

/// Default API base URL (backend dev server).
pub const DEFAULT_API_URL: &str = "http://localhost:4000/api/v1";

/// Default location of the persisted access token.
pub const DEFAULT_TOKEN_FILE: &str = ".jobboard/token.json";

/// API client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL including the `/api/v1` prefix
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
    /// Connect timeout
    pub connect_timeout: Duration,
    /// Where the access token is persisted
    pub token_file: PathBuf,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(5),
            token_file: PathBuf::from(DEFAULT_TOKEN_FILE),
        }
    }
}

impl ClientConfig {
    /// Create config from environment variables.
    pub fn from_env() -> ClientResult<Self> {
        let base_url =
            std::env::var("JOBBOARD_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        let timeout_secs: u64 = std::env::var("JOBBOARD_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(30);

        let connect_timeout_secs: u64 = std::env::var("JOBBOARD_CONNECT_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(5);

        let config = Self {
            base_url,
            timeout: Duration::from_secs(timeout_secs),
            connect_timeout: Duration::from_secs(connect_timeout_secs),
            token_file: std::env::var("JOBBOARD_TOKEN_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_TOKEN_FILE)),
        };
        config.validate()?;
        Ok(config)
    }

    /// Use a different base URL (tests, staging).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Check that the base URL is an absolute http(s) URL.
    pub fn validate(&self) -> ClientResult<()> {
        let parsed = Url::parse(&self.base_url).map_err(|e| {
            ClientError::config(format!("Invalid JOBBOARD_API_URL '{}': {}", self.base_url, e))
        })?;

        match parsed.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(ClientError::config(format!(
                "Unsupported API URL scheme '{}'",
                scheme
            ))),
        }
    }

    /// Join an endpoint path onto the base URL.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_config_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "http://localhost:4000/api/v1");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.connect_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_endpoint_joins_slashes() {
        let config = ClientConfig::default().with_base_url("http://api.test/api/v1/");
        assert_eq!(config.endpoint("/jobs/me"), "http://api.test/api/v1/jobs/me");
        assert_eq!(config.endpoint("auth/login"), "http://api.test/api/v1/auth/login");
    }

    #[test]
    #[serial]
    fn test_config_from_env_parses_timeouts() {
        std::env::set_var("JOBBOARD_API_URL", "https://jobs.example.com/api/v1");
        std::env::set_var("JOBBOARD_TIMEOUT_SECS", "12");
        std::env::set_var("JOBBOARD_CONNECT_TIMEOUT_SECS", "not-a-number");
        let config = ClientConfig::from_env().unwrap();
        assert_eq!(config.base_url, "https://jobs.example.com/api/v1");
        assert_eq!(config.timeout, Duration::from_secs(12));
        assert_eq!(config.connect_timeout, Duration::from_secs(5));
        std::env::remove_var("JOBBOARD_API_URL");
        std::env::remove_var("JOBBOARD_TIMEOUT_SECS");
        std::env::remove_var("JOBBOARD_CONNECT_TIMEOUT_SECS");
    }

    #[test]
    #[serial]
    fn test_config_rejects_bad_scheme() {
        std::env::set_var("JOBBOARD_API_URL", "ftp://jobs.example.com");
        assert!(ClientConfig::from_env().is_err());
        std::env::remove_var("JOBBOARD_API_URL");
    }
}
