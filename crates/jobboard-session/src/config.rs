//! Session timing configuration.

use std::time::Duration;

/// Default bound on login, register and current-user requests.
pub const DEFAULT_AUTH_TIMEOUT: Duration = Duration::from_secs(15);

/// Default bound on the best-effort remote logout.
pub const DEFAULT_LOGOUT_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Upper bound on an auth-determining request; keeps `loading` from
    /// sticking when the backend never answers.
    pub auth_timeout: Duration,
    /// Upper bound on the remote logout call before local cleanup runs.
    pub logout_timeout: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            auth_timeout: DEFAULT_AUTH_TIMEOUT,
            logout_timeout: DEFAULT_LOGOUT_TIMEOUT,
        }
    }
}

impl SessionConfig {
    /// Create config from environment variables. Unparseable values fall
    /// back to the defaults.
    pub fn from_env() -> Self {
        Self {
            auth_timeout: env_secs("JOBBOARD_AUTH_TIMEOUT_SECS").unwrap_or(DEFAULT_AUTH_TIMEOUT),
            logout_timeout: env_secs("JOBBOARD_LOGOUT_TIMEOUT_SECS")
                .unwrap_or(DEFAULT_LOGOUT_TIMEOUT),
        }
    }

    pub fn with_auth_timeout(mut self, timeout: Duration) -> Self {
        self.auth_timeout = timeout;
        self
    }

    pub fn with_logout_timeout(mut self, timeout: Duration) -> Self {
        self.logout_timeout = timeout;
        self
    }
}

fn env_secs(key: &str) -> Option<Duration> {
    std::env::var(key)
        .ok()
        .and_then(|s| s.trim().parse::<u64>().ok())
        .map(Duration::from_secs)
}
