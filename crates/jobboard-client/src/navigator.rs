//! Navigation hook for the transport's expired-session handling.

use std::sync::Mutex;

use tracing::info;

/// Route the client is sent to when the backend rejects the session.
pub const LOGIN_PATH: &str = "/login";

/// Performs a hard navigation away from the current view.
pub trait Navigator: Send + Sync {
    fn navigate(&self, path: &str);
}

/// Ignores navigation requests.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopNavigator;

impl Navigator for NoopNavigator {
    fn navigate(&self, _path: &str) {}
}

/// Logs navigation requests and remembers the most recent one.
#[derive(Debug, Default)]
pub struct LogNavigator {
    last: Mutex<Option<String>>,
}

impl LogNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recent location requested, if any.
    pub fn last_location(&self) -> Option<String> {
        self.last.lock().ok().and_then(|l| l.clone())
    }

    /// Take and reset the pending location.
    pub fn take(&self) -> Option<String> {
        self.last.lock().ok().and_then(|mut l| l.take())
    }
}

impl Navigator for LogNavigator {
    fn navigate(&self, path: &str) {
        info!(location = %path, "Navigating");
        if let Ok(mut last) = self.last.lock() {
            *last = Some(path.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_navigator_records_last() {
        let nav = LogNavigator::new();
        assert_eq!(nav.last_location(), None);
        nav.navigate("/jobs");
        nav.navigate(LOGIN_PATH);
        assert_eq!(nav.last_location().as_deref(), Some("/login"));
        assert_eq!(nav.take().as_deref(), Some("/login"));
        assert_eq!(nav.last_location(), None);
    }
}
