//! Session error types.

use thiserror::Error;

pub type SessionResult<T> = Result<T, SessionError>;

/// Why a session operation did not produce a signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// The operation failed; the message is what the store recorded in
    /// `SessionState::error` (or would have, for `fetch_user`).
    #[error("{0}")]
    Rejected(String),

    /// A newer session operation started (or the session was ended) while
    /// this one was in flight, so its result was discarded.
    #[error("Superseded by a newer session operation")]
    Superseded,
}

impl SessionError {
    pub fn rejected(msg: impl Into<String>) -> Self {
        Self::Rejected(msg.into())
    }

    pub fn is_superseded(&self) -> bool {
        matches!(self, SessionError::Superseded)
    }
}
