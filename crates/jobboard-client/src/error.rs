//! API client error types.

use jobboard_models::ModelError;
use thiserror::Error;

/// Result type for API client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors that can occur while talking to the JobBoard API.
///
/// HTTP variants carry the server-provided `message` when the response body
/// had one, otherwise the raw body or the status reason.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("Server error {0}: {1}")]
    ServerError(u16, String),

    #[error("Request failed with status {0}: {1}")]
    RequestFailed(u16, String),

    #[error("Invalid input: {0}")]
    Validation(#[from] ModelError),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Token storage error: {0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Request timed out: {0}")]
    Timeout(String),
}

/// Coarse error taxonomy used by views to pick a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Transport failure: connection refused, timeout, bad payload
    Network,
    /// Bad credentials or expired/invalid token
    Authentication,
    /// Authenticated but not allowed
    Authorization,
    /// Rejected input, locally or by the server
    Validation,
    /// Missing job/application/user
    NotFound,
    /// Backend failure
    Server,
    Other,
}

impl ClientError {
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn invalid_response(msg: impl Into<String>) -> Self {
        Self::InvalidResponse(msg.into())
    }

    /// Map a non-success HTTP status and its body to an error.
    pub fn from_http_status(status: u16, body: &str) -> Self {
        let message = extract_message(body).unwrap_or_else(|| fallback_message(status, body));

        match status {
            400 | 422 => Self::BadRequest(message),
            401 => Self::Unauthorized(message),
            403 => Self::Forbidden(message),
            404 => Self::NotFound(message),
            409 => Self::Conflict(message),
            429 => Self::RateLimited(message),
            500..=599 => Self::ServerError(status, message),
            _ => Self::RequestFailed(status, message),
        }
    }

    /// HTTP status this error corresponds to, if any.
    pub fn http_status(&self) -> Option<u16> {
        match self {
            ClientError::BadRequest(_) => Some(400),
            ClientError::Unauthorized(_) => Some(401),
            ClientError::Forbidden(_) => Some(403),
            ClientError::NotFound(_) => Some(404),
            ClientError::Conflict(_) => Some(409),
            ClientError::RateLimited(_) => Some(429),
            ClientError::ServerError(status, _) | ClientError::RequestFailed(status, _) => {
                Some(*status)
            }
            ClientError::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// The message the server sent back, when the error came from a response.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ClientError::BadRequest(m)
            | ClientError::Unauthorized(m)
            | ClientError::Forbidden(m)
            | ClientError::NotFound(m)
            | ClientError::Conflict(m)
            | ClientError::RateLimited(m)
            | ClientError::ServerError(_, m)
            | ClientError::RequestFailed(_, m) => Some(m.as_str()).filter(|m| !m.is_empty()),
            _ => None,
        }
    }

    /// Message written by the backend itself, ignoring the status-reason
    /// fallback used when the body carried none.
    pub fn backend_message(&self) -> Option<&str> {
        let message = self.server_message()?;
        let reason = self
            .http_status()
            .and_then(|s| reqwest::StatusCode::from_u16(s).ok())
            .and_then(|s| s.canonical_reason());
        (reason != Some(message)).then_some(message)
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ClientError::Network(_)
            | ClientError::Json(_)
            | ClientError::InvalidResponse(_)
            | ClientError::Timeout(_) => ErrorKind::Network,
            ClientError::Unauthorized(_) => ErrorKind::Authentication,
            ClientError::Forbidden(_) => ErrorKind::Authorization,
            ClientError::BadRequest(_) | ClientError::Conflict(_) | ClientError::Validation(_) => {
                ErrorKind::Validation
            }
            ClientError::NotFound(_) => ErrorKind::NotFound,
            ClientError::ServerError(_, _) => ErrorKind::Server,
            _ => ErrorKind::Other,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ClientError::Unauthorized(_))
    }
}

/// Pull `message` (or `error`) out of a JSON error body.
fn extract_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["message", "error", "detail"]
        .iter()
        .find_map(|key| value.get(key).and_then(|v| v.as_str()))
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
}

fn fallback_message(status: u16, body: &str) -> String {
    let body = body.trim();
    if !body.is_empty() && !body.starts_with('{') && !body.starts_with('<') {
        return body.chars().take(200).collect();
    }
    reqwest::StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .unwrap_or("Unknown error")
        .to_string()
}
