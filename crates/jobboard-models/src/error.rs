//! Model error types.

use thiserror::Error;

/// Result type for model operations.
pub type ModelResult<T> = Result<T, ModelError>;

/// Errors raised while validating client-side input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("{0}")]
    Validation(String),

    #[error("Unsupported file type: {0}")]
    UnsupportedFile(String),
}

impl ModelError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// User-facing message without the variant prefix.
    pub fn message(&self) -> String {
        self.to_string()
    }
}
