//! Error types for the tracker server.

use airtrack_core::CoreError;
use thiserror::Error;

/// Result type for server operations.
pub type ServerResult<T> = Result<T, ServerError>;

/// Errors that can occur at the request boundary.
#[derive(Debug, Error)]
pub enum ServerError {
    /// The request itself was malformed (bad JSON, oversized body).
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// A tracking operation failed.
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl ServerError {
    /// Maps the error to the HTTP status code the envelope is sent with.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidRequest(_) => 400,
            Self::Core(core) => match core {
                CoreError::Validation { .. } => 400,
                CoreError::NotFound { .. } => 404,
                CoreError::CallsignInUse { .. } => 409,
                CoreError::Storage(_) | CoreError::Malformed { .. } => 500,
            },
        }
    }

    /// Returns true if this is a client error (4xx).
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status_code())
    }

    /// Returns true if this is a server error (5xx).
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        self.status_code() >= 500
    }

    /// Underlying failure detail exposed to the caller, if any.
    ///
    /// Storage failures include the store's own message so operators can
    /// see what broke; client errors carry everything in the main message.
    #[must_use]
    pub fn details(&self) -> Option<String> {
        match self {
            Self::Core(CoreError::Storage(inner)) => Some(inner.to_string()),
            Self::Core(CoreError::Malformed { key, message }) => {
                Some(format!("{key}: {message}"))
            }
            _ => None,
        }
    }
}
