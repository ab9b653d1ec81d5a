//! Error types for the tracking engine.

use thiserror::Error;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur in tracking operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Input failed validation. Nothing was persisted.
    #[error("validation failed: {message}")]
    Validation {
        /// What was wrong with the input.
        message: String,
    },

    /// The referenced entity does not exist.
    #[error("{message}")]
    NotFound {
        /// Which entity was missing.
        message: String,
    },

    /// The callsign is held by a different entity.
    #[error("callsign {callsign} already in use by CID {holder}")]
    CallsignInUse {
        /// The contested normalized callsign.
        callsign: String,
        /// The CID currently holding it.
        holder: String,
    },

    /// The underlying store failed.
    #[error("storage error: {0}")]
    Storage(#[from] airtrack_store::StoreError),

    /// A stored payload could not be decoded.
    #[error("malformed record at {key}: {message}")]
    Malformed {
        /// The store key holding the bad payload.
        key: String,
        /// Decoder error detail.
        message: String,
    },
}

impl CoreError {
    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Creates a not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Creates a malformed-record error.
    pub fn malformed(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Malformed {
            key: key.into(),
            message: message.into(),
        }
    }
}
