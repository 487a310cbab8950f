//! Document store error types
//!
//! Every failure below the adapter surfaces as a `StoreError`. Absence of a
//! document is not an error at this layer; operations report it through
//! their return values.

use std::io;

use thiserror::Error;

/// Document store failure
#[derive(Debug, Error)]
pub enum StoreError {
    /// Disk I/O failure
    #[error("storage I/O failed: {message}")]
    Io {
        message: String,
        #[source]
        source: io::Error,
    },

    /// Checksum or framing failure in the document log
    #[error("data corruption at byte offset {offset}: {reason}")]
    Corruption { offset: u64, reason: String },

    /// A stored document does not have the expected shape
    #[error("malformed document '{id}': {reason}")]
    MalformedDocument { id: String, reason: String },

    /// Document body could not be encoded or decoded
    #[error("document encoding failed: {0}")]
    Encoding(#[from] serde_json::Error),

    /// Store internals unusable (poisoned lock, lost worker)
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    pub fn io(message: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    pub fn corruption(offset: u64, reason: impl Into<String>) -> Self {
        Self::Corruption {
            offset,
            reason: reason.into(),
        }
    }

    pub fn malformed(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedDocument {
            id: id.into(),
            reason: reason.into(),
        }
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable(reason.into())
    }

    /// Corruption means the log cannot be trusted; the process should not
    /// keep serving from it.
    pub fn is_fatal(&self) -> bool {
        matches!(self, StoreError::Corruption { .. })
    }
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;
