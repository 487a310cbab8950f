//! Client error types

use thiserror::Error;

/// Failure talking to the lightsaber API
#[derive(Debug, Error)]
pub enum ClientError {
    /// Connection, TLS or timeout failure
    #[error("network: {0}")]
    Transport(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("HTTP {status}: {message}")]
    Api { status: u16, message: String },

    /// Base URL cannot address a record
    #[error("invalid server URL {0}")]
    InvalidUrl(String),

    /// Response body was not the expected envelope
    #[error("decode: {0}")]
    Decode(String),
}

impl ClientError {
    /// HTTP status for `Api` failures
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
