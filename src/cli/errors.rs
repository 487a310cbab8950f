//! CLI-specific error types
//!
//! Every CLI error ends the process with a non-zero exit status.

use thiserror::Error;

use crate::client::ClientError;
use crate::config::ConfigError;
use crate::storage::StoreError;

/// CLI error
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded or is invalid
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Document store failed to open
    #[error("Failed to open store: {0}")]
    Store(#[from] StoreError),

    /// Request to the API failed
    #[error(transparent)]
    Client(#[from] ClientError),

    /// Runtime or listener setup failed
    #[error("{0}")]
    BootFailed(String),
}

impl CliError {
    pub fn boot_failed(msg: impl Into<String>) -> Self {
        Self::BootFailed(msg.into())
    }

    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::Config(_) => "LIGHTSABER_CLI_CONFIG_ERROR",
            Self::Store(_) => "LIGHTSABER_CLI_STORE_ERROR",
            Self::Client(e) if e.is_not_found() => "LIGHTSABER_CLI_NOT_FOUND",
            Self::Client(_) => "LIGHTSABER_CLI_REQUEST_FAILED",
            Self::BootFailed(_) => "LIGHTSABER_CLI_BOOT_FAILED",
        }
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes() {
        let err = CliError::boot_failed("address in use");
        assert_eq!(err.code(), "LIGHTSABER_CLI_BOOT_FAILED");
        assert_eq!(err.to_string(), "address in use");

        let err = CliError::from(ClientError::Api {
            status: 404,
            message: "Lightsaber not found".into(),
        });
        assert_eq!(err.code(), "LIGHTSABER_CLI_NOT_FOUND");
        assert_eq!(err.to_string(), "HTTP 404: Lightsaber not found");

        let err = CliError::from(ClientError::Api {
            status: 500,
            message: "Failed to retrieve lightsabers".into(),
        });
        assert_eq!(err.code(), "LIGHTSABER_CLI_REQUEST_FAILED");
    }
}
