//! Repository error types

use thiserror::Error;

use crate::storage::StoreError;

/// Failure of a repository operation
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// No record exists at the requested id
    #[error("Lightsaber not found")]
    NotFound,

    /// The document store failed
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<serde_json::Error> for RepositoryError {
    fn from(err: serde_json::Error) -> Self {
        RepositoryError::Store(StoreError::Encoding(err))
    }
}

/// Result type for repository operations
pub type RepositoryResult<T> = Result<T, RepositoryError>;
