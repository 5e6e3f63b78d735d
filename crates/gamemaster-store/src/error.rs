//! Store error types.

use gamemaster_core::error::DomainError;
use thiserror::Error;

/// Errors raised by the file store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Filesystem failure.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The record could not be encoded or the file is not a valid record.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Nothing is stored under the name.
    #[error("no adventure named {0}")]
    Missing(String),

    /// The name cannot be used as a storage key.
    #[error(transparent)]
    InvalidName(DomainError),
}

impl From<StoreError> for DomainError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Missing(name) => DomainError::NotFound(name),
            StoreError::InvalidName(inner) => inner,
            other => DomainError::Infrastructure(other.to_string()),
        }
    }
}
