//! Domain error types.

use thiserror::Error;

/// Top-level domain error type.
#[derive(Debug, Error)]
pub enum DomainError {
    /// No adventure is stored under the given name.
    #[error("adventure not found: {0}")]
    NotFound(String),

    /// A validation error in domain logic.
    #[error("validation error: {0}")]
    Validation(String),

    /// The model gateway failed (transport, timeout, non-2xx or malformed
    /// upstream response).
    #[error("model gateway error: {0}")]
    Gateway(String),

    /// The session state cannot be interpreted (unknown step or missing
    /// fields for the current step).
    #[error("corrupted session state: {0}")]
    CorruptState(String),

    /// An infrastructure/persistence error.
    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}
