//! Gateway error types.

use gamemaster_core::error::DomainError;
use thiserror::Error;

/// Errors raised by a gateway backend.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Transport failure or timeout.
    #[error("request failed: {0}")]
    Request(String),

    /// The backend answered with a non-success status.
    #[error("backend returned status {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, as text.
        body: String,
    },

    /// The backend answered 2xx but the body is not a usable completion.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// The client could not be configured.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Request(format!("timed out: {err}"))
        } else {
            Self::Request(err.to_string())
        }
    }
}

impl From<GatewayError> for DomainError {
    fn from(err: GatewayError) -> Self {
        DomainError::Gateway(err.to_string())
    }
}
