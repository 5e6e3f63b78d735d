//! Module import errors.

use gamemaster_core::error::DomainError;
use thiserror::Error;

/// Errors raised while importing a campaign module.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The JSON module could not be parsed.
    #[error("invalid JSON module: {0}")]
    Json(#[from] serde_json::Error),

    /// The YAML module could not be parsed.
    #[error("invalid YAML module: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The module has no usable content.
    #[error("module {0} is empty")]
    Empty(String),
}

impl From<ImportError> for DomainError {
    fn from(err: ImportError) -> Self {
        DomainError::Validation(err.to_string())
    }
}
