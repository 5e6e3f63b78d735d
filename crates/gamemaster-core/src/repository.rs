//! Adventure repository abstraction.

use async_trait::async_trait;

use crate::error::DomainError;
use crate::record::{AdventureRecord, AdventureSummary};

/// Durable storage of adventure records, keyed by adventure name.
///
/// Writes replace the whole record. Implementations must never leave a
/// partially written record behind when `save` fails.
#[async_trait]
pub trait AdventureRepository: Send + Sync {
    /// Writes the record under `record.adventure_name`, replacing any
    /// previous version.
    async fn save(&self, record: &AdventureRecord) -> Result<(), DomainError>;

    /// Loads the record stored under `adventure_name`.
    ///
    /// Returns `DomainError::NotFound` when nothing is stored under the name.
    async fn load(&self, adventure_name: &str) -> Result<AdventureRecord, DomainError>;

    /// Returns whether a record exists under `adventure_name`.
    async fn exists(&self, adventure_name: &str) -> Result<bool, DomainError>;

    /// Lists stored adventures, ordered by name.
    async fn list(&self) -> Result<Vec<AdventureSummary>, DomainError>;
}
