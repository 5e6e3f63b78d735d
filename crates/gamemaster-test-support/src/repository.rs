//! Test repositories — mock `AdventureRepository` implementations for tests.

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;
use gamemaster_core::error::DomainError;
use gamemaster_core::record::{AdventureRecord, AdventureSummary};
use gamemaster_core::repository::AdventureRepository;

/// An in-memory repository that also counts writes, so tests can assert on
/// checkpoint behaviour.
#[derive(Debug, Default)]
pub struct InMemoryAdventureRepository {
    records: Mutex<BTreeMap<String, AdventureRecord>>,
    saves: Mutex<usize>,
}

impl InMemoryAdventureRepository {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository pre-populated with `records`. Seeding does not
    /// count as a save.
    #[must_use]
    pub fn with_records(records: impl IntoIterator<Item = AdventureRecord>) -> Self {
        let records = records
            .into_iter()
            .map(|r| (r.adventure_name.clone(), r))
            .collect();
        Self {
            records: Mutex::new(records),
            saves: Mutex::new(0),
        }
    }

    /// Returns the stored record for `name`, if any.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn get(&self, name: &str) -> Option<AdventureRecord> {
        self.records.lock().unwrap().get(name).cloned()
    }

    /// Number of `save` calls received so far.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn save_count(&self) -> usize {
        *self.saves.lock().unwrap()
    }
}

#[async_trait]
impl AdventureRepository for InMemoryAdventureRepository {
    async fn save(&self, record: &AdventureRecord) -> Result<(), DomainError> {
        self.records
            .lock()
            .unwrap()
            .insert(record.adventure_name.clone(), record.clone());
        *self.saves.lock().unwrap() += 1;
        Ok(())
    }

    async fn load(&self, adventure_name: &str) -> Result<AdventureRecord, DomainError> {
        self.get(adventure_name)
            .ok_or_else(|| DomainError::NotFound(adventure_name.to_owned()))
    }

    async fn exists(&self, adventure_name: &str) -> Result<bool, DomainError> {
        Ok(self.records.lock().unwrap().contains_key(adventure_name))
    }

    async fn list(&self) -> Result<Vec<AdventureSummary>, DomainError> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .values()
            .map(AdventureSummary::from)
            .collect())
    }
}

/// A repository that always returns an infrastructure error. Useful for
/// testing error-handling paths.
#[derive(Debug)]
pub struct FailingAdventureRepository;

#[async_trait]
impl AdventureRepository for FailingAdventureRepository {
    async fn save(&self, _record: &AdventureRecord) -> Result<(), DomainError> {
        Err(DomainError::Infrastructure("disk full".into()))
    }

    async fn load(&self, _adventure_name: &str) -> Result<AdventureRecord, DomainError> {
        Err(DomainError::Infrastructure("disk unreadable".into()))
    }

    async fn exists(&self, _adventure_name: &str) -> Result<bool, DomainError> {
        Err(DomainError::Infrastructure("disk unreadable".into()))
    }

    async fn list(&self) -> Result<Vec<AdventureSummary>, DomainError> {
        Err(DomainError::Infrastructure("disk unreadable".into()))
    }
}
