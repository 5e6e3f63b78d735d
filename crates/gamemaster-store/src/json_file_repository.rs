//! JSON-file implementation of the `AdventureRepository` trait.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

use gamemaster_core::error::DomainError;
use gamemaster_core::record::{AdventureRecord, AdventureSummary, validate_adventure_name};
use gamemaster_core::repository::AdventureRepository;

use crate::error::StoreError;

const EXTENSION: &str = "json";

/// Directory-backed adventure repository: `<root>/<adventure_name>.json`.
///
/// Writes to one adventure are serialized through a per-name async mutex;
/// writes to different adventures never contend. Only names with a write in
/// flight keep an entry in the lock map.
#[derive(Debug, Clone)]
pub struct JsonFileRepository {
    root: PathBuf,
    locks: Arc<Mutex<HashMap<String, Arc<tokio::sync::Mutex<()>>>>>,
}

impl JsonFileRepository {
    /// Creates a repository rooted at `root`. The directory is created on
    /// first write.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            locks: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Creates a repository and makes sure its directory exists.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the directory cannot be created.
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let repo = Self::new(root);
        fs::create_dir_all(&repo.root).await?;
        Ok(repo)
    }

    /// Directory holding the records.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, adventure_name: &str) -> Result<PathBuf, StoreError> {
        validate_adventure_name(adventure_name).map_err(StoreError::InvalidName)?;
        Ok(self.root.join(format!("{adventure_name}.{EXTENSION}")))
    }

    fn key_lock(&self, adventure_name: &str) -> Arc<tokio::sync::Mutex<()>> {
        let mut locks = self
            .locks
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        locks.retain(|_, lock| Arc::strong_count(lock) > 1);
        Arc::clone(locks.entry(adventure_name.to_owned()).or_default())
    }

    async fn write_atomically(&self, path: &Path, contents: &[u8]) -> Result<(), StoreError> {
        fs::create_dir_all(&self.root).await?;
        let mut tmp = path.as_os_str().to_owned();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        if let Err(e) = write_synced(&tmp, contents).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(e.into());
        }
        if let Err(e) = fs::rename(&tmp, path).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(e.into());
        }
        Ok(())
    }

    async fn read_record(&self, adventure_name: &str) -> Result<AdventureRecord, StoreError> {
        let path = self.path_for(adventure_name)?;
        let content = match fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StoreError::Missing(adventure_name.to_owned()));
            }
            Err(e) => return Err(e.into()),
        };
        let mut record: AdventureRecord = serde_json::from_str(&content)?;
        // Older saves may lack the name; the file name is authoritative.
        if record.adventure_name.is_empty() {
            record.adventure_name = adventure_name.to_owned();
        }
        Ok(record)
    }

    async fn summarize(&self, adventure_name: &str, path: &Path) -> AdventureSummary {
        match self.read_record(adventure_name).await {
            Ok(record) => {
                let mut summary = AdventureSummary::from(&record);
                if summary.saved_at.is_none() {
                    summary.saved_at = modified_at(path).await;
                }
                summary
            }
            Err(e) => {
                warn!(adventure_name, error = %e, "unreadable adventure record");
                AdventureSummary {
                    adventure_name: adventure_name.to_owned(),
                    player_name: "?".to_owned(),
                    saved_at: modified_at(path).await,
                }
            }
        }
    }
}

/// Writes `contents` and flushes them to disk before returning, so a rename
/// that follows never exposes a truncated file.
async fn write_synced(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let mut file = fs::File::create(path).await?;
    file.write_all(contents).await?;
    file.sync_all().await
}

async fn modified_at(path: &Path) -> Option<DateTime<Utc>> {
    let meta = fs::metadata(path).await.ok()?;
    meta.modified().ok().map(DateTime::<Utc>::from)
}

#[async_trait]
impl AdventureRepository for JsonFileRepository {
    async fn save(&self, record: &AdventureRecord) -> Result<(), DomainError> {
        let path = self.path_for(&record.adventure_name)?;
        let contents = serde_json::to_vec_pretty(record).map_err(StoreError::from)?;

        let lock = self.key_lock(&record.adventure_name);
        let _guard = lock.lock().await;
        self.write_atomically(&path, &contents).await?;

        debug!(
            adventure_name = %record.adventure_name,
            turns = record.messages.len(),
            "adventure record written"
        );
        Ok(())
    }

    async fn load(&self, adventure_name: &str) -> Result<AdventureRecord, DomainError> {
        Ok(self.read_record(adventure_name).await?)
    }

    async fn exists(&self, adventure_name: &str) -> Result<bool, DomainError> {
        let path = self.path_for(adventure_name)?;
        Ok(fs::try_exists(&path).await.map_err(StoreError::from)?)
    }

    async fn list(&self) -> Result<Vec<AdventureSummary>, DomainError> {
        let mut entries = match fs::read_dir(&self.root).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StoreError::from(e).into()),
        };

        let mut summaries = Vec::new();
        while let Some(entry) = entries.next_entry().await.map_err(StoreError::from)? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some(EXTENSION) {
                continue;
            }
            let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            if validate_adventure_name(name).is_err() {
                continue;
            }
            summaries.push(self.summarize(name, &path).await);
        }
        summaries.sort_by(|a, b| a.adventure_name.cmp(&b.adventure_name));
        Ok(summaries)
    }
}
