//! Implements BlobStore using a single JSON file.
//!
//! The file maps storage key -> JSON blob text. Kept in memory, rewritten whole on every put.

use crate::adapters::persistence::BlobStore;
use crate::domain::DomainError;
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

/// JSON file-based key-value storage.
pub struct JsonStore {
    path: PathBuf,
    cache: tokio::sync::RwLock<BTreeMap<String, String>>,
}

impl JsonStore {
    /// Empty cache; `open` is the only constructor that reads the file first.
    fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            cache: tokio::sync::RwLock::new(BTreeMap::new()),
        }
    }

    /// Create the store and read the file. A missing file is an empty store.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, DomainError> {
        let store = Self::new(path);
        store.load().await?;
        Ok(store)
    }

    /// Load blobs from disk. Call after construction or when path changes.
    ///
    /// An unreadable or unparseable file is an error; it is never replaced with an empty store.
    pub async fn load(&self) -> Result<(), DomainError> {
        let data = match fs::read_to_string(&self.path).await {
            Ok(s) => serde_json::from_str(&s).map_err(|e| {
                DomainError::Store(format!("parse {}: {}", self.path.display(), e))
            })?,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no store file yet");
                BTreeMap::new()
            }
            Err(e) => {
                return Err(DomainError::Store(format!(
                    "read {}: {}",
                    self.path.display(),
                    e
                )));
            }
        };
        info!(path = %self.path.display(), keys = data.len(), "loaded JSON store");
        *self.cache.write().await = data;
        Ok(())
    }

    /// Atomic save using write-replace pattern.
    /// 1. Write to temp file
    /// 2. sync_all() to ensure flush to disk
    /// 3. Rename over the target path
    async fn save(&self, data: &BTreeMap<String, String>) -> Result<(), DomainError> {
        let json =
            serde_json::to_string_pretty(data).map_err(|e| DomainError::Store(e.to_string()))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| DomainError::Store(format!("create data dir: {}", e)))?;
        }

        let temp_path = self.path.with_extension("json.tmp");
        let mut f = fs::File::create(&temp_path)
            .await
            .map_err(|e| DomainError::Store(format!("create temp file: {}", e)))?;
        f.write_all(json.as_bytes())
            .await
            .map_err(|e| DomainError::Store(format!("write temp file: {}", e)))?;
        f.sync_all()
            .await
            .map_err(|e| DomainError::Store(format!("sync temp file: {}", e)))?;
        drop(f);

        fs::rename(&temp_path, &self.path)
            .await
            .map_err(|e| DomainError::Store(format!("atomic rename failed: {}", e)))?;

        Ok(())
    }
}

#[async_trait::async_trait]
impl BlobStore for JsonStore {
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        Ok(self.cache.read().await.get(key).cloned())
    }

    async fn put(&self, key: &str, blob: String) -> Result<(), DomainError> {
        // Hold the write lock across the save so concurrent puts cannot interleave files.
        let mut cache = self.cache.write().await;
        let mut next = cache.clone();
        next.insert(key.to_string(), blob);
        self.save(&next).await?;
        *cache = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{IntakeLog, ProfileDetails, UserProfile};
    use crate::ports::{IntakeLogStore, ProfileStore};

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("hydrate-me-{}", uuid::Uuid::new_v4().simple()))
            .join(name)
    }

    #[tokio::test]
    async fn test_missing_file_is_empty_store() {
        let store = JsonStore::open(temp_path("store.json")).await.unwrap();
        assert!(store.load_profile().await.unwrap().is_none());
        assert!(store.load_logs().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_persists_across_reopen() {
        let path = temp_path("store.json");
        let profile = UserProfile::new(ProfileDetails {
            name: "Sam".to_string(),
            ..ProfileDetails::default()
        });
        let logs = vec![IntakeLog::new(500.0, "Water", 1_710_000_000_000)];

        {
            let store = JsonStore::open(&path).await.unwrap();
            store.save_profile(&profile).await.unwrap();
            store.save_logs(&logs).await.unwrap();
        }

        let reopened = JsonStore::open(&path).await.unwrap();
        assert_eq!(reopened.load_profile().await.unwrap(), Some(profile));
        assert_eq!(reopened.load_logs().await.unwrap(), logs);
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[tokio::test]
    async fn test_put_keeps_keys_already_on_disk() {
        let path = temp_path("store.json");
        let profile = UserProfile::new(ProfileDetails::default());
        JsonStore::open(&path)
            .await
            .unwrap()
            .save_profile(&profile)
            .await
            .unwrap();

        let store = JsonStore::open(&path).await.unwrap();
        store
            .save_logs(&[IntakeLog::new(350.0, "Water", 1_710_000_000_000)])
            .await
            .unwrap();

        let reopened = JsonStore::open(&path).await.unwrap();
        assert_eq!(reopened.load_profile().await.unwrap(), Some(profile));
        assert_eq!(reopened.load_logs().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_failed_write_leaves_cache_unchanged() {
        let path = temp_path("data/store.json");
        let store = JsonStore::open(&path).await.unwrap();

        // A plain file where the data directory should be makes every save fail.
        let data_dir = path.parent().unwrap();
        fs::create_dir_all(data_dir.parent().unwrap()).await.unwrap();
        fs::write(data_dir, "not a directory").await.unwrap();

        let profile = UserProfile::new(ProfileDetails::default());
        assert!(store.save_profile(&profile).await.is_err());
        assert!(store.load_profile().await.unwrap().is_none());

        let logs = vec![IntakeLog::new(500.0, "Water", 1_710_000_000_000)];
        assert!(store.save_logs(&logs).await.is_err());
        assert!(store.load_logs().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unparseable_file_is_an_error() {
        let path = temp_path("store.json");
        fs::create_dir_all(path.parent().unwrap()).await.unwrap();
        fs::write(&path, "not json").await.unwrap();

        assert!(matches!(
            JsonStore::open(&path).await,
            Err(DomainError::Store(_))
        ));
    }
}
