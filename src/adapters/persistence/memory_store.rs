//! In-process store. Nothing survives a restart.

use crate::adapters::persistence::BlobStore;
use crate::domain::DomainError;
use std::collections::HashMap;
use tokio::sync::RwLock;

#[derive(Default)]
pub struct MemoryStore {
    blobs: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with a raw blob.
    pub fn with_blob(key: &str, blob: impl Into<String>) -> Self {
        let mut blobs = HashMap::new();
        blobs.insert(key.to_string(), blob.into());
        Self {
            blobs: RwLock::new(blobs),
        }
    }
}

#[async_trait::async_trait]
impl BlobStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        Ok(self.blobs.read().await.get(key).cloned())
    }

    async fn put(&self, key: &str, blob: String) -> Result<(), DomainError> {
        self.blobs.write().await.insert(key.to_string(), blob);
        Ok(())
    }
}
