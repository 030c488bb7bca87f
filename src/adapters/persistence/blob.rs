//! Blob codec shared by all key-value backends.

use crate::domain::{DomainError, INTAKE_LOGS_KEY, IntakeLog, PROFILE_KEY, UserProfile};
use crate::ports::{IntakeLogStore, ProfileStore};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

/// Raw key-value access. Values are JSON text.
#[async_trait::async_trait]
pub trait BlobStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError>;

    /// Overwrite the blob under `key`.
    async fn put(&self, key: &str, blob: String) -> Result<(), DomainError>;
}

pub fn encode<T: Serialize + ?Sized>(key: &str, value: &T) -> Result<String, DomainError> {
    serde_json::to_string(value)
        .map_err(|e| DomainError::Store(format!("serialize {}: {}", key, e)))
}

pub fn decode<T: DeserializeOwned>(key: &str, blob: &str) -> Result<T, DomainError> {
    serde_json::from_str(blob).map_err(|e| DomainError::Corrupt {
        key: key.to_string(),
        reason: e.to_string(),
    })
}

#[async_trait::async_trait]
impl<S: BlobStore> ProfileStore for S {
    async fn load_profile(&self) -> Result<Option<UserProfile>, DomainError> {
        match self.get(PROFILE_KEY).await? {
            Some(blob) => decode(PROFILE_KEY, &blob).map(Some),
            None => Ok(None),
        }
    }

    async fn save_profile(&self, profile: &UserProfile) -> Result<(), DomainError> {
        let blob = encode(PROFILE_KEY, profile)?;
        self.put(PROFILE_KEY, blob).await
    }
}

#[async_trait::async_trait]
impl<S: BlobStore> IntakeLogStore for S {
    async fn load_logs(&self) -> Result<Vec<IntakeLog>, DomainError> {
        match self.get(INTAKE_LOGS_KEY).await? {
            Some(blob) => decode(INTAKE_LOGS_KEY, &blob),
            None => Ok(Vec::new()),
        }
    }

    async fn save_logs(&self, logs: &[IntakeLog]) -> Result<(), DomainError> {
        let blob = encode(INTAKE_LOGS_KEY, logs)?;
        debug!(count = logs.len(), bytes = blob.len(), "writing intake logs");
        self.put(INTAKE_LOGS_KEY, blob).await
    }
}
