//! SQLite-backed key-value store via libsql.
//!
//! One `kv` table; every put is an upsert of the whole blob. Database file: data/hydrate.db

use crate::adapters::persistence::BlobStore;
use crate::domain::DomainError;
use chrono::Utc;
use libsql::{Database, params};
use std::path::{Path, PathBuf};
use tracing::info;

const KV_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS kv (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL,
    updated_at INTEGER NOT NULL
)"#;

pub struct SqliteStore {
    db: Database,
}

impl SqliteStore {
    /// Connect to (or create) `hydrate.db` in `base_dir` and ensure the schema exists.
    pub async fn connect(base_dir: impl AsRef<Path>) -> Result<Self, DomainError> {
        let base = base_dir.as_ref();
        std::fs::create_dir_all(base).map_err(|e| DomainError::Store(e.to_string()))?;
        let db_path: PathBuf = base.join("hydrate.db");
        let path_str = db_path.to_string_lossy();
        let db = libsql::Builder::new_local(path_str.as_ref())
            .build()
            .await
            .map_err(|e| DomainError::Store(e.to_string()))?;
        let conn = db.connect().map_err(|e| DomainError::Store(e.to_string()))?;
        conn.execute(KV_TABLE, ())
            .await
            .map_err(|e| DomainError::Store(e.to_string()))?;

        info!(path = %db_path.display(), "SQLite store ready");
        Ok(Self { db })
    }
}

#[async_trait::async_trait]
impl BlobStore for SqliteStore {
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        let conn = self
            .db
            .connect()
            .map_err(|e| DomainError::Store(e.to_string()))?;
        let mut rows = conn
            .query("SELECT value FROM kv WHERE key = ?1", params![key])
            .await
            .map_err(|e| DomainError::Store(e.to_string()))?;

        if let Some(row) = rows
            .next()
            .await
            .map_err(|e| DomainError::Store(e.to_string()))?
        {
            let value: String = row.get(0).map_err(|e| DomainError::Store(e.to_string()))?;
            Ok(Some(value))
        } else {
            Ok(None)
        }
    }

    async fn put(&self, key: &str, blob: String) -> Result<(), DomainError> {
        let conn = self
            .db
            .connect()
            .map_err(|e| DomainError::Store(e.to_string()))?;
        conn.execute(
            r#"
            INSERT INTO kv (key, value, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT (key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
            params![key, blob, Utc::now().timestamp_millis()],
        )
        .await
        .map_err(|e| DomainError::Store(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{IntakeLog, ProfileDetails, UserProfile};
    use crate::ports::{IntakeLogStore, ProfileStore};

    #[tokio::test]
    async fn test_upsert_keeps_last_written_blob() {
        let dir = std::env::temp_dir().join(format!("hydrate-me-{}", uuid::Uuid::new_v4().simple()));
        let store = SqliteStore::connect(&dir).await.unwrap();
        assert!(store.load_profile().await.unwrap().is_none());

        let first = vec![IntakeLog::new(200.0, "Water", 1_710_000_000_000)];
        store.save_logs(&first).await.unwrap();
        let mut second = first.clone();
        second.insert(0, IntakeLog::new(750.0, "Water", 1_710_000_500_000));
        store.save_logs(&second).await.unwrap();

        let profile = UserProfile::new(ProfileDetails::default());
        store.save_profile(&profile).await.unwrap();

        let reopened = SqliteStore::connect(&dir).await.unwrap();
        assert_eq!(reopened.load_logs().await.unwrap(), second);
        assert_eq!(reopened.load_profile().await.unwrap(), Some(profile));
    }
}
