//! Database operations

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::PathBuf;
use std::str::FromStr;
use sticker_core::{CollectionKey, CollectionStore};
use time::OffsetDateTime;
use tracing::{debug, info};

use crate::Result;
use crate::models::CollectionRecord;

/// SQLite-backed store: one row per collection, replaced as a whole
#[derive(Clone)]
pub struct Storage {
    pool: SqlitePool,
}

impl Storage {
    /// Open (or create) the database, defaulting to the platform data dir
    pub async fn new(db_path: Option<PathBuf>) -> Result<Self> {
        let path = match db_path {
            Some(path) => path,
            None => Self::default_db_path()?,
        };
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let options = SqliteConnectOptions::new()
            .filename(&path)
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        info!(path = %path.display(), "opened catalog database");
        let storage = Self { pool };
        storage.migrate().await?;
        Ok(storage)
    }

    /// Database living only as long as this value
    pub async fn in_memory() -> Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        let storage = Self { pool };
        storage.migrate().await?;
        Ok(storage)
    }

    pub fn default_db_path() -> Result<PathBuf> {
        directories::ProjectDirs::from("com", "stickers", "stickers")
            .map(|dirs| dirs.data_dir().join("catalog.db"))
            .ok_or_else(|| anyhow::anyhow!("could not determine data directory").into())
    }

    async fn migrate(&self) -> Result<()> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS collections (
                key TEXT PRIMARY KEY NOT NULL,
                payload TEXT NOT NULL,
                updated_at INTEGER NOT NULL
            )",
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn read_collection(&self, key: CollectionKey) -> Result<Option<String>> {
        let payload = sqlx::query_scalar::<_, String>("SELECT payload FROM collections WHERE key = ?")
            .bind(key.as_str())
            .fetch_optional(&self.pool)
            .await?;
        debug!(collection = %key, found = payload.is_some(), "read collection");
        Ok(payload)
    }

    pub async fn write_collection(&self, key: CollectionKey, payload: &str) -> Result<()> {
        let now = OffsetDateTime::now_utc().unix_timestamp();
        sqlx::query(
            "INSERT INTO collections (key, payload, updated_at) VALUES (?, ?, ?)
             ON CONFLICT(key) DO UPDATE SET payload = excluded.payload, updated_at = excluded.updated_at",
        )
        .bind(key.as_str())
        .bind(payload)
        .bind(now)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Stored collections with their payload sizes
    pub async fn list_collections(&self) -> Result<Vec<CollectionRecord>> {
        let records = sqlx::query_as::<_, CollectionRecord>(
            "SELECT key, length(payload) AS size_bytes, updated_at FROM collections ORDER BY key",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(records)
    }
}

#[async_trait]
impl CollectionStore for Storage {
    async fn load(&self, key: CollectionKey) -> sticker_core::Result<Option<String>> {
        Ok(self.read_collection(key).await?)
    }

    async fn save(&self, key: CollectionKey, payload: String) -> sticker_core::Result<()> {
        Ok(self.write_collection(key, &payload).await?)
    }
}
