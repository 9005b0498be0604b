//! Favorites document store
//!
//! The favorites collection lives in an external document store; this module
//! defines the three-operation interface the service consumes and a
//! SQLite-backed adapter that stores each favorite as one JSON document row.
//! The store's per-row atomicity is relied upon for individual add/remove
//! calls; no multi-document transactions are used.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use motospin_common::{Error, FavoriteRecord, MotorcycleRecord, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Row, Sqlite};
use std::path::Path;
use tracing::info;
use uuid::Uuid;

/// The document store operations the favorites layer consumes.
///
/// One logical collection ("favorites"); membership logic lives in
/// [`crate::favorites`], not here.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert a favorite document, returning the store-assigned id.
    async fn insert(
        &self,
        record: &MotorcycleRecord,
        user_id: &str,
        created_at: DateTime<Utc>,
    ) -> Result<String>;

    /// Delete the document with the given store-assigned id.
    async fn delete(&self, id: &str) -> Result<()>;

    /// All favorite documents owned by one user.
    async fn query_by_user(&self, user_id: &str) -> Result<Vec<FavoriteRecord>>;
}

/// SQLite-backed document store adapter.
pub struct SqliteStore {
    pool: Pool<Sqlite>,
}

impl SqliteStore {
    /// Open (creating if necessary) the favorites database at `path`.
    pub async fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(4)
            .connect_with(options)
            .await
            .map_err(store_err)?;

        init_schema(&pool).await?;
        info!("Favorites store ready at {}", path.display());

        Ok(Self { pool })
    }

    /// Wrap an existing pool (used by tests with an in-memory database).
    pub fn from_pool(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }
}

/// Create the favorites table if it does not exist.
async fn init_schema(pool: &Pool<Sqlite>) -> Result<()> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS favorites (
            id TEXT PRIMARY KEY,
            user_id TEXT NOT NULL,
            created_at TEXT NOT NULL,
            record TEXT NOT NULL
        )",
    )
    .execute(pool)
    .await
    .map_err(store_err)?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_favorites_user ON favorites(user_id)")
        .execute(pool)
        .await
        .map_err(store_err)?;

    Ok(())
}

fn store_err(e: sqlx::Error) -> Error {
    Error::Store(e.to_string())
}

#[async_trait]
impl DocumentStore for SqliteStore {
    async fn insert(
        &self,
        record: &MotorcycleRecord,
        user_id: &str,
        created_at: DateTime<Utc>,
    ) -> Result<String> {
        let id = Uuid::new_v4().to_string();
        let document =
            serde_json::to_string(record).map_err(|e| Error::Store(e.to_string()))?;

        sqlx::query(
            "INSERT INTO favorites (id, user_id, created_at, record) VALUES (?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(user_id)
        .bind(created_at.to_rfc3339())
        .bind(document)
        .execute(&self.pool)
        .await
        .map_err(store_err)?;

        Ok(id)
    }

    async fn delete(&self, id: &str) -> Result<()> {
        sqlx::query("DELETE FROM favorites WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(store_err)?;
        Ok(())
    }

    async fn query_by_user(&self, user_id: &str) -> Result<Vec<FavoriteRecord>> {
        let rows = sqlx::query("SELECT id, user_id, created_at, record FROM favorites WHERE user_id = ?")
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(store_err)?;

        let mut favorites = Vec::with_capacity(rows.len());
        for row in rows {
            let id: String = row.get("id");
            let user_id: String = row.get("user_id");
            let created_at: String = row.get("created_at");
            let document: String = row.get("record");

            let record: MotorcycleRecord = serde_json::from_str(&document)
                .map_err(|e| Error::Store(format!("corrupt favorite document {}: {}", id, e)))?;
            let created_at = DateTime::parse_from_rfc3339(&created_at)
                .map_err(|e| Error::Store(format!("corrupt timestamp on {}: {}", id, e)))?
                .with_timezone(&Utc);

            favorites.push(FavoriteRecord {
                id,
                user_id,
                created_at,
                record,
            });
        }

        Ok(favorites)
    }
}
