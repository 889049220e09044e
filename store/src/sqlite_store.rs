//! SQLiteStateStore
//! ----------------
//! This module provides a **SQLite-backed implementation** of the
//! `StateStore` trait. It is responsible for durable client-side state so
//! that:
//!
//!  - the auth token survives restarts (a login outlives the process)
//!  - the list snapshot is readable before the first server round-trip
//!  - logout can remove everything a session left behind
use async_trait::async_trait;
use sqlx::{Row, SqlitePool};

use crate::StateStore;

/// SQLite-based persistence backend for client state.
///
/// One `app_state` table of key/value rows:
///
///   - schema creation on startup (`new` / `migrate`)
///   - reads of single keys (`get`)
///   - upsert semantics (`put`)
///   - permanent removal (`remove`)
pub struct SQLiteStateStore {
    pool: SqlitePool,
}

impl SQLiteStateStore {
    /// Wrap an existing pool. Callers run `migrate()` themselves.
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new SQLite-backed store and ensure the schema exists.
    pub async fn new(url: &str) -> anyhow::Result<Self> {
        let pool = SqlitePool::connect(url).await?;

        let store = Self { pool };
        store.migrate().await?;

        Ok(store)
    }

    /// Creates the backing table if it does not exist.
    pub async fn migrate(&self) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS app_state (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );
        "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

#[async_trait]
impl StateStore for SQLiteStateStore {
    async fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        let row = sqlx::query("SELECT value FROM app_state WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|r| r.get::<String, _>("value")))
    }

    /// Store or update a value.
    ///
    /// `put()` uses INSERT OR UPDATE semantics:
    /// - New key → inserted
    /// - Existing key → value overwritten
    async fn put(&self, key: &str, value: &str) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO app_state (key, value)
            VALUES (?, ?)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value;
        "#,
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn remove(&self, key: &str) -> anyhow::Result<()> {
        sqlx::query("DELETE FROM app_state WHERE key = ?")
            .bind(key)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
