// SPDX-FileCopyrightText: 2026 Realorai Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the `KeyValueStore` trait.
//!
//! Expiry is stored as an absolute epoch-millisecond deadline. Reads filter
//! on it, so an expired row is invisible before `purge_expired` removes it.

use async_trait::async_trait;
use realorai_core::{HealthStatus, KeyValueStore, RealoraiError, now_millis};
use rusqlite::{OptionalExtension, params};
use tracing::{debug, warn};

use crate::database::{Database, map_tr_err};

const LIVE: &str = "(expires_at IS NULL OR expires_at > ?2)";

/// Deadline `seconds` from `now`, saturating instead of overflowing.
pub(crate) fn deadline_after(now: i64, seconds: u64) -> i64 {
    let millis = i64::try_from(seconds.saturating_mul(1000)).unwrap_or(i64::MAX);
    now.saturating_add(millis)
}

/// SQLite-backed key-value store.
pub struct SqliteKvStore {
    db: Database,
}

impl SqliteKvStore {
    /// Wrap an opened, migrated database.
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Open the database file at `path` and wrap it.
    pub async fn open(path: &str, wal_mode: bool) -> Result<Self, RealoraiError> {
        Ok(Self::new(Database::open(path, wal_mode).await?))
    }

    /// Scratch store backed by a private in-memory SQLite database.
    pub async fn open_in_memory() -> Result<Self, RealoraiError> {
        Ok(Self::new(Database::open_in_memory().await?))
    }

    /// Checkpoint and close the underlying database.
    pub async fn close(self) -> Result<(), RealoraiError> {
        self.db.close().await
    }
}

#[async_trait]
impl KeyValueStore for SqliteKvStore {
    fn name(&self) -> &str {
        "sqlite"
    }

    async fn get(&self, key: &str) -> Result<Option<String>, RealoraiError> {
        let key = key.to_string();
        let now = now_millis();
        self.db
            .connection()
            .call(move |conn| -> Result<Option<String>, rusqlite::Error> {
                conn.query_row(
                    &format!("SELECT value FROM kv_entries WHERE key = ?1 AND {LIVE}"),
                    params![key, now],
                    |row| row.get(0),
                )
                .optional()
            })
            .await
            .map_err(map_tr_err)
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), RealoraiError> {
        let key = key.to_string();
        let value = value.to_string();
        self.db
            .connection()
            .call(move |conn| -> Result<(), rusqlite::Error> {
                conn.execute(
                    "INSERT INTO kv_entries (key, value, expires_at) VALUES (?1, ?2, NULL)
                     ON CONFLICT(key) DO UPDATE SET value = excluded.value, expires_at = NULL",
                    params![key, value],
                )?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)
    }

    async fn exists(&self, key: &str) -> Result<bool, RealoraiError> {
        let key = key.to_string();
        let now = now_millis();
        self.db
            .connection()
            .call(move |conn| -> Result<bool, rusqlite::Error> {
                let count: i64 = conn.query_row(
                    &format!("SELECT COUNT(*) FROM kv_entries WHERE key = ?1 AND {LIVE}"),
                    params![key, now],
                    |row| row.get(0),
                )?;
                Ok(count > 0)
            })
            .await
            .map_err(map_tr_err)
    }

    async fn expire(&self, key: &str, seconds: u64) -> Result<bool, RealoraiError> {
        let key = key.to_string();
        let now = now_millis();
        let deadline = deadline_after(now, seconds);
        self.db
            .connection()
            .call(move |conn| -> Result<bool, rusqlite::Error> {
                let changed = conn.execute(
                    &format!("UPDATE kv_entries SET expires_at = ?3 WHERE key = ?1 AND {LIVE}"),
                    params![key, now, deadline],
                )?;
                Ok(changed > 0)
            })
            .await
            .map_err(map_tr_err)
    }

    async fn del(&self, key: &str) -> Result<bool, RealoraiError> {
        let key = key.to_string();
        let now = now_millis();
        self.db
            .connection()
            .call(move |conn| -> Result<bool, rusqlite::Error> {
                let tx = conn.transaction()?;
                let live: i64 = tx.query_row(
                    &format!("SELECT COUNT(*) FROM kv_entries WHERE key = ?1 AND {LIVE}"),
                    params![key, now],
                    |row| row.get(0),
                )?;
                tx.execute("DELETE FROM kv_entries WHERE key = ?1", params![key])?;
                tx.commit()?;
                Ok(live > 0)
            })
            .await
            .map_err(map_tr_err)
    }

    async fn purge_expired(&self) -> Result<u64, RealoraiError> {
        let now = now_millis();
        let removed = self
            .db
            .connection()
            .call(move |conn| -> Result<usize, rusqlite::Error> {
                conn.execute(
                    "DELETE FROM kv_entries WHERE expires_at IS NOT NULL AND expires_at <= ?1",
                    params![now],
                )
            })
            .await
            .map_err(map_tr_err)?;
        debug!(removed, "purged expired sqlite entries");
        Ok(removed as u64)
    }

    async fn health_check(&self) -> Result<HealthStatus, RealoraiError> {
        let ping = self
            .db
            .connection()
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch("SELECT 1;")?;
                Ok(())
            })
            .await;
        match ping {
            Ok(()) => Ok(HealthStatus::Healthy),
            Err(e) => {
                warn!(error = %e, "sqlite health check failed");
                Ok(HealthStatus::Unhealthy(e.to_string()))
            }
        }
    }
}
