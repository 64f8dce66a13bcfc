// SPDX-FileCopyrightText: 2026 Realorai Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Database connection management with PRAGMA setup, WAL mode, and lifecycle.
//!
//! All statements are serialized through tokio-rusqlite's single background
//! thread. Do NOT create additional Connection instances for writes.

use std::path::Path;

use realorai_core::RealoraiError;
use tokio_rusqlite::Connection;
use tracing::debug;

use crate::migrations;

/// A migrated SQLite database behind one `tokio_rusqlite::Connection`.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open (creating if needed) the database file at `path` and migrate it.
    pub async fn open(path: &str, wal_mode: bool) -> Result<Self, RealoraiError> {
        if let Some(parent) = Path::new(path).parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| RealoraiError::store("creating database directory", e))?;
        }

        let conn = Connection::open(path)
            .await
            .map_err(|e| tr_err("opening database", e))?;
        let db = Self { conn };
        db.prepare(wal_mode).await?;
        debug!(path, wal_mode, "database opened");
        Ok(db)
    }

    /// Open a private in-memory database (tests, `memory`-style scratch use).
    pub async fn open_in_memory() -> Result<Self, RealoraiError> {
        let conn = Connection::open_in_memory()
            .await
            .map_err(|e| tr_err("opening in-memory database", e))?;
        let db = Self { conn };
        db.prepare(false).await?;
        Ok(db)
    }

    async fn prepare(&self, wal_mode: bool) -> Result<(), RealoraiError> {
        self.conn
            .call(move |conn| -> Result<(), RealoraiError> {
                let journal = if wal_mode { "WAL" } else { "DELETE" };
                conn.execute_batch(&format!(
                    "PRAGMA journal_mode = {journal};
                     PRAGMA synchronous = NORMAL;
                     PRAGMA busy_timeout = 5000;"
                ))
                .map_err(|e| RealoraiError::store("applying pragmas", e))?;
                migrations::run_migrations(conn)
            })
            .await
            .map_err(flatten_call_err)
    }

    /// The underlying connection. All queries go through `call()`.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Checkpoint the WAL and close the connection.
    pub async fn close(self) -> Result<(), RealoraiError> {
        self.conn
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)?;
        self.conn
            .close()
            .await
            .map_err(|e| tr_err("closing database", e))
    }
}

/// Convert a tokio-rusqlite error carrying a rusqlite error.
pub(crate) fn map_tr_err(e: tokio_rusqlite::Error<rusqlite::Error>) -> RealoraiError {
    tr_err("sqlite", e)
}

fn tr_err(context: &str, e: impl std::fmt::Display) -> RealoraiError {
    RealoraiError::store_msg(format!("{context}: {e}"))
}

/// Unwrap a closure that already produced a `RealoraiError`.
fn flatten_call_err(e: tokio_rusqlite::Error<RealoraiError>) -> RealoraiError {
    match e {
        tokio_rusqlite::Error::Error(inner) => inner,
        other => tr_err("sqlite", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn open_creates_file_and_parent_dirs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("kv.db");
        let db = Database::open(path.to_str().unwrap(), true).await.unwrap();
        assert!(path.exists(), "database file should be created");
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn migrations_create_kv_table() {
        let db = Database::open_in_memory().await.unwrap();
        let count: i64 = db
            .connection()
            .call(|conn| -> Result<i64, rusqlite::Error> {
                conn.query_row(
                    "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'kv_entries'",
                    [],
                    |row| row.get(0),
                )
            })
            .await
            .unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn reopening_is_idempotent() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("twice.db");
        let path = path.to_str().unwrap();
        Database::open(path, true).await.unwrap().close().await.unwrap();
        Database::open(path, true).await.unwrap().close().await.unwrap();
    }
}
