// SPDX-FileCopyrightText: 2026 Realorai Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Key-value store backends for the Realorai quiz server.
//!
//! Provides a WAL-mode SQLite store with embedded migrations (single-writer
//! via `tokio-rusqlite`) and an in-memory store with matching expiry
//! semantics. [`open_store`] picks one from configuration.

pub mod database;
pub mod memory;
pub mod migrations;
pub mod sqlite;

use std::sync::Arc;

use realorai_config::{StoreBackend, StoreConfig};
use realorai_core::{KeyValueStore, RealoraiError};
use tracing::info;

pub use database::Database;
pub use memory::MemoryKvStore;
pub use sqlite::SqliteKvStore;

/// Open the backend named by `config`.
pub async fn open_store(config: &StoreConfig) -> Result<Arc<dyn KeyValueStore>, RealoraiError> {
    let store: Arc<dyn KeyValueStore> = match config.backend {
        StoreBackend::Sqlite => {
            Arc::new(SqliteKvStore::open(&config.database_path, config.wal_mode).await?)
        }
        StoreBackend::Memory => Arc::new(MemoryKvStore::new()),
    };
    info!(backend = store.name(), "key-value store ready");
    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn factory_honours_backend() {
        let dir = tempdir().unwrap();
        let mut config = StoreConfig {
            database_path: dir.path().join("kv.db").display().to_string(),
            ..StoreConfig::default()
        };

        let sqlite = open_store(&config).await.unwrap();
        assert_eq!(sqlite.name(), "sqlite");

        config.backend = StoreBackend::Memory;
        let memory = open_store(&config).await.unwrap();
        assert_eq!(memory.name(), "memory");
    }
}
