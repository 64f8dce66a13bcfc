// SPDX-FileCopyrightText: 2026 Realorai Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Process-local key-value store.

use std::collections::HashMap;

use async_trait::async_trait;
use realorai_core::{HealthStatus, KeyValueStore, RealoraiError, now_millis};
use tokio::sync::RwLock;
use tracing::debug;

use crate::sqlite::deadline_after;

#[derive(Debug, Clone)]
struct Entry {
    value: String,
    expires_at: Option<i64>,
}

impl Entry {
    fn is_live(&self, now: i64) -> bool {
        self.expires_at.is_none_or(|deadline| deadline > now)
    }
}

/// In-memory store with the same expiry semantics as the SQLite backend.
#[derive(Debug, Default)]
pub struct MemoryKvStore {
    entries: RwLock<HashMap<String, Entry>>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live keys.
    pub async fn len(&self) -> usize {
        let now = now_millis();
        self.entries
            .read()
            .await
            .values()
            .filter(|e| e.is_live(now))
            .count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl KeyValueStore for MemoryKvStore {
    fn name(&self) -> &str {
        "memory"
    }

    async fn get(&self, key: &str) -> Result<Option<String>, RealoraiError> {
        let now = now_millis();
        Ok(self
            .entries
            .read()
            .await
            .get(key)
            .filter(|e| e.is_live(now))
            .map(|e| e.value.clone()))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), RealoraiError> {
        self.entries.write().await.insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                expires_at: None,
            },
        );
        Ok(())
    }

    async fn exists(&self, key: &str) -> Result<bool, RealoraiError> {
        let now = now_millis();
        Ok(self
            .entries
            .read()
            .await
            .get(key)
            .is_some_and(|e| e.is_live(now)))
    }

    async fn expire(&self, key: &str, seconds: u64) -> Result<bool, RealoraiError> {
        let now = now_millis();
        let mut entries = self.entries.write().await;
        match entries.get_mut(key) {
            Some(entry) if entry.is_live(now) => {
                entry.expires_at = Some(deadline_after(now, seconds));
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn del(&self, key: &str) -> Result<bool, RealoraiError> {
        let now = now_millis();
        Ok(self
            .entries
            .write()
            .await
            .remove(key)
            .is_some_and(|e| e.is_live(now)))
    }

    async fn purge_expired(&self) -> Result<u64, RealoraiError> {
        let now = now_millis();
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, e| e.is_live(now));
        let removed = (before - entries.len()) as u64;
        debug!(removed, "purged expired memory entries");
        Ok(removed)
    }

    async fn health_check(&self) -> Result<HealthStatus, RealoraiError> {
        Ok(HealthStatus::Healthy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn behaves_like_a_kv_store() {
        let kv = MemoryKvStore::new();
        assert!(kv.is_empty().await);
        kv.set("a", "1").await.unwrap();
        assert_eq!(kv.get("a").await.unwrap().as_deref(), Some("1"));
        assert!(kv.exists("a").await.unwrap());
        assert!(kv.expire("a", 60).await.unwrap());
        assert!(kv.exists("a").await.unwrap());
        assert!(kv.del("a").await.unwrap());
        assert_eq!(kv.get("a").await.unwrap(), None);
    }

    #[tokio::test]
    async fn expired_entries_are_invisible_then_purged() {
        let kv = MemoryKvStore::new();
        kv.set("x", "1").await.unwrap();
        kv.set("y", "2").await.unwrap();
        kv.expire("x", 0).await.unwrap();

        assert!(!kv.exists("x").await.unwrap());
        assert!(!kv.expire("x", 60).await.unwrap());
        assert_eq!(kv.len().await, 1);
        assert_eq!(kv.purge_expired().await.unwrap(), 1);
        assert_eq!(kv.purge_expired().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn set_resets_ttl() {
        let kv = MemoryKvStore::new();
        kv.set("x", "1").await.unwrap();
        kv.expire("x", 0).await.unwrap();
        kv.set("x", "2").await.unwrap();
        assert_eq!(kv.get("x").await.unwrap().as_deref(), Some("2"));
    }
}
