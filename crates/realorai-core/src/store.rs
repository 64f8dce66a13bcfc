// SPDX-FileCopyrightText: 2026 Realorai Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Key-value store trait consumed by the session adapter.

use async_trait::async_trait;

use crate::error::RealoraiError;
use crate::types::HealthStatus;

/// Text key-value store with per-key expiry (Redis-like semantics).
///
/// Implementations must treat an expired key as absent for every read, and
/// `set` must clear any expiry previously attached to the key. Single-key
/// operations are expected to be atomic; nothing here spans multiple keys.
#[async_trait]
pub trait KeyValueStore: Send + Sync + 'static {
    /// Returns the human-readable name of this backend.
    fn name(&self) -> &str;

    /// Fetch the value stored at `key`.
    async fn get(&self, key: &str) -> Result<Option<String>, RealoraiError>;

    /// Store `value` at `key`, replacing any previous value and expiry.
    async fn set(&self, key: &str, value: &str) -> Result<(), RealoraiError>;

    /// Whether `key` currently holds a live value.
    async fn exists(&self, key: &str) -> Result<bool, RealoraiError>;

    /// Attach a time-to-live to `key`. Returns `false` if the key is absent.
    async fn expire(&self, key: &str, seconds: u64) -> Result<bool, RealoraiError>;

    /// Remove `key`. Returns `true` if a live value was removed.
    async fn del(&self, key: &str) -> Result<bool, RealoraiError>;

    /// Physically drop expired entries, returning how many were removed.
    async fn purge_expired(&self) -> Result<u64, RealoraiError>;

    /// Performs a health check and returns the backend's current status.
    async fn health_check(&self) -> Result<HealthStatus, RealoraiError>;
}
