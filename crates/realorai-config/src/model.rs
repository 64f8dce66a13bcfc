// SPDX-FileCopyrightText: 2026 Realorai Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Realorai quiz server.
//!
//! All structs use `#[serde(deny_unknown_fields)]` so a misspelled key is
//! reported at startup instead of silently ignored.

use serde::{Deserialize, Serialize};

/// Top-level Realorai configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RealoraiConfig {
    /// Process identity and logging.
    #[serde(default)]
    pub app: AppConfig,

    /// Key-value store backing sessions and daily markers.
    #[serde(default)]
    pub store: StoreConfig,

    /// Externally triggered jobs this deployment expects.
    #[serde(default)]
    pub scheduler: SchedulerConfig,
}

/// Process identity and logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Display name used in logs.
    #[serde(default = "default_app_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            log_level: default_log_level(),
        }
    }
}

fn default_app_name() -> String {
    "realorai".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Which key-value backend to open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// Persistent SQLite file.
    #[default]
    Sqlite,
    /// Process-local map; contents are lost on exit.
    Memory,
}

/// Key-value store configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StoreConfig {
    #[serde(default)]
    pub backend: StoreBackend,

    /// Path to the SQLite database file (sqlite backend only).
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Enable WAL mode for SQLite.
    #[serde(default = "default_wal_mode")]
    pub wal_mode: bool,

    /// Lifetime of a game session record, refreshed on every update.
    #[serde(default = "default_session_ttl_secs")]
    pub session_ttl_secs: u64,

    /// Lifetime of the daily-played marker. Must cover a full day.
    #[serde(default = "default_daily_marker_ttl_secs")]
    pub daily_marker_ttl_secs: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            database_path: default_database_path(),
            wal_mode: default_wal_mode(),
            session_ttl_secs: default_session_ttl_secs(),
            daily_marker_ttl_secs: default_daily_marker_ttl_secs(),
        }
    }
}

fn default_database_path() -> String {
    dirs::data_local_dir()
        .map(|d| d.join("realorai").join("realorai.db"))
        .unwrap_or_else(|| std::path::PathBuf::from("realorai.db"))
        .display()
        .to_string()
}

fn default_wal_mode() -> bool {
    true
}

fn default_session_ttl_secs() -> u64 {
    24 * 60 * 60
}

fn default_daily_marker_ttl_secs() -> u64 {
    48 * 60 * 60
}

/// Scheduler configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SchedulerConfig {
    /// Job definitions, one `[[scheduler.jobs]]` table each.
    #[serde(default)]
    pub jobs: Vec<JobConfig>,
}

/// One externally triggered job: the cron schedule and the endpoint it hits.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct JobConfig {
    pub name: String,
    pub cron: String,
    pub endpoint: String,
}

impl JobConfig {
    pub fn new(name: impl Into<String>, cron: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cron: cron.into(),
            endpoint: endpoint.into(),
        }
    }
}
