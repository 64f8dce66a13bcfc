// SPDX-FileCopyrightText: 2026 Realorai Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Layered configuration loading with Figment.
//!
//! Lookup order: `./realorai.toml` > `~/.config/realorai/realorai.toml` >
//! `/etc/realorai/realorai.toml`, with `REALORAI_*` environment overrides on top.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use tracing::debug;

use crate::model::RealoraiConfig;

pub(crate) const LOCAL_CONFIG: &str = "realorai.toml";
pub(crate) const SYSTEM_CONFIG: &str = "/etc/realorai/realorai.toml";

pub(crate) fn user_config_path() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join("realorai").join(LOCAL_CONFIG))
        .unwrap_or_default()
}

/// Load configuration from the standard hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/realorai/realorai.toml`
/// 3. `~/.config/realorai/realorai.toml`
/// 4. `./realorai.toml`
/// 5. `REALORAI_*` environment variables
pub fn load_config() -> Result<RealoraiConfig, figment::Error> {
    debug!(local = LOCAL_CONFIG, system = SYSTEM_CONFIG, "loading layered configuration");
    build_figment().extract()
}

/// Load configuration from an inline TOML string only (no files, no env).
pub fn load_config_from_str(toml_content: &str) -> Result<RealoraiConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(RealoraiConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from one explicit file with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<RealoraiConfig, figment::Error> {
    debug!(path = %path.display(), "loading configuration file");
    Figment::new()
        .merge(Serialized::defaults(RealoraiConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// The Figment used by [`load_config`], before extraction.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(RealoraiConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG))
        .merge(Toml::file(user_config_path()))
        .merge(Toml::file(LOCAL_CONFIG))
        .merge(env_provider())
}

/// Environment provider mapping `REALORAI_<SECTION>_<KEY>` to `section.key`.
///
/// Only the first underscore after the section name becomes a dot, so
/// `REALORAI_STORE_SESSION_TTL_SECS` lands on `store.session_ttl_secs`.
fn env_provider() -> Env {
    Env::prefixed("REALORAI_").map(|key| {
        // figment passes the key in its original (upper) case.
        let key_str = key.as_str().to_ascii_lowercase();
        let mapped = ["app", "scheduler", "store"]
            .iter()
            .find_map(|section| {
                key_str
                    .strip_prefix(section)
                    .and_then(|rest| rest.strip_prefix('_'))
                    .map(|rest| format!("{section}.{rest}"))
            })
            .unwrap_or(key_str);
        mapped.into()
    })
}
