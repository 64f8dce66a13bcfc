// SPDX-FileCopyrightText: 2026 Realorai Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.

use std::collections::HashSet;

use crate::diagnostic::ConfigError;
use crate::model::{RealoraiConfig, StoreBackend};

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// One day; the daily marker must live at least this long.
const MIN_MARKER_TTL_SECS: u64 = 24 * 60 * 60;

/// Validate a deserialized configuration for semantic correctness.
///
/// Collects every problem instead of stopping at the first.
pub fn validate_config(config: &RealoraiConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    let level = config.app.log_level.trim().to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ConfigError::validation(format!(
            "app.log_level `{}` is not one of {}",
            config.app.log_level,
            LOG_LEVELS.join(", ")
        )));
    }

    if config.store.backend == StoreBackend::Sqlite && config.store.database_path.trim().is_empty() {
        errors.push(ConfigError::validation(
            "store.database_path must not be empty when store.backend = \"sqlite\"",
        ));
    }

    if config.store.session_ttl_secs == 0 {
        errors.push(ConfigError::validation(
            "store.session_ttl_secs must be greater than zero",
        ));
    }

    if config.store.daily_marker_ttl_secs < MIN_MARKER_TTL_SECS {
        errors.push(ConfigError::validation(format!(
            "store.daily_marker_ttl_secs must be at least {MIN_MARKER_TTL_SECS} (one day), got {}",
            config.store.daily_marker_ttl_secs
        )));
    }

    let mut seen = HashSet::new();
    for (i, job) in config.scheduler.jobs.iter().enumerate() {
        if job.name.trim().is_empty() {
            errors.push(ConfigError::validation(format!(
                "scheduler.jobs[{i}].name must not be empty"
            )));
        } else if !seen.insert(job.name.as_str()) {
            errors.push(ConfigError::validation(format!(
                "duplicate job name `{}` in [[scheduler.jobs]]",
                job.name
            )));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::JobConfig;

    fn has_message(errors: &[ConfigError], needle: &str) -> bool {
        errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains(needle)))
    }

    #[test]
    fn default_config_validates() {
        assert!(validate_config(&RealoraiConfig::default()).is_ok());
    }

    #[test]
    fn empty_database_path_fails_for_sqlite_only() {
        let mut config = RealoraiConfig::default();
        config.store.database_path = " ".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(has_message(&errors, "database_path"));

        config.store.backend = StoreBackend::Memory;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn short_marker_ttl_fails() {
        let mut config = RealoraiConfig::default();
        config.store.daily_marker_ttl_secs = 3600;
        let errors = validate_config(&config).unwrap_err();
        assert!(has_message(&errors, "daily_marker_ttl_secs"));
    }

    #[test]
    fn unknown_log_level_fails() {
        let mut config = RealoraiConfig::default();
        config.app.log_level = "loud".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(has_message(&errors, "app.log_level"));
    }

    #[test]
    fn all_problems_are_collected() {
        let mut config = RealoraiConfig::default();
        config.store.session_ttl_secs = 0;
        config.store.daily_marker_ttl_secs = 0;
        config.scheduler.jobs = vec![
            JobConfig::new("rotate", "0 0 * * *", "/rotate"),
            JobConfig::new("rotate", "0 1 * * *", "/rotate-again"),
            JobConfig::new("", "0 2 * * *", "/x"),
        ];
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 4);
        assert!(has_message(&errors, "duplicate job name `rotate`"));
        assert!(has_message(&errors, "scheduler.jobs[2].name"));
    }

    #[test]
    fn memory_backend_from_toml_validates() {
        let toml_str = r#"
            [store]
            backend = "memory"
            database_path = ""
            session_ttl_secs = 600
        "#;
        let config: RealoraiConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.store.backend, StoreBackend::Memory);
        assert!(validate_config(&config).is_ok());
    }
}
