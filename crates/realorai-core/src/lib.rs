// SPDX-FileCopyrightText: 2026 Realorai Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Realorai quiz server.
//!
//! This crate provides the shared vocabulary of the workspace: the error
//! taxonomy, the `GameSession` record, the badge rule and the key-value store
//! trait that every storage backend implements.

pub mod audio;
pub mod badge;
pub mod error;
pub mod store;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use badge::{BadgeTier, determine_badge};
pub use error::{ErrorCode, RealoraiError};
pub use store::KeyValueStore;
pub use types::{GameSession, HealthStatus, RoundAnswer, RoundOutcome, now_millis};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_error_variant_has_a_code() {
        let errors = [
            RealoraiError::InvalidUserId {
                reason: "empty".into(),
            },
            RealoraiError::InvalidSessionId {
                reason: "empty".into(),
            },
            RealoraiError::AlreadyPlayedToday {
                user_id: "u".into(),
                date: "2026-01-01".into(),
            },
            RealoraiError::SessionNotFound {
                user_id: "u".into(),
                session_id: "s".into(),
            },
            RealoraiError::SessionExpired {
                user_id: "u".into(),
                session_id: "s".into(),
            },
            RealoraiError::SessionAlreadyCompleted {
                user_id: "u".into(),
                session_id: "s".into(),
            },
            RealoraiError::StaleSession {
                user_id: "u".into(),
                session_id: "s".into(),
            },
            RealoraiError::store("get failed", std::io::Error::other("boom")),
            RealoraiError::Config("bad".into()),
            RealoraiError::Internal("bad".into()),
        ];

        let codes: Vec<String> = errors.iter().map(|e| e.code().to_string()).collect();
        assert_eq!(
            codes,
            vec![
                "INVALID_USER_ID",
                "INVALID_SESSION_ID",
                "ALREADY_PLAYED_TODAY",
                "SESSION_NOT_FOUND",
                "SESSION_EXPIRED",
                "SESSION_ALREADY_COMPLETED",
                "STALE_SESSION",
                "STORE_ERROR",
                "CONFIG_ERROR",
                "INTERNAL_ERROR",
            ]
        );
    }

    #[test]
    fn store_trait_is_object_safe() {
        fn _assert_dyn(_: &dyn KeyValueStore) {}
    }
}
