// SPDX-FileCopyrightText: 2026 Realorai Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Realorai quiz server.

use serde::Serialize;
use strum::{Display, EnumString};
use thiserror::Error;

/// Machine-readable error code carried by every [`RealoraiError`].
///
/// The string form is what HTTP handlers put on the wire.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    InvalidUserId,
    InvalidSessionId,
    AlreadyPlayedToday,
    SessionNotFound,
    SessionExpired,
    SessionAlreadyCompleted,
    StaleSession,
    StoreError,
    ConfigError,
    InternalError,
}

/// The primary error type used across session, storage and config code.
#[derive(Debug, Error)]
pub enum RealoraiError {
    /// Missing or malformed user identifier.
    #[error("invalid user id: {reason}")]
    InvalidUserId { reason: String },

    /// Missing or malformed session identifier.
    #[error("invalid session id: {reason}")]
    InvalidSessionId { reason: String },

    /// The daily-played marker already exists for this user and date.
    #[error("user `{user_id}` has already played on {date}")]
    AlreadyPlayedToday { user_id: String, date: String },

    /// Update or lookup targeted a record that does not exist.
    #[error("game session `{session_id}` not found for user `{user_id}`")]
    SessionNotFound { user_id: String, session_id: String },

    /// The record is gone and its last activity is older than the session TTL.
    #[error("game session `{session_id}` for user `{user_id}` has expired")]
    SessionExpired { user_id: String, session_id: String },

    /// A round was recorded against a session that is already completed.
    #[error("game session `{session_id}` for user `{user_id}` is already completed")]
    SessionAlreadyCompleted { user_id: String, session_id: String },

    /// An update was built from a snapshot that predates rounds already stored.
    #[error("game session `{session_id}` for user `{user_id}` was changed since it was read")]
    StaleSession { user_id: String, session_id: String },

    /// Key-value store failure (connection, query, serialization).
    #[error("store error: {message}")]
    Store {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration errors surfaced outside the config crate's diagnostics.
    #[error("configuration error: {0}")]
    Config(String),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl RealoraiError {
    /// Wrap an underlying store failure, keeping its message in ours.
    pub fn store<E>(context: &str, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Store {
            message: format!("{context}: {source}"),
            source: Some(Box::new(source)),
        }
    }

    /// Store failure with no underlying error value.
    pub fn store_msg(message: impl Into<String>) -> Self {
        Self::Store {
            message: message.into(),
            source: None,
        }
    }

    /// Returns the machine-readable code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidUserId { .. } => ErrorCode::InvalidUserId,
            Self::InvalidSessionId { .. } => ErrorCode::InvalidSessionId,
            Self::AlreadyPlayedToday { .. } => ErrorCode::AlreadyPlayedToday,
            Self::SessionNotFound { .. } => ErrorCode::SessionNotFound,
            Self::SessionExpired { .. } => ErrorCode::SessionExpired,
            Self::SessionAlreadyCompleted { .. } => ErrorCode::SessionAlreadyCompleted,
            Self::StaleSession { .. } => ErrorCode::StaleSession,
            Self::Store { .. } => ErrorCode::StoreError,
            Self::Config(_) => ErrorCode::ConfigError,
            Self::Internal(_) => ErrorCode::InternalError,
        }
    }

    /// Whether the caller (rather than the system) is at fault.
    pub fn is_client_error(&self) -> bool {
        !matches!(
            self,
            Self::Store { .. } | Self::Config(_) | Self::Internal(_)
        )
    }
}
