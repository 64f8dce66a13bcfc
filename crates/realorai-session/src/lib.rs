// SPDX-FileCopyrightText: 2026 Realorai Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Game session lifecycle for the Realorai quiz.
//!
//! [`SessionStore`] creates, reads, updates and completes per-day game
//! sessions over any [`realorai_core::KeyValueStore`], and enforces the
//! one-game-per-user-per-UTC-day rule through a separate daily marker key.

pub mod id;
pub mod keys;
pub mod store;

pub use id::{generate_session_id, session_id_timestamp};
pub use keys::{daily_marker_key, session_key};
pub use store::{SessionSettings, SessionStore};
