// SPDX-FileCopyrightText: 2026 Realorai Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Store key layout.
//!
//! Session records and daily markers live under different prefixes so the
//! marker outlives the record it was written for.

use chrono::NaiveDate;

pub const KEY_SEPARATOR: char = ':';
pub const SESSION_PREFIX: &str = "game_session";
pub const DAILY_MARKER_PREFIX: &str = "daily_played";

/// `game_session:{user_id}:{session_id}`
pub fn session_key(user_id: &str, session_id: &str) -> String {
    format!("{SESSION_PREFIX}:{user_id}:{session_id}")
}

/// `daily_played:{user_id}:{YYYY-MM-DD}` for a UTC calendar date.
pub fn daily_marker_key(user_id: &str, date: NaiveDate) -> String {
    format!("{DAILY_MARKER_PREFIX}:{user_id}:{}", date.format("%Y-%m-%d"))
}
