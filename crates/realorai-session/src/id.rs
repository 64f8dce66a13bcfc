// SPDX-FileCopyrightText: 2026 Realorai Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Session identifiers: `{user_id}_{epoch_ms}_{random}`.

use rand::Rng;
use rand::distributions::Alphanumeric;
use realorai_core::now_millis;

const RANDOM_LEN: usize = 9;

/// New session id embedding `user_id` and the current epoch milliseconds.
///
/// The random suffix keeps ids distinct within the same millisecond.
pub fn generate_session_id(user_id: &str) -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(RANDOM_LEN)
        .map(|b| char::from(b).to_ascii_lowercase())
        .collect();
    format!("{user_id}_{}_{suffix}", now_millis())
}

/// Creation timestamp embedded in a session id, if it has the expected shape.
///
/// Parsed from the right so user ids containing `_` still work.
pub fn session_id_timestamp(session_id: &str) -> Option<i64> {
    let mut parts = session_id.rsplitn(3, '_');
    let suffix = parts.next()?;
    let timestamp = parts.next()?;
    let user = parts.next()?;
    if suffix.is_empty() || user.is_empty() {
        return None;
    }
    timestamp.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_distinct_and_embed_user_and_time() {
        let start = now_millis();
        let a = generate_session_id("u");
        let b = generate_session_id("u");
        let end = now_millis();

        assert_ne!(a, b);
        for id in [&a, &b] {
            assert!(id.contains('u'));
            let ts = session_id_timestamp(id).expect("timestamp");
            assert!(ts >= start && ts <= end, "{ts} not in [{start}, {end}]");
        }
    }

    #[test]
    fn user_ids_with_underscores_parse() {
        let id = generate_session_id("team_blue_7");
        assert!(id.starts_with("team_blue_7_"));
        assert!(session_id_timestamp(&id).is_some());
    }

    #[test]
    fn malformed_ids_have_no_timestamp() {
        assert_eq!(session_id_timestamp("nounderscores"), None);
        assert_eq!(session_id_timestamp("u_notanumber_abc"), None);
        assert_eq!(session_id_timestamp("_123_abc"), None);
        assert_eq!(session_id_timestamp("u_123_abc"), Some(123));
    }
}
