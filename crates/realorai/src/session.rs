// SPDX-FileCopyrightText: 2026 Realorai Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `realorai session` command implementation.

use realorai_config::RealoraiConfig;
use realorai_core::{GameSession, RealoraiError};
use realorai_session::{SessionSettings, SessionStore};
use serde::Serialize;

use crate::SessionCommand;

/// Structured output of `session status --json`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayedToday {
    pub user_id: String,
    pub played_today: bool,
}

/// Run one `realorai session` action against the configured store.
pub async fn run_session(
    config: &RealoraiConfig,
    action: SessionCommand,
    json: bool,
) -> Result<(), RealoraiError> {
    let store = realorai_storage::open_store(&config.store).await?;
    let sessions = SessionStore::new(store, SessionSettings::from(&config.store));

    match action {
        SessionCommand::Create { user_id } => {
            let session = sessions.create_game_session(&user_id).await?;
            print_session(&session, json)
        }
        SessionCommand::Show {
            user_id,
            session_id,
        } => {
            match sessions.get_game_session(&user_id, &session_id).await? {
                Some(session) => print_session(&session, json),
                None => Err(RealoraiError::SessionNotFound {
                    user_id,
                    session_id,
                }),
            }
        }
        SessionCommand::Complete {
            user_id,
            session_id,
        } => {
            let Some(session) = sessions.get_game_session(&user_id, &session_id).await? else {
                return Err(RealoraiError::SessionNotFound {
                    user_id,
                    session_id,
                });
            };
            let finished = sessions.mark_daily_completed(&user_id, &session).await?;
            print_session(&finished, json)
        }
        SessionCommand::Status { user_id } => {
            let played_today = sessions.has_user_played_today(&user_id).await?;
            let status = PlayedToday {
                user_id,
                played_today,
            };
            if json {
                println!("{}", to_json(&status)?);
            } else if status.played_today {
                println!("{} has already played today", status.user_id);
            } else {
                println!("{} has not played today", status.user_id);
            }
            Ok(())
        }
    }
}

fn print_session(session: &GameSession, json: bool) -> Result<(), RealoraiError> {
    if json {
        println!("{}", to_json(session)?);
        return Ok(());
    }

    println!();
    println!("  game session {}", session.session_id);
    println!("  {}", "-".repeat(35));
    println!("    User:       {}", session.user_id);
    println!("    Started:    {}", format_millis(session.start_time));
    println!("    Rounds:     {}", session.rounds.len());
    println!("    Correct:    {}", session.correct_count);
    println!(
        "    Score:      {} (time bonus {})",
        session.total_score, session.total_time_bonus
    );
    println!("    Badge:      {}", session.badge.title());
    println!(
        "    State:      {}",
        if session.completed { "completed" } else { "in progress" }
    );
    println!();
    Ok(())
}

fn to_json<T: Serialize>(value: &T) -> Result<String, RealoraiError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| RealoraiError::Internal(format!("failed to encode output: {e}")))
}

fn format_millis(ms: i64) -> String {
    chrono::DateTime::from_timestamp_millis(ms)
        .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| ms.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn millis_render_as_utc() {
        assert_eq!(format_millis(0), "1970-01-01 00:00:00 UTC");
        assert_eq!(format_millis(1_772_841_600_000), "2026-03-07 00:00:00 UTC");
    }

    #[test]
    fn status_serializes_camel_case() {
        let status = PlayedToday {
            user_id: "alice".into(),
            played_today: true,
        };
        let json = serde_json::to_string(&status).unwrap();
        assert_eq!(json, r#"{"userId":"alice","playedToday":true}"#);
    }

    #[tokio::test]
    async fn memory_backend_round_trip() {
        let mut config = RealoraiConfig::default();
        config.store.backend = realorai_config::StoreBackend::Memory;
        run_session(
            &config,
            SessionCommand::Status {
                user_id: "alice".into(),
            },
            true,
        )
        .await
        .unwrap();
        let err = run_session(
            &config,
            SessionCommand::Show {
                user_id: "alice".into(),
                session_id: "alice_1_none".into(),
            },
            true,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, RealoraiError::SessionNotFound { .. }));
    }
}
