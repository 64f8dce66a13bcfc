// SPDX-FileCopyrightText: 2026 Realorai Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared by the session adapter, storage backends and CLI.

use serde::{Deserialize, Serialize};

use crate::badge::{BadgeTier, determine_badge};
use crate::error::RealoraiError;

/// Current wall-clock time as epoch milliseconds.
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Health status reported by store health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Store is fully operational.
    Healthy,
    /// Store is not operational.
    Unhealthy(String),
}

/// A player's answer to one round, as reported by the game handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundAnswer {
    pub correct: bool,
    pub points: u32,
    pub time_bonus: u32,
}

/// One completed round inside a [`GameSession`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundOutcome {
    /// 1-based position of the round within the session.
    pub round_number: u32,
    pub correct: bool,
    pub points: u32,
    pub time_bonus: u32,
    /// Epoch milliseconds.
    pub answered_at: i64,
}

/// A user's game for one calendar day.
///
/// Serialized as camelCase JSON; that text is what the key-value store holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSession {
    pub user_id: String,
    pub session_id: String,
    /// Creation instant, epoch milliseconds.
    pub start_time: i64,
    /// Last successful create or update, epoch milliseconds.
    #[serde(default)]
    pub last_activity: i64,
    #[serde(default)]
    pub rounds: Vec<RoundOutcome>,
    pub total_score: u32,
    pub correct_count: u32,
    pub total_time_bonus: u32,
    pub badge: BadgeTier,
    pub completed: bool,
}

impl GameSession {
    /// Build a fresh session with zeroed accumulators and the lowest badge.
    pub fn new(user_id: impl Into<String>, session_id: impl Into<String>, now_ms: i64) -> Self {
        Self {
            user_id: user_id.into(),
            session_id: session_id.into(),
            start_time: now_ms,
            last_activity: now_ms,
            rounds: Vec::new(),
            total_score: 0,
            correct_count: 0,
            total_time_bonus: 0,
            badge: BadgeTier::default(),
            completed: false,
        }
    }

    /// Append a round and fold it into the running totals.
    ///
    /// The badge is recomputed from `correct_count` on every call; it is never
    /// set any other way.
    pub fn record_round(
        &mut self,
        answer: RoundAnswer,
        answered_at: i64,
    ) -> Result<&RoundOutcome, RealoraiError> {
        if self.completed {
            return Err(RealoraiError::SessionAlreadyCompleted {
                user_id: self.user_id.clone(),
                session_id: self.session_id.clone(),
            });
        }

        let round_number = u32::try_from(self.rounds.len())
            .unwrap_or(u32::MAX)
            .saturating_add(1);
        self.total_score = self
            .total_score
            .saturating_add(answer.points)
            .saturating_add(answer.time_bonus);
        self.total_time_bonus = self.total_time_bonus.saturating_add(answer.time_bonus);
        if answer.correct {
            self.correct_count = self.correct_count.saturating_add(1);
        }
        self.refresh_badge();

        self.rounds.push(RoundOutcome {
            round_number,
            correct: answer.correct,
            points: answer.points,
            time_bonus: answer.time_bonus,
            answered_at,
        });
        Ok(&self.rounds[self.rounds.len() - 1])
    }

    /// Re-derive the badge from the current correct count.
    pub fn refresh_badge(&mut self) {
        self.badge = determine_badge(f64::from(self.correct_count));
    }

    /// Serialize to the canonical text stored under the session key.
    pub fn to_record(&self) -> Result<String, RealoraiError> {
        serde_json::to_string(self).map_err(|e| RealoraiError::store("encode game session", e))
    }

    /// Decode a stored record.
    pub fn from_record(text: &str) -> Result<Self, RealoraiError> {
        serde_json::from_str(text).map_err(|e| RealoraiError::store("decode game session", e))
    }
}
