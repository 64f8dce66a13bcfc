// SPDX-FileCopyrightText: 2026 Realorai Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Game session persistence and the once-per-day lock.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use realorai_config::StoreConfig;
use realorai_core::{GameSession, KeyValueStore, RealoraiError, RoundAnswer, now_millis};
use tracing::{debug, info, warn};

use crate::id::generate_session_id;
use crate::keys::{KEY_SEPARATOR, daily_marker_key, session_key};

/// Expiry windows applied to session records and daily markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSettings {
    pub session_ttl_secs: u64,
    pub daily_marker_ttl_secs: u64,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            session_ttl_secs: 86_400,
            daily_marker_ttl_secs: 172_800,
        }
    }
}

impl From<&StoreConfig> for SessionSettings {
    fn from(config: &StoreConfig) -> Self {
        Self {
            session_ttl_secs: config.session_ttl_secs,
            daily_marker_ttl_secs: config.daily_marker_ttl_secs,
        }
    }
}

/// Session operations over an injected key-value store.
///
/// Records live under `game_session:{user}:{session}`; the daily lock lives
/// under `daily_played:{user}:{date}` and expires independently, so evicting a
/// record never reopens the day.
#[derive(Clone)]
pub struct SessionStore {
    store: Arc<dyn KeyValueStore>,
    settings: SessionSettings,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("backend", &self.store.name())
            .field("settings", &self.settings)
            .finish()
    }
}

impl SessionStore {
    pub fn new(store: Arc<dyn KeyValueStore>, settings: SessionSettings) -> Self {
        Self { store, settings }
    }

    /// Start today's session for `user_id`.
    ///
    /// Fails with [`RealoraiError::AlreadyPlayedToday`] when the daily marker
    /// exists, without writing anything.
    pub async fn create_game_session(&self, user_id: &str) -> Result<GameSession, RealoraiError> {
        require_user_id(user_id)?;

        let today = today_utc();
        if self.played_on(user_id, today).await? {
            warn!(user_id, date = %today, "rejected second game for the day");
            return Err(RealoraiError::AlreadyPlayedToday {
                user_id: user_id.to_string(),
                date: today.format("%Y-%m-%d").to_string(),
            });
        }

        let session = GameSession::new(user_id, generate_session_id(user_id), now_millis());
        let key = session_key(user_id, &session.session_id);
        let record = session.to_record()?;

        self.store.set(&key, &record).await?;
        let armed = match self.store.expire(&key, self.settings.session_ttl_secs).await {
            Ok(true) => Ok(()),
            Ok(false) => Err(RealoraiError::store_msg(format!(
                "expire {key}: key vanished before its ttl was set"
            ))),
            Err(e) => Err(e),
        };
        if let Err(e) = armed {
            // A record without a ttl would never be evicted.
            if let Err(cleanup) = self.store.del(&key).await {
                warn!(key = %key, error = %cleanup, "failed to remove session after expire failure");
            }
            return Err(e);
        }

        info!(
            user_id,
            session_id = %session.session_id,
            ttl_secs = self.settings.session_ttl_secs,
            "game session created"
        );
        Ok(session)
    }

    /// Load a session, or `None` if it was never written or has expired.
    pub async fn get_game_session(
        &self,
        user_id: &str,
        session_id: &str,
    ) -> Result<Option<GameSession>, RealoraiError> {
        require_user_id(user_id)?;
        require_session_id(session_id)?;

        let key = session_key(user_id, session_id);
        let record = self.store.get(&key).await?;
        debug!(key = %key, found = record.is_some(), "loaded game session");
        record.as_deref().map(GameSession::from_record).transpose()
    }

    /// Overwrite an existing session and refresh its expiry.
    ///
    /// Not an upsert: a missing record yields `SessionNotFound`, or
    /// `SessionExpired` when the session's last activity is older than the
    /// session ttl. A completed record is frozen, and recorded rounds may only
    /// be appended to. Returns the record as persisted.
    pub async fn update_game_session(
        &self,
        session: &GameSession,
    ) -> Result<GameSession, RealoraiError> {
        require_user_id(&session.user_id)?;
        require_session_id(&session.session_id)?;

        let key = session_key(&session.user_id, &session.session_id);
        let now = now_millis();
        let Some(current) = self.store.get(&key).await? else {
            return Err(self.missing(session, now));
        };
        let current = GameSession::from_record(&current)?;
        if current.completed {
            return Err(RealoraiError::SessionAlreadyCompleted {
                user_id: current.user_id,
                session_id: current.session_id,
            });
        }
        if !session.rounds.starts_with(&current.rounds) {
            return Err(RealoraiError::StaleSession {
                user_id: current.user_id,
                session_id: current.session_id,
            });
        }

        let mut next = session.clone();
        next.last_activity = now;
        next.refresh_badge();

        self.store.set(&key, &next.to_record()?).await?;
        if !self.store.expire(&key, self.settings.session_ttl_secs).await? {
            return Err(RealoraiError::store_msg(format!(
                "expire {key}: key vanished before its ttl was set"
            )));
        }

        debug!(
            key = %key,
            rounds = next.rounds.len(),
            correct = next.correct_count,
            completed = next.completed,
            "game session updated"
        );
        Ok(next)
    }

    /// Whether today's marker exists for `user_id`.
    pub async fn has_user_played_today(&self, user_id: &str) -> Result<bool, RealoraiError> {
        require_user_id(user_id)?;
        self.played_on(user_id, today_utc()).await
    }

    /// Write today's marker, mark the session completed and persist it.
    ///
    /// The marker is written first; it holds the completing session id.
    pub async fn mark_daily_completed(
        &self,
        user_id: &str,
        session: &GameSession,
    ) -> Result<GameSession, RealoraiError> {
        require_user_id(user_id)?;
        if session.user_id != user_id {
            return Err(RealoraiError::InvalidUserId {
                reason: format!(
                    "session `{}` belongs to `{}`, not `{user_id}`",
                    session.session_id, session.user_id
                ),
            });
        }
        require_session_id(&session.session_id)?;

        let today = today_utc();
        let marker = daily_marker_key(user_id, today);
        self.store.set(&marker, &session.session_id).await?;
        if !self
            .store
            .expire(&marker, self.settings.daily_marker_ttl_secs)
            .await?
        {
            return Err(RealoraiError::store_msg(format!(
                "expire {marker}: key vanished before its ttl was set"
            )));
        }

        let mut finished = session.clone();
        finished.completed = true;
        let persisted = self.update_game_session(&finished).await?;

        info!(
            user_id,
            session_id = %persisted.session_id,
            date = %today,
            correct = persisted.correct_count,
            total_score = persisted.total_score,
            badge = %persisted.badge,
            "daily game completed"
        );
        Ok(persisted)
    }

    /// Fold one answered round into a stored session.
    pub async fn record_round(
        &self,
        user_id: &str,
        session_id: &str,
        answer: RoundAnswer,
    ) -> Result<GameSession, RealoraiError> {
        let Some(mut session) = self.get_game_session(user_id, session_id).await? else {
            return Err(RealoraiError::SessionNotFound {
                user_id: user_id.to_string(),
                session_id: session_id.to_string(),
            });
        };
        session.record_round(answer, now_millis())?;
        self.update_game_session(&session).await
    }

    /// Remove a session record. The daily marker is left in place.
    pub async fn delete_game_session(
        &self,
        user_id: &str,
        session_id: &str,
    ) -> Result<bool, RealoraiError> {
        require_user_id(user_id)?;
        require_session_id(session_id)?;

        let key = session_key(user_id, session_id);
        let removed = self.store.del(&key).await?;
        info!(key = %key, removed, "game session deleted");
        Ok(removed)
    }

    async fn played_on(&self, user_id: &str, date: NaiveDate) -> Result<bool, RealoraiError> {
        let marker = daily_marker_key(user_id, date);
        let played = self.store.exists(&marker).await?;
        debug!(key = %marker, played, "checked daily marker");
        Ok(played)
    }

    fn missing(&self, session: &GameSession, now: i64) -> RealoraiError {
        let ttl_ms = i64::try_from(self.settings.session_ttl_secs.saturating_mul(1000))
            .unwrap_or(i64::MAX);
        let user_id = session.user_id.clone();
        let session_id = session.session_id.clone();
        if session.last_activity.saturating_add(ttl_ms) < now {
            RealoraiError::SessionExpired {
                user_id,
                session_id,
            }
        } else {
            RealoraiError::SessionNotFound {
                user_id,
                session_id,
            }
        }
    }
}

fn today_utc() -> NaiveDate {
    Utc::now().date_naive()
}

// `:` separates key segments, so it may not appear inside one.
fn require_user_id(user_id: &str) -> Result<(), RealoraiError> {
    if user_id.trim().is_empty() {
        return Err(RealoraiError::InvalidUserId {
            reason: "user id must be a non-empty string".to_string(),
        });
    }
    if user_id.contains(KEY_SEPARATOR) {
        return Err(RealoraiError::InvalidUserId {
            reason: format!("user id must not contain `{KEY_SEPARATOR}`"),
        });
    }
    Ok(())
}

fn require_session_id(session_id: &str) -> Result<(), RealoraiError> {
    if session_id.trim().is_empty() {
        return Err(RealoraiError::InvalidSessionId {
            reason: "session id must be a non-empty string".to_string(),
        });
    }
    if session_id.contains(KEY_SEPARATOR) {
        return Err(RealoraiError::InvalidSessionId {
            reason: format!("session id must not contain `{KEY_SEPARATOR}`"),
        });
    }
    Ok(())
}
