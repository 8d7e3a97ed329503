use std::sync::Arc;

use uuid::Uuid;

use questscribe_domain::{LogEntry, PlayerId, PlayerState, TurnRequest, TurnResult};
use questscribe_shared::PlayerStatsPayload;

use crate::infrastructure::ports::{
    ClockPort, PlayerStatsRepo, SessionStore, TurnHistoryRepo, TurnRecord,
};
use crate::use_cases::turn::ResolveTurn;

#[derive(Debug, thiserror::Error)]
pub enum GameActionError {
    #[error("Missing 'action' in request body")]
    EmptyAction,
}

/// Play one action from the dashboard.
///
/// Resolves the turn, merges the new stats into the active character and
/// appends the user/dm log pair. Session and history writes are best-effort.
///
/// Without supplied stats, a known player id resumes from its persisted row;
/// otherwise the active character's stats are used.
pub struct PlayGameAction {
    resolve: Arc<ResolveTurn>,
    session: Arc<dyn SessionStore>,
    player_stats: Arc<dyn PlayerStatsRepo>,
    history: Arc<dyn TurnHistoryRepo>,
    clock: Arc<dyn ClockPort>,
}

impl PlayGameAction {
    pub fn new(
        resolve: Arc<ResolveTurn>,
        session: Arc<dyn SessionStore>,
        player_stats: Arc<dyn PlayerStatsRepo>,
        history: Arc<dyn TurnHistoryRepo>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            resolve,
            session,
            player_stats,
            history,
            clock,
        }
    }

    pub async fn execute(
        &self,
        action: &str,
        stats: Option<PlayerStatsPayload>,
        player_id: Option<String>,
    ) -> Result<TurnResult, GameActionError> {
        let action = action.trim();
        if action.is_empty() {
            return Err(GameActionError::EmptyAction);
        }
        let player_id = player_id
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty())
            .map(PlayerId::new);

        let stats = match stats.filter(|s| !s.is_empty()) {
            Some(payload) => payload.into_player_state(),
            None => self.stored_stats(player_id.as_ref()).await,
        };

        let request = TurnRequest::new(action, stats, player_id.clone())
            .map_err(|_| GameActionError::EmptyAction)?;

        let result = self.resolve.execute(request).await;

        let now = self.clock.now();
        let entries = vec![
            LogEntry::user(action, now),
            LogEntry::dm(result.narrative.clone(), now),
        ];
        if let Err(e) = self.session.record_turn(&result.stats, entries).await {
            tracing::warn!(error = %e, "Failed to update session after turn");
        }

        let record = TurnRecord {
            id: Uuid::new_v4(),
            player_name: player_id
                .as_ref()
                .map(PlayerId::as_str)
                .unwrap_or(PlayerId::DEFAULT)
                .to_string(),
            action: action.to_string(),
            narrative: result.narrative.clone(),
            stats: result.stats.clone(),
            created_at: now,
        };
        if let Err(e) = self.history.record_turn(&record).await {
            tracing::warn!(error = %e, "Failed to record turn history");
        }

        Ok(result)
    }

    /// Persisted stats for `player_id`, then the active character, then defaults.
    async fn stored_stats(&self, player_id: Option<&PlayerId>) -> PlayerState {
        if let Some(id) = player_id {
            match self.player_stats.get(id).await {
                Ok(Some(stats)) => return stats,
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!(error = %e, player_id = %id, "Could not read persisted stats");
                }
            }
        }

        match self.session.active_stats().await {
            Ok(Some(stats)) => stats,
            Ok(None) => PlayerState::default(),
            Err(e) => {
                tracing::warn!(error = %e, "Could not read active character stats");
                PlayerState::default()
            }
        }
    }
}
