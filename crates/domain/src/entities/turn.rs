//! Turn request/result - one player-message-in, narrative-and-stats-out cycle.

use serde::{Deserialize, Serialize};

use crate::{CompendiumEntry, DomainError, PlayerId, PlayerState};

/// Input for a single turn.
///
/// Created per call and never persisted. Construction rejects blank messages,
/// so a `TurnRequest` in hand always has something to narrate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnRequest {
    message: String,
    stats: PlayerState,
    player_id: Option<PlayerId>,
}

impl TurnRequest {
    pub fn new(
        message: impl Into<String>,
        stats: PlayerState,
        player_id: Option<PlayerId>,
    ) -> Result<Self, DomainError> {
        let message = message.into();
        if message.trim().is_empty() {
            return Err(DomainError::validation("Turn message cannot be empty"));
        }
        Ok(Self {
            message,
            stats,
            player_id,
        })
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn stats(&self) -> &PlayerState {
        &self.stats
    }

    pub fn player_id(&self) -> Option<&PlayerId> {
        self.player_id.as_ref()
    }
}

/// The only artifact handed back to the caller after a turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnResult {
    pub narrative: String,
    pub stats: PlayerState,
    /// Primary encounter chosen from the compendium hits, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monster: Option<CompendiumEntry>,
}
