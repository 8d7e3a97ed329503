//! Repository port traits for the compendium, player, and session stores.

use async_trait::async_trait;

use questscribe_domain::{CompendiumEntry, LogEntry, MonsterStats, PlayerId, PlayerState};

use super::error::RepoError;
use super::types::{SessionSnapshot, TurnRecord};

// =============================================================================
// Compendium Lookups
// =============================================================================

/// Read-only lookups against the external compendium.
///
/// "Not found" is `Ok(None)`; `Err` is reserved for connectivity and decode failures.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompendiumRepo: Send + Sync {
    /// Exact name match, ignoring case and surrounding whitespace.
    async fn lookup_entry(&self, name: &str) -> Result<Option<CompendiumEntry>, RepoError>;

    /// First monster whose name contains `term`, ignoring case.
    async fn lookup_monster_stats(&self, term: &str) -> Result<Option<MonsterStats>, RepoError>;
}

// =============================================================================
// Player Persistence
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PlayerStatsRepo: Send + Sync {
    /// Upsert the snapshot, keyed by its player id (or the default row).
    async fn persist(&self, stats: &PlayerState) -> Result<(), RepoError>;

    /// Last persisted snapshot for `player_id`, if any.
    async fn get(&self, player_id: &PlayerId) -> Result<Option<PlayerState>, RepoError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TurnHistoryRepo: Send + Sync {
    /// Append one resolved turn; ids are unique.
    async fn record_turn(&self, record: &TurnRecord) -> Result<(), RepoError>;
}

// =============================================================================
// Session Storage
// =============================================================================

/// Per-deployment store behind the dashboard endpoints.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn snapshot(&self) -> Result<SessionSnapshot, RepoError>;

    /// Stats of the active (first) character, if any exists.
    async fn active_stats(&self) -> Result<Option<PlayerState>, RepoError>;

    /// Merge post-turn stats into the active character and append log lines.
    async fn record_turn(
        &self,
        stats: &PlayerState,
        entries: Vec<LogEntry>,
    ) -> Result<(), RepoError>;
}
