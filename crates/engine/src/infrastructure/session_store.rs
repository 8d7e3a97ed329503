//! In-memory session store backing the dashboard endpoints.

use async_trait::async_trait;
use tokio::sync::RwLock;

use questscribe_domain::{Character, LogEntry, PlayerState};

use crate::infrastructure::ports::{RepoError, SessionSnapshot, SessionStore};

/// Process-local session state: the character roster and the running log.
///
/// Seeded with the starter character. Lost on restart; durable state lives in
/// the SQLite player store.
pub struct InMemorySessionStore {
    state: RwLock<SessionSnapshot>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::with_characters(vec![Character::starter()])
    }

    pub fn with_characters(characters: Vec<Character>) -> Self {
        Self {
            state: RwLock::new(SessionSnapshot {
                characters,
                logs: Vec::new(),
            }),
        }
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn snapshot(&self) -> Result<SessionSnapshot, RepoError> {
        Ok(self.state.read().await.clone())
    }

    async fn active_stats(&self) -> Result<Option<PlayerState>, RepoError> {
        let state = self.state.read().await;
        Ok(state.characters.first().map(Character::stats))
    }

    async fn record_turn(
        &self,
        stats: &PlayerState,
        entries: Vec<LogEntry>,
    ) -> Result<(), RepoError> {
        let mut state = self.state.write().await;
        // A roster with no characters still keeps its log.
        if let Some(active) = state.characters.first_mut() {
            active.apply_stats(stats);
        }
        state.logs.extend(entries);
        Ok(())
    }
}
