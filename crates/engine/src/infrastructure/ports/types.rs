//! Helper types for port operations.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use questscribe_domain::{Character, LogEntry, PlayerState};

/// One resolved turn as written to the history table.
#[derive(Debug, Clone, PartialEq)]
pub struct TurnRecord {
    pub id: Uuid,
    pub player_name: String,
    pub action: String,
    pub narrative: String,
    pub stats: PlayerState,
    pub created_at: DateTime<Utc>,
}

/// Everything the dashboard shows: characters plus the running game log.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub characters: Vec<Character>,
    pub logs: Vec<LogEntry>,
}
