//! Game log - the running transcript of player actions and DM narration.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who produced a log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogRole {
    User,
    Dm,
}

impl LogRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Dm => "dm",
        }
    }
}

/// One line of the game log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// `<role>-<unix millis>`; a user line and its dm reply share the suffix.
    pub id: String,
    /// Wall-clock `HH:MM:SS` (UTC).
    pub timestamp: String,
    pub role: LogRole,
    pub content: String,
    /// Whether the line reflects state that went through the persistence layer.
    /// The dashboard reads this as `isSnowflakeSynced`.
    #[serde(rename = "isSnowflakeSynced")]
    pub synced: bool,
}

impl LogEntry {
    pub fn new(role: LogRole, content: impl Into<String>, at: DateTime<Utc>, synced: bool) -> Self {
        Self {
            id: format!("{}-{}", role.as_str(), at.timestamp_millis()),
            timestamp: at.format("%H:%M:%S").to_string(),
            role,
            content: content.into(),
            synced,
        }
    }

    pub fn user(content: impl Into<String>, at: DateTime<Utc>) -> Self {
        Self::new(LogRole::User, content, at, false)
    }

    pub fn dm(content: impl Into<String>, at: DateTime<Utc>) -> Self {
        Self::new(LogRole::Dm, content, at, true)
    }
}
