//! Port traits for infrastructure boundaries.
//!
//! These are the ONLY abstractions in the engine. Everything else is concrete types.
//! Ports exist for:
//! - Compendium lookups (could swap SQLite -> a warehouse)
//! - Player persistence and turn history
//! - LLM calls (could swap OpenRouter -> Ollama/OpenAI)
//! - Session storage for the dashboard
//! - Clock (for testing)

mod error;
mod external;
mod repos;
mod time;
pub mod types;

// =============================================================================
// Repository Ports
// =============================================================================
pub use repos::{CompendiumRepo, PlayerStatsRepo, SessionStore, TurnHistoryRepo};

pub use types::{SessionSnapshot, TurnRecord};

// =============================================================================
// External Service Ports
// =============================================================================
pub use external::{
    ChatMessage, FinishReason, LlmPort, LlmRequest, LlmResponse, MessageRole, ResponseFormat,
    TokenUsage,
};

// =============================================================================
// Test-Only Mocks (only available during test builds)
// =============================================================================
#[cfg(test)]
pub use repos::{MockCompendiumRepo, MockPlayerStatsRepo, MockSessionStore, MockTurnHistoryRepo};

#[cfg(test)]
pub use external::MockLlmPort;

// =============================================================================
// Time
// =============================================================================
pub use time::ClockPort;

// =============================================================================
// Error Types
// =============================================================================
pub use error::{LlmError, RepoError};
