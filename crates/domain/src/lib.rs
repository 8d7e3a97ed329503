//! QuestScribe Domain - core data types for turn resolution.
//!
//! Pure data and invariants only: no I/O, no async. The engine crate owns
//! every external collaborator.

pub mod entities;
pub mod error;
pub mod ids;

pub use entities::{
    Character, CompendiumEntry, LogEntry, LogRole, MonsterStats, NarrationResult, PlayerState,
    TurnRequest, TurnResult, DEFAULT_HP, FALLBACK_NARRATIVE, MISSING_CREDENTIALS_NARRATIVE,
};
pub use error::DomainError;
pub use ids::PlayerId;
