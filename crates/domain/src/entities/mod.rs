//! Domain entities for the turn pipeline and the session dashboard.

mod character;
mod compendium;
mod game_log;
mod narration;
mod player_state;
mod turn;

pub use character::Character;
pub use compendium::{CompendiumEntry, MonsterStats};
pub use game_log::{LogEntry, LogRole};
pub use narration::{NarrationResult, FALLBACK_NARRATIVE, MISSING_CREDENTIALS_NARRATIVE};
pub use player_state::{PlayerState, DEFAULT_HP};
pub use turn::{TurnRequest, TurnResult};
