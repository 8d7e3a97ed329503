//! Narration result - the narrative plus stat deltas proposed for one turn.

use serde::{Deserialize, Serialize};

/// Narrative shown when the narration service failed or answered garbage.
pub const FALLBACK_NARRATIVE: &str = "The DM could not process that action.";

/// Narrative shown when no narration service credential is configured.
pub const MISSING_CREDENTIALS_NARRATIVE: &str =
    "Set OPENROUTER_API_KEY or API_KEY to enable the Dungeon Master.";

/// Outcome of one narration call.
///
/// Wire keys are snake_case (`hp_change`, `new_items`, ...) to match the
/// JSON contract the model is asked to follow.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NarrationResult {
    #[serde(default)]
    pub narrative: String,
    #[serde(default)]
    pub hp_change: i64,
    #[serde(default)]
    pub xp_change: i64,
    #[serde(default)]
    pub gold_change: i64,
    #[serde(default)]
    pub new_items: Vec<String>,
}

impl NarrationResult {
    /// A narrative with every delta zeroed.
    pub fn neutral(narrative: impl Into<String>) -> Self {
        Self {
            narrative: narrative.into(),
            ..Self::default()
        }
    }

    pub fn fallback() -> Self {
        Self::neutral(FALLBACK_NARRATIVE)
    }

    pub fn missing_credentials() -> Self {
        Self::neutral(MISSING_CREDENTIALS_NARRATIVE)
    }

    /// True when applying this result would not change any stat.
    pub fn is_neutral(&self) -> bool {
        self.hp_change == 0
            && self.xp_change == 0
            && self.gold_change == 0
            && self.new_items.is_empty()
    }
}
