//! Compendium records - monsters, items and lore sourced from the external store.

use serde::{Deserialize, Serialize};

/// Entry types that mark a compendium hit as a creature the player can face.
///
/// An empty type counts as well: untyped rows are usually monsters in practice.
const ENCOUNTER_TYPES: [&str; 3] = ["monster", "creature", ""];

/// A compendium row looked up by exact name.
///
/// Immutable once fetched. `entry_type` is `""` when the store has no type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompendiumEntry {
    pub name: String,
    #[serde(rename = "type", default)]
    pub entry_type: String,
    #[serde(default)]
    pub hp: Option<i64>,
    #[serde(default)]
    pub ac: Option<i64>,
    #[serde(default)]
    pub description: String,
}

impl CompendiumEntry {
    pub fn new(name: impl Into<String>, entry_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entry_type: entry_type.into(),
            hp: None,
            ac: None,
            description: String::new(),
        }
    }

    pub fn with_combat(mut self, hp: Option<i64>, ac: Option<i64>) -> Self {
        self.hp = hp;
        self.ac = ac;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Whether this entry can stand in as the turn's encounter.
    pub fn is_encounter(&self) -> bool {
        let lowered = self.entry_type.to_lowercase();
        ENCOUNTER_TYPES.contains(&lowered.as_str())
    }
}

/// Authoritative battle numbers for a monster.
///
/// Pinned into the narration prompt so the model cannot invent conflicting hp/ac.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonsterStats {
    pub name: String,
    #[serde(default)]
    pub hp: Option<i64>,
    #[serde(default)]
    pub ac: Option<i64>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub monster_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub abilities: Option<serde_json::Value>,
}

impl MonsterStats {
    pub fn new(name: impl Into<String>, hp: Option<i64>, ac: Option<i64>) -> Self {
        Self {
            name: name.into(),
            hp,
            ac,
            monster_type: None,
            abilities: None,
        }
    }

    /// A lookup hit only counts when it carries at least one combat number.
    pub fn has_combat_numbers(&self) -> bool {
        self.hp.is_some() || self.ac.is_some()
    }
}
