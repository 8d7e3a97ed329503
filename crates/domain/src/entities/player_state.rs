//! Player state - the hp/xp/gold/inventory snapshot carried between turns.

use serde::{Deserialize, Serialize};

use crate::PlayerId;

/// HP assumed when a caller sends stats without an `hp` field.
pub const DEFAULT_HP: u32 = 100;

/// Snapshot of a player's mutable stats.
///
/// Owned by the caller across turns. Turn resolution never mutates a
/// snapshot in place; it produces a new one via [`PlayerState::with_deltas`].
/// The unsigned counters make negative stats unrepresentable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    #[serde(default = "default_hp")]
    pub hp: u32,
    #[serde(default)]
    pub xp: u32,
    #[serde(default)]
    pub gold: u32,
    /// Item names in acquisition order; duplicates allowed.
    #[serde(default)]
    pub inventory: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player_id: Option<PlayerId>,
}

fn default_hp() -> u32 {
    DEFAULT_HP
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            hp: DEFAULT_HP,
            xp: 0,
            gold: 0,
            inventory: Vec::new(),
            player_id: None,
        }
    }
}

impl PlayerState {
    pub fn new(hp: u32, xp: u32, gold: u32, inventory: Vec<String>) -> Self {
        Self {
            hp,
            xp,
            gold,
            inventory,
            player_id: None,
        }
    }

    pub fn with_player_id(mut self, player_id: PlayerId) -> Self {
        self.player_id = Some(player_id);
        self
    }

    /// Fold signed stat deltas and newly acquired items into a new snapshot.
    ///
    /// Each counter is floored at zero no matter how negative the delta is.
    /// Items are appended after the existing inventory; nothing is removed.
    pub fn with_deltas(
        &self,
        hp_change: i64,
        xp_change: i64,
        gold_change: i64,
        new_items: &[String],
    ) -> Self {
        let mut inventory = Vec::with_capacity(self.inventory.len() + new_items.len());
        inventory.extend(self.inventory.iter().cloned());
        inventory.extend(new_items.iter().cloned());

        Self {
            hp: apply_delta(self.hp, hp_change),
            xp: apply_delta(self.xp, xp_change),
            gold: apply_delta(self.gold, gold_change),
            inventory,
            player_id: self.player_id.clone(),
        }
    }

    /// Inventory rendered for prompts: comma-joined, or `none` when empty.
    pub fn inventory_display(&self) -> String {
        if self.inventory.is_empty() {
            "none".to_string()
        } else {
            self.inventory.join(", ")
        }
    }
}

fn apply_delta(current: u32, delta: i64) -> u32 {
    let next = i64::from(current).saturating_add(delta);
    next.clamp(0, i64::from(u32::MAX)) as u32
}
