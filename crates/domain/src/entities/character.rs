//! Character sheet - the dashboard's view of the active player character.

use serde::{Deserialize, Serialize};

use crate::PlayerState;

/// A player character as shown on the character sheet.
///
/// Only hp/xp/gold/inventory change during play; the rest is fixed at creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    pub id: String,
    pub name: String,
    #[serde(rename = "class")]
    pub class_name: String,
    pub level: u32,
    pub hp: u32,
    pub max_hp: u32,
    pub ac: u32,
    pub gold: u32,
    pub xp: u32,
    pub inventory: Vec<String>,
    #[serde(rename = "str")]
    pub strength: u8,
    #[serde(rename = "dex")]
    pub dexterity: u8,
    #[serde(rename = "con")]
    pub constitution: u8,
    #[serde(rename = "int")]
    pub intelligence: u8,
    #[serde(rename = "wis")]
    pub wisdom: u8,
    #[serde(rename = "cha")]
    pub charisma: u8,
}

impl Character {
    /// The level-1 fighter every new session starts with.
    pub fn starter() -> Self {
        Self {
            id: "valerius-bold-001".to_string(),
            name: "Valerius the Bold".to_string(),
            class_name: "Fighter".to_string(),
            level: 1,
            hp: 12,
            max_hp: 12,
            ac: 16,
            gold: 15,
            xp: 0,
            inventory: vec![
                "Longsword".to_string(),
                "Shield".to_string(),
                "Leather Armor".to_string(),
                "Rations (5)".to_string(),
            ],
            strength: 16,
            dexterity: 14,
            constitution: 15,
            intelligence: 10,
            wisdom: 12,
            charisma: 8,
        }
    }

    /// Current turn-relevant stats of this character.
    pub fn stats(&self) -> PlayerState {
        PlayerState::new(self.hp, self.xp, self.gold, self.inventory.clone())
    }

    /// Merge a post-turn snapshot back into the sheet.
    pub fn apply_stats(&mut self, stats: &PlayerState) {
        self.hp = stats.hp;
        self.xp = stats.xp;
        self.gold = stats.gold;
        self.inventory = stats.inventory.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starter_serializes_with_sheet_keys() {
        let json = serde_json::to_value(Character::starter()).unwrap();
        assert_eq!(json["class"], "Fighter");
        assert_eq!(json["maxHp"], 12);
        assert_eq!(json["str"], 16);
        assert_eq!(json["inventory"][0], "Longsword");
    }

    #[test]
    fn apply_stats_only_touches_turn_fields() {
        let mut hero = Character::starter();
        hero.apply_stats(&PlayerState::new(3, 40, 0, vec!["Key".into()]));
        assert_eq!(hero.hp, 3);
        assert_eq!(hero.xp, 40);
        assert_eq!(hero.gold, 0);
        assert_eq!(hero.inventory, vec!["Key"]);
        assert_eq!(hero.max_hp, 12);
        assert_eq!(hero.ac, 16);
    }
}
