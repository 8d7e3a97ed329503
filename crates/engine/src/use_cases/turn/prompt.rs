//! Narration prompt assembly.

use questscribe_domain::{CompendiumEntry, MonsterStats, PlayerState};

/// Fixed Dungeon Master persona, ruleset and response contract.
pub const DM_SYSTEM_INSTRUCTION: &str = r#"
You are a World-Class Dungeon Master (DM) for a Dungeons & Dragons game.
Your goal is to provide an immersive, rules-consistent narrative experience.

RULES:
1. TRACK STATE: You must always be aware of the player's HP, Gold, and Inventory.
2. USE COMPENDIUM: When compendium data is provided below, use it for monster stats, items, or lore. Be accurate to that data.
3. NARRATION: Be descriptive and dramatic. Don't just say "You see a goblin." Say "From the flickering shadows of the damp cavern, a small, green-skinned figure emerges, clutching a jagged rusted blade."
4. D&D 5E RULES: Use standard 5th Edition rules for combat and checks.

Respond with ONLY valid JSON in this exact shape (no other text):
{"narrative": "2-5 sentences of what happens next.", "hp_change": 0, "xp_change": 0, "gold_change": 0, "new_items": []}

- narrative: the story result.
- hp_change, xp_change, gold_change: integers (negative or positive).
- new_items: list of new item names (strings) to add to inventory, or [].
"#;

/// Compendium block used when no entry matched.
pub const NO_COMPENDIUM_DATA: &str = "No compendium data for this turn.";

const MONSTER_PIN_SUFFIX: &str =
    " You MUST use these exact stats for the encounter. Do not hallucinate different HP or AC values.";

/// The two content blocks sent to the narration service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NarrationPrompt {
    pub system: String,
    pub user: String,
}

/// Build the system and user text for one turn.
pub fn build_prompt(
    message: &str,
    stats: &PlayerState,
    entries: &[CompendiumEntry],
    monster: Option<&MonsterStats>,
) -> NarrationPrompt {
    let mut system = DM_SYSTEM_INSTRUCTION.to_string();
    if let Some(monster) = monster {
        system.push_str("\n\n");
        system.push_str(&monster_pin(monster));
    }

    let user = format!(
        "COMPENDIUM DATA:\n{compendium}\n\n\
         CURRENT PLAYER STATE: HP={hp}, XP={xp}, Gold={gold}, Inventory=[{inventory}]\n\n\
         PLAYER MESSAGE: {message}\n\n\
         Respond with ONLY the JSON object (narrative, hp_change, xp_change, gold_change, new_items). No markdown.",
        compendium = compendium_block(entries),
        hp = stats.hp,
        xp = stats.xp,
        gold = stats.gold,
        inventory = stats.inventory_display(),
    );

    NarrationPrompt { system, user }
}

fn monster_pin(monster: &MonsterStats) -> String {
    let mut parts = vec![format!("ENCOUNTER MONSTER: {}.", monster.name)];
    if let Some(hp) = monster.hp {
        parts.push(format!("HP = {hp}."));
    }
    if let Some(ac) = monster.ac {
        parts.push(format!("AC = {ac}."));
    }
    let mut pin = parts.join(" ");
    pin.push_str(MONSTER_PIN_SUFFIX);
    pin
}

/// One JSON object per line, or the no-data sentinel.
fn compendium_block(entries: &[CompendiumEntry]) -> String {
    if entries.is_empty() {
        return NO_COMPENDIUM_DATA.to_string();
    }
    entries
        .iter()
        .filter_map(|entry| match serde_json::to_string(entry) {
            Ok(line) => Some(line),
            Err(e) => {
                tracing::warn!(entry = %entry.name, error = %e, "Skipping unserializable compendium entry");
                None
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_compendium_uses_sentinel_and_none_inventory() {
        let prompt = build_prompt("I look around", &PlayerState::new(10, 0, 5, vec![]), &[], None);

        assert_eq!(prompt.system, DM_SYSTEM_INSTRUCTION);
        assert!(prompt.user.starts_with("COMPENDIUM DATA:\nNo compendium data for this turn.\n\n"));
        assert!(prompt
            .user
            .contains("CURRENT PLAYER STATE: HP=10, XP=0, Gold=5, Inventory=[none]"));
        assert!(prompt.user.contains("PLAYER MESSAGE: I look around\n\n"));
        assert!(prompt.user.ends_with("No markdown."));
    }

    #[test]
    fn entries_are_one_json_line_each() {
        let entries = vec![
            CompendiumEntry::new("Goblin", "monster").with_combat(Some(7), Some(15)),
            CompendiumEntry::new("Longsword", "item"),
        ];
        let stats = PlayerState::new(12, 3, 15, vec!["Shield".into(), "Torch".into()]);
        let prompt = build_prompt("I draw my blade", &stats, &entries, None);

        assert!(prompt.user.contains(
            r#"{"name":"Goblin","type":"monster","hp":7,"ac":15,"description":""}"#
        ));
        assert!(prompt.user.contains(
            "\n{\"name\":\"Longsword\",\"type\":\"item\",\"hp\":null,\"ac\":null,\"description\":\"\"}\n"
        ));
        assert!(prompt.user.contains("Inventory=[Shield, Torch]"));
    }

    #[test]
    fn monster_pin_is_appended_to_system_text() {
        let goblin = MonsterStats::new("Goblin", Some(7), Some(15));
        let prompt = build_prompt("I attack", &PlayerState::default(), &[], Some(&goblin));

        assert_eq!(
            prompt.system,
            format!(
                "{DM_SYSTEM_INSTRUCTION}\n\nENCOUNTER MONSTER: Goblin. HP = 7. AC = 15. \
                 You MUST use these exact stats for the encounter. Do not hallucinate different HP or AC values."
            )
        );
    }

    #[test]
    fn missing_monster_numbers_are_omitted_individually() {
        let wraith = MonsterStats::new("Shadow Wraith", None, Some(13));
        let prompt = build_prompt("I attack", &PlayerState::default(), &[], Some(&wraith));

        assert!(prompt
            .system
            .contains("ENCOUNTER MONSTER: Shadow Wraith. AC = 13. You MUST"));
        assert!(!prompt.system.contains("HP ="));
    }

    #[test]
    fn message_is_embedded_verbatim() {
        let message = "  I say \"hello\" to the {innkeeper}  ";
        let prompt = build_prompt(message, &PlayerState::default(), &[], None);
        assert!(prompt.user.contains(&format!("PLAYER MESSAGE: {message}\n")));
    }
}
