//! Request bodies accepted by the HTTP API.
//!
//! Browser clients are loose with types (`10.0` for an integer, numeric ids),
//! so fields are read from JSON values and coerced rather than rejected.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use questscribe_domain::{PlayerState, DEFAULT_HP};

/// Body of `POST /api/game-action`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameActionRequest {
    /// The player's free-text action. Blank, missing or non-text is rejected.
    #[serde(default, deserialize_with = "deserialize_text")]
    pub action: Option<String>,
    /// Stats to resolve against; falls back to stored stats when absent.
    #[serde(default, deserialize_with = "deserialize_stats")]
    pub stats: Option<PlayerStatsPayload>,
    #[serde(default, deserialize_with = "deserialize_identifier")]
    pub player_id: Option<String>,
}

/// Partially-specified player stats as sent by clients.
///
/// Counters are clamped to zero and truncated to whole numbers. Values of
/// the wrong type count as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStatsPayload {
    #[serde(
        default,
        deserialize_with = "deserialize_counter",
        skip_serializing_if = "Option::is_none"
    )]
    pub hp: Option<u32>,
    #[serde(
        default,
        deserialize_with = "deserialize_counter",
        skip_serializing_if = "Option::is_none"
    )]
    pub xp: Option<u32>,
    #[serde(
        default,
        deserialize_with = "deserialize_counter",
        skip_serializing_if = "Option::is_none"
    )]
    pub gold: Option<u32>,
    #[serde(
        default,
        deserialize_with = "deserialize_inventory",
        skip_serializing_if = "Option::is_none"
    )]
    pub inventory: Option<Vec<String>>,
}

impl PlayerStatsPayload {
    /// An empty object (`{}`) counts as "no stats supplied".
    pub fn is_empty(&self) -> bool {
        self.hp.is_none() && self.xp.is_none() && self.gold.is_none() && self.inventory.is_none()
    }

    pub fn into_player_state(self) -> PlayerState {
        PlayerState::new(
            self.hp.unwrap_or(DEFAULT_HP),
            self.xp.unwrap_or(0),
            self.gold.unwrap_or(0),
            self.inventory.unwrap_or_default(),
        )
    }
}

impl From<&PlayerState> for PlayerStatsPayload {
    fn from(state: &PlayerState) -> Self {
        Self {
            hp: Some(state.hp),
            xp: Some(state.xp),
            gold: Some(state.gold),
            inventory: Some(state.inventory.clone()),
        }
    }
}

// =============================================================================
// Lenient field readers
// =============================================================================

fn deserialize_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => Some(text),
        _ => None,
    })
}

fn deserialize_identifier<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(id) => Some(id),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

fn deserialize_stats<'de, D>(deserializer: D) -> Result<Option<PlayerStatsPayload>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    if !value.is_object() {
        return Ok(None);
    }
    serde_json::from_value(value)
        .map(Some)
        .map_err(serde::de::Error::custom)
}

fn deserialize_counter<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64().filter(|f| f.is_finite()).map(clamp_counter),
        _ => None,
    })
}

fn deserialize_inventory<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => Some(
            items
                .into_iter()
                .filter_map(|item| match item {
                    Value::String(name) => Some(name),
                    _ => None,
                })
                .collect(),
        ),
        _ => None,
    })
}

fn clamp_counter(value: f64) -> u32 {
    // float-to-int `as` saturates, so negatives land on 0
    value.trunc() as u32
}
