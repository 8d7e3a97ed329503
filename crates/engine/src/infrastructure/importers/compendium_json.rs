//! JSON compendium seed importer.
//!
//! Loads a seed document of the shape
//! `{ "compendium": [...], "monsters": [...] }` into the SQLite compendium
//! store. Monster records may use the SRD layout (`hit_points`,
//! `armor_class` as a number or `[{"value": n}]`, `special_abilities`) or
//! flat `hp`/`ac` keys.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tokio::fs;

use questscribe_domain::{CompendiumEntry, MonsterStats};

use crate::infrastructure::compendium_store::SqliteCompendiumRepo;
use crate::infrastructure::ports::RepoError;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Seed file not found: {0}")]
    FileNotFound(PathBuf),
    #[error("Store error: {0}")]
    Store(#[from] RepoError),
}

/// Row counts written by one import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub entries: usize,
    pub monsters: usize,
}

/// Imports seed files into a [`SqliteCompendiumRepo`].
pub struct CompendiumImporter<'a> {
    store: &'a SqliteCompendiumRepo,
}

impl<'a> CompendiumImporter<'a> {
    pub fn new(store: &'a SqliteCompendiumRepo) -> Self {
        Self { store }
    }

    /// Read `path` and upsert every record it holds.
    ///
    /// Records without a usable name are skipped rather than failing the file.
    pub async fn import_file(&self, path: impl AsRef<Path>) -> Result<ImportSummary, ImportError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path).await?;
        let seed: SeedFile = serde_json::from_str(&content)?;

        let mut summary = ImportSummary::default();

        for raw in seed.compendium {
            if let Some(entry) = raw.into_entry() {
                self.store.upsert_entry(&entry).await?;
                summary.entries += 1;
            }
        }

        for raw in seed.monsters {
            if let Some(monster) = raw.into_monster() {
                self.store.upsert_monster(&monster).await?;
                summary.monsters += 1;
            }
        }

        tracing::info!(
            path = %path.display(),
            entries = summary.entries,
            monsters = summary.monsters,
            "Imported compendium seed"
        );

        Ok(summary)
    }
}

// =============================================================================
// Seed file layout
// =============================================================================

#[derive(Debug, Default, Deserialize)]
struct SeedFile {
    #[serde(default)]
    compendium: Vec<RawEntry>,
    #[serde(default)]
    monsters: Vec<RawMonster>,
}

#[derive(Debug, Deserialize)]
struct RawEntry {
    #[serde(default)]
    name: String,
    #[serde(rename = "type", default)]
    entry_type: Option<String>,
    #[serde(default)]
    hp: Option<Value>,
    #[serde(default)]
    ac: Option<Value>,
    #[serde(default)]
    description: Option<String>,
}

impl RawEntry {
    fn into_entry(self) -> Option<CompendiumEntry> {
        let name = self.name.trim();
        if name.is_empty() {
            return None;
        }
        Some(
            CompendiumEntry::new(name, self.entry_type.unwrap_or_default())
                .with_combat(
                    self.hp.as_ref().and_then(number),
                    self.ac.as_ref().and_then(armor_class),
                )
                .with_description(self.description.unwrap_or_default()),
        )
    }
}

#[derive(Debug, Deserialize)]
struct RawMonster {
    #[serde(default)]
    name: String,
    #[serde(default, alias = "hit_points")]
    hp: Option<Value>,
    #[serde(default, alias = "armor_class")]
    ac: Option<Value>,
    #[serde(rename = "type", default)]
    monster_type: Option<String>,
    #[serde(default, alias = "special_abilities")]
    abilities: Option<Value>,
}

impl RawMonster {
    fn into_monster(self) -> Option<MonsterStats> {
        let name = self.name.trim();
        if name.is_empty() {
            return None;
        }
        let mut monster = MonsterStats::new(
            name,
            self.hp.as_ref().and_then(number),
            self.ac.as_ref().and_then(armor_class),
        );
        monster.monster_type = self.monster_type.filter(|t| !t.trim().is_empty());
        monster.abilities = self.abilities.filter(|a| !a.is_null());
        Some(monster)
    }
}

/// Integer from a JSON number or numeric string.
fn number(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Armor class as a bare number or the SRD list form `[{"value": n, ...}]`.
fn armor_class(value: &Value) -> Option<i64> {
    match value {
        Value::Array(items) => items.first().and_then(|first| match first {
            Value::Object(obj) => obj.get("value").and_then(number),
            other => number(other),
        }),
        other => number(other),
    }
}
