//! Compendium gateway: resolves message terms against the compendium store.

use std::collections::HashSet;
use std::sync::Arc;

use questscribe_domain::{CompendiumEntry, MonsterStats};

use crate::infrastructure::ports::CompendiumRepo;

use super::terms::extract_terms;

/// Entries found for one message plus the one treated as the encounter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompendiumLookup {
    pub entries: Vec<CompendiumEntry>,
    pub primary: Option<CompendiumEntry>,
}

/// Turns free text into compendium hits.
///
/// Store errors are logged and count as a miss for that term only; no lookup
/// failure ever reaches the caller.
pub struct CompendiumGateway {
    repo: Arc<dyn CompendiumRepo>,
}

impl CompendiumGateway {
    pub fn new(repo: Arc<dyn CompendiumRepo>) -> Self {
        Self { repo }
    }

    /// First monster matching a term from `message` that carries hp or ac.
    ///
    /// Terms are tried in extraction order, so quoted names win over bare words.
    pub async fn find_monster_stats(&self, message: &str) -> Option<MonsterStats> {
        for term in extract_terms(message) {
            if term.chars().count() < 2 {
                continue;
            }
            match self.repo.lookup_monster_stats(&term).await {
                Ok(Some(stats)) if stats.has_combat_numbers() => return Some(stats),
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!(term = %term, error = %e, "Monster stats lookup failed");
                }
            }
        }
        None
    }

    /// Every compendium entry named in `message`, in query order.
    pub async fn query_compendium(&self, message: &str) -> CompendiumLookup {
        let mut seen = HashSet::new();
        let mut entries = Vec::new();

        for term in extract_terms(message) {
            if !seen.insert(term.to_uppercase()) {
                continue;
            }
            match self.repo.lookup_entry(&term).await {
                Ok(Some(entry)) => entries.push(entry),
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!(term = %term, error = %e, "Compendium lookup failed");
                }
            }
        }

        let primary = select_primary(&entries);
        CompendiumLookup { entries, primary }
    }
}

/// First creature-typed entry, else the first entry of any type.
///
/// The fallback means a lone item or lore hit is still reported as the
/// turn's encounter.
fn select_primary(entries: &[CompendiumEntry]) -> Option<CompendiumEntry> {
    entries
        .iter()
        .find(|e| e.is_encounter())
        .or_else(|| entries.first())
        .cloned()
}
