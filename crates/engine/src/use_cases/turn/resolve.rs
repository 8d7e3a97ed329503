//! Turn resolver: lookups, prompt, narration, then stat reconciliation.

use std::sync::Arc;

use questscribe_domain::{TurnRequest, TurnResult};

use crate::infrastructure::ports::PlayerStatsRepo;

use super::compendium::CompendiumGateway;
use super::narration::Narrator;
use super::prompt::build_prompt;

/// Resolves one turn end to end.
///
/// Never fails once a valid [`TurnRequest`] exists: every collaborator
/// failure degrades to a neutral value, and persistence is best-effort.
pub struct ResolveTurn {
    gateway: Arc<CompendiumGateway>,
    narrator: Arc<Narrator>,
    player_stats: Arc<dyn PlayerStatsRepo>,
}

impl ResolveTurn {
    pub fn new(
        gateway: Arc<CompendiumGateway>,
        narrator: Arc<Narrator>,
        player_stats: Arc<dyn PlayerStatsRepo>,
    ) -> Self {
        Self {
            gateway,
            narrator,
            player_stats,
        }
    }

    pub async fn execute(&self, request: TurnRequest) -> TurnResult {
        let message = request.message();

        // Both lookups must finish before the prompt exists.
        let (monster, lookup) = tokio::join!(
            self.gateway.find_monster_stats(message),
            self.gateway.query_compendium(message),
        );

        let prompt = build_prompt(message, request.stats(), &lookup.entries, monster.as_ref());
        let narration = self.narrator.narrate(&prompt.system, &prompt.user).await;

        let mut stats = request.stats().with_deltas(
            narration.hp_change,
            narration.xp_change,
            narration.gold_change,
            &narration.new_items,
        );
        if let Some(player_id) = request.player_id() {
            stats = stats.with_player_id(player_id.clone());
        }

        if let Err(e) = self.player_stats.persist(&stats).await {
            tracing::warn!(error = %e, "Failed to persist player stats");
        }

        tracing::debug!(
            entries = lookup.entries.len(),
            pinned_monster = monster.as_ref().map(|m| m.name.as_str()).unwrap_or("-"),
            hp = stats.hp,
            xp = stats.xp,
            gold = stats.gold,
            "Turn resolved"
        );

        TurnResult {
            narrative: narration.narrative,
            stats,
            monster: lookup.primary,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use questscribe_domain::{
        CompendiumEntry, MonsterStats, PlayerId, PlayerState, MISSING_CREDENTIALS_NARRATIVE,
    };

    use crate::infrastructure::ports::{
        FinishReason, LlmResponse, MockCompendiumRepo, MockLlmPort, MockPlayerStatsRepo,
        RepoError,
    };

    fn empty_compendium() -> MockCompendiumRepo {
        let mut repo = MockCompendiumRepo::new();
        repo.expect_lookup_entry().returning(|_| Ok(None));
        repo.expect_lookup_monster_stats().returning(|_| Ok(None));
        repo
    }

    fn llm_replying(content: &'static str) -> MockLlmPort {
        let mut llm = MockLlmPort::new();
        llm.expect_generate().times(1).returning(move |_| {
            Ok(LlmResponse {
                content: content.to_string(),
                finish_reason: FinishReason::Stop,
                usage: None,
            })
        });
        llm
    }

    fn resolver(
        compendium: MockCompendiumRepo,
        narrator: Narrator,
        player_stats: MockPlayerStatsRepo,
    ) -> ResolveTurn {
        ResolveTurn::new(
            Arc::new(CompendiumGateway::new(Arc::new(compendium))),
            Arc::new(narrator),
            Arc::new(player_stats),
        )
    }

    fn accepting_store() -> MockPlayerStatsRepo {
        let mut store = MockPlayerStatsRepo::new();
        store.expect_persist().times(1).returning(|_| Ok(()));
        store
    }

    #[tokio::test]
    async fn search_the_chest_end_to_end() {
        let llm = llm_replying(
            r#"{"narrative": "You find a coin purse.", "hp_change": 0, "xp_change": 5, "gold_change": 10, "new_items": ["Coin Purse"]}"#,
        );
        let mut store = MockPlayerStatsRepo::new();
        store
            .expect_persist()
            .withf(|s| *s == PlayerState::new(10, 5, 15, vec!["Coin Purse".into()]))
            .times(1)
            .returning(|_| Ok(()));

        let resolve = resolver(
            empty_compendium(),
            Narrator::new(Arc::new(llm), Duration::from_secs(5)),
            store,
        );
        let request =
            TurnRequest::new("I search the chest", PlayerState::new(10, 0, 5, vec![]), None)
                .unwrap();

        let result = resolve.execute(request).await;

        assert_eq!(result.narrative, "You find a coin purse.");
        assert_eq!(
            result.stats,
            PlayerState::new(10, 5, 15, vec!["Coin Purse".into()])
        );
        assert!(result.monster.is_none());
    }

    #[tokio::test]
    async fn overwhelming_damage_floors_hp_at_zero() {
        let llm = llm_replying(r#"{"narrative": "The dragon breathes fire.", "hp_change": -100}"#);
        let resolve = resolver(
            empty_compendium(),
            Narrator::new(Arc::new(llm), Duration::from_secs(5)),
            accepting_store(),
        );
        let request = TurnRequest::new("I poke the dragon", PlayerState::new(5, 0, 0, vec![]), None)
            .unwrap();

        let result = resolve.execute(request).await;
        assert_eq!(result.stats.hp, 0);
    }

    #[tokio::test]
    async fn new_items_are_appended_after_existing_inventory() {
        let llm = llm_replying(r#"{"narrative": "A vial glints.", "new_items": ["Potion"]}"#);
        let resolve = resolver(
            empty_compendium(),
            Narrator::new(Arc::new(llm), Duration::from_secs(5)),
            accepting_store(),
        );
        let stats = PlayerState::new(8, 1, 2, vec!["Torch".into(), "Rope".into()]);
        let request = TurnRequest::new("I check the shelf", stats, None).unwrap();

        let result = resolve.execute(request).await;
        assert_eq!(result.stats.inventory, vec!["Torch", "Rope", "Potion"]);
    }

    #[tokio::test]
    async fn monster_stats_are_pinned_and_primary_returned() {
        let goblin_entry = CompendiumEntry::new("Goblin", "monster").with_combat(Some(7), Some(15));
        let entry_hit = goblin_entry.clone();

        let mut compendium = MockCompendiumRepo::new();
        compendium.expect_lookup_entry().returning(move |term| {
            Ok((term == "Goblin").then(|| entry_hit.clone()))
        });
        compendium
            .expect_lookup_monster_stats()
            .returning(|term| Ok((term == "Goblin").then(|| MonsterStats::new("Goblin", Some(7), Some(15)))));

        let mut llm = MockLlmPort::new();
        llm.expect_generate()
            .withf(|req| {
                req.system_prompt
                    .as_deref()
                    .is_some_and(|s| s.contains("ENCOUNTER MONSTER: Goblin. HP = 7. AC = 15."))
                    && req.messages[0].content.contains(r#""name":"Goblin""#)
            })
            .times(1)
            .returning(|_| {
                Ok(LlmResponse {
                    content: r#"{"narrative": "The goblin lunges.", "hp_change": -3}"#.into(),
                    finish_reason: FinishReason::Stop,
                    usage: None,
                })
            });

        let resolve = resolver(
            compendium,
            Narrator::new(Arc::new(llm), Duration::from_secs(5)),
            accepting_store(),
        );
        let request = TurnRequest::new("I charge the Goblin", PlayerState::new(12, 0, 0, vec![]), None)
            .unwrap();

        let result = resolve.execute(request).await;
        assert_eq!(result.stats.hp, 9);
        assert_eq!(result.monster, Some(goblin_entry));
    }

    #[tokio::test]
    async fn player_id_is_attached_and_persist_failure_is_ignored() {
        let mut store = MockPlayerStatsRepo::new();
        store
            .expect_persist()
            .withf(|s| s.player_id.as_ref().map(PlayerId::as_str) == Some("hero-7"))
            .times(1)
            .returning(|_| Err(RepoError::database("persist_stats", "disk full")));

        let resolve = resolver(empty_compendium(), Narrator::disabled(), store);
        let request = TurnRequest::new(
            "I wave",
            PlayerState::new(4, 4, 4, vec![]),
            Some(PlayerId::new("hero-7")),
        )
        .unwrap();

        let result = resolve.execute(request).await;

        assert_eq!(result.narrative, MISSING_CREDENTIALS_NARRATIVE);
        assert_eq!(
            result.stats,
            PlayerState::new(4, 4, 4, vec![]).with_player_id(PlayerId::new("hero-7"))
        );
    }
}
