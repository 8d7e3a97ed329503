//! SQLite-backed player stats and turn history.

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{Row, SqlitePool};

use questscribe_domain::{PlayerId, PlayerState};

use crate::infrastructure::ports::{
    ClockPort, PlayerStatsRepo, RepoError, TurnHistoryRepo, TurnRecord,
};

/// SQLite implementation of player persistence.
///
/// `player_stats` holds one row per player id (last write wins);
/// `game_history` is append-only.
pub struct SqlitePlayerStore {
    pool: SqlitePool,
    clock: Arc<dyn ClockPort>,
}

impl SqlitePlayerStore {
    pub async fn new(pool: SqlitePool, clock: Arc<dyn ClockPort>) -> Result<Self, RepoError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS player_stats (
                player_id TEXT NOT NULL PRIMARY KEY,
                hp INTEGER NOT NULL,
                xp INTEGER NOT NULL,
                gold INTEGER NOT NULL,
                inventory_json TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&pool)
        .await
        .map_err(|e| RepoError::database("player_schema", e))?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS game_history (
                id TEXT NOT NULL PRIMARY KEY,
                player_name TEXT NOT NULL,
                action TEXT NOT NULL,
                narrative TEXT NOT NULL,
                stats_json TEXT NOT NULL,
                created_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&pool)
        .await
        .map_err(|e| RepoError::database("player_schema", e))?;

        Ok(Self { pool, clock })
    }
}

#[async_trait]
impl PlayerStatsRepo for SqlitePlayerStore {
    async fn persist(&self, stats: &PlayerState) -> Result<(), RepoError> {
        let player_id = stats
            .player_id
            .as_ref()
            .map(PlayerId::as_str)
            .unwrap_or(PlayerId::DEFAULT);
        let inventory =
            serde_json::to_string(&stats.inventory).map_err(RepoError::serialization)?;
        let now = self.clock.now().to_rfc3339();

        sqlx::query(
            r#"
            INSERT INTO player_stats (player_id, hp, xp, gold, inventory_json, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            ON CONFLICT(player_id) DO UPDATE SET
                hp = excluded.hp,
                xp = excluded.xp,
                gold = excluded.gold,
                inventory_json = excluded.inventory_json,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(player_id)
        .bind(i64::from(stats.hp))
        .bind(i64::from(stats.xp))
        .bind(i64::from(stats.gold))
        .bind(inventory)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::database("persist_stats", e))?;

        Ok(())
    }

    async fn get(&self, player_id: &PlayerId) -> Result<Option<PlayerState>, RepoError> {
        let row = sqlx::query(
            "SELECT hp, xp, gold, inventory_json FROM player_stats WHERE player_id = ?",
        )
        .bind(player_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepoError::database("get_stats", e))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let decode = |e: sqlx::Error| RepoError::database("decode_stats", e);
        let inventory_json: String = row.try_get("inventory_json").map_err(decode)?;
        let inventory: Vec<String> =
            serde_json::from_str(&inventory_json).map_err(RepoError::serialization)?;

        let state = PlayerState::new(
            counter(row.try_get("hp").map_err(decode)?)?,
            counter(row.try_get("xp").map_err(decode)?)?,
            counter(row.try_get("gold").map_err(decode)?)?,
            inventory,
        )
        .with_player_id(player_id.clone());

        Ok(Some(state))
    }
}

#[async_trait]
impl TurnHistoryRepo for SqlitePlayerStore {
    async fn record_turn(&self, record: &TurnRecord) -> Result<(), RepoError> {
        let stats_json =
            serde_json::to_string(&record.stats).map_err(RepoError::serialization)?;

        sqlx::query(
            r#"
            INSERT INTO game_history (id, player_name, action, narrative, stats_json, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(record.id.to_string())
        .bind(&record.player_name)
        .bind(&record.action)
        .bind(&record.narrative)
        .bind(stats_json)
        .bind(record.created_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::database("record_turn", e))?;

        Ok(())
    }
}

fn counter(value: i64) -> Result<u32, RepoError> {
    u32::try_from(value).map_err(|_| RepoError::serialization(format!("stat out of range: {value}")))
}
