//! SQLite-backed compendium and monster stats store.

use async_trait::async_trait;
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

use questscribe_domain::{CompendiumEntry, MonsterStats};

use crate::infrastructure::ports::{CompendiumRepo, RepoError};

/// SQLite implementation of the compendium lookups.
///
/// `compendium` holds monsters/items/lore keyed by exact name; `monsters`
/// holds battle stats searched by name substring. Both carry a `name_key`
/// column folded in Rust, since SQLite's own case folding is ASCII-only.
pub struct SqliteCompendiumRepo {
    pool: SqlitePool,
}

impl SqliteCompendiumRepo {
    pub async fn new(pool: SqlitePool) -> Result<Self, RepoError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS compendium (
                name TEXT NOT NULL PRIMARY KEY,
                name_key TEXT NOT NULL,
                type TEXT,
                hp INTEGER,
                ac INTEGER,
                description TEXT
            )
            "#,
        )
        .execute(&pool)
        .await
        .map_err(|e| RepoError::database("compendium_schema", e))?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_compendium_name_key ON compendium(name_key)")
            .execute(&pool)
            .await
            .map_err(|e| RepoError::database("compendium_schema", e))?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS monsters (
                name TEXT NOT NULL PRIMARY KEY,
                name_key TEXT NOT NULL,
                hp INTEGER,
                ac INTEGER,
                type TEXT,
                abilities_json TEXT
            )
            "#,
        )
        .execute(&pool)
        .await
        .map_err(|e| RepoError::database("compendium_schema", e))?;

        Ok(Self { pool })
    }

    pub async fn upsert_entry(&self, entry: &CompendiumEntry) -> Result<(), RepoError> {
        let entry_type = (!entry.entry_type.is_empty()).then_some(entry.entry_type.as_str());

        sqlx::query(
            r#"
            INSERT INTO compendium (name, name_key, type, hp, ac, description)
            VALUES (?, ?, ?, ?, ?, ?)
            ON CONFLICT(name) DO UPDATE SET
                name_key = excluded.name_key,
                type = excluded.type,
                hp = excluded.hp,
                ac = excluded.ac,
                description = excluded.description
            "#,
        )
        .bind(entry.name.trim())
        .bind(name_key(&entry.name))
        .bind(entry_type)
        .bind(entry.hp)
        .bind(entry.ac)
        .bind(&entry.description)
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::database("upsert_entry", e))?;

        Ok(())
    }

    pub async fn upsert_monster(&self, monster: &MonsterStats) -> Result<(), RepoError> {
        let abilities = monster
            .abilities
            .as_ref()
            .map(serde_json::to_string)
            .transpose()
            .map_err(RepoError::serialization)?;

        sqlx::query(
            r#"
            INSERT INTO monsters (name, name_key, hp, ac, type, abilities_json)
            VALUES (?, ?, ?, ?, ?, ?)
            ON CONFLICT(name) DO UPDATE SET
                name_key = excluded.name_key,
                hp = excluded.hp,
                ac = excluded.ac,
                type = excluded.type,
                abilities_json = excluded.abilities_json
            "#,
        )
        .bind(monster.name.trim())
        .bind(name_key(&monster.name))
        .bind(monster.hp)
        .bind(monster.ac)
        .bind(&monster.monster_type)
        .bind(abilities)
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::database("upsert_monster", e))?;

        Ok(())
    }
}

#[async_trait]
impl CompendiumRepo for SqliteCompendiumRepo {
    async fn lookup_entry(&self, name: &str) -> Result<Option<CompendiumEntry>, RepoError> {
        let name = name.trim();
        if name.is_empty() {
            return Ok(None);
        }

        let row = sqlx::query(
            r#"
            SELECT name, type, hp, ac, description
            FROM compendium
            WHERE name_key = ?
            LIMIT 1
            "#,
        )
        .bind(name_key(name))
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepoError::database("lookup_entry", e))?;

        row.map(|row| entry_from_row(&row)).transpose()
    }

    async fn lookup_monster_stats(&self, term: &str) -> Result<Option<MonsterStats>, RepoError> {
        let term = term.trim();
        if term.is_empty() {
            return Ok(None);
        }

        // Shortest name first so "Goblin" wins over "Goblin Boss".
        let row = sqlx::query(
            r#"
            SELECT name, hp, ac, type, abilities_json
            FROM monsters
            WHERE name_key LIKE ? ESCAPE '\'
            ORDER BY LENGTH(name), name
            LIMIT 1
            "#,
        )
        .bind(like_pattern(term))
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepoError::database("lookup_monster_stats", e))?;

        row.map(|row| monster_from_row(&row)).transpose()
    }
}

/// Case-folded lookup key; covers non-ASCII letters that `UPPER`/`LIKE` miss.
fn name_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// `%term%` over the folded term, with LIKE wildcards escaped.
fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for ch in name_key(term).chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

fn entry_from_row(row: &SqliteRow) -> Result<CompendiumEntry, RepoError> {
    let decode = |e: sqlx::Error| RepoError::database("decode_entry", e);

    Ok(CompendiumEntry {
        name: row.try_get("name").map_err(decode)?,
        entry_type: row
            .try_get::<Option<String>, _>("type")
            .map_err(decode)?
            .unwrap_or_default(),
        hp: row.try_get("hp").map_err(decode)?,
        ac: row.try_get("ac").map_err(decode)?,
        description: row
            .try_get::<Option<String>, _>("description")
            .map_err(decode)?
            .unwrap_or_default(),
    })
}

fn monster_from_row(row: &SqliteRow) -> Result<MonsterStats, RepoError> {
    let decode = |e: sqlx::Error| RepoError::database("decode_monster", e);

    // Abilities are opaque; keep unparseable text rather than dropping the monster.
    let abilities = row
        .try_get::<Option<String>, _>("abilities_json")
        .map_err(decode)?
        .map(|raw| serde_json::from_str(&raw).unwrap_or(serde_json::Value::String(raw)));

    Ok(MonsterStats {
        name: row.try_get("name").map_err(decode)?,
        hp: row.try_get("hp").map_err(decode)?,
        ac: row.try_get("ac").map_err(decode)?,
        monster_type: row.try_get("type").map_err(decode)?,
        abilities,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::sqlite;

    async fn test_repo(dir: &tempfile::TempDir) -> SqliteCompendiumRepo {
        let db_path = dir.path().join("compendium.db");
        let pool = sqlite::connect(&db_path.to_string_lossy())
            .await
            .expect("connect");
        SqliteCompendiumRepo::new(pool).await.expect("schema")
    }

    #[tokio::test]
    async fn entry_lookup_ignores_case_and_whitespace() {
        let dir = tempfile::tempdir().expect("tempdir");
        let repo = test_repo(&dir).await;
        repo.upsert_entry(
            &CompendiumEntry::new("Shadow Wraith", "monster")
                .with_combat(Some(45), Some(13))
                .with_description("A hateful shade."),
        )
        .await
        .expect("upsert");

        let found = repo
            .lookup_entry("  shadow WRAITH ")
            .await
            .expect("lookup")
            .expect("entry");
        assert_eq!(found.name, "Shadow Wraith");
        assert_eq!(found.entry_type, "monster");
        assert_eq!(found.hp, Some(45));
        assert_eq!(found.description, "A hateful shade.");

        // exact match only, no substring hits
        assert!(repo.lookup_entry("Wraith").await.expect("lookup").is_none());
        assert!(repo.lookup_entry("   ").await.expect("lookup").is_none());
    }

    #[tokio::test]
    async fn untyped_entry_reads_back_as_empty_type() {
        let dir = tempfile::tempdir().expect("tempdir");
        let repo = test_repo(&dir).await;
        repo.upsert_entry(&CompendiumEntry::new("Cave", ""))
            .await
            .expect("upsert");

        let found = repo.lookup_entry("cave").await.expect("lookup").expect("entry");
        assert_eq!(found.entry_type, "");
        assert_eq!(found.hp, None);
        assert_eq!(found.description, "");
    }

    #[tokio::test]
    async fn monster_lookup_is_substring_and_prefers_shortest_name() {
        let dir = tempfile::tempdir().expect("tempdir");
        let repo = test_repo(&dir).await;
        repo.upsert_monster(&MonsterStats::new("Goblin Boss", Some(21), Some(17)))
            .await
            .expect("upsert");
        let mut goblin = MonsterStats::new("Goblin", Some(7), Some(15));
        goblin.monster_type = Some("humanoid".into());
        goblin.abilities = Some(serde_json::json!([{"name": "Nimble Escape"}]));
        repo.upsert_monster(&goblin).await.expect("upsert");

        let found = repo
            .lookup_monster_stats("gob")
            .await
            .expect("lookup")
            .expect("monster");
        assert_eq!(found, goblin);

        let boss = repo
            .lookup_monster_stats("BOSS")
            .await
            .expect("lookup")
            .expect("monster");
        assert_eq!(boss.name, "Goblin Boss");
    }

    #[tokio::test]
    async fn non_ascii_names_match_regardless_of_case() {
        let dir = tempfile::tempdir().expect("tempdir");
        let repo = test_repo(&dir).await;
        repo.upsert_monster(&MonsterStats::new("Dröw Priestess", Some(71), Some(15)))
            .await
            .expect("upsert");
        repo.upsert_entry(&CompendiumEntry::new("Ötzi Barrow", "lore"))
            .await
            .expect("upsert");

        for term in ["Dröw Priestess", "dröw", "DRÖW", "PRIESTESS"] {
            let found = repo
                .lookup_monster_stats(term)
                .await
                .expect("lookup")
                .unwrap_or_else(|| panic!("no monster for {term}"));
            assert_eq!(found.name, "Dröw Priestess");
        }

        let entry = repo
            .lookup_entry("ötzi barrow")
            .await
            .expect("lookup")
            .expect("entry");
        assert_eq!(entry.name, "Ötzi Barrow");
    }

    #[tokio::test]
    async fn like_wildcards_in_terms_are_literal() {
        let dir = tempfile::tempdir().expect("tempdir");
        let repo = test_repo(&dir).await;
        repo.upsert_monster(&MonsterStats::new("Goblin", Some(7), Some(15)))
            .await
            .expect("upsert");

        assert!(repo.lookup_monster_stats("%").await.expect("lookup").is_none());
        assert!(repo.lookup_monster_stats("G_blin").await.expect("lookup").is_none());
    }

    #[test]
    fn like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("Orc"), "%orc%");
        assert_eq!(like_pattern("50%_X"), "%50\\%\\_x%");
    }
}
