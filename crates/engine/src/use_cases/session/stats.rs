use std::sync::Arc;

use questscribe_shared::StatsResponse;

use crate::infrastructure::ports::{RepoError, SessionStore};

/// Read the dashboard view: characters plus game log.
pub struct GetStats {
    session: Arc<dyn SessionStore>,
}

impl GetStats {
    pub fn new(session: Arc<dyn SessionStore>) -> Self {
        Self { session }
    }

    pub async fn execute(&self) -> Result<StatsResponse, RepoError> {
        let snapshot = self.session.snapshot().await?;
        Ok(StatsResponse {
            characters: snapshot.characters,
            logs: snapshot.logs,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::{MockSessionStore, SessionSnapshot};
    use questscribe_domain::Character;

    #[tokio::test]
    async fn returns_session_snapshot() {
        let mut session = MockSessionStore::new();
        session.expect_snapshot().returning(|| {
            Ok(SessionSnapshot {
                characters: vec![Character::starter()],
                logs: Vec::new(),
            })
        });

        let stats = GetStats::new(Arc::new(session)).execute().await.unwrap();
        assert_eq!(stats.characters[0].name, "Valerius the Bold");
        assert!(stats.logs.is_empty());
    }

    #[tokio::test]
    async fn store_errors_propagate() {
        let mut session = MockSessionStore::new();
        session
            .expect_snapshot()
            .returning(|| Err(RepoError::database("snapshot", "poisoned")));

        assert!(GetStats::new(Arc::new(session)).execute().await.is_err());
    }
}
