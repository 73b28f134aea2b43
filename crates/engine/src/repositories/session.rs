//! Game session documents.

use std::sync::Arc;

use echoes_domain::{GameSession, SessionId};

use crate::infrastructure::ports::{collections, DocumentStore, RepoError};

pub struct SessionRepository {
    store: Arc<dyn DocumentStore>,
}

impl SessionRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn get(&self, id: SessionId) -> Result<Option<GameSession>, RepoError> {
        let document = self
            .store
            .get(collections::SESSIONS, &id.to_string())
            .await?;

        document
            .map(|doc| serde_json::from_value(doc).map_err(RepoError::serialization))
            .transpose()
    }

    /// Write the whole session document, replacing any previous version.
    pub async fn save(&self, session: &GameSession) -> Result<(), RepoError> {
        let document = serde_json::to_value(session).map_err(RepoError::serialization)?;
        self.store
            .set(
                collections::SESSIONS,
                &session.session_id.to_string(),
                document,
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::memory_store::InMemoryDocumentStore;
    use crate::infrastructure::ports::MockDocumentStore;
    use chrono::Utc;
    use echoes_domain::{Location, Player, PlayerId, PlayerName};

    fn session() -> GameSession {
        let start = Location::new("listener_study", "The Listener's Study", "Quiet.");
        GameSession::start(
            SessionId::new(),
            Player::new(PlayerId::new(), PlayerName::default()),
            &start,
            Utc::now(),
        )
    }

    #[tokio::test]
    async fn when_saved_then_get_returns_same_session() {
        let repo = SessionRepository::new(Arc::new(InMemoryDocumentStore::new()));
        let session = session();

        repo.save(&session).await.unwrap();

        assert_eq!(repo.get(session.session_id).await.unwrap(), Some(session));
    }

    #[tokio::test]
    async fn when_document_missing_then_returns_none() {
        let repo = SessionRepository::new(Arc::new(InMemoryDocumentStore::new()));
        assert_eq!(repo.get(SessionId::new()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn when_document_malformed_then_returns_serialization_error() {
        let mut store = MockDocumentStore::new();
        store
            .expect_get()
            .withf(|collection, _| collection == "sessions")
            .returning(|_, _| Ok(Some(serde_json::json!({"session_id": 42}))));

        let repo = SessionRepository::new(Arc::new(store));
        let err = repo.get(SessionId::new()).await.unwrap_err();
        assert!(matches!(err, RepoError::Serialization(_)));
    }
}
