//! Location template documents.

use std::sync::Arc;

use echoes_domain::{Location, LocationId};

use crate::infrastructure::ports::{collections, DocumentStore, RepoError};

pub struct LocationRepository {
    store: Arc<dyn DocumentStore>,
}

impl LocationRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn get(&self, id: &LocationId) -> Result<Option<Location>, RepoError> {
        let document = self.store.get(collections::LOCATIONS, id.as_str()).await?;

        document
            .map(|doc| serde_json::from_value(doc).map_err(RepoError::serialization))
            .transpose()
    }

    pub async fn save(&self, location: &Location) -> Result<(), RepoError> {
        let document = serde_json::to_value(location).map_err(RepoError::serialization)?;
        self.store
            .set(collections::LOCATIONS, location.id.as_str(), document)
            .await
    }

    /// Store `location` unless one already exists under its id.
    ///
    /// Returns the location that ended up stored and whether this call wrote it.
    pub async fn insert_if_absent(&self, location: &Location) -> Result<(Location, bool), RepoError> {
        let document = serde_json::to_value(location).map_err(RepoError::serialization)?;
        let outcome = self
            .store
            .insert_if_absent(collections::LOCATIONS, location.id.as_str(), document)
            .await?;

        let stored = serde_json::from_value(outcome.stored).map_err(RepoError::serialization)?;
        Ok((stored, outcome.inserted))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::memory_store::InMemoryDocumentStore;
    use echoes_domain::Exit;

    #[tokio::test]
    async fn when_inserted_twice_then_first_definition_wins() {
        let repo = LocationRepository::new(Arc::new(InMemoryDocumentStore::new()));
        let first = Location::new("cellar", "Cellar", "Damp stone.");
        let second = Location::new("cellar", "Wine Cellar", "Racks of bottles.")
            .with_exit(Exit::new("up", "kitchen"));

        let (stored, inserted) = repo.insert_if_absent(&first).await.unwrap();
        assert!(inserted);
        assert_eq!(stored, first);

        let (stored, inserted) = repo.insert_if_absent(&second).await.unwrap();
        assert!(!inserted);
        assert_eq!(stored, first);
        assert_eq!(repo.get(&LocationId::from("cellar")).await.unwrap(), Some(first));
    }

    #[tokio::test]
    async fn when_saved_then_get_returns_location() {
        let repo = LocationRepository::new(Arc::new(InMemoryDocumentStore::new()));
        let attic = Location::new("attic", "Attic", "Dust and rafters.").with_visited(true);

        repo.save(&attic).await.unwrap();

        assert_eq!(repo.get(&attic.id).await.unwrap(), Some(attic));
        assert_eq!(repo.get(&LocationId::from("void")).await.unwrap(), None);
    }
}
