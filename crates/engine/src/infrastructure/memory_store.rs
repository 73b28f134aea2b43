//! In-memory document store.
//!
//! Suitable for development and tests; nothing survives a restart.

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::infrastructure::ports::{Document, DocumentStore, InsertOutcome, RepoError};

/// Documents keyed by `(collection, id)`.
#[derive(Default)]
pub struct InMemoryDocumentStore {
    documents: DashMap<(String, String), Document>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents in a collection.
    pub fn count(&self, collection: &str) -> usize {
        self.documents
            .iter()
            .filter(|entry| entry.key().0 == collection)
            .count()
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, RepoError> {
        let key = (collection.to_string(), id.to_string());
        Ok(self.documents.get(&key).map(|doc| doc.value().clone()))
    }

    async fn set(&self, collection: &str, id: &str, document: Document) -> Result<(), RepoError> {
        self.documents
            .insert((collection.to_string(), id.to_string()), document);
        Ok(())
    }

    async fn insert_if_absent(
        &self,
        collection: &str,
        id: &str,
        document: Document,
    ) -> Result<InsertOutcome, RepoError> {
        // The entry guard holds the shard lock across the check and the insert.
        match self
            .documents
            .entry((collection.to_string(), id.to_string()))
        {
            Entry::Occupied(existing) => Ok(InsertOutcome {
                stored: existing.get().clone(),
                inserted: false,
            }),
            Entry::Vacant(slot) => {
                slot.insert(document.clone());
                Ok(InsertOutcome {
                    stored: document,
                    inserted: true,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Arc;

    #[tokio::test]
    async fn set_then_get_returns_document() {
        let store = InMemoryDocumentStore::new();
        store.set("sessions", "a", json!({"n": 1})).await.unwrap();

        assert_eq!(store.get("sessions", "a").await.unwrap(), Some(json!({"n": 1})));
        assert_eq!(store.get("locations", "a").await.unwrap(), None);
        assert_eq!(store.count("sessions"), 1);
    }

    #[tokio::test]
    async fn insert_if_absent_keeps_first_writer() {
        let store = InMemoryDocumentStore::new();

        let first = store
            .insert_if_absent("locations", "hall", json!({"v": "first"}))
            .await
            .unwrap();
        let second = store
            .insert_if_absent("locations", "hall", json!({"v": "second"}))
            .await
            .unwrap();

        assert!(first.inserted);
        assert!(!second.inserted);
        assert_eq!(second.stored, json!({"v": "first"}));
    }

    #[tokio::test]
    async fn concurrent_inserts_converge_on_one_document() {
        let store = Arc::new(InMemoryDocumentStore::new());

        let handles: Vec<_> = (0..16)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move {
                    store
                        .insert_if_absent("locations", "hall", json!({ "writer": i }))
                        .await
                        .unwrap()
                })
            })
            .collect();

        let mut outcomes = Vec::new();
        for handle in handles {
            outcomes.push(handle.await.unwrap());
        }

        assert_eq!(outcomes.iter().filter(|o| o.inserted).count(), 1);
        let stored = store.get("locations", "hall").await.unwrap().unwrap();
        assert!(outcomes.iter().all(|o| o.stored == stored));
    }
}
