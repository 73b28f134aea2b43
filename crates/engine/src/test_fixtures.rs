//! Shared helpers for tests that need a composed app.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use crate::app::App;
use crate::infrastructure::clock::SequentialRandom;
use crate::infrastructure::memory_store::InMemoryDocumentStore;
use crate::infrastructure::ports::{
    collections, ClockPort, Document, DocumentStore, InsertOutcome, RepoError,
};
use crate::infrastructure::tts::DisabledNarrationAudio;

/// Compose an app over `store` and `clock` with built-in content and no audio.
pub fn app_with<S, C>(store: Arc<S>, clock: Arc<C>) -> App
where
    S: DocumentStore + 'static,
    C: ClockPort + 'static,
{
    App::new(
        store,
        Arc::new(DisabledNarrationAudio),
        clock,
        Arc::new(SequentialRandom::default()),
    )
}

/// In-memory store that counts whole-session writes.
#[derive(Default)]
pub struct CountingStore {
    inner: InMemoryDocumentStore,
    session_writes: AtomicUsize,
}

impl CountingStore {
    pub fn session_writes(&self) -> usize {
        self.session_writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DocumentStore for CountingStore {
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, RepoError> {
        self.inner.get(collection, id).await
    }

    async fn set(&self, collection: &str, id: &str, document: Document) -> Result<(), RepoError> {
        if collection == collections::SESSIONS {
            self.session_writes.fetch_add(1, Ordering::SeqCst);
        }
        self.inner.set(collection, id, document).await
    }

    async fn insert_if_absent(
        &self,
        collection: &str,
        id: &str,
        document: Document,
    ) -> Result<InsertOutcome, RepoError> {
        self.inner.insert_if_absent(collection, id, document).await
    }
}
