//! Document persistence port.
//!
//! Sessions and locations are stored as whole JSON documents in two logical
//! collections. There is no partial-field write path.

use async_trait::async_trait;

use super::error::RepoError;

/// A stored document: a plain attribute map.
pub type Document = serde_json::Value;

/// Collection names.
pub mod collections {
    pub const SESSIONS: &str = "sessions";
    pub const LOCATIONS: &str = "locations";
}

/// Result of [`DocumentStore::insert_if_absent`].
#[derive(Debug, Clone, PartialEq)]
pub struct InsertOutcome {
    /// The document now stored under the id - ours if we won, the incumbent otherwise.
    pub stored: Document,
    /// `true` if this call wrote the document.
    pub inserted: bool,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, RepoError>;

    /// Replace the whole document.
    async fn set(&self, collection: &str, id: &str, document: Document) -> Result<(), RepoError>;

    /// Store `document` only if nothing exists under `id` yet (first writer wins).
    ///
    /// Must be atomic with respect to concurrent callers for the same id.
    async fn insert_if_absent(
        &self,
        collection: &str,
        id: &str,
        document: Document,
    ) -> Result<InsertOutcome, RepoError>;
}
