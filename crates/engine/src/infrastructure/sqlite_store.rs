//! SQLite-backed document store.

use async_trait::async_trait;
use sqlx::{Row, SqlitePool};

use crate::infrastructure::ports::{Document, DocumentStore, InsertOutcome, RepoError};

/// SQLite implementation of the document store.
///
/// All collections share one table; bodies are stored as JSON text.
pub struct SqliteDocumentStore {
    pool: SqlitePool,
}

impl SqliteDocumentStore {
    pub async fn new(db_path: &str) -> Result<Self, RepoError> {
        let pool = SqlitePool::connect(&format!("sqlite:{}?mode=rwc", db_path))
            .await
            .map_err(|e| RepoError::database("connect", e))?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS documents (
                collection TEXT NOT NULL,
                id TEXT NOT NULL,
                body TEXT NOT NULL,
                PRIMARY KEY (collection, id)
            )
            "#,
        )
        .execute(&pool)
        .await
        .map_err(|e| RepoError::database("create_schema", e))?;

        Ok(Self { pool })
    }
}

fn encode(document: &Document) -> Result<String, RepoError> {
    serde_json::to_string(document).map_err(RepoError::serialization)
}

fn decode(body: &str) -> Result<Document, RepoError> {
    serde_json::from_str(body).map_err(RepoError::serialization)
}

#[async_trait]
impl DocumentStore for SqliteDocumentStore {
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, RepoError> {
        let row = sqlx::query("SELECT body FROM documents WHERE collection = ? AND id = ?")
            .bind(collection)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepoError::database("get", e))?;

        match row {
            Some(row) => {
                let body: String = row.get("body");
                Ok(Some(decode(&body)?))
            }
            None => Ok(None),
        }
    }

    async fn set(&self, collection: &str, id: &str, document: Document) -> Result<(), RepoError> {
        sqlx::query(
            r#"
            INSERT INTO documents (collection, id, body)
            VALUES (?, ?, ?)
            ON CONFLICT(collection, id) DO UPDATE SET body = excluded.body
            "#,
        )
        .bind(collection)
        .bind(id)
        .bind(encode(&document)?)
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::database("set", e))?;

        Ok(())
    }

    async fn insert_if_absent(
        &self,
        collection: &str,
        id: &str,
        document: Document,
    ) -> Result<InsertOutcome, RepoError> {
        let result = sqlx::query(
            r#"
            INSERT INTO documents (collection, id, body)
            VALUES (?, ?, ?)
            ON CONFLICT(collection, id) DO NOTHING
            "#,
        )
        .bind(collection)
        .bind(id)
        .bind(encode(&document)?)
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::database("insert_if_absent", e))?;

        if result.rows_affected() == 1 {
            return Ok(InsertOutcome {
                stored: document,
                inserted: true,
            });
        }

        let stored = self.get(collection, id).await?.ok_or_else(|| {
            RepoError::database("insert_if_absent", "document vanished after conflict")
        })?;
        Ok(InsertOutcome {
            stored,
            inserted: false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    async fn store_in(dir: &tempfile::TempDir) -> SqliteDocumentStore {
        let path = dir.path().join("documents.db");
        SqliteDocumentStore::new(path.to_str().unwrap()).await.unwrap()
    }

    #[tokio::test]
    async fn set_overwrites_whole_document() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir).await;

        store
            .set("sessions", "s1", json!({"log": ["a"], "extra": true}))
            .await
            .unwrap();
        store
            .set("sessions", "s1", json!({"log": ["a", "b"]}))
            .await
            .unwrap();

        assert_eq!(
            store.get("sessions", "s1").await.unwrap(),
            Some(json!({"log": ["a", "b"]}))
        );
        assert_eq!(store.get("sessions", "missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn insert_if_absent_keeps_first_writer() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir).await;

        let first = store
            .insert_if_absent("locations", "hall", json!({"name": "first"}))
            .await
            .unwrap();
        let second = store
            .insert_if_absent("locations", "hall", json!({"name": "second"}))
            .await
            .unwrap();

        assert!(first.inserted);
        assert!(!second.inserted);
        assert_eq!(second.stored, json!({"name": "first"}));
    }

    #[tokio::test]
    async fn documents_survive_reopening() {
        let dir = tempfile::tempdir().unwrap();
        {
            let store = store_in(&dir).await;
            store.set("locations", "cellar", json!({"id": "cellar"})).await.unwrap();
        }
        let reopened = store_in(&dir).await;
        assert_eq!(
            reopened.get("locations", "cellar").await.unwrap(),
            Some(json!({"id": "cellar"}))
        );
    }
}
