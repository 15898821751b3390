//! Document persistence behind a swappable backend.
//!
//! [`DocumentStore`] is the raw storage contract. [`RecordStore`] is what the
//! rest of the service holds: it serializes records, remaps the store-assigned
//! identifier into an `id` field on reads, and degrades to
//! [`StoreError::Unavailable`] when no backend was configured.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::error::{Result, StoreError};
use crate::{DbConnection, models};

/// Maximum number of collection names reported by [`RecordStore::diagnostics`].
const DIAGNOSTIC_COLLECTION_LIMIT: usize = 10;
const DIAGNOSTIC_MESSAGE_LIMIT: usize = 50;

/// A document as it comes back from the backend.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredDocument {
    pub id: String,
    pub body: Value,
}

/// Storage contract for JSON documents grouped in named collections.
///
/// Implementations must be `Send + Sync` for use behind `Arc<dyn DocumentStore>`.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Stores `document` under `collection` and returns its new identifier.
    async fn insert(&self, collection: &str, document: Value) -> Result<String>;

    /// Returns up to `limit` documents of `collection`, newest first.
    async fn find(&self, collection: &str, limit: usize) -> Result<Vec<StoredDocument>>;

    async fn collection_names(&self, limit: usize) -> Result<Vec<String>>;

    /// Releases the underlying connection. Called once on shutdown.
    async fn close(&self) {}
}

/// Postgres-backed document storage.
pub struct PgDocumentStore {
    db: Arc<DbConnection>,
}

impl PgDocumentStore {
    pub const fn new(db: Arc<DbConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn insert(&self, collection: &str, document: Value) -> Result<String> {
        models::insert_document(self.db.clone(), collection, &document)
            .await
            .map_err(|e| StoreError::write(collection, e))
    }

    async fn find(&self, collection: &str, limit: usize) -> Result<Vec<StoredDocument>> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows = models::get_documents(self.db.clone(), collection, limit)
            .await
            .map_err(|e| StoreError::read(collection, e))?;

        Ok(rows
            .into_iter()
            .map(|row| StoredDocument {
                id: row.id,
                body: row.body.0,
            })
            .collect())
    }

    async fn collection_names(&self, limit: usize) -> Result<Vec<String>> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        models::get_collection_names(self.db.clone(), limit)
            .await
            .map_err(|e| StoreError::Query(e.to_string()))
    }

    async fn close(&self) {
        self.db.close().await;
    }
}

/// Connectivity report for the diagnostic endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreDiagnostics {
    NotInitialized,
    Connected { collections: Vec<String> },
    /// A backend exists but catalog queries fail. The message is truncated.
    Failing { message: String },
}

/// Record store adapter shared by the job API and the pipeline.
///
/// Cloning is cheap; all clones share the same backend.
#[derive(Clone, Default)]
pub struct RecordStore {
    backend: Option<Arc<dyn DocumentStore>>,
}

impl RecordStore {
    pub fn new(backend: Arc<dyn DocumentStore>) -> Self {
        Self {
            backend: Some(backend),
        }
    }

    pub fn uninitialized() -> Self {
        Self { backend: None }
    }

    pub fn is_initialized(&self) -> bool {
        self.backend.is_some()
    }

    fn backend(&self) -> Result<&Arc<dyn DocumentStore>> {
        self.backend.as_ref().ok_or(StoreError::Unavailable)
    }

    /// Serializes `record` and inserts it under `kind`.
    ///
    /// # Errors
    ///
    /// [`StoreError::Unavailable`] without a backend, [`StoreError::Encode`] if
    /// the record is not a JSON object, or whatever the backend reports.
    pub async fn insert<T: Serialize + ?Sized>(&self, kind: &str, record: &T) -> Result<String> {
        let backend = self.backend()?;

        let document = serde_json::to_value(record).map_err(|e| StoreError::Encode {
            collection: kind.to_string(),
            message: e.to_string(),
        })?;
        if !document.is_object() {
            return Err(StoreError::Encode {
                collection: kind.to_string(),
                message: "record must serialize to a JSON object".to_string(),
            });
        }

        let id = backend.insert(kind, document).await?;
        debug!("Inserted record {} into {}", id, kind);
        Ok(id)
    }

    /// Lists up to `limit` records of `kind`, each carrying an `id` field.
    pub async fn list(&self, kind: &str, limit: usize) -> Result<Vec<Map<String, Value>>> {
        let backend = self.backend()?;
        if limit == 0 {
            return Ok(Vec::new());
        }

        let documents = backend.find(kind, limit).await?;
        let mut records = Vec::with_capacity(documents.len());
        for document in documents.into_iter().take(limit) {
            match document.body {
                Value::Object(mut fields) => {
                    fields.insert("id".to_string(), Value::String(document.id));
                    records.push(fields);
                }
                other => warn!(
                    "Skipping document {} in {}: expected an object, found {}",
                    document.id, kind, other
                ),
            }
        }

        Ok(records)
    }

    /// Checks the backend. Never fails; errors are folded into the report.
    pub async fn diagnostics(&self) -> StoreDiagnostics {
        let Some(backend) = self.backend.as_ref() else {
            return StoreDiagnostics::NotInitialized;
        };

        match backend.collection_names(DIAGNOSTIC_COLLECTION_LIMIT).await {
            Ok(mut collections) => {
                collections.truncate(DIAGNOSTIC_COLLECTION_LIMIT);
                StoreDiagnostics::Connected { collections }
            }
            Err(e) => StoreDiagnostics::Failing {
                message: e
                    .detail()
                    .chars()
                    .take(DIAGNOSTIC_MESSAGE_LIMIT)
                    .collect(),
            },
        }
    }

    pub async fn close(&self) {
        if let Some(backend) = self.backend.as_ref() {
            backend.close().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, Ordering};

    // Mock backend for testing
    #[derive(Default)]
    struct MockStore {
        documents: Mutex<Vec<(String, StoredDocument)>>,
        fail: bool,
        closed: AtomicBool,
    }

    impl MockStore {
        fn failing() -> Self {
            Self {
                fail: true,
                ..Self::default()
            }
        }

        fn with_raw(collection: &str, id: &str, body: Value) -> Self {
            let store = Self::default();
            store.documents.lock().unwrap().push((
                collection.to_string(),
                StoredDocument {
                    id: id.to_string(),
                    body,
                },
            ));
            store
        }
    }

    #[async_trait]
    impl DocumentStore for MockStore {
        async fn insert(&self, collection: &str, document: Value) -> Result<String> {
            if self.fail {
                return Err(StoreError::write(collection, "mock write error"));
            }
            let mut documents = self.documents.lock().unwrap();
            let id = format!("doc-{}", documents.len() + 1);
            documents.push((
                collection.to_string(),
                StoredDocument {
                    id: id.clone(),
                    body: document,
                },
            ));
            Ok(id)
        }

        async fn find(&self, collection: &str, limit: usize) -> Result<Vec<StoredDocument>> {
            if self.fail {
                return Err(StoreError::read(collection, "mock read error"));
            }
            Ok(self
                .documents
                .lock()
                .unwrap()
                .iter()
                .rev()
                .filter(|(c, _)| c == collection)
                .take(limit)
                .map(|(_, doc)| doc.clone())
                .collect())
        }

        async fn collection_names(&self, _limit: usize) -> Result<Vec<String>> {
            if self.fail {
                return Err(StoreError::Query(
                    "permission denied for table documents while listing collection names"
                        .to_string(),
                ));
            }
            let mut names: Vec<String> = self
                .documents
                .lock()
                .unwrap()
                .iter()
                .map(|(c, _)| c.clone())
                .collect();
            names.sort();
            names.dedup();
            Ok(names)
        }

        async fn close(&self) {
            self.closed.store(true, Ordering::SeqCst);
        }
    }

    #[derive(Serialize)]
    struct Record {
        topic: String,
    }

    #[tokio::test]
    async fn test_uninitialized_store_reports_unavailable() {
        let store = RecordStore::uninitialized();

        assert!(!store.is_initialized());
        let insert = store
            .insert("videojob", &Record { topic: "x".into() })
            .await;
        assert_eq!(insert, Err(StoreError::Unavailable));
        assert_eq!(
            store.list("videojob", 20).await,
            Err(StoreError::Unavailable)
        );
        assert_eq!(store.diagnostics().await, StoreDiagnostics::NotInitialized);
    }

    #[tokio::test]
    async fn test_insert_then_list_remaps_id() {
        let store = RecordStore::new(Arc::new(MockStore::default()));

        let id = store
            .insert("videojob", &Record { topic: "rust".into() })
            .await
            .unwrap();
        let records = store.list("videojob", 20).await.unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["id"], json!(id));
        assert_eq!(records[0]["topic"], json!("rust"));
    }

    #[tokio::test]
    async fn test_list_never_exceeds_limit() {
        let store = RecordStore::new(Arc::new(MockStore::default()));
        for i in 0..5 {
            store
                .insert("videojob", &Record { topic: format!("t{}", i) })
                .await
                .unwrap();
        }

        let records = store.list("videojob", 3).await.unwrap();
        assert_eq!(records.len(), 3);
        assert!(records.iter().all(|r| r.get("id").is_some()));

        assert!(store.list("videojob", 0).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_insert_rejects_non_object_records() {
        let store = RecordStore::new(Arc::new(MockStore::default()));

        let result = store.insert("videojob", &42).await;
        assert!(matches!(result, Err(StoreError::Encode { .. })));
    }

    #[tokio::test]
    async fn test_list_skips_non_object_documents() {
        let store = RecordStore::new(Arc::new(MockStore::with_raw(
            "videojob",
            "broken",
            json!("not an object"),
        )));

        let records = store.list("videojob", 10).await.unwrap();
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn test_backend_errors_propagate() {
        let store = RecordStore::new(Arc::new(MockStore::failing()));

        let insert = store.insert("videojob", &Record { topic: "x".into() }).await;
        assert!(matches!(insert, Err(StoreError::Write { .. })));

        let list = store.list("videojob", 5).await;
        assert!(matches!(list, Err(StoreError::Read { .. })));
    }

    #[tokio::test]
    async fn test_diagnostics_reports_connected_store() {
        let store = RecordStore::new(Arc::new(MockStore::default()));
        store
            .insert("videojob", &Record { topic: "x".into() })
            .await
            .unwrap();

        assert_eq!(
            store.diagnostics().await,
            StoreDiagnostics::Connected {
                collections: vec!["videojob".to_string()],
            }
        );
    }

    #[tokio::test]
    async fn test_diagnostics_truncates_failure_message() {
        let store = RecordStore::new(Arc::new(MockStore::failing()));

        match store.diagnostics().await {
            StoreDiagnostics::Failing { message } => {
                assert_eq!(
                    message,
                    "permission denied for table documents while listi"
                );
            }
            other => panic!("unexpected diagnostics: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_close_reaches_backend() {
        let backend = Arc::new(MockStore::default());
        let store = RecordStore::new(backend.clone());

        store.close().await;
        assert!(backend.closed.load(Ordering::SeqCst));
    }
}
