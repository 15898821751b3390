use async_trait::async_trait;
use db::{DocumentStore, StoreError, StoredDocument};
use serde_json::Value;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use uuid::Uuid;

type Result<T> = std::result::Result<T, StoreError>;

/// Keeps documents in insertion order; `find` returns the newest first.
#[derive(Default)]
pub struct InMemoryDocumentStore {
    documents: Mutex<Vec<(String, StoredDocument)>>,
    inserts: AtomicUsize,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `body` directly, bypassing the insert counter.
    pub fn seed(&self, collection: &str, body: Value) -> String {
        let id = Uuid::new_v4().to_string();
        self.documents.lock().unwrap().push((
            collection.to_string(),
            StoredDocument {
                id: id.clone(),
                body,
            },
        ));
        id
    }

    /// `(id, body)` pairs of `collection`, oldest first.
    pub fn documents(&self, collection: &str) -> Vec<(String, Value)> {
        self.documents
            .lock()
            .unwrap()
            .iter()
            .filter(|(c, _)| c == collection)
            .map(|(_, doc)| (doc.id.clone(), doc.body.clone()))
            .collect()
    }

    pub fn insert_count(&self) -> usize {
        self.inserts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn insert(&self, collection: &str, document: Value) -> Result<String> {
        let id = self.seed(collection, document);
        self.inserts.fetch_add(1, Ordering::SeqCst);
        Ok(id)
    }

    async fn find(&self, collection: &str, limit: usize) -> Result<Vec<StoredDocument>> {
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

    async fn collection_names(&self, limit: usize) -> Result<Vec<String>> {
        let mut names: Vec<String> = self
            .documents
            .lock()
            .unwrap()
            .iter()
            .map(|(c, _)| c.clone())
            .collect();
        names.sort();
        names.dedup();
        names.truncate(limit);
        Ok(names)
    }
}

/// A connected store whose every operation fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingDocumentStore;

#[async_trait]
impl DocumentStore for FailingDocumentStore {
    async fn insert(&self, collection: &str, _document: Value) -> Result<String> {
        Err(StoreError::write(collection, "connection refused"))
    }

    async fn find(&self, collection: &str, _limit: usize) -> Result<Vec<StoredDocument>> {
        Err(StoreError::read(collection, "connection refused"))
    }

    async fn collection_names(&self, _limit: usize) -> Result<Vec<String>> {
        Err(StoreError::Query("connection refused".to_string()))
    }
}
