//! In-memory document store for tests and local experiments.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use scout_sales_core::{
    Collection, DeleteResult, Document, DocumentId, Filter, UpdateResult,
};

use super::{DocumentStore, StoreError};

/// Document store held in process memory.
///
/// Documents keep insertion order within a collection. Setting
/// [`MemoryStore::set_unavailable`] makes every call fail, which lets tests
/// exercise the error paths of handlers.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<Collection, Vec<Document>>>,
    unavailable: AtomicBool,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate a store outage for all subsequent calls.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of documents currently held in a collection.
    pub async fn count(&self, collection: Collection) -> usize {
        self.collections
            .read()
            .await
            .get(&collection)
            .map_or(0, Vec::len)
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("simulated outage".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn insert_one(
        &self,
        collection: Collection,
        mut document: Document,
    ) -> Result<Document, StoreError> {
        self.check_available()?;
        document.strip_id();
        let stored = document.with_id(DocumentId::generate());

        self.collections
            .write()
            .await
            .entry(collection)
            .or_default()
            .push(stored.clone());

        Ok(stored)
    }

    async fn find(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<Vec<Document>, StoreError> {
        self.check_available()?;
        let collections = self.collections.read().await;

        Ok(collections
            .get(&collection)
            .map(|docs| docs.iter().filter(|d| filter.matches(d)).cloned().collect())
            .unwrap_or_default())
    }

    async fn find_one(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<Option<Document>, StoreError> {
        self.check_available()?;
        let collections = self.collections.read().await;

        Ok(collections
            .get(&collection)
            .and_then(|docs| docs.iter().find(|d| filter.matches(d)).cloned()))
    }

    async fn replace_one(
        &self,
        collection: Collection,
        id: DocumentId,
        mut document: Document,
    ) -> Result<UpdateResult, StoreError> {
        self.check_available()?;
        document.strip_id();
        document.remove(Document::CREATE_DATE_FIELD);

        let mut collections = self.collections.write().await;
        let Some(existing) = collections
            .get_mut(&collection)
            .and_then(|docs| docs.iter_mut().find(|d| d.id() == Some(id)))
        else {
            return Ok(UpdateResult::matched(0));
        };

        if let Some(created) = existing.get(Document::CREATE_DATE_FIELD).cloned() {
            document.insert(Document::CREATE_DATE_FIELD, created);
        }
        *existing = document.with_id(id);

        Ok(UpdateResult::matched(1))
    }

    async fn delete_one(
        &self,
        collection: Collection,
        id: DocumentId,
    ) -> Result<DeleteResult, StoreError> {
        self.check_available()?;
        let mut collections = self.collections.write().await;

        let Some(docs) = collections.get_mut(&collection) else {
            return Ok(DeleteResult::deleted(0));
        };
        let Some(pos) = docs.iter().position(|d| d.id() == Some(id)) else {
            return Ok(DeleteResult::deleted(0));
        };
        docs.remove(pos);

        Ok(DeleteResult::deleted(1))
    }

    async fn delete_many(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<DeleteResult, StoreError> {
        self.check_available()?;
        let mut collections = self.collections.write().await;

        let Some(docs) = collections.get_mut(&collection) else {
            return Ok(DeleteResult::deleted(0));
        };
        let before = docs.len();
        docs.retain(|d| !filter.matches(d));

        Ok(DeleteResult::deleted((before - docs.len()) as u64))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.check_available()
    }
}
