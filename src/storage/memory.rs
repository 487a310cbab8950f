//! Process-local document store
//!
//! Contents are lost when the process exits. Used for development and as the
//! test double behind the repository and HTTP tests.

use std::sync::RwLock;

use async_trait::async_trait;

use super::document::{Document, DocumentMap, DocumentStore};
use super::errors::{StoreError, StoreResult};
use super::query::FilterSet;

/// In-memory `DocumentStore`
#[derive(Debug, Default)]
pub struct MemoryStore {
    documents: RwLock<DocumentMap>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of documents across collections
    pub fn len(&self) -> StoreResult<usize> {
        Ok(self.read()?.len())
    }

    pub fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.len()? == 0)
    }

    fn read(&self) -> StoreResult<std::sync::RwLockReadGuard<'_, DocumentMap>> {
        self.documents
            .read()
            .map_err(|_| StoreError::unavailable("Lock poisoned"))
    }

    fn write(&self) -> StoreResult<std::sync::RwLockWriteGuard<'_, DocumentMap>> {
        self.documents
            .write()
            .map_err(|_| StoreError::unavailable("Lock poisoned"))
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn get(&self, collection: &str, id: &str) -> StoreResult<Option<Document>> {
        Ok(self.read()?.get(collection, id).cloned())
    }

    async fn set(&self, collection: &str, id: &str, document: Document) -> StoreResult<()> {
        self.write()?.set(collection, id, document);
        Ok(())
    }

    async fn update(&self, collection: &str, id: &str, fields: Document) -> StoreResult<bool> {
        let mut documents = self.write()?;
        match documents.merged(collection, id, fields) {
            Some(merged) => {
                documents.set(collection, id, merged);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, collection: &str, id: &str) -> StoreResult<bool> {
        Ok(self.write()?.remove(collection, id))
    }

    async fn query(
        &self,
        collection: &str,
        filters: &FilterSet,
    ) -> StoreResult<Vec<(String, Document)>> {
        Ok(self.read()?.query(collection, filters))
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::FieldFilter;
    use serde_json::{json, Value};

    fn doc(value: Value) -> Document {
        value.as_object().cloned().unwrap()
    }

    #[tokio::test]
    async fn test_set_and_get() {
        let store = MemoryStore::new();
        store
            .set("lightsabers", "a", doc(json!({"name": "A"})))
            .await
            .unwrap();

        let fetched = store.get("lightsabers", "a").await.unwrap().unwrap();
        assert_eq!(fetched["name"], "A");
        assert!(store.get("lightsabers", "b").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_missing_returns_false() {
        let store = MemoryStore::new();
        let updated = store
            .update("lightsabers", "a", doc(json!({"name": "A"})))
            .await
            .unwrap();
        assert!(!updated);
        assert!(store.is_empty().unwrap());
    }

    #[tokio::test]
    async fn test_update_merges() {
        let store = MemoryStore::new();
        store
            .set("lightsabers", "a", doc(json!({"name": "A", "color": "blue"})))
            .await
            .unwrap();
        assert!(store
            .update("lightsabers", "a", doc(json!({"color": "green"})))
            .await
            .unwrap());

        let fetched = store.get("lightsabers", "a").await.unwrap().unwrap();
        assert_eq!(fetched, doc(json!({"name": "A", "color": "green"})));
    }

    #[tokio::test]
    async fn test_delete() {
        let store = MemoryStore::new();
        store.set("lightsabers", "a", Document::new()).await.unwrap();

        assert!(store.delete("lightsabers", "a").await.unwrap());
        assert!(!store.delete("lightsabers", "a").await.unwrap());
        assert!(store.get("lightsabers", "a").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_query_by_field() {
        let store = MemoryStore::new();
        store
            .set("lightsabers", "a", doc(json!({"color": "red", "isActive": true})))
            .await
            .unwrap();
        store
            .set("lightsabers", "b", doc(json!({"color": "red", "isActive": false})))
            .await
            .unwrap();
        store
            .set("lightsabers", "c", doc(json!({"color": "blue", "isActive": true})))
            .await
            .unwrap();

        let filters = FilterSet::new()
            .and(FieldFilter::eq("color", "red"))
            .and(FieldFilter::eq("isActive", true));
        let hits = store.query("lightsabers", &filters).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].0, "a");

        let all = store.query("lightsabers", &FilterSet::new()).await.unwrap();
        assert_eq!(all.len(), 3);
        assert!(store.query("planets", &FilterSet::new()).await.unwrap().is_empty());
    }
}
