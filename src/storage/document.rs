//! Document store interface
//!
//! The store holds JSON-object documents grouped into collections and keyed
//! by id. It knows nothing about lightsabers; the repository layer owns the
//! record shape.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use serde_json::{Map, Value};

use super::errors::StoreResult;
use super::query::FilterSet;

/// A stored document body (the id is the key, not a field)
pub type Document = Map<String, Value>;

/// Persistence backend offering get / set / update / delete / query-by-field.
///
/// Implementations must be safe to share across request tasks. None of the
/// operations retry; a failure is returned to the caller as-is.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Reads a document. `Ok(None)` if absent.
    async fn get(&self, collection: &str, id: &str) -> StoreResult<Option<Document>>;

    /// Creates or fully overwrites a document.
    async fn set(&self, collection: &str, id: &str, document: Document) -> StoreResult<()>;

    /// Shallow-merges `fields` into an existing document.
    ///
    /// Keys absent from `fields` are left as stored. Returns `false` without
    /// writing if the document does not exist.
    async fn update(&self, collection: &str, id: &str, fields: Document) -> StoreResult<bool>;

    /// Removes a document. Returns `false` if it did not exist.
    async fn delete(&self, collection: &str, id: &str) -> StoreResult<bool>;

    /// Returns every `(id, document)` in the collection matching all filters.
    /// Order is unspecified.
    async fn query(
        &self,
        collection: &str,
        filters: &FilterSet,
    ) -> StoreResult<Vec<(String, Document)>>;

    /// Short backend name for logs
    fn backend_name(&self) -> &'static str;
}

/// In-memory document map shared by the store implementations
#[derive(Debug, Default)]
pub(crate) struct DocumentMap {
    collections: HashMap<String, BTreeMap<String, Document>>,
}

impl DocumentMap {
    pub(crate) fn get(&self, collection: &str, id: &str) -> Option<&Document> {
        self.collections.get(collection).and_then(|c| c.get(id))
    }

    pub(crate) fn set(&mut self, collection: &str, id: &str, document: Document) {
        self.collections
            .entry(collection.to_string())
            .or_default()
            .insert(id.to_string(), document);
    }

    /// Returns the merged document, or `None` if absent
    pub(crate) fn merged(&self, collection: &str, id: &str, fields: Document) -> Option<Document> {
        let mut merged = self.get(collection, id)?.clone();
        for (key, value) in fields {
            merged.insert(key, value);
        }
        Some(merged)
    }

    pub(crate) fn remove(&mut self, collection: &str, id: &str) -> bool {
        self.collections
            .get_mut(collection)
            .map(|c| c.remove(id).is_some())
            .unwrap_or(false)
    }

    pub(crate) fn contains(&self, collection: &str, id: &str) -> bool {
        self.get(collection, id).is_some()
    }

    pub(crate) fn query(&self, collection: &str, filters: &FilterSet) -> Vec<(String, Document)> {
        self.collections
            .get(collection)
            .map(|c| {
                c.iter()
                    .filter(|(_, doc)| filters.matches(doc))
                    .map(|(id, doc)| (id.clone(), doc.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub(crate) fn len(&self) -> usize {
        self.collections.values().map(|c| c.len()).sum()
    }
}
