//! Durable document store backed by an append-only log
//!
//! Every mutation is appended to `<data_dir>/data/documents.dat` and fsynced
//! before the in-memory view is updated. On open the log is replayed from the
//! start; the latest record per (collection, id) wins and tombstones remove.

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use tracing::debug;

use super::document::{Document, DocumentMap, DocumentStore};
use super::errors::{StoreError, StoreResult};
use super::query::FilterSet;
use super::reader::LogReader;
use super::record::LogRecord;
use super::writer::{log_path, LogWriter};

struct FileState {
    writer: LogWriter,
    documents: DocumentMap,
}

impl FileState {
    fn write_document(&mut self, collection: &str, id: &str, document: Document) -> StoreResult<()> {
        let body = serde_json::to_vec(&document)?;
        self.writer
            .append(&LogRecord::document(collection, id, body))?;
        self.documents.set(collection, id, document);
        Ok(())
    }

    fn write_tombstone(&mut self, collection: &str, id: &str) -> StoreResult<()> {
        self.writer.append(&LogRecord::tombstone(collection, id))?;
        self.documents.remove(collection, id);
        Ok(())
    }
}

/// File-backed `DocumentStore`
#[derive(Clone)]
pub struct FileStore {
    state: Arc<Mutex<FileState>>,
}

impl FileStore {
    /// Opens the store under `data_dir`, replaying any existing log.
    ///
    /// Fails with `StoreError::Corruption` if any record does not verify.
    pub fn open(data_dir: impl AsRef<Path>) -> StoreResult<Self> {
        let data_dir = data_dir.as_ref();
        let documents = replay(data_dir)?;
        let writer = LogWriter::open(data_dir)?;

        Ok(Self {
            state: Arc::new(Mutex::new(FileState { writer, documents })),
        })
    }

    /// Number of live documents across collections
    pub fn len(&self) -> StoreResult<usize> {
        Ok(self.lock()?.documents.len())
    }

    pub fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.len()? == 0)
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, FileState>> {
        self.state
            .lock()
            .map_err(|_| StoreError::unavailable("Lock poisoned"))
    }

    /// Runs a mutation on the blocking pool, since it performs fsync.
    async fn mutate<F, T>(&self, op: F) -> StoreResult<T>
    where
        F: FnOnce(&mut FileState) -> StoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let state = Arc::clone(&self.state);
        tokio::task::spawn_blocking(move || {
            let mut guard = state
                .lock()
                .map_err(|_| StoreError::unavailable("Lock poisoned"))?;
            op(&mut guard)
        })
        .await
        .map_err(|e| StoreError::unavailable(format!("Storage worker failed: {}", e)))?
    }
}

fn replay(data_dir: &Path) -> StoreResult<DocumentMap> {
    let mut documents = DocumentMap::default();
    let path = log_path(data_dir);

    if !path.exists() {
        return Ok(documents);
    }

    let mut reader = LogReader::open(&path)?;
    let mut applied = 0usize;

    loop {
        let offset = reader.current_offset();
        let record = match reader.read_next()? {
            Some(record) => record,
            None => break,
        };

        if record.is_tombstone {
            documents.remove(&record.collection, &record.document_id);
        } else {
            let document: Document = serde_json::from_slice(&record.body).map_err(|e| {
                StoreError::corruption(offset, format!("Document body is not a JSON object: {}", e))
            })?;
            documents.set(&record.collection, &record.document_id, document);
        }
        applied += 1;
    }

    debug!(
        path = %path.display(),
        records = applied,
        documents = documents.len(),
        "document log replayed"
    );

    Ok(documents)
}

#[async_trait]
impl DocumentStore for FileStore {
    async fn get(&self, collection: &str, id: &str) -> StoreResult<Option<Document>> {
        Ok(self.lock()?.documents.get(collection, id).cloned())
    }

    async fn set(&self, collection: &str, id: &str, document: Document) -> StoreResult<()> {
        let collection = collection.to_string();
        let id = id.to_string();
        self.mutate(move |state| state.write_document(&collection, &id, document))
            .await
    }

    async fn update(&self, collection: &str, id: &str, fields: Document) -> StoreResult<bool> {
        let collection = collection.to_string();
        let id = id.to_string();
        self.mutate(move |state| match state.documents.merged(&collection, &id, fields) {
            Some(merged) => {
                state.write_document(&collection, &id, merged)?;
                Ok(true)
            }
            None => Ok(false),
        })
        .await
    }

    async fn delete(&self, collection: &str, id: &str) -> StoreResult<bool> {
        let collection = collection.to_string();
        let id = id.to_string();
        self.mutate(move |state| {
            if !state.documents.contains(&collection, &id) {
                return Ok(false);
            }
            state.write_tombstone(&collection, &id)?;
            Ok(true)
        })
        .await
    }

    async fn query(
        &self,
        collection: &str,
        filters: &FilterSet,
    ) -> StoreResult<Vec<(String, Document)>> {
        Ok(self.lock()?.documents.query(collection, filters))
    }

    fn backend_name(&self) -> &'static str {
        "file"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::FieldFilter;
    use serde_json::{json, Value};
    use tempfile::TempDir;

    fn doc(value: Value) -> Document {
        value.as_object().cloned().unwrap()
    }

    #[tokio::test]
    async fn test_documents_survive_reopen() {
        let dir = TempDir::new().unwrap();
        {
            let store = FileStore::open(dir.path()).unwrap();
            store
                .set("lightsabers", "a", doc(json!({"name": "A", "color": "blue"})))
                .await
                .unwrap();
            store
                .update("lightsabers", "a", doc(json!({"color": "green"})))
                .await
                .unwrap();
        }

        let store = FileStore::open(dir.path()).unwrap();
        let fetched = store.get("lightsabers", "a").await.unwrap().unwrap();
        assert_eq!(fetched, doc(json!({"name": "A", "color": "green"})));
    }

    #[tokio::test]
    async fn test_delete_survives_reopen() {
        let dir = TempDir::new().unwrap();
        {
            let store = FileStore::open(dir.path()).unwrap();
            store.set("lightsabers", "a", Document::new()).await.unwrap();
            store.set("lightsabers", "b", Document::new()).await.unwrap();
            assert!(store.delete("lightsabers", "a").await.unwrap());
        }

        let store = FileStore::open(dir.path()).unwrap();
        assert!(store.get("lightsabers", "a").await.unwrap().is_none());
        assert!(store.get("lightsabers", "b").await.unwrap().is_some());
        assert_eq!(store.len().unwrap(), 1);
    }

    #[tokio::test]
    async fn test_missing_documents_write_nothing() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::open(dir.path()).unwrap();

        assert!(!store.update("lightsabers", "a", Document::new()).await.unwrap());
        assert!(!store.delete("lightsabers", "a").await.unwrap());

        let size = std::fs::metadata(log_path(dir.path())).unwrap().len();
        assert_eq!(size, 0);
    }

    #[tokio::test]
    async fn test_query_after_replay() {
        let dir = TempDir::new().unwrap();
        {
            let store = FileStore::open(dir.path()).unwrap();
            store
                .set("lightsabers", "a", doc(json!({"color": "red"})))
                .await
                .unwrap();
            store
                .set("lightsabers", "b", doc(json!({"color": "blue"})))
                .await
                .unwrap();
        }

        let store = FileStore::open(dir.path()).unwrap();
        let hits = store
            .query("lightsabers", &FilterSet::new().and(FieldFilter::eq("color", "red")))
            .await
            .unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].0, "a");
    }

    #[tokio::test]
    async fn test_failed_write_leaves_log_replayable() {
        let dir = TempDir::new().unwrap();
        {
            let store = FileStore::open(dir.path()).unwrap();
            store
                .set("lightsabers", "a", doc(json!({"name": "A"})))
                .await
                .unwrap();

            store.lock().unwrap().writer.fail_next_write_after(10);
            assert!(store
                .set("lightsabers", "b", doc(json!({"name": "B"})))
                .await
                .is_err());
            assert!(store.get("lightsabers", "b").await.unwrap().is_none());

            store
                .set("lightsabers", "c", doc(json!({"name": "C"})))
                .await
                .unwrap();
        }

        let store = FileStore::open(dir.path()).unwrap();
        assert!(store.get("lightsabers", "a").await.unwrap().is_some());
        assert!(store.get("lightsabers", "b").await.unwrap().is_none());
        assert!(store.get("lightsabers", "c").await.unwrap().is_some());
        assert_eq!(store.len().unwrap(), 2);
    }

    #[tokio::test]
    async fn test_corrupt_log_refuses_to_open() {
        let dir = TempDir::new().unwrap();
        {
            let store = FileStore::open(dir.path()).unwrap();
            store
                .set("lightsabers", "a", doc(json!({"name": "A"})))
                .await
                .unwrap();
        }

        let path = log_path(dir.path());
        let mut bytes = std::fs::read(&path).unwrap();
        let mid = bytes.len() / 2;
        bytes[mid] ^= 0xFF;
        std::fs::write(&path, bytes).unwrap();

        match FileStore::open(dir.path()) {
            Err(err) => assert!(err.is_fatal()),
            Ok(_) => panic!("corrupted log should not open"),
        }
    }
}
