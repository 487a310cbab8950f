//! Lightsaber records over a `DocumentStore`
//!
//! Stored documents hold every record field except `id`, which is the
//! document key. `createdAt` is stored as RFC 3339 with nanosecond precision.

use std::sync::Arc;

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Value;
use tracing::info;
use uuid::Uuid;

use crate::observability::Event;
use crate::schema::{Lightsaber, LightsaberPatch, ListFilters, NewLightsaber};
use crate::storage::{Document, DocumentStore, FieldFilter, FilterSet, StoreError};

use super::errors::{RepositoryError, RepositoryResult};

/// Collection holding lightsaber documents
pub const COLLECTION: &str = "lightsabers";

/// CRUD access to lightsaber records
#[derive(Clone)]
pub struct LightsaberRepository {
    store: Arc<dyn DocumentStore>,
}

impl LightsaberRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// All records matching every supplied filter. Order is unspecified.
    pub async fn list(&self, filters: &ListFilters) -> RepositoryResult<Vec<Lightsaber>> {
        let documents = self.store.query(COLLECTION, &filter_set(filters)).await?;

        documents
            .into_iter()
            .map(|(id, doc)| from_document(&id, doc).map_err(RepositoryError::from))
            .collect()
    }

    pub async fn get_by_id(&self, id: &str) -> RepositoryResult<Lightsaber> {
        match self.store.get(COLLECTION, id).await? {
            Some(doc) => Ok(from_document(id, doc)?),
            None => Err(RepositoryError::NotFound),
        }
    }

    /// Assigns `id` and `createdAt`, defaults `isActive` to true, persists.
    pub async fn create(&self, new: NewLightsaber) -> RepositoryResult<Lightsaber> {
        let record = build(Uuid::new_v4().to_string(), Utc::now(), new);

        self.store
            .set(COLLECTION, &record.id, to_document(&record))
            .await?;

        info!(event = %Event::RecordCreated, id = %record.id, name = %record.name, "lightsaber created");
        Ok(record)
    }

    /// Merges only the supplied fields and returns the record after merge.
    pub async fn update(&self, id: &str, patch: LightsaberPatch) -> RepositoryResult<Lightsaber> {
        let fields = patch_document(&patch)?;
        let keys: Vec<String> = fields.keys().cloned().collect();

        if !self.store.update(COLLECTION, id, fields).await? {
            return Err(RepositoryError::NotFound);
        }

        let record = self.get_by_id(id).await?;
        info!(event = %Event::RecordUpdated, id = %id, fields = ?keys, "lightsaber updated");
        Ok(record)
    }

    /// Overwrites every mutable field, keeping `id` and `createdAt`.
    pub async fn replace(&self, id: &str, new: NewLightsaber) -> RepositoryResult<Lightsaber> {
        let existing = self.get_by_id(id).await?;
        let record = build(existing.id, existing.created_at, new);

        self.store
            .set(COLLECTION, &record.id, to_document(&record))
            .await?;

        info!(event = %Event::RecordReplaced, id = %id, "lightsaber replaced");
        Ok(record)
    }

    pub async fn delete(&self, id: &str) -> RepositoryResult<()> {
        if !self.store.delete(COLLECTION, id).await? {
            return Err(RepositoryError::NotFound);
        }

        info!(event = %Event::RecordDeleted, id = %id, "lightsaber deleted");
        Ok(())
    }
}

fn build(id: String, created_at: DateTime<Utc>, new: NewLightsaber) -> Lightsaber {
    let is_active = new.is_active_or_default();
    Lightsaber {
        id,
        name: new.name,
        color: new.color,
        creator: new.creator,
        crystal_type: new.crystal_type,
        hilt_material: new.hilt_material,
        created_at,
        is_active,
    }
}

fn filter_set(filters: &ListFilters) -> FilterSet {
    let mut set = FilterSet::new();
    if let Some(color) = filters.color {
        set = set.and(FieldFilter::eq("color", color.as_str()));
    }
    if let Some(creator) = &filters.creator {
        set = set.and(FieldFilter::eq("creator", creator.as_str()));
    }
    if let Some(is_active) = filters.is_active {
        set = set.and(FieldFilter::eq("isActive", is_active));
    }
    set
}

fn to_document(record: &Lightsaber) -> Document {
    let mut doc = Document::new();
    doc.insert("name".into(), Value::from(record.name.as_str()));
    doc.insert("color".into(), Value::from(record.color.as_str()));
    doc.insert("creator".into(), Value::from(record.creator.as_str()));
    doc.insert("crystalType".into(), Value::from(record.crystal_type.as_str()));
    doc.insert("hiltMaterial".into(), Value::from(record.hilt_material.as_str()));
    doc.insert(
        "createdAt".into(),
        Value::from(record.created_at.to_rfc3339_opts(SecondsFormat::Nanos, true)),
    );
    doc.insert("isActive".into(), Value::from(record.is_active));
    doc
}

/// Only the keys the patch supplies
fn patch_document(patch: &LightsaberPatch) -> Result<Document, serde_json::Error> {
    match serde_json::to_value(patch)? {
        Value::Object(map) => Ok(map),
        _ => Ok(Document::new()),
    }
}

fn from_document(id: &str, mut doc: Document) -> Result<Lightsaber, StoreError> {
    doc.insert("id".into(), Value::from(id));
    serde_json::from_value(Value::Object(doc)).map_err(|e| StoreError::malformed(id, e.to_string()))
}
