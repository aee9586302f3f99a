//! Record store adapter — the id-keyed persistence seam every resource service
//! depends on.
//!
//! Two backends implement [`DocumentStore`]:
//! - [`PgDocumentStore`]: one JSONB table per collection (production).
//! - [`MemoryDocumentStore`]: insertion-ordered in-process map (tests, local dev).
//!
//! Services hold an `Arc<dyn DocumentStore<T>>`, chosen at startup via config.

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;
use uuid::Uuid;

pub mod memory;
pub mod postgres;

pub use memory::MemoryDocumentStore;
pub use postgres::PgDocumentStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("document serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("field '{field}' is not indexed on collection '{collection}'")]
    UnindexedField {
        collection: &'static str,
        field: String,
    },

    #[error("{0}")]
    Conflict(String),
}

/// A record persisted as one document in a named collection.
///
/// The identifier is opaque and store-assigned: `None` until the first save,
/// preserved on every save after that.
pub trait Document:
    Serialize + DeserializeOwned + Clone + Send + Sync + Unpin + 'static
{
    /// Collection (table) name. Must be a plain SQL identifier.
    const COLLECTION: &'static str;

    /// Top-level string fields the store keeps an index on. Only these may be
    /// passed to [`DocumentStore::find_by_field`].
    const INDEXED_FIELDS: &'static [&'static str] = &[];

    fn id(&self) -> Option<&str>;

    fn set_id(&mut self, id: String);
}

/// Generates a fresh identifier for a record saved without one.
pub fn new_document_id() -> String {
    Uuid::new_v4().simple().to_string()
}

pub(crate) fn ensure_indexed<T: Document>(field: &str) -> Result<(), StoreError> {
    if T::INDEXED_FIELDS.contains(&field) {
        Ok(())
    } else {
        Err(StoreError::UnindexedField {
            collection: T::COLLECTION,
            field: field.to_string(),
        })
    }
}

#[async_trait]
pub trait DocumentStore<T: Document>: Send + Sync {
    /// Inserts or replaces the record keyed by its id, assigning one if unset.
    /// Returns the record as stored.
    async fn save(&self, record: T) -> Result<T, StoreError>;

    async fn find_by_id(&self, id: &str) -> Result<Option<T>, StoreError>;

    /// All records in the collection, oldest insert first.
    async fn find_all(&self) -> Result<Vec<T>, StoreError>;

    /// Records whose indexed string `field` equals `value`, oldest insert first.
    async fn find_by_field(&self, field: &str, value: &str) -> Result<Vec<T>, StoreError>;

    /// Removes the record if present. Deleting a missing id is not an error.
    async fn delete_by_id(&self, id: &str) -> Result<(), StoreError>;
}
