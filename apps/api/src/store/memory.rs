use std::collections::{HashMap, HashSet};
use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{ensure_indexed, new_document_id, Document, DocumentStore, StoreError};

type IndexKey = (String, String);

struct Collection<T> {
    /// Insertion order.
    records: Vec<T>,
    /// (field, value) -> ids of records carrying that value.
    index: HashMap<IndexKey, HashSet<String>>,
    /// id -> the index keys it was filed under, for unfiling on replace/delete.
    keys_by_id: HashMap<String, Vec<IndexKey>>,
}

impl<T: Document> Collection<T> {
    fn unfile(&mut self, id: &str) {
        for key in self.keys_by_id.remove(id).unwrap_or_default() {
            if let Some(ids) = self.index.get_mut(&key) {
                ids.remove(id);
                if ids.is_empty() {
                    self.index.remove(&key);
                }
            }
        }
    }

    fn file(&mut self, id: &str, keys: Vec<IndexKey>) {
        for key in &keys {
            self.index
                .entry(key.clone())
                .or_default()
                .insert(id.to_string());
        }
        self.keys_by_id.insert(id.to_string(), keys);
    }
}

/// Values of `T::INDEXED_FIELDS` present on `record` as strings.
fn index_keys<T: Document>(record: &T) -> Result<Vec<IndexKey>, StoreError> {
    if T::INDEXED_FIELDS.is_empty() {
        return Ok(Vec::new());
    }
    let doc = serde_json::to_value(record)?;
    Ok(T::INDEXED_FIELDS
        .iter()
        .filter_map(|field| {
            doc.get(*field)
                .and_then(|v| v.as_str())
                .map(|value| (field.to_string(), value.to_string()))
        })
        .collect())
}

/// In-process store keeping records in insertion order, with a hash index
/// over each of `T::INDEXED_FIELDS`.
///
/// Cloning shares the underlying collection.
pub struct MemoryDocumentStore<T: Document> {
    inner: Arc<RwLock<Collection<T>>>,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Document> MemoryDocumentStore<T> {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(Collection {
                records: Vec::new(),
                index: HashMap::new(),
                keys_by_id: HashMap::new(),
            })),
            _marker: PhantomData,
        }
    }
}

impl<T: Document> Default for MemoryDocumentStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Document> Clone for MemoryDocumentStore<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            _marker: PhantomData,
        }
    }
}

#[async_trait]
impl<T: Document> DocumentStore<T> for MemoryDocumentStore<T> {
    async fn save(&self, mut record: T) -> Result<T, StoreError> {
        let id = match record.id() {
            Some(id) => id.to_string(),
            None => {
                let id = new_document_id();
                record.set_id(id.clone());
                id
            }
        };
        let keys = index_keys(&record)?;

        let mut collection = self.inner.write().await;
        collection.unfile(&id);
        collection.file(&id, keys);
        match collection
            .records
            .iter()
            .position(|r| r.id() == Some(id.as_str()))
        {
            Some(pos) => collection.records[pos] = record.clone(),
            None => collection.records.push(record.clone()),
        }
        Ok(record)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<T>, StoreError> {
        let collection = self.inner.read().await;
        Ok(collection.records.iter().find(|r| r.id() == Some(id)).cloned())
    }

    async fn find_all(&self) -> Result<Vec<T>, StoreError> {
        Ok(self.inner.read().await.records.clone())
    }

    async fn find_by_field(&self, field: &str, value: &str) -> Result<Vec<T>, StoreError> {
        ensure_indexed::<T>(field)?;

        let collection = self.inner.read().await;
        let Some(ids) = collection
            .index
            .get(&(field.to_string(), value.to_string()))
        else {
            return Ok(Vec::new());
        };
        Ok(collection
            .records
            .iter()
            .filter(|r| r.id().is_some_and(|id| ids.contains(id)))
            .cloned()
            .collect())
    }

    async fn delete_by_id(&self, id: &str) -> Result<(), StoreError> {
        let mut collection = self.inner.write().await;
        collection.unfile(id);
        collection.records.retain(|r| r.id() != Some(id));
        Ok(())
    }
}
