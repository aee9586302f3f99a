use std::marker::PhantomData;

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;
use tracing::{debug, info};

use super::{ensure_indexed, new_document_id, Document, DocumentStore, StoreError};

/// Postgres-backed store: one table per collection holding the record as a
/// JSONB document keyed by its text id.
pub struct PgDocumentStore<T: Document> {
    pool: PgPool,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Document> PgDocumentStore<T> {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            _marker: PhantomData,
        }
    }

    /// Creates the collection table and its field indexes if missing.
    pub async fn ensure_collection(&self) -> Result<(), StoreError> {
        let table = T::COLLECTION;

        sqlx::query(&format!(
            r#"
            CREATE TABLE IF NOT EXISTS {table} (
                id         TEXT PRIMARY KEY,
                doc        JSONB NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
            )
            "#
        ))
        .execute(&self.pool)
        .await?;

        for field in T::INDEXED_FIELDS {
            let index = format!("{table}_{}_idx", field.to_lowercase());
            sqlx::query(&format!(
                "CREATE INDEX IF NOT EXISTS {index} ON {table} ((doc->>'{field}'))"
            ))
            .execute(&self.pool)
            .await?;
        }

        info!("Collection '{table}' ready");
        Ok(())
    }
}

impl<T: Document> Clone for PgDocumentStore<T> {
    fn clone(&self) -> Self {
        Self::new(self.pool.clone())
    }
}

fn map_write_error(e: sqlx::Error) -> StoreError {
    match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            StoreError::Conflict(db.message().to_string())
        }
        _ => StoreError::Database(e),
    }
}

#[async_trait]
impl<T: Document> DocumentStore<T> for PgDocumentStore<T> {
    async fn save(&self, mut record: T) -> Result<T, StoreError> {
        let id = match record.id() {
            Some(id) => id.to_string(),
            None => {
                let id = new_document_id();
                record.set_id(id.clone());
                id
            }
        };

        // Last write wins: an existing row under this id is replaced wholesale.
        sqlx::query(&format!(
            r#"
            INSERT INTO {} (id, doc)
            VALUES ($1, $2)
            ON CONFLICT (id) DO UPDATE
                SET doc = EXCLUDED.doc, updated_at = now()
            "#,
            T::COLLECTION
        ))
        .bind(&id)
        .bind(Json(&record))
        .execute(&self.pool)
        .await
        .map_err(map_write_error)?;

        debug!("Saved {} document {id}", T::COLLECTION);
        Ok(record)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<T>, StoreError> {
        let doc: Option<Json<T>> = sqlx::query_scalar(&format!(
            "SELECT doc FROM {} WHERE id = $1",
            T::COLLECTION
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(doc.map(|Json(record)| record))
    }

    async fn find_all(&self) -> Result<Vec<T>, StoreError> {
        let docs: Vec<Json<T>> = sqlx::query_scalar(&format!(
            "SELECT doc FROM {} ORDER BY created_at, id",
            T::COLLECTION
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(docs.into_iter().map(|Json(record)| record).collect())
    }

    async fn find_by_field(&self, field: &str, value: &str) -> Result<Vec<T>, StoreError> {
        // Only allow-listed field names reach the SQL text, and the expression
        // must match the index definition verbatim for the planner to use it.
        ensure_indexed::<T>(field)?;

        let docs: Vec<Json<T>> = sqlx::query_scalar(&format!(
            "SELECT doc FROM {} WHERE doc->>'{field}' = $1 ORDER BY created_at, id",
            T::COLLECTION
        ))
        .bind(value)
        .fetch_all(&self.pool)
        .await?;

        Ok(docs.into_iter().map(|Json(record)| record).collect())
    }

    async fn delete_by_id(&self, id: &str) -> Result<(), StoreError> {
        let result = sqlx::query(&format!("DELETE FROM {} WHERE id = $1", T::COLLECTION))
            .bind(id)
            .execute(&self.pool)
            .await?;

        debug!(
            "Deleted {} document {id} ({} row(s))",
            T::COLLECTION,
            result.rows_affected()
        );
        Ok(())
    }
}
