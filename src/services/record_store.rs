//! src/services/record_store.rs
//!
//! The metadata-store gateway the pipeline writes thumbnail records to.
//! `SqliteRecordStore` persists them in the `thumbnails` table, upserted
//! by `source_key` so re-running a pipeline invocation for the same
//! object overwrites its row instead of duplicating it.

use crate::models::record::ThumbnailRecord;
use async_trait::async_trait;
use sqlx::SqlitePool;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RecordStoreError {
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

pub type RecordResult<T> = Result<T, RecordStoreError>;

/// Narrow interface to the metadata-store collaborator.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Persist a record, replacing any prior record for the same
    /// source key.
    async fn put_record(&self, record: &ThumbnailRecord) -> RecordResult<()>;
}

#[derive(Clone)]
pub struct SqliteRecordStore {
    db: Arc<SqlitePool>,
}

impl SqliteRecordStore {
    pub fn new(db: Arc<SqlitePool>) -> Self {
        Self { db }
    }

    /// Fetch the record for a source key, if one exists.
    pub async fn get_record(&self, source_key: &str) -> RecordResult<Option<ThumbnailRecord>> {
        let record = sqlx::query_as::<_, ThumbnailRecord>(
            "SELECT id, source_key, thumbnail_key, created_at, author, title, description
             FROM thumbnails WHERE source_key = ?",
        )
        .bind(source_key)
        .fetch_optional(&*self.db)
        .await?;
        Ok(record)
    }
}

#[async_trait]
impl RecordStore for SqliteRecordStore {
    async fn put_record(&self, record: &ThumbnailRecord) -> RecordResult<()> {
        sqlx::query(
            r#"
            INSERT INTO thumbnails (
                id, source_key, thumbnail_key, created_at, author, title, description
            ) VALUES (?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(source_key) DO UPDATE SET
                thumbnail_key = excluded.thumbnail_key,
                created_at = excluded.created_at,
                author = excluded.author,
                title = excluded.title,
                description = excluded.description
            "#,
        )
        .bind(record.id)
        .bind(&record.source_key)
        .bind(&record.thumbnail_key)
        .bind(record.created_at)
        .bind(&record.author)
        .bind(&record.title)
        .bind(&record.description)
        .execute(&*self.db)
        .await?;
        Ok(())
    }
}
