//! src/services/object_store.rs
//!
//! The storage gateway the pipeline fetches sources from and writes
//! thumbnails back to. The trait keeps the surface to the two calls the
//! pipeline needs; `FsObjectStore` is the production implementation,
//! storing payloads on local disk beneath `base_path/{bucket}/{key}`
//! with a JSON sidecar for content-type, user metadata, and etag.

use crate::models::object::StoredObject;
use async_trait::async_trait;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::{
    collections::HashMap,
    io::{self, ErrorKind},
    path::{Path, PathBuf},
};
use thiserror::Error;
use tokio::fs;
use tracing::debug;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("object `{key}` not found in bucket `{bucket}`")]
    NotFound { bucket: String, key: String },
    #[error("invalid object key")]
    InvalidKey,
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("metadata sidecar for `{key}` is corrupt: {source}")]
    CorruptSidecar {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Narrow interface to the object storage collaborator.
///
/// Individual fetch/store operations are assumed atomic by the
/// implementation; the pipeline adds no locking of its own.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Fetch an object's payload, content type, and user metadata.
    async fn fetch(&self, bucket: &str, key: &str) -> StorageResult<StoredObject>;

    /// Store a payload under (bucket, key), overwriting any previous
    /// object at that key.
    async fn store(
        &self,
        bucket: &str,
        key: &str,
        body: Bytes,
        content_type: &str,
        metadata: &HashMap<String, String>,
    ) -> StorageResult<()>;
}

/// Sidecar document persisted next to each payload.
#[derive(Serialize, Deserialize)]
struct Sidecar {
    content_type: String,
    metadata: HashMap<String, String>,
    etag: String,
}

const MAX_OBJECT_KEY_LEN: usize = 1024;
const SIDECAR_SUFFIX: &str = ".meta.json";

/// Disk-backed object store.
#[derive(Clone)]
pub struct FsObjectStore {
    base_path: PathBuf,
}

impl FsObjectStore {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    /// Basic key validation to avoid trivial path traversal vectors.
    fn ensure_key_safe(key: &str) -> StorageResult<()> {
        if key.is_empty() || key.len() > MAX_OBJECT_KEY_LEN {
            return Err(StorageError::InvalidKey);
        }
        if key.starts_with('/') || key.contains("..") {
            return Err(StorageError::InvalidKey);
        }
        if key
            .bytes()
            .any(|b| b.is_ascii_control() || b == b'\\' || b == b'\0')
        {
            return Err(StorageError::InvalidKey);
        }
        Ok(())
    }

    fn object_path(&self, bucket: &str, key: &str) -> PathBuf {
        let mut path = self.base_path.clone();
        path.push(bucket);
        path.push(key);
        path
    }

    fn sidecar_path(&self, bucket: &str, key: &str) -> PathBuf {
        let mut path = self.object_path(bucket, key);
        path.set_file_name(format!(
            "{}{}",
            path.file_name()
                .and_then(|n| n.to_str())
                .unwrap_or_default(),
            SIDECAR_SUFFIX
        ));
        path
    }

    /// Write bytes via a temp file and rename into place so readers
    /// never observe a partial object.
    async fn write_atomic(path: &Path, contents: &[u8]) -> StorageResult<()> {
        let parent = path
            .parent()
            .ok_or_else(|| StorageError::Io(io::Error::other("object path missing parent")))?;
        fs::create_dir_all(parent).await?;

        let tmp_path = parent.join(format!(".tmp-{}", Uuid::new_v4()));
        if let Err(err) = fs::write(&tmp_path, contents).await {
            let _ = fs::remove_file(&tmp_path).await;
            return Err(StorageError::Io(err));
        }
        if let Err(err) = fs::rename(&tmp_path, path).await {
            if err.kind() == ErrorKind::AlreadyExists {
                fs::remove_file(path).await?;
                fs::rename(&tmp_path, path).await?;
            } else {
                let _ = fs::remove_file(&tmp_path).await;
                return Err(StorageError::Io(err));
            }
        }
        Ok(())
    }
}

#[async_trait]
impl ObjectStore for FsObjectStore {
    async fn fetch(&self, bucket: &str, key: &str) -> StorageResult<StoredObject> {
        Self::ensure_key_safe(key)?;

        let not_found = |err: io::Error| {
            if err.kind() == ErrorKind::NotFound {
                StorageError::NotFound {
                    bucket: bucket.to_string(),
                    key: key.to_string(),
                }
            } else {
                StorageError::Io(err)
            }
        };

        let body = fs::read(self.object_path(bucket, key))
            .await
            .map_err(not_found)?;
        let sidecar_bytes = fs::read(self.sidecar_path(bucket, key))
            .await
            .map_err(not_found)?;
        let sidecar: Sidecar =
            serde_json::from_slice(&sidecar_bytes).map_err(|source| {
                StorageError::CorruptSidecar {
                    key: key.to_string(),
                    source,
                }
            })?;

        Ok(StoredObject::new(body, sidecar.content_type, sidecar.metadata))
    }

    async fn store(
        &self,
        bucket: &str,
        key: &str,
        body: Bytes,
        content_type: &str,
        metadata: &HashMap<String, String>,
    ) -> StorageResult<()> {
        Self::ensure_key_safe(key)?;

        let etag = format!("{:x}", md5::compute(&body));
        let sidecar = Sidecar {
            content_type: content_type.to_string(),
            metadata: metadata.clone(),
            etag,
        };
        let sidecar_bytes = serde_json::to_vec(&sidecar).map_err(|source| {
            StorageError::CorruptSidecar {
                key: key.to_string(),
                source,
            }
        })?;

        Self::write_atomic(&self.object_path(bucket, key), &body).await?;
        Self::write_atomic(&self.sidecar_path(bucket, key), &sidecar_bytes).await?;
        debug!(bucket, key, size = body.len(), "stored object");
        Ok(())
    }
}
