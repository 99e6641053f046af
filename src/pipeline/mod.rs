//! The thumbnail pipeline: four dependent I/O stages run strictly in
//! order, with the first failure aborting everything after it.
//!
//! Stage order is resolve type → download → transform → upload →
//! record. No stage retries and nothing already written is rolled back;
//! recovery is idempotent re-invocation by the trigger layer, which
//! overwrites the destination key and the metadata record.

pub mod image_type;
pub mod scaling;
pub mod transform;

use crate::models::event::TriggerEvent;
use crate::models::record::ThumbnailRecord;
use crate::services::object_store::{ObjectStore, StorageError};
use crate::services::record_store::{RecordStore, RecordStoreError};
use image_type::ImageType;
use scaling::BoundingBox;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Prefix thumbnails are written under, in the same bucket as the
/// source. Not configurable at runtime.
pub const THUMBNAIL_PREFIX: &str = "thumbs/";

/// Errors a pipeline run can terminate with, by stage.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Object key carries no extension to resolve a type from.
    #[error("could not determine image type for key `{key}`")]
    UnresolvedType { key: String },

    /// Extension resolved but is not a supported encoding.
    #[error("unsupported image type `{extension}`")]
    UnsupportedType { extension: String },

    /// Source size is zero or could not be probed.
    #[error("invalid source dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    /// Decoding, resizing, or re-encoding the payload failed.
    #[error("image transform failed: {message}")]
    Encoding { message: String },

    /// Storage gateway fetch or store failed.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Metadata-store gateway write failed.
    #[error(transparent)]
    Record(#[from] RecordStoreError),
}

/// Completion signal of a successful run.
#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    pub source_key: String,
    pub thumbnail_key: String,
    pub scaled_dimensions: (u32, u32),
}

/// Drives one pipeline run per trigger event.
///
/// Holds only shared handles to the two gateways; every run owns its
/// fetched object privately, so concurrent runs never touch each
/// other's state.
#[derive(Clone)]
pub struct Thumbnailer {
    objects: Arc<dyn ObjectStore>,
    records: Arc<dyn RecordStore>,
}

impl Thumbnailer {
    pub fn new(objects: Arc<dyn ObjectStore>, records: Arc<dyn RecordStore>) -> Self {
        Self { objects, records }
    }

    /// Run the full waterfall for one trigger event.
    ///
    /// Returns the run's single completion value: the destination key
    /// and scaled size on success, or the first stage error. Errors are
    /// reported values; nothing here panics or tears down the host.
    pub async fn run(&self, event: &TriggerEvent) -> Result<PipelineOutcome, PipelineError> {
        // Resolving: fail before any I/O when the key can't be handled.
        let image_type = ImageType::from_key(&event.key)?;

        // Downloading.
        let source = self.objects.fetch(&event.bucket, &event.key).await?;
        info!(
            bucket = %event.bucket,
            key = %event.key,
            size = source.body.len(),
            "fetched source object"
        );

        // Transforming: probe size, resolve the box from metadata,
        // scale, re-encode in the original encoding.
        let bbox = BoundingBox::from_metadata(&source.metadata);
        let transformed = transform::resize_to_fit(source.body.clone(), image_type, bbox).await?;

        // Uploading: same bucket, fixed prefix, original content type
        // and the full metadata map unchanged.
        let thumbnail_key = format!("{THUMBNAIL_PREFIX}{}", event.key);
        self.objects
            .store(
                &event.bucket,
                &thumbnail_key,
                transformed.body,
                &source.content_type,
                &source.metadata,
            )
            .await?;

        // Recording: upsert the source→thumbnail row.
        let record = ThumbnailRecord::from_run(&event.key, &thumbnail_key, &source.metadata);
        self.records.put_record(&record).await?;

        info!(
            bucket = %event.bucket,
            source_key = %event.key,
            thumbnail_key = %thumbnail_key,
            width = transformed.scaled_dimensions.0,
            height = transformed.scaled_dimensions.1,
            "resized and uploaded thumbnail"
        );

        Ok(PipelineOutcome {
            source_key: event.key.clone(),
            thumbnail_key,
            scaled_dimensions: transformed.scaled_dimensions,
        })
    }
}
