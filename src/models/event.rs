//! Trigger events delivered by the storage notification source.
//!
//! The wire document follows the common storage-notification shape: a
//! top-level `Records` array where each record names the bucket and the
//! key of a newly created object. One record produces exactly one
//! pipeline run.

use serde::Deserialize;

/// Identifies one storage-creation notification.
///
/// Constructed from a notification record and consumed once per
/// pipeline invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerEvent {
    /// Bucket holding the newly created source object.
    pub bucket: String,

    /// Key of the source object within the bucket.
    pub key: String,
}

/// Top-level notification document posted to the trigger endpoint.
#[derive(Debug, Deserialize)]
pub struct NotificationDocument {
    #[serde(rename = "Records")]
    pub records: Vec<NotificationRecord>,
}

/// A single record in a notification document.
#[derive(Debug, Deserialize)]
pub struct NotificationRecord {
    pub s3: StorageEntity,
}

#[derive(Debug, Deserialize)]
pub struct StorageEntity {
    pub bucket: StorageBucket,
    pub object: StorageObject,
}

#[derive(Debug, Deserialize)]
pub struct StorageBucket {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct StorageObject {
    pub key: String,
}

impl From<&NotificationRecord> for TriggerEvent {
    fn from(record: &NotificationRecord) -> Self {
        Self {
            bucket: record.s3.bucket.name.clone(),
            key: record.s3.object.key.clone(),
        }
    }
}
