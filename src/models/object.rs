//! In-memory representation of a fetched object.

use bytes::Bytes;
use std::collections::HashMap;

/// An object fetched from the storage gateway.
///
/// Owned exclusively by the pipeline invocation that fetched it and
/// discarded when the invocation ends. The payload is the raw encoded
/// bytes; pixel dimensions are discovered by decoding, never stored.
#[derive(Debug, Clone)]
pub struct StoredObject {
    /// Raw encoded payload.
    pub body: Bytes,

    /// MIME type recorded alongside the payload.
    pub content_type: String,

    /// User metadata attached to the object. Insertion order is
    /// irrelevant; absent keys are simply missing, never empty strings.
    pub metadata: HashMap<String, String>,
}

impl StoredObject {
    pub fn new(
        body: impl Into<Bytes>,
        content_type: impl Into<String>,
        metadata: HashMap<String, String>,
    ) -> Self {
        Self {
            body: body.into(),
            content_type: content_type.into(),
            metadata,
        }
    }
}
