//! The persisted row linking a source object to its thumbnail.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::collections::HashMap;
use uuid::Uuid;

/// One row in the `thumbnails` table.
///
/// Written once per successful pipeline run and upserted by
/// `source_key`, so re-running the pipeline for the same object
/// overwrites rather than duplicates. The optional descriptive fields
/// are copied verbatim from the source object's metadata when present;
/// absent fields stay NULL, never empty strings.
#[derive(Serialize, Deserialize, Clone, FromRow, Debug)]
pub struct ThumbnailRecord {
    /// Internal UUID for DB indexing.
    pub id: Uuid,

    /// Key of the source object.
    pub source_key: String,

    /// Key the thumbnail was written under (`thumbs/<source_key>`).
    pub thumbnail_key: String,

    /// When this pipeline run completed its upload.
    pub created_at: DateTime<Utc>,

    /// `author` metadata value, if the source object carried one.
    pub author: Option<String>,

    /// `title` metadata value, if the source object carried one.
    pub title: Option<String>,

    /// `description` metadata value, if the source object carried one.
    pub description: Option<String>,
}

impl ThumbnailRecord {
    /// Build a record for a finished run, copying the descriptive
    /// fields out of the source object's metadata.
    pub fn from_run(
        source_key: impl Into<String>,
        thumbnail_key: impl Into<String>,
        metadata: &HashMap<String, String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            source_key: source_key.into(),
            thumbnail_key: thumbnail_key.into(),
            created_at: Utc::now(),
            author: metadata.get("author").cloned(),
            title: metadata.get("title").cloned(),
            description: metadata.get("description").cloned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn copies_descriptive_fields_when_present() {
        let mut meta = HashMap::new();
        meta.insert("author".to_string(), "ansel".to_string());
        meta.insert("title".to_string(), "moonrise".to_string());

        let rec = ThumbnailRecord::from_run("a.jpg", "thumbs/a.jpg", &meta);
        assert_eq!(rec.author.as_deref(), Some("ansel"));
        assert_eq!(rec.title.as_deref(), Some("moonrise"));
        assert_eq!(rec.description, None);
    }

    #[test]
    fn absent_fields_stay_none() {
        let rec = ThumbnailRecord::from_run("a.jpg", "thumbs/a.jpg", &HashMap::new());
        assert!(rec.author.is_none());
        assert!(rec.title.is_none());
        assert!(rec.description.is_none());
    }
}
