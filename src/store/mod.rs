//! Saved inscriptions and the stores that keep them.

mod json_dir;
mod memory;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::StoreResult;
use crate::util::time;

pub use json_dir::JsonDirStore;
pub use memory::MemoryStore;

/// Page size used when the caller does not pick one
pub const DEFAULT_LIST_LIMIT: usize = 50;

/// One saved inscription: vector document, gallery thumbnail and metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InscriptionRecord {
    pub id: String,
    /// Milliseconds since the UNIX epoch
    pub created_at: u64,
    pub updated_at: u64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub notes: Option<String>,
    pub svg: String,
    /// PNG bytes
    #[serde(default)]
    pub thumbnail_png: Vec<u8>,
}

/// User-editable part of a record
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordMeta {
    pub title: Option<String>,
    pub tags: Vec<String>,
    pub notes: Option<String>,
}

impl InscriptionRecord {
    /// A fresh record with a new id, created now
    pub fn new(meta: RecordMeta, svg: String, thumbnail_png: Vec<u8>) -> Self {
        let now = time::timestamp_millis();
        Self {
            id: Uuid::new_v4().to_string(),
            created_at: now,
            updated_at: now,
            title: meta.title,
            tags: meta.tags,
            notes: meta.notes,
            svg,
            thumbnail_png,
        }
    }

    /// Replace content and metadata, keeping id and creation time
    pub fn revise(&self, meta: RecordMeta, svg: String, thumbnail_png: Vec<u8>) -> Self {
        Self {
            id: self.id.clone(),
            created_at: self.created_at,
            updated_at: time::timestamp_millis().max(self.updated_at),
            title: meta.title,
            tags: meta.tags,
            notes: meta.notes,
            svg,
            thumbnail_png,
        }
    }
}

/// Keyed record storage. A `put` is all-or-nothing: readers never see half a record.
pub trait RecordStore {
    /// Insert or replace the record with `record.id`
    fn put(&self, record: &InscriptionRecord) -> StoreResult<()>;

    fn get(&self, id: &str) -> StoreResult<Option<InscriptionRecord>>;

    /// Newest first by `created_at`, skipping `offset` records and returning at most `limit`
    fn list(&self, limit: usize, offset: usize) -> StoreResult<Vec<InscriptionRecord>>;
}

/// Newest-first ordering shared by the stores; ties broken by id for stable pages
pub(crate) fn sort_newest_first(records: &mut [InscriptionRecord]) {
    records.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| a.id.cmp(&b.id))
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_revise_keeps_identity() {
        let original = InscriptionRecord::new(RecordMeta::default(), "<svg/>".to_owned(), Vec::new());
        let revised = original.revise(
            RecordMeta {
                title: Some("Stele".to_owned()),
                ..Default::default()
            },
            "<svg></svg>".to_owned(),
            vec![1, 2, 3],
        );
        assert_eq!(revised.id, original.id);
        assert_eq!(revised.created_at, original.created_at);
        assert!(revised.updated_at >= original.updated_at);
        assert_eq!(revised.title.as_deref(), Some("Stele"));
    }

    #[test]
    fn test_missing_optional_fields_deserialize() {
        let json = r#"{"id":"a","created_at":1,"updated_at":2,"svg":"<svg/>"}"#;
        let record: InscriptionRecord = serde_json::from_str(json).unwrap();
        assert!(record.tags.is_empty());
        assert!(record.thumbnail_png.is_empty());
    }
}
