use parking_lot::RwLock;
use std::collections::HashMap;

use super::{InscriptionRecord, RecordStore, sort_newest_first};
use crate::error::StoreResult;

/// Records held in process memory; lost when dropped
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<HashMap<String, InscriptionRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

impl RecordStore for MemoryStore {
    fn put(&self, record: &InscriptionRecord) -> StoreResult<()> {
        self.records.write().insert(record.id.clone(), record.clone());
        Ok(())
    }

    fn get(&self, id: &str) -> StoreResult<Option<InscriptionRecord>> {
        Ok(self.records.read().get(id).cloned())
    }

    fn list(&self, limit: usize, offset: usize) -> StoreResult<Vec<InscriptionRecord>> {
        let mut all: Vec<_> = self.records.read().values().cloned().collect();
        sort_newest_first(&mut all);
        Ok(all.into_iter().skip(offset).take(limit).collect())
    }
}
