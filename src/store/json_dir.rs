use std::fs;
use std::path::{Path, PathBuf};

use super::{InscriptionRecord, RecordStore, sort_newest_first};
use crate::error::{StoreError, StoreResult};

/// One pretty-printed JSON file per record inside a directory.
///
/// Writes go to a temporary sibling first and are then renamed over the
/// target, so a reader sees either the old record or the new one.
#[derive(Debug, Clone)]
pub struct JsonDirStore {
    dir: PathBuf,
}

impl JsonDirStore {
    /// Open (creating if needed) a store rooted at `dir`
    pub fn open(dir: impl Into<PathBuf>) -> StoreResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn record_path(&self, id: &str) -> StoreResult<PathBuf> {
        validate_id(id)?;
        Ok(self.dir.join(format!("{id}.json")))
    }
}

// Ids become file names; keep them to a safe alphabet
fn validate_id(id: &str) -> StoreResult<()> {
    let ok = !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if ok {
        Ok(())
    } else {
        Err(StoreError::InvalidRecord(format!("unusable record id: {id:?}")))
    }
}

impl RecordStore for JsonDirStore {
    fn put(&self, record: &InscriptionRecord) -> StoreResult<()> {
        let path = self.record_path(&record.id)?;
        let tmp = self.dir.join(format!(".{}.json.tmp", record.id));

        let json = serde_json::to_string_pretty(record)?;
        fs::write(&tmp, json)?;
        if let Err(err) = fs::rename(&tmp, &path) {
            let _ = fs::remove_file(&tmp);
            return Err(err.into());
        }

        log::info!("Saved record {} to {}", record.id, path.display());
        Ok(())
    }

    fn get(&self, id: &str) -> StoreResult<Option<InscriptionRecord>> {
        let path = self.record_path(id)?;
        match fs::read_to_string(&path) {
            Ok(json) => Ok(Some(serde_json::from_str(&json)?)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn list(&self, limit: usize, offset: usize) -> StoreResult<Vec<InscriptionRecord>> {
        let mut records = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            let name = entry.file_name();
            let name = name.to_string_lossy();
            if name.starts_with('.') || !name.ends_with(".json") {
                continue;
            }

            let json = fs::read_to_string(entry.path())?;
            match serde_json::from_str::<InscriptionRecord>(&json) {
                Ok(record) => records.push(record),
                Err(err) => log::warn!("Skipping unreadable record {}: {}", name, err),
            }
        }

        sort_newest_first(&mut records);
        Ok(records.into_iter().skip(offset).take(limit).collect())
    }
}
