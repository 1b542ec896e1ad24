//! Sled-backed key-value store.

use crate::error::ApiError;
use crate::store::KeyValueStore;
use std::path::Path;

const SETTINGS_TREE: &str = "settings";

pub struct SledKeyValueStore {
    tree: sled::Tree,
    db: sled::Db,
}

impl SledKeyValueStore {
    /// Open (or create) the database at `path`.
    pub fn open(path: &Path) -> Result<Self, ApiError> {
        std::fs::create_dir_all(path).map_err(|e| {
            ApiError::StorageError(format!(
                "Failed to create store directory {}: {}",
                path.display(),
                e
            ))
        })?;
        let db = sled::open(path)?;
        let tree = db.open_tree(SETTINGS_TREE)?;
        Ok(Self { tree, db })
    }

    fn flush(&self) -> Result<(), ApiError> {
        self.db.flush()?;
        Ok(())
    }
}

impl KeyValueStore for SledKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, ApiError> {
        match self.tree.get(key.as_bytes())? {
            Some(bytes) => String::from_utf8(bytes.to_vec())
                .map(Some)
                .map_err(|e| ApiError::CorruptData {
                    slot: key.to_string(),
                    reason: e.to_string(),
                }),
            None => Ok(None),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), ApiError> {
        self.tree.insert(key.as_bytes(), value.as_bytes())?;
        self.flush()
    }

    fn remove(&self, key: &str) -> Result<(), ApiError> {
        self.tree.remove(key.as_bytes())?;
        self.flush()
    }
}
