use crate::discover::{ScanFilter, ScanPolicy};
use crate::error::StoreError;
use crate::store::{JsonStore, StoredMeta, check_path};
use jsonboard_types::DataPath;
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};
use std::time::SystemTime;

/// In-memory store. Listing applies the same name rules as [`crate::FsStore`].
#[derive(Debug)]
pub struct MemStore {
    files: Mutex<BTreeMap<DataPath, Entry>>,
    policy: ScanPolicy,
}

#[derive(Clone, Debug)]
struct Entry {
    text: String,
    modified: SystemTime,
}

impl Default for MemStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemStore {
    pub fn new() -> Self {
        Self {
            files: Mutex::new(BTreeMap::new()),
            policy: ScanPolicy::default(),
        }
    }

    /// Store seeded with `(path, text)` pairs.
    pub fn with_files<I, P, T>(files: I) -> Self
    where
        I: IntoIterator<Item = (P, T)>,
        P: Into<DataPath>,
        T: Into<String>,
    {
        let store = Self::new();
        {
            let mut map = store.lock();
            for (p, t) in files {
                map.insert(
                    p.into(),
                    Entry {
                        text: t.into(),
                        modified: SystemTime::now(),
                    },
                );
            }
        }
        store
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<DataPath, Entry>> {
        self.files.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl JsonStore for MemStore {
    fn read_text(&self, path: &DataPath) -> Result<String, StoreError> {
        check_path(path)?;
        self.lock()
            .get(path)
            .map(|e| e.text.clone())
            .ok_or_else(|| StoreError::NotFound(path.clone()))
    }

    fn write_text(&self, path: &DataPath, text: &str) -> Result<(), StoreError> {
        check_path(path)?;
        self.lock().insert(
            path.clone(),
            Entry {
                text: text.to_string(),
                modified: SystemTime::now(),
            },
        );
        Ok(())
    }

    fn create_text(&self, path: &DataPath, text: &str) -> Result<(), StoreError> {
        check_path(path)?;
        let mut map = self.lock();
        if map.contains_key(path) {
            return Err(StoreError::AlreadyExists(path.clone()));
        }
        map.insert(
            path.clone(),
            Entry {
                text: text.to_string(),
                modified: SystemTime::now(),
            },
        );
        Ok(())
    }

    fn remove(&self, path: &DataPath) -> Result<(), StoreError> {
        check_path(path)?;
        self.lock()
            .remove(path)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(path.clone()))
    }

    fn exists(&self, path: &DataPath) -> Result<bool, StoreError> {
        check_path(path)?;
        Ok(self.lock().contains_key(path))
    }

    fn metadata(&self, path: &DataPath) -> Result<StoredMeta, StoreError> {
        check_path(path)?;
        self.lock()
            .get(path)
            .map(|e| StoredMeta {
                size: e.text.len() as u64,
                modified: Some(e.modified),
            })
            .ok_or_else(|| StoreError::NotFound(path.clone()))
    }

    fn list_json_files(&self) -> Result<Vec<DataPath>, StoreError> {
        let filter = ScanFilter::new(&self.policy)?;
        Ok(self
            .lock()
            .iter()
            .filter(|(p, _)| filter.allows_file(p))
            .filter(|(_, e)| serde_json::from_str::<serde_json::Value>(&e.text).is_ok())
            .map(|(p, _)| p.clone())
            .collect())
    }
}
