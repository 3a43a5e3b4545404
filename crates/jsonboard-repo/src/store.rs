use crate::error::StoreError;
use jsonboard_types::DataPath;
use std::time::SystemTime;

/// Size and modification time of a stored file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StoredMeta {
    pub size: u64,
    pub modified: Option<SystemTime>,
}

/// Text storage keyed by data-relative paths.
///
/// Writes are whole-file and last-write-wins; implementations do no locking.
pub trait JsonStore: Send + Sync {
    fn read_text(&self, path: &DataPath) -> Result<String, StoreError>;

    /// Create or overwrite.
    fn write_text(&self, path: &DataPath, text: &str) -> Result<(), StoreError>;

    /// Create only; `AlreadyExists` when the file is present.
    fn create_text(&self, path: &DataPath, text: &str) -> Result<(), StoreError>;

    fn remove(&self, path: &DataPath) -> Result<(), StoreError>;

    fn exists(&self, path: &DataPath) -> Result<bool, StoreError>;

    fn metadata(&self, path: &DataPath) -> Result<StoredMeta, StoreError>;

    /// Every listed `.json` file that parses, sorted by path.
    fn list_json_files(&self) -> Result<Vec<DataPath>, StoreError>;
}

/// Reject paths that would leave the data directory or do not name a `.json` file.
pub fn check_path(path: &DataPath) -> Result<(), StoreError> {
    if path.as_str() == "." || path.escapes_root() || !path.has_json_extension() {
        return Err(StoreError::InvalidPath(path.as_str().to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_nested_json_paths() {
        assert!(check_path(&DataPath::new("users.json")).is_ok());
        assert!(check_path(&DataPath::new("shop/items.json")).is_ok());
    }

    #[test]
    fn rejects_escapes_and_other_extensions() {
        for bad in ["../users.json", "/etc/users.json", "a/../../b.json", "notes.txt", ""] {
            let err = check_path(&DataPath::new(bad)).unwrap_err();
            assert!(matches!(err, StoreError::InvalidPath(_)), "{bad}");
        }
    }
}
