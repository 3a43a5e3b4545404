use crate::discover::{ScanFilter, ScanPolicy, discover_json_files};
use crate::error::StoreError;
use crate::store::{JsonStore, StoredMeta, check_path};
use camino::{Utf8Path, Utf8PathBuf};
use jsonboard_types::DataPath;
use std::fs::OpenOptions;
use std::io::Write;

/// JSON files in a directory on disk.
#[derive(Clone, Debug)]
pub struct FsStore {
    root: Utf8PathBuf,
    filter: ScanFilter,
}

impl FsStore {
    pub fn new(root: impl Into<Utf8PathBuf>, policy: &ScanPolicy) -> Result<Self, StoreError> {
        Ok(Self {
            root: root.into(),
            filter: ScanFilter::new(policy)?,
        })
    }

    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    fn resolve(&self, path: &DataPath) -> Result<Utf8PathBuf, StoreError> {
        check_path(path)?;
        Ok(self.root.join(path.as_str()))
    }

    fn ensure_parent(&self, path: &DataPath, abs: &Utf8Path) -> Result<(), StoreError> {
        if let Some(parent) = abs.parent() {
            std::fs::create_dir_all(parent).map_err(|e| StoreError::from_io(path, e))?;
        }
        Ok(())
    }
}

impl JsonStore for FsStore {
    fn read_text(&self, path: &DataPath) -> Result<String, StoreError> {
        let abs = self.resolve(path)?;
        std::fs::read_to_string(&abs).map_err(|e| StoreError::from_io(path, e))
    }

    fn write_text(&self, path: &DataPath, text: &str) -> Result<(), StoreError> {
        let abs = self.resolve(path)?;
        self.ensure_parent(path, &abs)?;
        std::fs::write(&abs, text).map_err(|e| StoreError::from_io(path, e))
    }

    fn create_text(&self, path: &DataPath, text: &str) -> Result<(), StoreError> {
        let abs = self.resolve(path)?;
        self.ensure_parent(path, &abs)?;
        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&abs)
            .map_err(|e| StoreError::from_io(path, e))?;
        fill_new_file(&mut file, &abs, text).map_err(|e| StoreError::from_io(path, e))
    }

    fn remove(&self, path: &DataPath) -> Result<(), StoreError> {
        let abs = self.resolve(path)?;
        std::fs::remove_file(&abs).map_err(|e| StoreError::from_io(path, e))
    }

    fn exists(&self, path: &DataPath) -> Result<bool, StoreError> {
        let abs = self.resolve(path)?;
        Ok(abs.is_file())
    }

    fn metadata(&self, path: &DataPath) -> Result<StoredMeta, StoreError> {
        let abs = self.resolve(path)?;
        let meta = std::fs::metadata(&abs).map_err(|e| StoreError::from_io(path, e))?;
        Ok(StoredMeta {
            size: meta.len(),
            modified: meta.modified().ok(),
        })
    }

    fn list_json_files(&self) -> Result<Vec<DataPath>, StoreError> {
        discover_json_files(&self.root, &self.filter)
    }
}

/// Write a freshly created file, removing it again if the write fails part way.
fn fill_new_file(out: &mut impl Write, abs: &Utf8Path, text: &str) -> std::io::Result<()> {
    out.write_all(text.as_bytes()).inspect_err(|_| {
        let _ = std::fs::remove_file(abs);
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store(tmp: &TempDir) -> FsStore {
        let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf8 path");
        FsStore::new(root, &ScanPolicy::default()).expect("store")
    }

    #[test]
    fn write_then_read_creates_parents() {
        let tmp = TempDir::new().expect("temp dir");
        let s = store(&tmp);
        let p = DataPath::new("shop/items.json");

        s.write_text(&p, "[]").expect("write");
        assert_eq!(s.read_text(&p).expect("read"), "[]");
        assert!(s.exists(&p).expect("exists"));
        assert_eq!(s.metadata(&p).expect("meta").size, 2);
        assert_eq!(s.list_json_files().expect("list"), vec![p]);
    }

    struct FullDisk;

    impl Write for FullDisk {
        fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::other("no space left on device"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn failed_create_leaves_no_partial_file() {
        let tmp = TempDir::new().expect("temp dir");
        let abs = Utf8PathBuf::from_path_buf(tmp.path().join("users.json")).expect("utf8 path");
        std::fs::write(&abs, "").expect("create empty");

        let err = fill_new_file(&mut FullDisk, &abs, "[]").unwrap_err();
        assert_eq!(err.to_string(), "no space left on device");
        assert!(!abs.exists());
    }

    #[test]
    fn create_refuses_existing_file() {
        let tmp = TempDir::new().expect("temp dir");
        let s = store(&tmp);
        let p = DataPath::new("users.json");

        s.create_text(&p, "[]").expect("create");
        let err = s.create_text(&p, "{}").unwrap_err();
        assert!(matches!(err, StoreError::AlreadyExists(_)));
        assert_eq!(s.read_text(&p).expect("read"), "[]");
    }

    #[test]
    fn missing_files_are_not_found() {
        let tmp = TempDir::new().expect("temp dir");
        let s = store(&tmp);
        let p = DataPath::new("nope.json");

        assert!(matches!(s.read_text(&p), Err(StoreError::NotFound(_))));
        assert!(matches!(s.remove(&p), Err(StoreError::NotFound(_))));
        assert!(matches!(s.metadata(&p), Err(StoreError::NotFound(_))));
        assert!(!s.exists(&p).expect("exists"));
    }

    #[test]
    fn escaping_paths_never_touch_disk() {
        let tmp = TempDir::new().expect("temp dir");
        let s = store(&tmp);
        let err = s.write_text(&DataPath::new("../outside.json"), "{}").unwrap_err();
        assert!(matches!(err, StoreError::InvalidPath(_)));
        assert!(!tmp.path().parent().expect("parent").join("outside.json").exists());
    }
}
