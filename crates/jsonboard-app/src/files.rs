//! Whole-file use cases.

use crate::error::AppError;
use jsonboard_repo::{JsonStore, StoredMeta};
use jsonboard_types::ids::FILE_ERROR_INVALID_JSON;
use jsonboard_types::{DataPath, FileMetadata, FileSummary, FileView};
use serde_json::Value;
use time::OffsetDateTime;

/// Data path for a user-supplied file name; `.json` is appended when missing.
pub fn file_path(name: &str) -> DataPath {
    let path = DataPath::new(name.trim());
    if path.has_json_extension() {
        path
    } else {
        DataPath::new(format!("{path}.json"))
    }
}

/// Every discovered file with its metadata. Files that vanish or become unreadable between
/// discovery and reading are skipped with a warning.
pub fn list_files(store: &dyn JsonStore) -> Result<Vec<FileSummary>, AppError> {
    let paths = store.list_json_files()?;
    tracing::debug!(count = paths.len(), "discovered json files");

    let mut out = Vec::with_capacity(paths.len());
    for path in paths {
        match summarize(store, &path) {
            Ok(summary) => out.push(summary),
            Err(err) => tracing::warn!(path = %path, error = %err, "skipping unreadable file"),
        }
    }
    Ok(out)
}

pub fn read_file(store: &dyn JsonStore, path: &DataPath) -> Result<FileView, AppError> {
    tracing::debug!(path = %path, "reading file");
    let meta = store.metadata(path)?;
    let text = store.read_text(path)?;
    let data: Value = serde_json::from_str(&text).map_err(|e| AppError::parse(path, &e))?;
    let metadata = metadata_for(meta, Some(&data));
    Ok(FileView {
        filename: file_name(path),
        relative_path: path.clone(),
        is_array: data.is_array(),
        data,
        metadata,
    })
}

/// Overwrite (or create) `path` with `data`. Returns `true` when the file did not exist before.
pub fn save_file(store: &dyn JsonStore, path: &DataPath, data: &Value) -> Result<bool, AppError> {
    let created = !store.exists(path)?;
    store.write_text(path, &to_pretty(data))?;
    tracing::info!(path = %path, created, "saved file");
    Ok(created)
}

/// Create `path` with `data`, an empty collection when omitted. Fails if the file exists.
pub fn create_file(
    store: &dyn JsonStore,
    path: &DataPath,
    data: Option<&Value>,
) -> Result<(), AppError> {
    let empty = Value::Array(Vec::new());
    store.create_text(path, &to_pretty(data.unwrap_or(&empty)))?;
    tracing::info!(path = %path, "created file");
    Ok(())
}

pub fn delete_file(store: &dyn JsonStore, path: &DataPath) -> Result<(), AppError> {
    store.remove(path)?;
    tracing::info!(path = %path, "deleted file");
    Ok(())
}

pub(crate) fn to_pretty(value: &Value) -> String {
    // Serializing a `Value` cannot fail: keys are always strings.
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

/// Read and parse `path` as JSON.
pub(crate) fn load_value(store: &dyn JsonStore, path: &DataPath) -> Result<Value, AppError> {
    let text = store.read_text(path)?;
    serde_json::from_str(&text).map_err(|e| AppError::parse(path, &e))
}

fn summarize(store: &dyn JsonStore, path: &DataPath) -> Result<FileSummary, AppError> {
    let meta = store.metadata(path)?;
    let text = store.read_text(path)?;
    let data = serde_json::from_str::<Value>(&text).ok();
    Ok(FileSummary {
        filename: file_name(path),
        relative_path: path.clone(),
        metadata: metadata_for(meta, data.as_ref()),
    })
}

fn metadata_for(meta: StoredMeta, data: Option<&Value>) -> FileMetadata {
    let (record_count, is_array, error) = match data {
        Some(Value::Array(items)) => (items.len(), true, None),
        Some(_) => (1, false, None),
        None => (0, false, Some(FILE_ERROR_INVALID_JSON.to_string())),
    };
    FileMetadata {
        size: meta.size,
        record_count,
        last_modified: meta.modified.map(OffsetDateTime::from),
        is_array,
        error,
    }
}

fn file_name(path: &DataPath) -> String {
    path.as_str()
        .rsplit('/')
        .next()
        .unwrap_or(path.as_str())
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use jsonboard_repo::MemStore;
    use serde_json::json;

    #[test]
    fn file_path_appends_extension() {
        assert_eq!(file_path("users").as_str(), "users.json");
        assert_eq!(file_path("shop/items.json").as_str(), "shop/items.json");
    }

    #[test]
    fn listing_reports_counts_and_kinds() {
        let store = MemStore::with_files([
            ("users.json", r#"[{"id": 1}, {"id": 2}]"#),
            ("config.json", r#"{"a": 1}"#),
        ]);
        let files = list_files(&store).expect("list");
        assert_eq!(files.len(), 2);

        let config = &files[0];
        assert_eq!(config.filename, "config.json");
        assert_eq!(config.metadata.record_count, 1);
        assert!(!config.metadata.is_array);

        let users = &files[1];
        assert_eq!(users.metadata.record_count, 2);
        assert!(users.metadata.is_array);
        assert!(users.metadata.error.is_none());
        assert!(users.metadata.last_modified.is_some());
    }

    #[test]
    fn invalid_json_metadata() {
        let meta = StoredMeta {
            size: 3,
            modified: None,
        };
        let m = metadata_for(meta, None);
        assert_eq!(m.error.as_deref(), Some("Invalid JSON"));
        assert_eq!(m.record_count, 0);
    }

    #[test]
    fn read_file_returns_data_and_metadata() {
        let store = MemStore::with_files([("shop/items.json", r#"[{"id": 1}]"#)]);
        let view = read_file(&store, &DataPath::new("shop/items.json")).expect("read");
        assert_eq!(view.filename, "items.json");
        assert!(view.is_array);
        assert_eq!(view.data, json!([{"id": 1}]));
        assert_eq!(view.metadata.record_count, 1);
    }

    #[test]
    fn read_missing_file_is_not_found() {
        let store = MemStore::new();
        let err = read_file(&store, &DataPath::new("nope.json")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn read_broken_file_is_parse_error() {
        let store = MemStore::with_files([("broken.json", "{")]);
        let err = read_file(&store, &DataPath::new("broken.json")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
    }

    #[test]
    fn create_defaults_to_empty_array_and_refuses_existing() {
        let store = MemStore::new();
        let p = DataPath::new("new.json");
        create_file(&store, &p, None).expect("create");
        assert_eq!(store.read_text(&p).expect("read"), "[]");

        let err = create_file(&store, &p, Some(&json!({}))).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AlreadyExists);
    }

    #[test]
    fn save_writes_two_space_indent() {
        let store = MemStore::new();
        let p = DataPath::new("a.json");
        save_file(&store, &p, &json!({"b": [1]})).expect("save");
        assert_eq!(store.read_text(&p).expect("read"), "{\n  \"b\": [\n    1\n  ]\n}");
    }

    #[test]
    fn save_reports_whether_file_was_created() {
        let store = MemStore::new();
        let p = DataPath::new("a.json");
        assert!(save_file(&store, &p, &json!([])).expect("first save"));
        assert!(!save_file(&store, &p, &json!([1])).expect("second save"));
        assert_eq!(store.read_text(&p).expect("read"), "[\n  1\n]");
    }

    #[test]
    fn delete_missing_file_is_not_found() {
        let store = MemStore::new();
        let err = delete_file(&store, &DataPath::new("a.json")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }
}
