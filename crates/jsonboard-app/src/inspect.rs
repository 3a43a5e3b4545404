//! Read-only use cases: validation, health, shape.

use crate::error::AppError;
use crate::files::load_value;
use jsonboard_domain::ShapeNode;
use jsonboard_repo::JsonStore;
use jsonboard_types::{DataPath, HealthReport, ValidationResult};

/// Validate a file against the shape inferred from its own content.
///
/// Malformed JSON is a validation result, not an error; a missing file is an error.
pub fn validate_file(store: &dyn JsonStore, path: &DataPath) -> Result<ValidationResult, AppError> {
    tracing::debug!(path = %path, "validating file");
    let text = store.read_text(path)?;
    Ok(jsonboard_domain::validate_text(&text))
}

pub fn check_health(store: &dyn JsonStore, path: &DataPath) -> Result<HealthReport, AppError> {
    tracing::debug!(path = %path, "checking health");
    let text = store.read_text(path)?;
    Ok(jsonboard_domain::check_health_text(&text))
}

/// Health of every discovered file, in listing order. Files that vanish or become unreadable
/// between discovery and reading are skipped with a warning.
pub fn check_health_all(store: &dyn JsonStore) -> Result<Vec<(DataPath, HealthReport)>, AppError> {
    let paths = store.list_json_files()?;
    let mut out = Vec::with_capacity(paths.len());
    for path in paths {
        match check_health(store, &path) {
            Ok(report) => out.push((path, report)),
            Err(err) => tracing::warn!(path = %path, error = %err, "skipping unreadable file"),
        }
    }
    Ok(out)
}

pub fn infer_shape(store: &dyn JsonStore, path: &DataPath) -> Result<ShapeNode, AppError> {
    let value = load_value(store, path)?;
    Ok(jsonboard_domain::infer(&value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use jsonboard_domain::ScalarKind;
    use jsonboard_repo::{MemStore, StoreError, StoredMeta};

    /// Lists one more file than it holds, as if it was deleted right after discovery.
    struct VanishingStore(MemStore);

    impl JsonStore for VanishingStore {
        fn read_text(&self, path: &DataPath) -> Result<String, StoreError> {
            self.0.read_text(path)
        }

        fn write_text(&self, path: &DataPath, text: &str) -> Result<(), StoreError> {
            self.0.write_text(path, text)
        }

        fn create_text(&self, path: &DataPath, text: &str) -> Result<(), StoreError> {
            self.0.create_text(path, text)
        }

        fn remove(&self, path: &DataPath) -> Result<(), StoreError> {
            self.0.remove(path)
        }

        fn exists(&self, path: &DataPath) -> Result<bool, StoreError> {
            self.0.exists(path)
        }

        fn metadata(&self, path: &DataPath) -> Result<StoredMeta, StoreError> {
            self.0.metadata(path)
        }

        fn list_json_files(&self) -> Result<Vec<DataPath>, StoreError> {
            let mut paths = self.0.list_json_files()?;
            paths.push(DataPath::new("gone.json"));
            paths.sort();
            Ok(paths)
        }
    }

    fn store() -> MemStore {
        MemStore::with_files([
            ("users.json", r#"[{"id": 1}, {"id": 2}]"#),
            (
                "mixed.json",
                r#"[{"score": 1}, {"score": 2}, {"score": 3}, {"score": "x"}]"#,
            ),
            ("broken.json", "[1,"),
        ])
    }

    #[test]
    fn validate_reports_drift_past_sample() {
        let result = validate_file(&store(), &DataPath::new("mixed.json")).expect("validate");
        assert!(!result.valid);
        assert_eq!(result.errors[0].dotted(), "3.score: Expected number, received string");
    }

    #[test]
    fn validate_broken_file_is_a_result() {
        let result = validate_file(&store(), &DataPath::new("broken.json")).expect("validate");
        assert!(!result.valid);
        assert!(result.errors[0].message.starts_with("Failed to parse JSON"));
    }

    #[test]
    fn validate_missing_file_is_an_error() {
        let err = validate_file(&store(), &DataPath::new("nope.json")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn health_of_all_listed_files() {
        let reports = check_health_all(&store()).expect("health");
        let flagged: Vec<&str> = reports
            .iter()
            .filter(|(_, r)| r.has_issues)
            .map(|(p, _)| p.as_str())
            .collect();
        // broken.json is not listed because it does not parse.
        assert_eq!(reports.len(), 2);
        assert_eq!(flagged, vec!["mixed.json"]);
    }

    #[test]
    fn health_of_all_skips_vanished_files() {
        let reports = check_health_all(&VanishingStore(store())).expect("health");
        let paths: Vec<&str> = reports.iter().map(|(p, _)| p.as_str()).collect();
        assert_eq!(paths, vec!["mixed.json", "users.json"]);
    }

    #[test]
    fn shape_of_collection() {
        let shape = infer_shape(&store(), &DataPath::new("users.json")).expect("shape");
        assert_eq!(
            shape,
            ShapeNode::array(ShapeNode::object([("id", ShapeNode::scalar(ScalarKind::Number))]))
        );
    }
}
