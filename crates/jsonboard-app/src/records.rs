//! Record use cases: read, mutate in the domain, write back.
//!
//! A failed mutation leaves the file untouched. Concurrent writers are last-write-wins.

use crate::error::AppError;
use crate::files::{load_value, to_pretty};
use jsonboard_domain::{Mutation, into_patch};
use jsonboard_repo::JsonStore;
use jsonboard_types::DataPath;
use serde_json::Value;

/// Append `record`, assigning an id when it has none. Returns the stored record.
pub fn add_record(store: &dyn JsonStore, path: &DataPath, record: Value) -> Result<Value, AppError> {
    let root = load_value(store, path)?;
    let m = jsonboard_domain::append_record(&root, record)?;
    commit(store, path, m, "added record")
}

pub fn update_record_by_id(
    store: &dyn JsonStore,
    path: &DataPath,
    id: i64,
    patch: Value,
) -> Result<Value, AppError> {
    let patch = into_patch(patch)?;
    let root = load_value(store, path)?;
    let m = jsonboard_domain::update_by_id(&root, id, &patch)?;
    commit(store, path, m, "updated record")
}

pub fn update_record_by_index(
    store: &dyn JsonStore,
    path: &DataPath,
    index: usize,
    patch: Value,
) -> Result<Value, AppError> {
    let patch = into_patch(patch)?;
    let root = load_value(store, path)?;
    let m = jsonboard_domain::update_by_index(&root, index, &patch)?;
    commit(store, path, m, "updated record")
}

/// Remove the first record with `id`. Returns the removed record.
pub fn delete_record(store: &dyn JsonStore, path: &DataPath, id: i64) -> Result<Value, AppError> {
    let root = load_value(store, path)?;
    let m = jsonboard_domain::delete_by_id(&root, id)?;
    commit(store, path, m, "deleted record")
}

fn commit(
    store: &dyn JsonStore,
    path: &DataPath,
    m: Mutation,
    what: &'static str,
) -> Result<Value, AppError> {
    store.write_text(path, &to_pretty(&m.root))?;
    tracing::info!(path = %path, id = %m.record.get("id").unwrap_or(&serde_json::Value::Null), "{what}");
    Ok(m.record)
}
