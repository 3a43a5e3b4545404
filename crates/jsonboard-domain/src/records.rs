//! Record mutations on collection files.
//!
//! Every operation reads the current root, builds a new root and returns it together with the
//! affected record. On error nothing is built, so the caller's value is untouched.
//!
//! Identifier lookups resolve to the first element whose `id` equals the requested number;
//! duplicate ids are tolerated, later duplicates are unreachable by id (use the index form).
//! Merges are shallow: patch fields replace top-level fields wholesale.

use crate::error::RecordError;
use serde_json::{Map, Number, Value};

const ID_FIELD: &str = "id";

/// Result of a successful mutation.
#[derive(Clone, Debug, PartialEq)]
pub struct Mutation {
    /// The complete new file root.
    pub root: Value,
    /// The created, updated or removed record.
    pub record: Value,
}

/// Accept a request body as a patch; only JSON objects qualify.
pub fn into_patch(value: Value) -> Result<Map<String, Value>, RecordError> {
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(RecordError::PatchNotObject),
    }
}

/// Append `record`, assigning `id = 1 + max(existing ids)` to objects that lack one.
pub fn append_record(root: &Value, mut record: Value) -> Result<Mutation, RecordError> {
    let items = as_array(root)?;

    if let Value::Object(map) = &mut record
        && map.get(ID_FIELD).is_none_or(Value::is_null)
    {
        map.insert(ID_FIELD.to_string(), next_id(items));
    }

    let mut out = items.to_vec();
    out.push(record.clone());
    Ok(Mutation {
        root: Value::Array(out),
        record,
    })
}

/// Shallow-merge `patch` into the first record with `id`; the record keeps its original id.
pub fn update_by_id(
    root: &Value,
    id: i64,
    patch: &Map<String, Value>,
) -> Result<Mutation, RecordError> {
    let items = as_array(root)?;
    let index = find_by_id(items, id).ok_or(RecordError::RecordNotFound { id })?;

    let original_id = items[index]
        .get(ID_FIELD)
        .cloned()
        .unwrap_or_else(|| Value::from(id));
    let mut merged = shallow_merge(&items[index], patch);
    merged.insert(ID_FIELD.to_string(), original_id);
    let merged = Value::Object(merged);

    let mut out = items.to_vec();
    out[index] = merged.clone();
    Ok(Mutation {
        root: Value::Array(out),
        record: merged,
    })
}

/// Shallow-merge `patch` into the record at `index`. The patch may change the id.
pub fn update_by_index(
    root: &Value,
    index: usize,
    patch: &Map<String, Value>,
) -> Result<Mutation, RecordError> {
    let items = as_array(root)?;
    if index >= items.len() {
        return Err(RecordError::IndexOutOfBounds {
            index,
            len: items.len(),
        });
    }

    let merged = Value::Object(shallow_merge(&items[index], patch));
    let mut out = items.to_vec();
    out[index] = merged.clone();
    Ok(Mutation {
        root: Value::Array(out),
        record: merged,
    })
}

/// Remove the first record with `id` and return it.
pub fn delete_by_id(root: &Value, id: i64) -> Result<Mutation, RecordError> {
    let items = as_array(root)?;
    let index = find_by_id(items, id).ok_or(RecordError::RecordNotFound { id })?;

    let mut out = items.to_vec();
    let removed = out.remove(index);
    Ok(Mutation {
        root: Value::Array(out),
        record: removed,
    })
}

fn as_array(root: &Value) -> Result<&[Value], RecordError> {
    root.as_array()
        .map(Vec::as_slice)
        .ok_or(RecordError::NotArray)
}

fn find_by_id(items: &[Value], id: i64) -> Option<usize> {
    items.iter().position(|item| id_matches(item, id))
}

fn id_matches(item: &Value, id: i64) -> bool {
    match item.get(ID_FIELD) {
        Some(Value::Number(n)) => match n.as_i64() {
            Some(v) => v == id,
            None => n.as_f64() == Some(id as f64),
        },
        _ => false,
    }
}

// Non-objects contribute no fields.
fn shallow_merge(existing: &Value, patch: &Map<String, Value>) -> Map<String, Value> {
    let mut merged = existing.as_object().cloned().unwrap_or_default();
    for (key, value) in patch {
        merged.insert(key.clone(), value.clone());
    }
    merged
}

enum NumericId {
    Int(i64),
    Float(f64),
}

fn numeric_id(item: &Value) -> NumericId {
    match item.get(ID_FIELD) {
        Some(Value::Number(n)) => n
            .as_i64()
            .map(NumericId::Int)
            .or_else(|| n.as_f64().map(NumericId::Float))
            .unwrap_or(NumericId::Int(0)),
        _ => NumericId::Int(0),
    }
}

// Missing or non-numeric ids count as 0; an empty collection starts at 1.
fn next_id(items: &[Value]) -> Value {
    if items.is_empty() {
        return Value::from(1);
    }

    let ids: Vec<NumericId> = items.iter().map(numeric_id).collect();
    if ids.iter().all(|id| matches!(id, NumericId::Int(_))) {
        let max = ids
            .iter()
            .filter_map(|id| match id {
                NumericId::Int(v) => Some(*v),
                NumericId::Float(_) => None,
            })
            .max()
            .unwrap_or(0);
        // Past i64::MAX the id continues as a float.
        if let Some(next) = max.checked_add(1) {
            return Value::from(next);
        }
    }

    let max = ids
        .iter()
        .map(|id| match id {
            NumericId::Int(v) => *v as f64,
            NumericId::Float(v) => *v,
        })
        .fold(f64::NEG_INFINITY, f64::max);
    let next = max + 1.0;
    if next.fract() == 0.0 && next.abs() < i64::MAX as f64 {
        Value::from(next as i64)
    } else {
        Number::from_f64(next).map(Value::Number).unwrap_or(Value::Null)
    }
}
