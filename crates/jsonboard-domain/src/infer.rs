use crate::shape::{ScalarKind, ShapeField, ShapeNode};
use serde_json::{Map, Value};

/// How many leading array elements are inspected when inferring an element shape.
pub const ARRAY_SAMPLE_SIZE: usize = 3;

/// Infer the structural shape of a JSON value.
///
/// Objects keep their source key order. Arrays look at the first [`ARRAY_SAMPLE_SIZE`] elements;
/// structurally identical samples collapse, differing ones become a union in encounter order.
pub fn infer(value: &Value) -> ShapeNode {
    match value {
        Value::Null => ShapeNode::Null,
        Value::Bool(_) => ShapeNode::scalar(ScalarKind::Boolean),
        Value::Number(_) => ShapeNode::scalar(ScalarKind::Number),
        Value::String(_) => ShapeNode::scalar(ScalarKind::String),
        Value::Array(items) => ShapeNode::array(infer_elements(items)),
        Value::Object(map) => infer_object(map),
    }
}

/// Shape of `key` inside `object`: `Undefined` when the key is absent.
pub fn infer_field(object: &Map<String, Value>, key: &str) -> ShapeNode {
    match object.get(key) {
        Some(v) => infer(v),
        None => ShapeNode::Undefined,
    }
}

fn infer_elements(items: &[Value]) -> ShapeNode {
    if items.is_empty() {
        return ShapeNode::Unknown;
    }
    ShapeNode::union(items.iter().take(ARRAY_SAMPLE_SIZE).map(infer))
}

fn infer_object(map: &Map<String, Value>) -> ShapeNode {
    ShapeNode::Object {
        fields: map
            .iter()
            .map(|(name, v)| ShapeField {
                name: name.clone(),
                shape: infer(v),
            })
            .collect(),
    }
}
