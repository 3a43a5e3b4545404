//! Self-referential validation.
//!
//! A file is checked against the shape inferred from its own content. Such a check cannot fail
//! because the shape is "wrong"; it only surfaces places the engine had to generalise: elements
//! past the sampled prefix whose shape differs, missing keys, union members nothing matches.

use crate::infer::infer;
use crate::shape::{ScalarKind, ShapeNode};
use jsonboard_types::ids::{MSG_INVALID_UNION, MSG_PARSE_PREFIX, MSG_REQUIRED};
use jsonboard_types::{PathSegment, ValidationIssue, ValidationResult};
use serde_json::Value;

/// Parse `text`, infer its shape and validate the content against it.
///
/// Malformed JSON short-circuits to a single root-level parse issue; no inference is attempted.
pub fn validate_text(text: &str) -> ValidationResult {
    match serde_json::from_str::<Value>(text) {
        Ok(value) => {
            let shape = infer(&value);
            ValidationResult::from_issues(validate_value(&value, &shape))
        }
        Err(err) => parse_failure(&err),
    }
}

/// Check `value` against `shape`, collecting every mismatch in document order.
pub fn validate_value(value: &Value, shape: &ShapeNode) -> Vec<ValidationIssue> {
    let mut out = Vec::new();
    let mut path = Vec::new();
    check(value, shape, &mut path, &mut out);
    out
}

pub(crate) fn parse_failure(err: &serde_json::Error) -> ValidationResult {
    ValidationResult {
        valid: false,
        errors: vec![ValidationIssue::new(
            Vec::new(),
            format!("{MSG_PARSE_PREFIX}: {err}"),
        )],
    }
}

fn check(
    value: &Value,
    shape: &ShapeNode,
    path: &mut Vec<PathSegment>,
    out: &mut Vec<ValidationIssue>,
) {
    match shape {
        ShapeNode::Unknown => {}
        ShapeNode::Undefined => out.push(mismatch(path, "undefined", value)),
        ShapeNode::Null => {
            if !value.is_null() {
                out.push(mismatch(path, "null", value));
            }
        }
        ShapeNode::Scalar { scalar } => {
            let ok = match scalar {
                ScalarKind::String => value.is_string(),
                ScalarKind::Number => value.is_number(),
                ScalarKind::Boolean => value.is_boolean(),
            };
            if !ok {
                out.push(mismatch(path, scalar.as_str(), value));
            }
        }
        ShapeNode::Array { element } => match value {
            Value::Array(items) => {
                for (i, item) in items.iter().enumerate() {
                    path.push(PathSegment::Index(i));
                    check(item, element, path, out);
                    path.pop();
                }
            }
            _ => out.push(mismatch(path, "array", value)),
        },
        ShapeNode::Object { fields } => match value {
            Value::Object(map) => {
                for field in fields {
                    path.push(PathSegment::Key(field.name.clone()));
                    match map.get(&field.name) {
                        Some(v) => check(v, &field.shape, path, out),
                        None if field.shape.accepts_missing() => {}
                        None => out.push(ValidationIssue::new(path.clone(), MSG_REQUIRED)),
                    }
                    path.pop();
                }
            }
            _ => out.push(mismatch(path, "object", value)),
        },
        ShapeNode::Union { members } => {
            let matched = members
                .iter()
                .any(|m| validate_value(value, m).is_empty());
            if !matched {
                out.push(ValidationIssue::new(path.clone(), MSG_INVALID_UNION));
            }
        }
    }
}

fn mismatch(path: &[PathSegment], expected: &str, received: &Value) -> ValidationIssue {
    ValidationIssue::new(
        path.to_vec(),
        format!("Expected {expected}, received {}", kind_label(received)),
    )
}

fn kind_label(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn uniform_collection_is_valid() {
        let text = r#"[{"id": 1, "name": "a"}, {"id": 2, "name": "b"}, {"id": 3, "name": "c"}, {"id": 4, "name": "d"}]"#;
        let result = validate_text(text);
        assert!(result.valid);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn malformed_json_short_circuits() {
        let result = validate_text("{");
        assert!(!result.valid);
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].path.is_empty());
        assert!(result.errors[0].message.starts_with("Failed to parse JSON: "));
    }

    #[test]
    fn element_past_sample_window_is_flagged() {
        let result = validate_text(r#"[1, 2, 3, "four"]"#);
        assert!(!result.valid);
        assert_eq!(
            result.errors,
            vec![ValidationIssue::new(
                vec![PathSegment::Index(3)],
                "Expected number, received string"
            )]
        );
    }

    #[test]
    fn missing_key_past_sample_window_is_required() {
        let result = validate_text(r#"[{"a": 1}, {"a": 2}, {"a": 3}, {"b": 4}]"#);
        assert_eq!(
            result.errors,
            vec![ValidationIssue::new(
                vec![PathSegment::Index(3), PathSegment::Key("a".to_string())],
                "Required"
            )]
        );
    }

    #[test]
    fn extra_keys_are_ignored() {
        let shape = infer(&json!({"a": 1}));
        assert!(validate_value(&json!({"a": 2, "extra": true}), &shape).is_empty());
    }

    #[test]
    fn union_with_no_matching_member_is_invalid_input() {
        let result = validate_text(r#"[1, "a", true, null]"#);
        assert_eq!(
            result.errors,
            vec![ValidationIssue::new(vec![PathSegment::Index(3)], "Invalid input")]
        );
    }

    #[test]
    fn unknown_accepts_anything_and_undefined_rejects_presence() {
        assert!(validate_value(&json!({"x": 1}), &ShapeNode::Unknown).is_empty());
        let shape = ShapeNode::object([("gone", ShapeNode::Undefined)]);
        assert!(validate_value(&json!({}), &shape).is_empty());
        let issues = validate_value(&json!({"gone": 1}), &shape);
        assert_eq!(issues[0].message, "Expected undefined, received number");
    }

    #[test]
    fn container_kind_mismatches() {
        let shape = infer(&json!({"tags": ["a"]}));
        let issues = validate_value(&json!({"tags": {"0": "a"}}), &shape);
        assert_eq!(issues[0].message, "Expected array, received object");
        assert_eq!(issues[0].path, vec![PathSegment::Key("tags".to_string())]);
    }

    #[test]
    fn scalar_root_is_valid() {
        assert!(validate_text("42").valid);
        assert!(validate_text("null").valid);
    }
}
