//! Zod expressions for inferred shapes.

use crate::infer::{ARRAY_SAMPLE_SIZE, infer};
use crate::shape::{ScalarKind, ShapeNode};
use serde_json::Value;

const INDENT: &str = "  ";

/// Render `shape` as a Zod expression.
///
/// `samples` are the literal values the shape was inferred from at this position. They only
/// decide number formatting: `z.number().int()` when every sampled literal is a whole number
/// written without a fraction, `z.number()` otherwise.
pub fn expression(shape: &ShapeNode, samples: &[&Value], depth: usize) -> String {
    match shape {
        ShapeNode::Null => "z.null()".to_string(),
        ShapeNode::Undefined => "z.undefined()".to_string(),
        ShapeNode::Unknown => "z.unknown()".to_string(),
        ShapeNode::Scalar { scalar } => scalar_expression(*scalar, samples),
        ShapeNode::Array { element } => {
            let elements: Vec<&Value> = samples
                .iter()
                .filter_map(|s| s.as_array())
                .flat_map(|items| items.iter().take(ARRAY_SAMPLE_SIZE))
                .collect();
            format!("z.array({})", expression(element, &elements, depth))
        }
        ShapeNode::Object { fields } => {
            if fields.is_empty() {
                return "z.object({})".to_string();
            }
            let inner = INDENT.repeat(depth + 1);
            let lines: Vec<String> = fields
                .iter()
                .map(|field| {
                    let values: Vec<&Value> = samples
                        .iter()
                        .filter_map(|s| s.as_object())
                        .filter_map(|map| map.get(&field.name))
                        .collect();
                    format!(
                        "{inner}{}: {}",
                        object_key(&field.name),
                        expression(&field.shape, &values, depth + 1)
                    )
                })
                .collect();
            format!(
                "z.object({{\n{}\n{}}})",
                lines.join(",\n"),
                INDENT.repeat(depth)
            )
        }
        ShapeNode::Union { members } => {
            let rendered: Vec<String> = members
                .iter()
                .map(|member| {
                    let matching: Vec<&Value> = samples
                        .iter()
                        .copied()
                        .filter(|s| infer(s) == *member)
                        .collect();
                    expression(member, &matching, depth)
                })
                .collect();
            format!("z.union([{}])", rendered.join(", "))
        }
    }
}

fn scalar_expression(kind: ScalarKind, samples: &[&Value]) -> String {
    match kind {
        ScalarKind::String => "z.string()".to_string(),
        ScalarKind::Boolean => "z.boolean()".to_string(),
        ScalarKind::Number => {
            let numbers: Vec<&Value> = samples.iter().copied().filter(|v| v.is_number()).collect();
            let integral = !numbers.is_empty() && numbers.iter().all(|v| v.is_i64() || v.is_u64());
            if integral {
                "z.number().int()".to_string()
            } else {
                "z.number()".to_string()
            }
        }
    }
}

/// Bare identifier when the key is one, otherwise a quoted string literal.
///
/// A bare `__proto__` in an object literal sets the prototype instead of declaring a key, so it
/// is always quoted.
fn object_key(key: &str) -> String {
    if is_identifier(key) && key != "__proto__" {
        key.to_string()
    } else {
        string_literal(key)
    }
}

fn is_identifier(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// Single-quoted literal with backslash, quote and control characters escaped.
pub fn string_literal(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len() + 2);
    out.push('\'');
    for c in raw.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => out.push_str(&format!("\\u{{{:x}}}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}
