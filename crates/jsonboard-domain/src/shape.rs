use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScalarKind {
    String,
    Number,
    Boolean,
}

impl ScalarKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ScalarKind::String => "string",
            ScalarKind::Number => "number",
            ScalarKind::Boolean => "boolean",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShapeField {
    pub name: String,
    pub shape: ShapeNode,
}

/// Inferred structural type of a JSON value.
///
/// Integer-vs-float is not tracked here; numbers are `Scalar(Number)` and the emitter decides
/// formatting from sample literals.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ShapeNode {
    Null,
    /// Key absent from its object.
    Undefined,
    Scalar { scalar: ScalarKind },
    Unknown,
    Array { element: Box<ShapeNode> },
    /// Fields in first-seen order.
    Object { fields: Vec<ShapeField> },
    /// Never nested, never fewer than two members. Build with [`ShapeNode::union`].
    Union { members: Vec<ShapeNode> },
}

impl ShapeNode {
    pub fn scalar(kind: ScalarKind) -> Self {
        ShapeNode::Scalar { scalar: kind }
    }

    pub fn array(element: ShapeNode) -> Self {
        ShapeNode::Array {
            element: Box::new(element),
        }
    }

    pub fn object<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = (S, ShapeNode)>,
        S: Into<String>,
    {
        ShapeNode::Object {
            fields: fields
                .into_iter()
                .map(|(name, shape)| ShapeField {
                    name: name.into(),
                    shape,
                })
                .collect(),
        }
    }

    /// Build a union: nested unions are flattened, structural duplicates dropped (first
    /// occurrence wins), a single survivor is returned as-is and an empty input is `Unknown`.
    pub fn union<I>(members: I) -> Self
    where
        I: IntoIterator<Item = ShapeNode>,
    {
        let mut flat: Vec<ShapeNode> = Vec::new();
        for member in members {
            match member {
                ShapeNode::Union { members: inner } => {
                    for m in inner {
                        push_distinct(&mut flat, m);
                    }
                }
                other => push_distinct(&mut flat, other),
            }
        }

        match flat.len() {
            0 => ShapeNode::Unknown,
            1 => flat.remove(0),
            _ => ShapeNode::Union { members: flat },
        }
    }

    /// True when a missing object key satisfies this shape.
    pub fn accepts_missing(&self) -> bool {
        match self {
            ShapeNode::Undefined | ShapeNode::Unknown => true,
            ShapeNode::Union { members } => members.iter().any(ShapeNode::accepts_missing),
            _ => false,
        }
    }

    /// Short label for listings: `string`, `array<number>`, `object{3}`, `union(2)`.
    pub fn describe(&self) -> String {
        match self {
            ShapeNode::Null => "null".to_string(),
            ShapeNode::Undefined => "undefined".to_string(),
            ShapeNode::Scalar { scalar } => scalar.as_str().to_string(),
            ShapeNode::Unknown => "unknown".to_string(),
            ShapeNode::Array { element } => format!("array<{}>", element.describe()),
            ShapeNode::Object { fields } => format!("object{{{}}}", fields.len()),
            ShapeNode::Union { members } => format!("union({})", members.len()),
        }
    }
}

fn push_distinct(out: &mut Vec<ShapeNode>, shape: ShapeNode) {
    if !out.contains(&shape) {
        out.push(shape);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn union_flattens_and_dedups() {
        let inner = ShapeNode::union([
            ShapeNode::scalar(ScalarKind::String),
            ShapeNode::scalar(ScalarKind::Boolean),
        ]);
        let u = ShapeNode::union([
            ShapeNode::scalar(ScalarKind::Number),
            inner,
            ShapeNode::scalar(ScalarKind::String),
        ]);
        assert_eq!(
            u,
            ShapeNode::Union {
                members: vec![
                    ShapeNode::scalar(ScalarKind::Number),
                    ShapeNode::scalar(ScalarKind::String),
                    ShapeNode::scalar(ScalarKind::Boolean),
                ]
            }
        );
    }

    #[test]
    fn union_of_one_collapses() {
        let u = ShapeNode::union([ShapeNode::Null, ShapeNode::Null]);
        assert_eq!(u, ShapeNode::Null);
        assert_eq!(ShapeNode::union(Vec::new()), ShapeNode::Unknown);
    }

    #[test]
    fn accepts_missing_sees_through_unions() {
        assert!(ShapeNode::union([ShapeNode::Undefined, ShapeNode::Null]).accepts_missing());
        assert!(!ShapeNode::Null.accepts_missing());
    }

    #[test]
    fn describe_labels() {
        let s = ShapeNode::array(ShapeNode::object([("a", ShapeNode::Null)]));
        assert_eq!(s.describe(), "array<object{1}>");
    }

    #[test]
    fn serializes_with_kind_tag() {
        let json = serde_json::to_value(ShapeNode::scalar(ScalarKind::Number)).expect("serialize");
        assert_eq!(json, serde_json::json!({"kind": "scalar", "scalar": "number"}));
    }
}
