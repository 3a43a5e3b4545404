use serde_json::{Map, Value, json};

/// Collection of `n` uniform records with sequential ids.
pub fn records(n: usize) -> Value {
    Value::Array(
        (1..=n)
            .map(|i| json!({"id": i, "name": format!("item-{i}")}))
            .collect(),
    )
}

/// Object whose deepest leaf sits at exactly `depth`.
pub fn nested(depth: usize) -> Value {
    let mut v = json!(1);
    for _ in 0..depth {
        v = json!({ "inner": v });
    }
    v
}

pub fn patch(value: Value) -> Map<String, Value> {
    value.as_object().cloned().expect("patch must be an object")
}

/// Names introduced by `export const|function|type` lines of an emitted module, in order.
pub fn declared_identifiers(module: &str) -> Vec<String> {
    module
        .lines()
        .filter_map(|line| {
            ["export const ", "export function ", "export type "]
                .iter()
                .find_map(|prefix| line.strip_prefix(prefix))
        })
        .map(|rest| {
            rest.chars()
                .take_while(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '$')
                .collect()
        })
        .collect()
}

/// Identifiers declared more than once.
pub fn duplicate_identifiers(module: &str) -> Vec<String> {
    let mut seen = std::collections::BTreeSet::new();
    let mut dups = std::collections::BTreeSet::new();
    for ident in declared_identifiers(module) {
        if !seen.insert(ident.clone()) {
            dups.insert(ident);
        }
    }
    dups.into_iter().collect()
}
