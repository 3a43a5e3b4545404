//! Property-based tests for the domain crate.
//!
//! These tests use proptest to verify invariants around:
//! - Inference determinism and union flattening
//! - The array sampling bound
//! - Self-validation of small documents
//! - Record mutations leaving the input untouched on failure

use crate::emit::{EmitOptions, SchemaSource, assign_names, emit_module};
use crate::infer::{ARRAY_SAMPLE_SIZE, infer};
use crate::records::{append_record, delete_by_id, update_by_id, update_by_index};
use crate::shape::ShapeNode;
use crate::test_support::duplicate_identifiers;
use crate::validate::validate_value;
use jsonboard_types::DataPath;
use proptest::prelude::*;
use serde_json::{Map, Value, json};

// ============================================================================
// Strategies for generating arbitrary values
// ============================================================================

fn arb_key() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z][a-z0-9_]{0,7}").unwrap()
}

fn arb_leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        (-1000i64..1000).prop_map(Value::from),
        (-1.0e6f64..1.0e6).prop_map(Value::from),
        prop::string::string_regex("[a-zA-Z0-9 ]{0,12}")
            .unwrap()
            .prop_map(Value::from),
    ]
}

/// Arbitrary JSON with arrays of at most `max_len` elements.
fn arb_json(max_len: usize) -> impl Strategy<Value = Value> {
    arb_leaf().prop_recursive(4, 48, max_len as u32, move |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..=max_len).prop_map(Value::Array),
            prop::collection::vec((arb_key(), inner), 0..=max_len)
                .prop_map(|pairs| Value::Object(pairs.into_iter().collect::<Map<_, _>>())),
        ]
    })
}

fn arb_record() -> impl Strategy<Value = Value> {
    let field = arb_key().prop_filter("id is assigned separately", |k| k != "id");
    (1i64..50, field, arb_leaf()).prop_map(|(id, key, v)| {
        let mut map = Map::new();
        map.insert("id".to_string(), Value::from(id));
        map.insert(key, v);
        Value::Object(map)
    })
}

fn arb_collection() -> impl Strategy<Value = Value> {
    prop::collection::vec(arb_record(), 0..8).prop_map(Value::Array)
}

fn contains_nested_union(shape: &ShapeNode, inside_union: bool) -> bool {
    match shape {
        ShapeNode::Union { members } => {
            inside_union
                || members.len() < 2
                || members.iter().any(|m| contains_nested_union(m, true))
        }
        ShapeNode::Array { element } => contains_nested_union(element, false),
        ShapeNode::Object { fields } => fields
            .iter()
            .any(|f| contains_nested_union(&f.shape, false)),
        _ => false,
    }
}

// ============================================================================
// Inference
// ============================================================================

proptest! {
    #[test]
    fn inference_is_deterministic(value in arb_json(6)) {
        prop_assert_eq!(infer(&value), infer(&value.clone()));
    }

    #[test]
    fn unions_are_flat_and_never_trivial(value in arb_json(6)) {
        prop_assert!(!contains_nested_union(&infer(&value), false));
    }

    #[test]
    fn sampling_bound_hides_repeated_copies(value in arb_json(3), copies in ARRAY_SAMPLE_SIZE..100) {
        let few = Value::Array(vec![value.clone(); ARRAY_SAMPLE_SIZE]);
        let many = Value::Array(vec![value; copies]);
        prop_assert_eq!(infer(&few), infer(&many));
    }

    #[test]
    fn small_documents_validate_against_their_own_shape(value in arb_json(ARRAY_SAMPLE_SIZE)) {
        let issues = validate_value(&value, &infer(&value));
        prop_assert!(issues.is_empty(), "unexpected issues: {:?}", issues);
    }
}

// ============================================================================
// Naming
// ============================================================================

proptest! {
    #[test]
    fn naming_is_idempotent(paths in prop::collection::btree_set(
        prop::string::string_regex("([a-zA-Z]{1,6}/){0,2}[a-zA-Z0-9_-]{1,8}\\.json").unwrap(),
        0..12,
    )) {
        let paths: Vec<DataPath> = paths.iter().map(DataPath::new).collect();
        let first = assign_names(&paths);
        let second = assign_names(&paths);
        prop_assert_eq!(first.clone(), second);

        // Distinct paths always resolve to distinct names.
        let names = first.unwrap();
        let unique: std::collections::BTreeSet<_> = names.iter().collect();
        prop_assert_eq!(unique.len(), names.len());

        // Every declared export is unique, including derived functions and types.
        let sources: Vec<SchemaSource> = paths
            .iter()
            .map(|path| SchemaSource {
                path: path.clone(),
                shape: ShapeNode::Null,
                sample: Value::Null,
            })
            .collect();
        let module = emit_module(&sources, &EmitOptions::default()).unwrap();
        prop_assert_eq!(duplicate_identifiers(&module), Vec::<String>::new());
    }
}

// ============================================================================
// Record mutations
// ============================================================================

proptest! {
    #[test]
    fn append_preserves_existing_records(root in arb_collection(), name in arb_key()) {
        let before = root.clone();
        let m = append_record(&root, json!({ "name": name })).unwrap();
        prop_assert_eq!(&root, &before);

        let old = root.as_array().unwrap();
        let new = m.root.as_array().unwrap();
        prop_assert_eq!(new.len(), old.len() + 1);
        prop_assert_eq!(&new[..old.len()], &old[..]);

        let max = old.iter().filter_map(|r| r["id"].as_i64()).max().unwrap_or(0);
        prop_assert_eq!(m.record["id"].as_i64(), Some(max + 1));
    }

    #[test]
    fn failed_mutations_report_errors(root in arb_collection(), missing in 100i64..200) {
        let len = root.as_array().unwrap().len();
        let patch = Map::new();
        prop_assert!(update_by_id(&root, missing, &patch).is_err());
        prop_assert!(delete_by_id(&root, missing).is_err());
        prop_assert!(update_by_index(&root, len, &patch).is_err());
    }

    #[test]
    fn delete_removes_exactly_one_record(root in arb_collection()) {
        let items = root.as_array().unwrap();
        prop_assume!(!items.is_empty());
        let id = items[0]["id"].as_i64().unwrap();

        let m = delete_by_id(&root, id).unwrap();
        prop_assert_eq!(&m.record, &items[0]);
        prop_assert_eq!(m.root.as_array().unwrap().len(), items.len() - 1);
    }

    #[test]
    fn update_by_id_keeps_the_id(root in arb_collection(), key in arb_key(), v in arb_leaf()) {
        let items = root.as_array().unwrap();
        prop_assume!(!items.is_empty());
        let id = items[0]["id"].as_i64().unwrap();

        let mut patch = Map::new();
        patch.insert("id".to_string(), json!(999));
        patch.insert(key.clone(), v.clone());
        let m = update_by_id(&root, id, &patch).unwrap();

        prop_assert_eq!(&m.record["id"], &json!(id));
        if key != "id" {
            prop_assert_eq!(&m.record[key.as_str()], &v);
        }
    }
}
