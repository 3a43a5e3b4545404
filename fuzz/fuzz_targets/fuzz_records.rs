//! Fuzz target for record mutations.
//!
//! Goal: mutations on arbitrary documents return errors instead of panicking, and a
//! successful append always grows a collection by one.

#![no_main]

use arbitrary::Arbitrary;
use jsonboard_domain::{append_record, delete_by_id, into_patch, update_by_id, update_by_index};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input {
    root: String,
    body: String,
    id: i64,
    index: usize,
}

fuzz_target!(|input: Input| {
    let Ok(root) = serde_json::from_str::<serde_json::Value>(&input.root) else {
        return;
    };
    let Ok(body) = serde_json::from_str::<serde_json::Value>(&input.body) else {
        return;
    };

    if let Ok(m) = append_record(&root, body.clone()) {
        let before = root.as_array().map_or(0, Vec::len);
        assert_eq!(m.root.as_array().map_or(0, Vec::len), before + 1);
    }

    if let Ok(patch) = into_patch(body) {
        let _ = update_by_id(&root, input.id, &patch);
        let _ = update_by_index(&root, input.index, &patch);
    }

    let _ = delete_by_id(&root, input.id);
});
