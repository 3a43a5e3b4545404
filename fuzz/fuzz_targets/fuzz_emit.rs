//! Fuzz target for schema naming and module emission.
//!
//! Goal: any set of paths and sample documents either emits a module or reports a name
//! collision. Panics are unacceptable.

#![no_main]

use arbitrary::Arbitrary;
use jsonboard_domain::{EmitOptions, SchemaSource, emit_module, infer};
use jsonboard_types::DataPath;
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input {
    files: Vec<(String, String)>,
}

fuzz_target!(|input: Input| {
    let sources: Vec<SchemaSource> = input
        .files
        .iter()
        .take(16)
        .filter_map(|(path, text)| {
            let sample: serde_json::Value = serde_json::from_str(text).ok()?;
            Some(SchemaSource {
                path: DataPath::new(format!("{path}.json")),
                shape: infer(&sample),
                sample,
            })
        })
        .collect();

    let _ = emit_module(&sources, &EmitOptions::default());
});
