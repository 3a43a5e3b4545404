//! Shared test utilities for the jsonboard workspace.
//!
//! Integration tests in several crates copy fixtures and compare command output; a
//! `#[cfg(test)]` module inside one crate would not be reachable from the others.

use serde_json::Value;
use std::io;
use std::path::Path;

pub const TIMESTAMP_PLACEHOLDER: &str = "__TIMESTAMP__";

/// Replace `lastModified` values at any depth with [`TIMESTAMP_PLACEHOLDER`].
///
/// `null` stays `null` so a missing timestamp is still visible in goldens.
pub fn normalize_nondeterministic(mut value: Value) -> Value {
    normalize_recursive(&mut value);
    value
}

fn normalize_recursive(value: &mut Value) {
    match value {
        Value::Object(map) => {
            if let Some(ts) = map.get_mut("lastModified")
                && !ts.is_null()
            {
                *ts = Value::String(TIMESTAMP_PLACEHOLDER.to_string());
            }
            for val in map.values_mut() {
                normalize_recursive(val);
            }
        }
        Value::Array(arr) => {
            for val in arr.iter_mut() {
                normalize_recursive(val);
            }
        }
        _ => {}
    }
}

/// Replace the `Generated on:` header line of an emitted schema module.
pub fn normalize_generated_on(text: &str) -> String {
    text.lines()
        .map(|line| {
            if line.trim_start().starts_with("* Generated on:") {
                format!(" * Generated on: {TIMESTAMP_PLACEHOLDER}")
            } else {
                line.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
        + if text.ends_with('\n') { "\n" } else { "" }
}

/// Recursively copy `src` into `dst` (created if missing).
pub fn copy_dir(src: &Path, dst: &Path) -> io::Result<()> {
    std::fs::create_dir_all(dst)?;
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let target = dst.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copy_dir(&entry.path(), &target)?;
        } else {
            std::fs::copy(entry.path(), target)?;
        }
    }
    Ok(())
}
