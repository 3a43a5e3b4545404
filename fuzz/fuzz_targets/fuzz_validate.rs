//! Fuzz target for self-validation and health checks.
//!
//! Goal: arbitrary text never panics. Unparsable input must come back as an invalid result
//! with one issue rather than an error.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_validate
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        let result = jsonboard_domain::validate_text(text);
        if serde_json::from_str::<serde_json::Value>(text).is_err() {
            assert!(!result.valid);
            assert_eq!(result.errors.len(), 1);
        }

        let _ = jsonboard_domain::check_health_text(text);
    }
});
