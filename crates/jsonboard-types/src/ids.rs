//! Stable messages for health issues and suggestions.
//!
//! Callers (the UI, the CLI) match on these strings, so keep them stable.

// Health issues
pub const ISSUE_DEEP_NESTING: &str = "JSON structure is very deeply nested (>10 levels)";
pub const ISSUE_LARGE_ARRAY: &str = "Large array detected (>1000 items)";

// Suggestions
pub const SUGGEST_FIX_SYNTAX: &str = "Fix the JSON syntax before editing this file";
pub const SUGGEST_NORMALIZE_RECORDS: &str =
    "Normalize records so every element shares the same fields and types";
pub const SUGGEST_FLATTEN: &str = "Consider flattening the structure for better performance";
pub const SUGGEST_PAGINATE: &str = "Consider paginating or splitting into multiple files";

// Validation messages
pub const MSG_PARSE_PREFIX: &str = "Failed to parse JSON";
pub const MSG_REQUIRED: &str = "Required";
pub const MSG_INVALID_UNION: &str = "Invalid input";

// File listing
pub const FILE_ERROR_INVALID_JSON: &str = "Invalid JSON";
