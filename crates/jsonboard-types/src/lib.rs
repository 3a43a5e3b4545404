//! Stable DTOs shared across the jsonboard workspace.
//!
//! This crate is intentionally boring:
//! - canonical data-directory-relative path handling
//! - validation results and health reports handed to callers
//! - file listing and file view payloads
//! - stable issue messages and suggestions

#![forbid(unsafe_code)]

pub mod files;
pub mod ids;
pub mod path;
pub mod validation;

pub use files::{FileMetadata, FileSummary, FileView};
pub use path::DataPath;
pub use validation::{HealthReport, PathSegment, ValidationIssue, ValidationResult};
