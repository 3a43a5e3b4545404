//! Typed failures of the pure engine.

use thiserror::Error;

/// Record-level mutation failures. The input root is never modified when one is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("file is not an array")]
    NotArray,

    #[error("record index {index} out of bounds (length {len})")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("record not found: id {id}")]
    RecordNotFound { id: i64 },

    #[error("record patch must be a JSON object")]
    PatchNotObject,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EmitError {
    /// Two inputs still map to the same identifier after every disambiguation step.
    #[error("schema name collision: {name} is generated for {}", paths.join(", "))]
    NameCollision { name: String, paths: Vec<String> },
}
