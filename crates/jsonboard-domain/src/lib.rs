//! Pure JSON shape engine (no IO).
//!
//! Input: parsed JSON values and data-relative paths supplied by the caller.
//! Output: inferred shapes, emitted schema modules, validation results, health reports and
//! mutated collection roots.

#![forbid(unsafe_code)]

pub mod emit;
pub mod error;
pub mod health;
pub mod records;
pub mod shape;
pub mod validate;

mod infer;

#[cfg(test)]
mod proptest;
#[cfg(test)]
mod test_support;

pub use emit::{EmitOptions, SchemaSource, assign_names, emit_module};
pub use error::{EmitError, RecordError};
pub use health::{
    MAX_HEALTHY_ARRAY_LEN, MAX_HEALTHY_DEPTH, check_health_text, check_health_value, max_depth,
};
pub use infer::{ARRAY_SAMPLE_SIZE, infer, infer_field};
pub use records::{
    Mutation, append_record, delete_by_id, into_patch, update_by_id, update_by_index,
};
pub use shape::{ScalarKind, ShapeField, ShapeNode};
pub use validate::{validate_text, validate_value};
