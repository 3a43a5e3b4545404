//! Use case orchestration for jsonboard.
//!
//! This crate provides the application layer: use cases that coordinate the domain, repo, and
//! settings layers. It is intentionally thin and delegates heavy lifting to the appropriate layers.
//!
//! The CLI crate depends on this; it only handles argument parsing and I/O.

#![forbid(unsafe_code)]

mod config;
mod error;
mod files;
mod inspect;
mod records;
mod schema;

pub use config::{load_config, open_store, scan_policy};
pub use error::{AppError, ErrorKind};
pub use files::{create_file, delete_file, file_path, list_files, read_file, save_file};
pub use inspect::{check_health, check_health_all, infer_shape, validate_file};
pub use records::{add_record, delete_record, update_record_by_id, update_record_by_index};
pub use schema::{SchemaModule, generate_schema, write_text};
