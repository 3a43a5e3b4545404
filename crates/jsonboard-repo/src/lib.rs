//! Storage adapters: read, write and discover JSON files.
//!
//! This crate is allowed to do filesystem IO. It does no JSON interpretation beyond checking that
//! discovered files parse; everything else happens in `jsonboard-domain`.

#![forbid(unsafe_code)]

mod discover;
mod error;
mod fs_store;
mod mem_store;
mod store;

pub use discover::{IGNORED_NAMES, ROOT_CONFIG_FILES, ScanFilter, ScanPolicy, discover_json_files};
pub use error::StoreError;
pub use fs_store::FsStore;
pub use mem_store::MemStore;
pub use store::{JsonStore, StoredMeta, check_path};
