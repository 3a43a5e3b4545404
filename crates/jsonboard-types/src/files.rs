use crate::DataPath;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use time::OffsetDateTime;

/// Per-file facts shown in listings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FileMetadata {
    /// Size on disk in bytes.
    pub size: u64,
    /// Array length for collection files, `1` for single-object files, `0` when unreadable.
    pub record_count: usize,
    #[serde(with = "time::serde::rfc3339::option", default)]
    #[schemars(with = "Option<String>")]
    pub last_modified: Option<OffsetDateTime>,
    pub is_array: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FileSummary {
    pub filename: String,
    pub relative_path: DataPath,
    pub metadata: FileMetadata,
}

/// A file's parsed content plus its metadata.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FileView {
    pub filename: String,
    pub relative_path: DataPath,
    pub data: JsonValue,
    pub is_array: bool,
    pub metadata: FileMetadata,
}
