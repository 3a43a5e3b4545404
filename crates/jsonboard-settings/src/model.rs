use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// `jsonboard.toml` schema v1.
///
/// This is a *user-facing* config model: every field is optional and unknown keys are ignored so
/// forward-compat is easy.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct JsonboardConfigV1 {
    /// Optional schema string for tooling (`jsonboard.config.v1`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Directory holding the JSON files, relative to the config file's directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<String>,

    /// Port of the browser UI. Recorded for compatibility; the CLI does not serve.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open: Option<bool>,

    /// Where `init-schema` writes the generated module, relative to the data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_out: Option<String>,

    #[serde(default)]
    pub scan: ScanConfig,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ScanConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<usize>,

    /// Extra glob patterns matched against file and directory names.
    #[serde(default)]
    pub ignore: Vec<String>,

    /// Skip well-known tool config files (`package.json`, `tsconfig.json`, ...) at the data root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ignore_config_files: Option<bool>,
}
