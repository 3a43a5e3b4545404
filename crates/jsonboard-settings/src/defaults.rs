use crate::resolve::{ResolvedConfig, ScanSettings};

pub const DEFAULT_DIR: &str = "data";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_SCHEMA_OUT: &str = "jsonboard.schema.ts";

/// Directory levels below the data directory that discovery descends into.
pub const DEFAULT_MAX_DEPTH: usize = 3;

/// Values used when neither the config file nor the command line sets a field.
pub fn defaults() -> ResolvedConfig {
    ResolvedConfig {
        dir: DEFAULT_DIR.to_string(),
        port: DEFAULT_PORT,
        open: true,
        schema_out: DEFAULT_SCHEMA_OUT.to_string(),
        scan: ScanSettings {
            max_depth: DEFAULT_MAX_DEPTH,
            ignore: Vec::new(),
            ignore_config_files: true,
        },
    }
}
