//! Config parsing and override resolution.
//!
//! This crate is intentionally IO-free: it parses and resolves configuration provided as strings.

#![forbid(unsafe_code)]

mod defaults;
mod model;
mod resolve;

pub use defaults::{DEFAULT_DIR, DEFAULT_MAX_DEPTH, DEFAULT_PORT, DEFAULT_SCHEMA_OUT};
pub use model::{JsonboardConfigV1, ScanConfig};
pub use resolve::{Overrides, ResolvedConfig, ScanSettings};

/// Parse `jsonboard.toml` (or equivalent) into a typed model.
pub fn parse_config_toml(input: &str) -> anyhow::Result<JsonboardConfigV1> {
    let cfg: JsonboardConfigV1 = toml::from_str(input)?;
    Ok(cfg)
}

/// Resolve the effective config: defaults, then file values, then CLI overrides.
pub fn resolve_config(
    cfg: JsonboardConfigV1,
    overrides: Overrides,
) -> anyhow::Result<ResolvedConfig> {
    resolve::resolve_config(cfg, overrides)
}
