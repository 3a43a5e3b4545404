use crate::{defaults, model::JsonboardConfigV1};
use anyhow::Context;
use globset::Glob;

/// Command-line values; each one set here wins over the config file.
#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub dir: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub dir: String,
    pub port: u16,
    pub open: bool,
    pub schema_out: String,
    pub scan: ScanSettings,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        defaults::defaults()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScanSettings {
    pub max_depth: usize,
    pub ignore: Vec<String>,
    pub ignore_config_files: bool,
}

pub fn resolve_config(
    cfg: JsonboardConfigV1,
    overrides: Overrides,
) -> anyhow::Result<ResolvedConfig> {
    let mut resolved = defaults::defaults();

    if let Some(dir) = overrides.dir.or(cfg.dir) {
        anyhow::ensure!(!dir.trim().is_empty(), "dir must not be empty");
        resolved.dir = dir;
    }
    if let Some(port) = cfg.port {
        anyhow::ensure!(port != 0, "port must be between 1 and 65535");
        resolved.port = port;
    }
    if let Some(open) = cfg.open {
        resolved.open = open;
    }
    if let Some(out) = cfg.schema_out {
        validate_schema_out(&out)?;
        resolved.schema_out = out;
    }

    if let Some(depth) = cfg.scan.max_depth {
        resolved.scan.max_depth = depth;
    }
    if let Some(skip) = cfg.scan.ignore_config_files {
        resolved.scan.ignore_config_files = skip;
    }
    validate_ignore_globs(&cfg.scan.ignore)?;
    resolved.scan.ignore = cfg.scan.ignore;

    Ok(resolved)
}

fn validate_ignore_globs(patterns: &[String]) -> anyhow::Result<()> {
    for pattern in patterns {
        Glob::new(pattern).with_context(|| format!("invalid scan.ignore glob: {pattern}"))?;
    }
    Ok(())
}

fn validate_schema_out(out: &str) -> anyhow::Result<()> {
    if out.trim().is_empty() {
        anyhow::bail!("schema_out must not be empty");
    }
    if out.split(['/', '\\']).any(|part| part == "..") {
        anyhow::bail!("schema_out must stay inside the data directory: {out}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_config_toml;

    #[test]
    fn empty_config_resolves_to_defaults() {
        let cfg = parse_config_toml("").unwrap();
        let resolved = resolve_config(cfg, Overrides::default()).unwrap();
        assert_eq!(resolved, ResolvedConfig::default());
        assert_eq!(resolved.dir, "data");
        assert_eq!(resolved.port, 3000);
        assert!(resolved.open);
        assert_eq!(resolved.scan.max_depth, 3);
    }

    #[test]
    fn file_values_apply() {
        let cfg = parse_config_toml(
            r#"
dir = "fixtures"
port = 4000
open = false
schema_out = "types/schema.ts"

[scan]
max_depth = 1
ignore = ["*.bak.json", "drafts"]
ignore_config_files = false
"#,
        )
        .unwrap();
        let resolved = resolve_config(cfg, Overrides::default()).unwrap();
        assert_eq!(resolved.dir, "fixtures");
        assert_eq!(resolved.port, 4000);
        assert!(!resolved.open);
        assert_eq!(resolved.schema_out, "types/schema.ts");
        assert_eq!(resolved.scan.max_depth, 1);
        assert_eq!(resolved.scan.ignore, vec!["*.bak.json", "drafts"]);
        assert!(!resolved.scan.ignore_config_files);
    }

    #[test]
    fn overrides_win_over_file() {
        let cfg = parse_config_toml("dir = \"a\"\nport = 4000\n").unwrap();
        let overrides = Overrides {
            dir: Some("b".to_string()),
        };
        let resolved = resolve_config(cfg, overrides).unwrap();
        assert_eq!(resolved.dir, "b");
        assert_eq!(resolved.port, 4000);
    }

    #[test]
    fn invalid_glob_is_rejected() {
        let cfg = parse_config_toml("[scan]\nignore = [\"a[\"]\n").unwrap();
        let err = resolve_config(cfg, Overrides::default()).unwrap_err();
        assert!(err.to_string().contains("invalid scan.ignore glob"));
    }

    #[test]
    fn schema_out_cannot_escape() {
        let cfg = parse_config_toml("schema_out = \"../schema.ts\"\n").unwrap();
        assert!(resolve_config(cfg, Overrides::default()).is_err());
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let cfg = parse_config_toml("colour = \"blue\"\n").unwrap();
        assert_eq!(cfg, JsonboardConfigV1::default());
    }
}
