use anyhow::Context;
use camino::Utf8Path;
use jsonboard_repo::{FsStore, ScanPolicy};
use jsonboard_settings::{JsonboardConfigV1, Overrides, ResolvedConfig};

/// Parse and resolve config text; empty text means defaults.
pub fn load_config(config_text: &str, overrides: Overrides) -> anyhow::Result<ResolvedConfig> {
    let cfg = if config_text.trim().is_empty() {
        JsonboardConfigV1::default()
    } else {
        jsonboard_settings::parse_config_toml(config_text).context("parse config")?
    };
    jsonboard_settings::resolve_config(cfg, overrides).context("resolve config")
}

pub fn scan_policy(config: &ResolvedConfig) -> ScanPolicy {
    ScanPolicy {
        max_depth: config.scan.max_depth,
        extra_ignore: config.scan.ignore.clone(),
        ignore_config_files: config.scan.ignore_config_files,
    }
}

/// Filesystem store over `base/<config.dir>`.
pub fn open_store(base: &Utf8Path, config: &ResolvedConfig) -> anyhow::Result<FsStore> {
    let root = base.join(&config.dir);
    tracing::debug!(root = %root, "opening data directory");
    FsStore::new(root.clone(), &scan_policy(config))
        .with_context(|| format!("open data directory {root}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let cfg = load_config("  \n", Overrides::default()).expect("config");
        assert_eq!(cfg, ResolvedConfig::default());
        assert_eq!(scan_policy(&cfg), ScanPolicy::default());
    }

    #[test]
    fn bad_toml_has_context() {
        let err = load_config("dir = ", Overrides::default()).unwrap_err();
        assert!(err.to_string().contains("parse config"));
    }

    #[test]
    fn scan_settings_carry_over() {
        let cfg = load_config(
            "[scan]\nmax_depth = 1\nignore = [\"drafts\"]\n",
            Overrides::default(),
        )
        .expect("config");
        let policy = scan_policy(&cfg);
        assert_eq!(policy.max_depth, 1);
        assert_eq!(policy.extra_ignore, vec!["drafts".to_string()]);
    }
}
