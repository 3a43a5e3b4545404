//! JSON file discovery under a data directory.

use crate::error::StoreError;
use camino::{Utf8Path, Utf8PathBuf};
use globset::{Glob, GlobSet, GlobSetBuilder};
use jsonboard_types::DataPath;
use rayon::prelude::*;
use std::path::PathBuf;
use walkdir::WalkDir;

/// Build output, caches, VCS metadata and editor state. Matched against every path component.
pub const IGNORED_NAMES: &[&str] = &[
    "node_modules",
    ".next",
    ".git",
    "dist",
    "build",
    ".nuxt",
    ".output",
    "coverage",
    ".nyc_output",
    ".tmp",
    ".temp",
    ".cache",
    ".vscode",
    ".idea",
    "*.log",
];

/// Tool configuration that happens to be JSON. Skipped only directly under the data directory.
pub const ROOT_CONFIG_FILES: &[&str] = &[
    "package.json",
    "package-lock.json",
    "tsconfig.json",
    "jsconfig.json",
    "tailwind.config.json",
    "next.config.json",
    "vite.config.json",
    "webpack.config.json",
    "babel.config.json",
    "eslint.config.json",
    ".eslintrc.json",
    "prettier.config.json",
    ".prettierrc.json",
    "jest.config.json",
    "cypress.config.json",
    "vercel.json",
    "netlify.json",
];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScanPolicy {
    /// Directory levels below the data directory to descend into; 0 lists only top-level files.
    pub max_depth: usize,
    /// Extra globs, matched against each path component and against the whole relative path.
    pub extra_ignore: Vec<String>,
    pub ignore_config_files: bool,
}

impl Default for ScanPolicy {
    fn default() -> Self {
        Self {
            max_depth: 3,
            extra_ignore: Vec::new(),
            ignore_config_files: true,
        }
    }
}

/// Compiled form of [`ScanPolicy`].
#[derive(Clone, Debug)]
pub struct ScanFilter {
    max_depth: usize,
    names: GlobSet,
    paths: GlobSet,
    ignore_config_files: bool,
}

impl ScanFilter {
    pub fn new(policy: &ScanPolicy) -> Result<Self, StoreError> {
        let builtin: Vec<String> = IGNORED_NAMES.iter().map(|s| s.to_string()).collect();
        let names = build_globset(builtin.iter().chain(&policy.extra_ignore))?;
        let paths = build_globset(policy.extra_ignore.iter())?;
        Ok(Self {
            max_depth: policy.max_depth,
            names,
            paths,
            ignore_config_files: policy.ignore_config_files,
        })
    }

    /// True when a directory at `rel` may be descended into.
    pub fn allows_dir(&self, rel: &DataPath) -> bool {
        let components: Vec<&str> = rel.as_str().split('/').collect();
        components.len() <= self.max_depth
            && components
                .iter()
                .all(|c| !c.starts_with('.') && !self.names.is_match(c))
            && !self.paths.is_match(rel.as_str())
    }

    /// True when a file at `rel` belongs in the listing (parse validity is checked separately).
    pub fn allows_file(&self, rel: &DataPath) -> bool {
        if !rel.has_json_extension() || rel.escapes_root() {
            return false;
        }
        let components: Vec<&str> = rel.as_str().split('/').collect();
        let Some((file, dirs)) = components.split_last() else {
            return false;
        };

        if dirs.is_empty() && self.ignore_config_files && ROOT_CONFIG_FILES.contains(file) {
            return false;
        }
        if dirs.len() > self.max_depth {
            return false;
        }
        if dirs
            .iter()
            .any(|d| d.starts_with('.') || self.names.is_match(d))
        {
            return false;
        }
        !self.names.is_match(file) && !self.paths.is_match(rel.as_str())
    }
}

/// Discover JSON files under `root`, sorted by relative path.
///
/// Ignored directories are pruned during the walk. Candidates are then read and parsed in parallel;
/// files that fail to read or parse are left out.
pub fn discover_json_files(root: &Utf8Path, filter: &ScanFilter) -> Result<Vec<DataPath>, StoreError> {
    if !root.is_dir() {
        return Err(StoreError::Io {
            path: DataPath::new(root.as_str()),
            source: std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "data directory does not exist",
            ),
        });
    }

    let candidates: Vec<DataPath> = WalkDir::new(root)
        .min_depth(1)
        .max_depth(filter.max_depth + 1)
        .into_iter()
        .filter_entry(|e| {
            if !e.file_type().is_dir() || e.depth() == 0 {
                return true;
            }
            relative(root, e.path().to_path_buf()).is_some_and(|rel| filter.allows_dir(&rel))
        })
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter_map(|e| relative(root, e.path().to_path_buf()))
        .filter(|rel| filter.allows_file(rel))
        .collect();

    let mut out: Vec<DataPath> = candidates
        .into_par_iter()
        .filter(|rel| parses_as_json(&root.join(rel.as_str())))
        .collect();

    // Stable order.
    out.sort();
    out.dedup();
    Ok(out)
}

fn parses_as_json(path: &Utf8Path) -> bool {
    std::fs::read_to_string(path)
        .ok()
        .is_some_and(|text| serde_json::from_str::<serde_json::Value>(&text).is_ok())
}

fn relative(root: &Utf8Path, abs: PathBuf) -> Option<DataPath> {
    let abs = Utf8PathBuf::from_path_buf(abs).ok()?;
    let rel = abs.strip_prefix(root).ok()?;
    Some(DataPath::from(rel))
}

fn build_globset<'a>(patterns: impl Iterator<Item = &'a String>) -> Result<GlobSet, StoreError> {
    let mut b = GlobSetBuilder::new();
    for p in patterns {
        let glob = Glob::new(p).map_err(|e| StoreError::InvalidPattern {
            pattern: p.clone(),
            message: e.to_string(),
        })?;
        b.add(glob);
    }
    b.build().map_err(|e| StoreError::InvalidPattern {
        pattern: String::new(),
        message: e.to_string(),
    })
}
