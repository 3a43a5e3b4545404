use camino::{Utf8Component, Utf8Path, Utf8PathBuf};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Canonical path of a JSON file relative to the data directory.
///
/// Normalization rules are intentionally simple and deterministic:
/// - always forward slashes (`/`)
/// - no leading `./`
/// - never empty (`.` stands for the data directory itself)
#[derive(
    Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(transparent)]
pub struct DataPath(String);

impl Default for DataPath {
    fn default() -> Self {
        DataPath::new(".")
    }
}

impl DataPath {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        let mut v = s.as_ref().replace('\\', "/");
        while v.starts_with("./") {
            v = v.trim_start_matches("./").to_string();
        }
        if v.is_empty() {
            v = ".".to_string();
        }
        Self(v)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// File name without its final extension (`users` for `people/users.json`).
    pub fn file_stem(&self) -> &str {
        Utf8Path::new(self.as_str()).file_stem().unwrap_or("")
    }

    /// Name of the directory directly containing the file, empty at the data root.
    pub fn parent_name(&self) -> &str {
        Utf8Path::new(self.as_str())
            .parent()
            .and_then(|p| p.file_name())
            .unwrap_or("")
    }

    pub fn has_json_extension(&self) -> bool {
        Utf8Path::new(self.as_str()).extension() == Some("json")
    }

    /// True when the path would resolve outside the data directory.
    pub fn escapes_root(&self) -> bool {
        let p = Utf8Path::new(self.as_str());
        p.is_absolute()
            || self.0.starts_with('/')
            || p.components().any(|c| {
                matches!(
                    c,
                    Utf8Component::ParentDir | Utf8Component::Prefix(_) | Utf8Component::RootDir
                )
            })
    }
}

impl std::fmt::Display for DataPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&Utf8Path> for DataPath {
    fn from(value: &Utf8Path) -> Self {
        DataPath::new(value.as_str())
    }
}

impl From<Utf8PathBuf> for DataPath {
    fn from(value: Utf8PathBuf) -> Self {
        DataPath::new(value.as_str())
    }
}

impl From<&str> for DataPath {
    fn from(value: &str) -> Self {
        DataPath::new(value)
    }
}
