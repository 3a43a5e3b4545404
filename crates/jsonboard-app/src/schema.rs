//! Schema module generation (`init-schema`).

use crate::error::AppError;
use crate::files::load_value;
use anyhow::Context;
use camino::Utf8Path;
use jsonboard_domain::{EmitOptions, SchemaSource};
use jsonboard_repo::JsonStore;
use jsonboard_types::DataPath;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

/// Generated module text plus the files it covers.
#[derive(Clone, Debug, PartialEq)]
pub struct SchemaModule {
    pub text: String,
    pub files: Vec<DataPath>,
}

/// Infer every discovered file and emit one module covering all of them.
pub fn generate_schema(
    store: &dyn JsonStore,
    generated_at: Option<OffsetDateTime>,
) -> Result<SchemaModule, AppError> {
    let paths = store.list_json_files()?;
    let mut sources = Vec::with_capacity(paths.len());
    for path in &paths {
        let sample = load_value(store, path)?;
        sources.push(SchemaSource {
            path: path.clone(),
            shape: jsonboard_domain::infer(&sample),
            sample,
        });
    }

    let opts = EmitOptions {
        generated_at: generated_at.and_then(|t| t.format(&Rfc3339).ok()),
    };
    let text = jsonboard_domain::emit_module(&sources, &opts)?;
    tracing::debug!(files = paths.len(), bytes = text.len(), "generated schema module");
    Ok(SchemaModule { text, files: paths })
}

/// Write text to a file, creating parent directories.
pub fn write_text(path: &Utf8Path, text: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_str().is_empty()
    {
        std::fs::create_dir_all(parent).with_context(|| format!("create {parent}"))?;
    }
    std::fs::write(path, text).with_context(|| format!("write {path}"))?;
    tracing::info!(path = %path, "wrote file");
    Ok(())
}
