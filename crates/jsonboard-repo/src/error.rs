use jsonboard_types::DataPath;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("file not found: {0}")]
    NotFound(DataPath),

    #[error("file already exists: {0}")]
    AlreadyExists(DataPath),

    /// Absolute paths, `..` components and non-`.json` names are refused before touching disk.
    #[error("invalid file path: {0}")]
    InvalidPath(String),

    #[error("invalid ignore pattern {pattern}: {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("i/o error on {path}: {source}")]
    Io {
        path: DataPath,
        #[source]
        source: std::io::Error,
    },
}

impl StoreError {
    /// Map an I/O failure on `path`, keeping not-found and already-exists distinguishable.
    pub(crate) fn from_io(path: &DataPath, source: std::io::Error) -> Self {
        match source.kind() {
            std::io::ErrorKind::NotFound => StoreError::NotFound(path.clone()),
            std::io::ErrorKind::AlreadyExists => StoreError::AlreadyExists(path.clone()),
            _ => StoreError::Io {
                path: path.clone(),
                source,
            },
        }
    }
}
