use jsonboard_domain::{EmitError, RecordError};
use jsonboard_repo::StoreError;
use jsonboard_types::DataPath;
use thiserror::Error;

/// Every failure a use case can report.
#[derive(Debug, Error)]
pub enum AppError {
    /// Stored text is not valid JSON.
    #[error("failed to parse {path}: {message}")]
    Parse { path: DataPath, message: String },

    #[error(transparent)]
    Record(#[from] RecordError),

    #[error(transparent)]
    Emit(#[from] EmitError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Flat classification for presentation layers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    Parse,
    NotArray,
    IndexOutOfBounds,
    RecordNotFound,
    InvalidPatch,
    NameCollision,
    NotFound,
    AlreadyExists,
    InvalidPath,
    Io,
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::Parse { .. } => ErrorKind::Parse,
            AppError::Record(e) => match e {
                RecordError::NotArray => ErrorKind::NotArray,
                RecordError::IndexOutOfBounds { .. } => ErrorKind::IndexOutOfBounds,
                RecordError::RecordNotFound { .. } => ErrorKind::RecordNotFound,
                RecordError::PatchNotObject => ErrorKind::InvalidPatch,
            },
            AppError::Emit(EmitError::NameCollision { .. }) => ErrorKind::NameCollision,
            AppError::Store(e) => match e {
                StoreError::NotFound(_) => ErrorKind::NotFound,
                StoreError::AlreadyExists(_) => ErrorKind::AlreadyExists,
                StoreError::InvalidPath(_) | StoreError::InvalidPattern { .. } => {
                    ErrorKind::InvalidPath
                }
                StoreError::Io { .. } => ErrorKind::Io,
            },
        }
    }

    pub(crate) fn parse(path: &DataPath, err: &serde_json::Error) -> Self {
        AppError::Parse {
            path: path.clone(),
            message: err.to_string(),
        }
    }
}
