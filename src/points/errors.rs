//! Fatal errors for a validation run
use std::path::{Path, PathBuf};

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{} not found", .path.display())]
    FileNotFound { path: PathBuf },
    #[error("invalid JSON format: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid data format: {0}")]
    InvalidFormat(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("csv output failed: {0}")]
    Csv(#[from] csv::Error),
    #[error("builder error: {0}")]
    Builder(String),
}

impl Error {
    pub fn file_not_found(path: &Path) -> Self {
        Error::FileNotFound {
            path: path.to_path_buf(),
        }
    }

    pub fn invalid_format(message: impl ToString) -> Self {
        Error::InvalidFormat(message.to_string())
    }
}
