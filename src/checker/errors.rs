use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("invalid format: {0}")]
    InvalidFormat(String),

    #[error("builder error: {0}")]
    Builder(String),

    #[error("unknown check: {0}")]
    UnknownCheck(String),

    #[error("invalid options: {0}")]
    Options(#[from] garde::Report),

    #[error("thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("walking catalog: {0}")]
    Walk(#[from] walkdir::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn file_not_found(path: &Path) -> Self {
        Self::FileNotFound(path.to_path_buf())
    }

    pub fn invalid_format(message: impl Into<String>) -> Self {
        Self::InvalidFormat(message.into())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
