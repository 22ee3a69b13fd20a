use thiserror::Error;

/// Failures of the durable key-value store
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage is not available")]
    Unavailable,
    #[error("storage i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage backend rejected the write: {0}")]
    Backend(String),
}

#[derive(Debug, Error)]
pub enum ViewerError {
    #[error("drawing surface unavailable: {0}")]
    SurfaceUnavailable(String),
    #[error("render backend error: {0}")]
    Backend(String),
    #[error("frame scheduling failed: {0}")]
    Scheduler(String),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

pub type Result<T, E = ViewerError> = std::result::Result<T, E>;
