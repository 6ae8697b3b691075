use thiserror::Error;

/// Errors returned by directory operations.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("{0}")]
    InvalidArgument(String),

    /// No record matches the presented secret key. Also used when the key is
    /// simply wrong, so callers cannot tell the two apart.
    #[error("chat not found")]
    NotFound,

    #[error("URL not reachable")]
    Unreachable,

    #[error("storage error: {0}")]
    StorageError(String),
}

/// Errors returned by the liveness sweep.
#[derive(Debug, Error)]
pub enum SweepError {
    #[error("unauthorized")]
    Unauthorized,

    #[error("storage error: {0}")]
    StorageError(String),
}

/// Errors from repository operations (used by trait definitions in nexchat-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    #[error("entity not found")]
    NotFound,

    #[error("conflict: {0}")]
    Conflict(String),
}
