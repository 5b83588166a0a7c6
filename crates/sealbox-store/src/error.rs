use thiserror::Error;

/// Errors from blob-store and record-store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No object exists under the requested key.
    #[error("object not found: {0:?}")]
    ObjectNotFound(String),

    /// A row was submitted without one of its composite key fields.
    #[error("record is missing key field {0:?}")]
    MissingKeyField(String),

    /// Failure inside the storage backend.
    #[error("storage backend error: {0}")]
    Backend(String),

    /// I/O error from the underlying storage backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
