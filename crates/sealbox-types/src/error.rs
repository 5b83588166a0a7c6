use thiserror::Error;

/// Errors produced by the record model and identifier validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    /// A value claimed to be a document identifier does not parse as a UUID.
    #[error("invalid document identifier: {0:?}")]
    InvalidIdentifier(String),

    /// A pointer record carried a sort key other than the object marker.
    #[error("invalid pointer sort key: expected {expected:?}, got {actual:?}")]
    InvalidSortKey { expected: String, actual: String },

    /// A context tag used a reserved table key field name.
    #[error("context tag {0:?} collides with a reserved table key field")]
    ReservedKeyCollision(String),

    /// The record is not a pointer row and therefore has no storage key.
    #[error("record ({partition_key:?}, {sort_key:?}) cannot act as a storage key")]
    UnsupportedOperation {
        partition_key: String,
        sort_key: String,
    },

    /// Context extraction attempted on an absent record.
    #[error("cannot extract context from an absent record")]
    EmptyRecord,

    /// A stored row is missing one of its composite key fields.
    #[error("stored record is missing key field {0:?}")]
    MissingKeyField(String),
}

/// Result alias for model operations.
pub type ModelResult<T> = Result<T, ModelError>;
