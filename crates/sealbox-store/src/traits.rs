use sealbox_types::{Context, QueryExpression, RecordAttributes, RecordKey};

use crate::error::StoreResult;

/// Opaque object storage keyed by string.
///
/// All implementations must satisfy these invariants:
/// - Objects are opaque byte payloads; the store never inspects them.
/// - Metadata is attached verbatim and returned verbatim; it is
///   unauthenticated and informational only.
/// - A `put_object` under an existing key overwrites the object.
/// - All I/O errors are propagated, never silently ignored.
pub trait BlobStore: Send + Sync {
    /// Write an object under `key` with attached metadata.
    fn put_object(&self, key: &str, body: &[u8], metadata: &Context) -> StoreResult<()>;

    /// Read an object's payload by key.
    ///
    /// Returns [`StoreError::ObjectNotFound`] if no object exists under
    /// `key`.
    ///
    /// [`StoreError::ObjectNotFound`]: crate::error::StoreError::ObjectNotFound
    fn get_object(&self, key: &str) -> StoreResult<Vec<u8>>;

    /// Read the metadata attached to an object at put time.
    fn get_metadata(&self, key: &str) -> StoreResult<Context>;
}

/// Row storage addressed by a composite partition/sort key.
///
/// Rows are flat string-to-string attribute maps carrying their own key
/// fields. The store is told at construction which attribute names form the
/// composite key; it never interprets the remaining attributes.
pub trait RecordStore: Send + Sync {
    /// Insert or replace a row. The row must carry both key fields.
    fn put_item(&self, item: &RecordAttributes) -> StoreResult<()>;

    /// Fetch a single row by its composite key.
    ///
    /// Returns `Ok(None)` if no such row exists.
    fn get_item(&self, key: &RecordKey) -> StoreResult<Option<RecordAttributes>>;

    /// Return every row matching the expression.
    fn query(&self, expression: &QueryExpression) -> StoreResult<Vec<RecordAttributes>>;

    /// Return every row in the table. Unbounded; no pagination at this
    /// layer.
    fn scan(&self) -> StoreResult<Vec<RecordAttributes>>;
}
