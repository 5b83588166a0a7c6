use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::TableSchema;
use crate::error::{ModelError, ModelResult};

/// A raw stored row: the two key fields plus any flattened attributes.
pub type RecordAttributes = BTreeMap<String, String>;

/// Composite identity of a stored row.
///
/// Record identity, equality, and hashing are defined solely by the
/// `(partition_key, sort_key)` pair. Typed records ([`PointerRecord`],
/// [`ContextIndexRecord`]) compare only within their own kind; cross-kind
/// comparison is statically impossible.
///
/// [`PointerRecord`]: crate::pointer::PointerRecord
/// [`ContextIndexRecord`]: crate::index::ContextIndexRecord
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RecordKey {
    pub partition_key: String,
    pub sort_key: String,
}

impl RecordKey {
    pub fn new(partition_key: impl Into<String>, sort_key: impl Into<String>) -> Self {
        Self {
            partition_key: partition_key.into(),
            sort_key: sort_key.into(),
        }
    }

    /// Read the composite key out of a raw stored row.
    ///
    /// Fails with [`ModelError::MissingKeyField`] if either key field is
    /// absent from the row.
    pub fn from_attributes(schema: &TableSchema, attrs: &RecordAttributes) -> ModelResult<Self> {
        let partition_key = attrs
            .get(schema.partition_key_name())
            .ok_or_else(|| ModelError::MissingKeyField(schema.partition_key_name().to_string()))?;
        let sort_key = attrs
            .get(schema.sort_key_name())
            .ok_or_else(|| ModelError::MissingKeyField(schema.sort_key_name().to_string()))?;
        Ok(Self::new(partition_key.clone(), sort_key.clone()))
    }

    /// Render the key as the two named fields of a stored row.
    pub fn to_attributes(&self, schema: &TableSchema) -> RecordAttributes {
        let mut attrs = RecordAttributes::new();
        attrs.insert(
            schema.partition_key_name().to_string(),
            self.partition_key.clone(),
        );
        attrs.insert(schema.sort_key_name().to_string(), self.sort_key.clone());
        attrs
    }

    /// The blob-store object key for this row.
    ///
    /// Only pointer rows (sort key equal to the schema's object marker) can
    /// act as a storage key; any other row fails with
    /// [`ModelError::UnsupportedOperation`].
    pub fn storage_key(&self, schema: &TableSchema) -> ModelResult<&str> {
        if self.sort_key == schema.object_target() {
            Ok(&self.partition_key)
        } else {
            Err(ModelError::UnsupportedOperation {
                partition_key: self.partition_key.clone(),
                sort_key: self.sort_key.clone(),
            })
        }
    }
}
