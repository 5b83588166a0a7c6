use serde::{Deserialize, Serialize};

use crate::config::TableSchema;
use crate::context::canonicalize_tag;
use crate::error::ModelResult;
use crate::id::DocumentId;
use crate::record::{RecordAttributes, RecordKey};

/// Secondary-index row mapping one canonical context tag to one document.
///
/// One index record exists per `(tag name, document)` pair: a pointer with N
/// distinct tag names fans out into N index records, all sharing the
/// document's UUID as their sort key. Index rows persist only their two key
/// fields and are derived from pointers, never mutated independently.
///
/// Identity is the `(partition_key, document)` pair, which is exactly the
/// row key.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ContextIndexRecord {
    partition_key: String,
    document: DocumentId,
}

impl ContextIndexRecord {
    /// Build an index record from a raw tag name and document id.
    ///
    /// The tag is canonicalized; every index record's partition key is in
    /// context-key format by construction.
    pub fn for_document(schema: &TableSchema, tag: &str, document: DocumentId) -> Self {
        Self {
            partition_key: canonicalize_tag(schema, tag),
            document,
        }
    }

    /// Build an index record from a raw tag name and an untrusted sort key.
    ///
    /// The sort key must parse as a valid document UUID.
    pub fn new(schema: &TableSchema, tag: &str, sort_key: &str) -> ModelResult<Self> {
        Ok(Self::for_document(schema, tag, DocumentId::parse(sort_key)?))
    }

    /// The canonicalized tag name.
    pub fn partition_key(&self) -> &str {
        &self.partition_key
    }

    /// The document this tag belongs to.
    pub fn document(&self) -> DocumentId {
        self.document
    }

    /// The composite row key identifying this record.
    pub fn record_key(&self) -> RecordKey {
        RecordKey::new(self.partition_key.clone(), self.document.to_string())
    }

    /// The stored row: index records persist key fields only.
    pub fn to_key(&self, schema: &TableSchema) -> RecordAttributes {
        self.record_key().to_attributes(schema)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::is_context_key_format;
    use crate::error::ModelError;

    fn schema() -> TableSchema {
        TableSchema::default()
    }

    #[test]
    fn tag_is_canonicalized() {
        let record = ContextIndexRecord::for_document(&schema(), "fleet", DocumentId::generate());
        assert_eq!(record.partition_key(), "CTX~FLEET");
        assert!(is_context_key_format(&schema(), record.partition_key()));
    }

    #[test]
    fn sort_key_is_the_document_uuid() {
        let id = DocumentId::generate();
        let record = ContextIndexRecord::for_document(&schema(), "fleet", id);
        assert_eq!(record.record_key().sort_key, id.to_string());
    }

    #[test]
    fn new_validates_sort_key() {
        let err = ContextIndexRecord::new(&schema(), "fleet", "not-a-uuid").unwrap_err();
        assert_eq!(err, ModelError::InvalidIdentifier("not-a-uuid".to_string()));
    }

    #[test]
    fn new_accepts_valid_sort_key() {
        let id = DocumentId::generate();
        let record = ContextIndexRecord::new(&schema(), "fleet", &id.to_string()).unwrap();
        assert_eq!(record.document(), id);
    }

    #[test]
    fn to_key_carries_both_fields() {
        let id = DocumentId::generate();
        let record = ContextIndexRecord::for_document(&schema(), "user", id);
        let attrs = record.to_key(&schema());
        assert_eq!(attrs.len(), 2);
        assert_eq!(attrs.get("partition_key").unwrap(), "CTX~USER");
        assert_eq!(attrs.get("sort_key").unwrap(), &id.to_string());
    }

    #[test]
    fn equality_is_by_key_pair() {
        let id = DocumentId::generate();
        let a = ContextIndexRecord::for_document(&schema(), "fleet", id);
        let b = ContextIndexRecord::for_document(&schema(), "FLEET", id);
        let c = ContextIndexRecord::for_document(&schema(), "user", id);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn index_row_cannot_act_as_storage_key() {
        let record = ContextIndexRecord::for_document(&schema(), "fleet", DocumentId::generate());
        assert!(record.record_key().storage_key(&schema()).is_err());
    }
}
