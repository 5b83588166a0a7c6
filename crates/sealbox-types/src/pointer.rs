use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::config::TableSchema;
use crate::context::{validate_no_reserved_keys, Context};
use crate::error::{ModelError, ModelResult};
use crate::id::DocumentId;
use crate::index::ContextIndexRecord;
use crate::record::{RecordAttributes, RecordKey};

/// The primary record identifying one stored document.
///
/// The partition key is the document's UUID; the sort key is always the
/// schema's object-marker sentinel. The attached context never participates
/// in identity: two pointers with the same keys are interchangeable
/// regardless of their contexts.
#[derive(Clone, Serialize, Deserialize)]
pub struct PointerRecord {
    id: DocumentId,
    sort_key: String,
    context: Context,
}

impl PointerRecord {
    /// Create a pointer with a freshly generated document id.
    pub fn generate(schema: &TableSchema, context: Context) -> ModelResult<Self> {
        Self::build(schema, DocumentId::generate(), context)
    }

    /// Create a pointer from a caller-chosen key.
    ///
    /// Used on the retrieval path before the context has been populated from
    /// storage. The key must parse as a valid UUID.
    pub fn from_key_and_context(
        schema: &TableSchema,
        key: &str,
        context: Context,
    ) -> ModelResult<Self> {
        Self::build(schema, DocumentId::parse(key)?, context)
    }

    /// Rebuild a pointer from a raw stored row.
    ///
    /// Validates the partition key as a UUID and the sort key against the
    /// object marker, then takes everything else as the context.
    pub fn from_attributes(schema: &TableSchema, attrs: &RecordAttributes) -> ModelResult<Self> {
        let key = RecordKey::from_attributes(schema, attrs)?;
        if key.sort_key != schema.object_target() {
            return Err(ModelError::InvalidSortKey {
                expected: schema.object_target().to_string(),
                actual: key.sort_key,
            });
        }
        let context = Self::extract_context(schema, Some(attrs))?;
        Self::build(schema, DocumentId::parse(&key.partition_key)?, context)
    }

    fn build(schema: &TableSchema, id: DocumentId, context: Context) -> ModelResult<Self> {
        validate_no_reserved_keys(schema, &context)?;
        Ok(Self {
            id,
            sort_key: schema.object_target().to_string(),
            context,
        })
    }

    /// The document identifier.
    pub fn id(&self) -> DocumentId {
        self.id
    }

    /// The context tags attached to this pointer.
    pub fn context(&self) -> &Context {
        &self.context
    }

    /// Attach a context read back from storage or recovered from decryption.
    pub fn attach_context(&mut self, context: Context) {
        self.context = context;
    }

    /// The blob-store object key: the document UUID in canonical form.
    pub fn storage_key(&self) -> String {
        self.id.to_string()
    }

    /// The composite row key identifying this pointer in the record store.
    pub fn record_key(&self) -> RecordKey {
        RecordKey::new(self.storage_key(), self.sort_key.clone())
    }

    /// The two key fields only, as a stored row.
    pub fn to_key(&self, schema: &TableSchema) -> RecordAttributes {
        self.record_key().to_attributes(schema)
    }

    /// The full stored row: key fields plus the context flattened as sibling
    /// fields. The same shape ships as blob metadata and as record-store
    /// attributes.
    pub fn to_attributes(&self, schema: &TableSchema) -> RecordAttributes {
        let mut attrs = self.to_key(schema);
        for (tag, value) in &self.context {
            attrs.insert(tag.clone(), value.clone());
        }
        attrs
    }

    /// Recover the context from a raw fetched row by stripping the two key
    /// fields. An absent row fails with [`ModelError::EmptyRecord`].
    pub fn extract_context(
        schema: &TableSchema,
        attrs: Option<&RecordAttributes>,
    ) -> ModelResult<Context> {
        let attrs = attrs.ok_or(ModelError::EmptyRecord)?;
        let mut context = attrs.clone();
        context.remove(schema.partition_key_name());
        context.remove(schema.sort_key_name());
        Ok(context)
    }

    /// Derive the secondary-index rows for this pointer: one per distinct
    /// context tag name, each pointing back at this document.
    pub fn index_records(&self, schema: &TableSchema) -> BTreeSet<ContextIndexRecord> {
        self.context
            .keys()
            .map(|tag| ContextIndexRecord::for_document(schema, tag, self.id))
            .collect()
    }
}

// Identity is the record key alone; context is deliberately excluded.
impl PartialEq for PointerRecord {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.sort_key == other.sort_key
    }
}

impl Eq for PointerRecord {}

impl Hash for PointerRecord {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
        self.sort_key.hash(state);
    }
}

impl PartialOrd for PointerRecord {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PointerRecord {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.id, &self.sort_key).cmp(&(other.id, &other.sort_key))
    }
}

impl fmt::Debug for PointerRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PointerRecord")
            .field("id", &self.id)
            .field("sort_key", &self.sort_key)
            .field("tags", &self.context.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema() -> TableSchema {
        TableSchema::default()
    }

    fn sample_context() -> Context {
        let mut context = Context::new();
        context.insert("region".to_string(), "sp-moon-1".to_string());
        context.insert("fleet".to_string(), "bananas".to_string());
        context.insert("user".to_string(), "kilroy".to_string());
        context
    }

    #[test]
    fn generate_produces_valid_storage_key() {
        let pointer = PointerRecord::generate(&schema(), sample_context()).unwrap();
        let key = pointer.storage_key();
        assert!(DocumentId::parse(&key).is_ok());
    }

    #[test]
    fn storage_key_roundtrips_through_reconstruction() {
        let pointer = PointerRecord::generate(&schema(), sample_context()).unwrap();
        let rebuilt =
            PointerRecord::from_key_and_context(&schema(), &pointer.storage_key(), Context::new())
                .unwrap();
        assert_eq!(pointer, rebuilt);
    }

    #[test]
    fn invalid_key_is_rejected() {
        let err =
            PointerRecord::from_key_and_context(&schema(), "not-a-uuid", Context::new())
                .unwrap_err();
        assert_eq!(err, ModelError::InvalidIdentifier("not-a-uuid".to_string()));
    }

    #[test]
    fn reserved_context_keys_are_rejected() {
        let mut context = Context::new();
        context.insert("partition_key".to_string(), "kaboom".to_string());
        let err = PointerRecord::generate(&schema(), context).unwrap_err();
        assert!(matches!(err, ModelError::ReservedKeyCollision(_)));

        let mut context = Context::new();
        context.insert("sort_key".to_string(), "blammo".to_string());
        assert!(PointerRecord::generate(&schema(), context).is_err());
    }

    #[test]
    fn equality_ignores_context() {
        let pointer = PointerRecord::generate(&schema(), sample_context()).unwrap();
        let bare =
            PointerRecord::from_key_and_context(&schema(), &pointer.storage_key(), Context::new())
                .unwrap();
        assert_eq!(pointer, bare);

        use std::collections::hash_map::DefaultHasher;
        let mut h1 = DefaultHasher::new();
        let mut h2 = DefaultHasher::new();
        pointer.hash(&mut h1);
        bare.hash(&mut h2);
        assert_eq!(h1.finish(), h2.finish());
    }

    #[test]
    fn distinct_documents_are_unequal() {
        let a = PointerRecord::generate(&schema(), Context::new()).unwrap();
        let b = PointerRecord::generate(&schema(), Context::new()).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn to_attributes_flattens_context() {
        let pointer = PointerRecord::generate(&schema(), sample_context()).unwrap();
        let attrs = pointer.to_attributes(&schema());
        assert_eq!(attrs.len(), 2 + sample_context().len());
        assert_eq!(attrs.get("fleet").unwrap(), "bananas");
        assert_eq!(
            attrs.get("partition_key").unwrap(),
            &pointer.storage_key()
        );
        assert_eq!(attrs.get("sort_key").unwrap(), "object");
    }

    #[test]
    fn extract_context_inverts_to_attributes() {
        let pointer = PointerRecord::generate(&schema(), sample_context()).unwrap();
        let attrs = pointer.to_attributes(&schema());
        let context = PointerRecord::extract_context(&schema(), Some(&attrs)).unwrap();
        assert_eq!(context, sample_context());
    }

    #[test]
    fn extract_context_from_absent_row_fails() {
        let err = PointerRecord::extract_context(&schema(), None).unwrap_err();
        assert_eq!(err, ModelError::EmptyRecord);
    }

    #[test]
    fn from_attributes_rejects_wrong_sort_key() {
        let pointer = PointerRecord::generate(&schema(), Context::new()).unwrap();
        let mut attrs = pointer.to_attributes(&schema());
        attrs.insert("sort_key".to_string(), "not-the-marker".to_string());
        let err = PointerRecord::from_attributes(&schema(), &attrs).unwrap_err();
        assert!(matches!(err, ModelError::InvalidSortKey { .. }));
    }

    #[test]
    fn from_attributes_roundtrip() {
        let pointer = PointerRecord::generate(&schema(), sample_context()).unwrap();
        let attrs = pointer.to_attributes(&schema());
        let rebuilt = PointerRecord::from_attributes(&schema(), &attrs).unwrap();
        assert_eq!(rebuilt, pointer);
        assert_eq!(rebuilt.context(), &sample_context());
    }

    #[test]
    fn index_fan_out_one_record_per_tag() {
        let context = sample_context();
        let pointer = PointerRecord::generate(&schema(), context.clone()).unwrap();
        let index = pointer.index_records(&schema());
        assert_eq!(index.len(), context.len());
        for record in &index {
            assert_eq!(record.document().to_string(), pointer.storage_key());
        }
        let partition_keys: BTreeSet<&str> =
            index.iter().map(|r| r.partition_key()).collect();
        assert!(partition_keys.contains("CTX~FLEET"));
        assert!(partition_keys.contains("CTX~REGION"));
        assert!(partition_keys.contains("CTX~USER"));
    }

    #[test]
    fn empty_context_produces_no_index_records() {
        let pointer = PointerRecord::generate(&schema(), Context::new()).unwrap();
        assert!(pointer.index_records(&schema()).is_empty());
    }
}
