use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

use tracing::{debug, info, warn};

use sealbox_crypto::EnvelopeProvider;
use sealbox_store::{BlobStore, RecordStore};
use sealbox_types::{
    is_context_key_format, Context, ContextQuery, DocumentBundle, ModelError, PointerRecord,
    TableSchema,
};

use crate::error::{BucketError, BucketResult};

/// The document bucket orchestrator.
///
/// Holds immutable handles to the three collaborators for its lifetime. All
/// operations are synchronous sequences of collaborator calls; the bucket
/// itself keeps no mutable state and performs no locking.
pub struct DocumentBucket {
    blobs: Arc<dyn BlobStore>,
    records: Arc<dyn RecordStore>,
    provider: Arc<dyn EnvelopeProvider>,
    schema: TableSchema,
}

impl DocumentBucket {
    pub fn new(
        blobs: Arc<dyn BlobStore>,
        records: Arc<dyn RecordStore>,
        provider: Arc<dyn EnvelopeProvider>,
        schema: TableSchema,
    ) -> Self {
        Self {
            blobs,
            records,
            provider,
            schema,
        }
    }

    /// The schema this bucket was built over.
    pub fn schema(&self) -> &TableSchema {
        &self.schema
    }

    /// Encrypt `data` under `context` and persist it.
    ///
    /// Writes the pointer row, the ciphertext object, and one index row per
    /// context tag — three writes across two systems with no rollback: if a
    /// later write fails, earlier writes are left in place.
    pub fn store(&self, data: &[u8], context: Context) -> BucketResult<PointerRecord> {
        let ciphertext = self.provider.encrypt(data, &context)?;
        let pointer = PointerRecord::generate(&self.schema, context)?;
        self.write_pointer(&pointer)?;
        self.write_object(&ciphertext, &pointer)?;
        let index_count = self.populate_index_records(&pointer)?;
        info!(
            document = %pointer.id(),
            tags = index_count,
            bytes = data.len(),
            "document stored"
        );
        Ok(pointer)
    }

    /// Fetch and decrypt the document under `pointer_key`, asserting the
    /// recovered context against the caller's expectations.
    ///
    /// Every name in `expected_context_keys` must appear among the recovered
    /// context's keys, and every pair in `expected_context` must appear
    /// among its pairs. Either assertion failing is
    /// [`BucketError::ContextMismatch`]: the recovered context is
    /// authenticated inside the ciphertext, so a caller who knows what tags
    /// the document should carry detects silent substitution or corruption.
    pub fn retrieve(
        &self,
        pointer_key: &str,
        expected_context_keys: &BTreeSet<String>,
        expected_context: &Context,
    ) -> BucketResult<DocumentBundle> {
        let mut pointer =
            PointerRecord::from_key_and_context(&self.schema, pointer_key, expected_context.clone())?;
        let ciphertext = self.read_object(&pointer)?;
        let opened = self.provider.decrypt(&ciphertext)?;
        self.assert_context(expected_context_keys, expected_context, &opened.context)?;
        debug!(document = %pointer.id(), "document retrieved");
        pointer.attach_context(opened.context);
        Ok(DocumentBundle::new(pointer, opened.plaintext))
    }

    /// Every stored document's bare pointer (context unpopulated).
    ///
    /// Performs a full table scan and filters out index rows by partition
    /// key format. Unbounded by design; pagination belongs to the store.
    pub fn list(&self) -> BucketResult<BTreeSet<PointerRecord>> {
        self.scan_table()
    }

    /// Every document carrying the given context tag, with contexts
    /// populated from their pointer rows.
    pub fn search_by_context_key(&self, tag: &str) -> BucketResult<BTreeSet<PointerRecord>> {
        let query = ContextQuery::new(&self.schema, tag);
        debug!(partition_key = query.partition_key(), "searching by context key");
        self.query_for_context_key(&query)
    }

    fn write_pointer(&self, pointer: &PointerRecord) -> BucketResult<()> {
        self.records.put_item(&pointer.to_attributes(&self.schema))?;
        Ok(())
    }

    fn write_object(&self, ciphertext: &[u8], pointer: &PointerRecord) -> BucketResult<()> {
        self.blobs
            .put_object(&pointer.storage_key(), ciphertext, pointer.context())?;
        Ok(())
    }

    fn read_object(&self, pointer: &PointerRecord) -> BucketResult<Vec<u8>> {
        Ok(self.blobs.get_object(&pointer.storage_key())?)
    }

    fn populate_index_records(&self, pointer: &PointerRecord) -> BucketResult<usize> {
        let index = pointer.index_records(&self.schema);
        for record in &index {
            self.records.put_item(&record.to_key(&self.schema))?;
        }
        Ok(index.len())
    }

    fn assert_context(
        &self,
        expected_keys: &BTreeSet<String>,
        expected_pairs: &Context,
        recovered: &Context,
    ) -> BucketResult<()> {
        let missing_keys: Vec<String> = expected_keys
            .iter()
            .filter(|key| !recovered.contains_key(*key))
            .cloned()
            .collect();
        let mismatched_pairs: Vec<(String, String)> = expected_pairs
            .iter()
            .filter(|(key, value)| recovered.get(key.as_str()) != Some(*value))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        if !missing_keys.is_empty() || !mismatched_pairs.is_empty() {
            warn!(
                missing = missing_keys.len(),
                mismatched = mismatched_pairs.len(),
                "encryption context assertion failed"
            );
            return Err(BucketError::ContextMismatch {
                missing_keys,
                mismatched_pairs,
            });
        }
        Ok(())
    }

    fn scan_table(&self) -> BucketResult<BTreeSet<PointerRecord>> {
        let rows = self.records.scan()?;
        let mut pointers = BTreeSet::new();
        for row in rows {
            let partition_key = row
                .get(self.schema.partition_key_name())
                .ok_or_else(|| {
                    ModelError::MissingKeyField(self.schema.partition_key_name().to_string())
                })?;
            if is_context_key_format(&self.schema, partition_key) {
                continue;
            }
            pointers.insert(PointerRecord::from_key_and_context(
                &self.schema,
                partition_key,
                Context::new(),
            )?);
        }
        Ok(pointers)
    }

    fn query_for_context_key(&self, query: &ContextQuery) -> BucketResult<BTreeSet<PointerRecord>> {
        let rows = self.records.query(&query.expression())?;
        // Deduplicate document ids up front; a document appears once per
        // matching index row.
        let mut seen: HashSet<String> = HashSet::new();
        let mut pointers = BTreeSet::new();
        for row in rows {
            let sort_key = row.get(self.schema.sort_key_name()).ok_or_else(|| {
                ModelError::MissingKeyField(self.schema.sort_key_name().to_string())
            })?;
            if !seen.insert(sort_key.clone()) {
                continue;
            }
            let mut pointer =
                PointerRecord::from_key_and_context(&self.schema, sort_key, Context::new())?;
            let stored = self.records.get_item(&pointer.record_key())?;
            let context = PointerRecord::extract_context(&self.schema, stored.as_ref())?;
            pointer.attach_context(context);
            pointers.insert(pointer);
        }
        Ok(pointers)
    }
}

impl std::fmt::Debug for DocumentBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentBucket")
            .field("schema", &self.schema)
            .finish_non_exhaustive()
    }
}
