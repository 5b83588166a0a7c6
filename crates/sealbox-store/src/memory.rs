use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;

use sealbox_types::{
    Context, ModelError, QueryExpression, RecordAttributes, RecordKey, TableSchema,
};

use crate::error::{StoreError, StoreResult};
use crate::traits::{BlobStore, RecordStore};

/// One stored blob: payload plus the metadata attached at put time.
#[derive(Clone)]
struct StoredBlob {
    body: Vec<u8>,
    metadata: Context,
}

/// In-memory, HashMap-based blob store.
///
/// Intended for tests and embedding. Objects are held behind a `RwLock` and
/// cloned on read/write.
pub struct InMemoryBlobStore {
    objects: RwLock<HashMap<String, StoredBlob>>,
}

impl InMemoryBlobStore {
    /// Create a new empty blob store.
    pub fn new() -> Self {
        Self {
            objects: RwLock::new(HashMap::new()),
        }
    }

    /// Number of objects currently stored.
    pub fn len(&self) -> usize {
        self.objects.read().expect("lock poisoned").len()
    }

    /// Returns `true` if the store holds no objects.
    pub fn is_empty(&self) -> bool {
        self.objects.read().expect("lock poisoned").is_empty()
    }

    /// Remove all objects.
    pub fn clear(&self) {
        self.objects.write().expect("lock poisoned").clear();
    }
}

impl Default for InMemoryBlobStore {
    fn default() -> Self {
        Self::new()
    }
}

impl BlobStore for InMemoryBlobStore {
    fn put_object(&self, key: &str, body: &[u8], metadata: &Context) -> StoreResult<()> {
        let mut map = self.objects.write().expect("lock poisoned");
        map.insert(
            key.to_string(),
            StoredBlob {
                body: body.to_vec(),
                metadata: metadata.clone(),
            },
        );
        Ok(())
    }

    fn get_object(&self, key: &str) -> StoreResult<Vec<u8>> {
        let map = self.objects.read().expect("lock poisoned");
        map.get(key)
            .map(|blob| blob.body.clone())
            .ok_or_else(|| StoreError::ObjectNotFound(key.to_string()))
    }

    fn get_metadata(&self, key: &str) -> StoreResult<Context> {
        let map = self.objects.read().expect("lock poisoned");
        map.get(key)
            .map(|blob| blob.metadata.clone())
            .ok_or_else(|| StoreError::ObjectNotFound(key.to_string()))
    }
}

impl std::fmt::Debug for InMemoryBlobStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryBlobStore")
            .field("object_count", &self.len())
            .finish()
    }
}

/// In-memory, BTreeMap-based record store.
///
/// Rows are keyed by [`RecordKey`], so scans and queries are returned in a
/// deterministic order. The schema tells the store which attribute names
/// form the composite key.
pub struct InMemoryRecordStore {
    schema: TableSchema,
    rows: RwLock<BTreeMap<RecordKey, RecordAttributes>>,
}

impl InMemoryRecordStore {
    /// Create a new empty record store over the given schema.
    pub fn new(schema: TableSchema) -> Self {
        Self {
            schema,
            rows: RwLock::new(BTreeMap::new()),
        }
    }

    /// Number of rows currently stored.
    pub fn len(&self) -> usize {
        self.rows.read().expect("lock poisoned").len()
    }

    /// Returns `true` if the table holds no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.read().expect("lock poisoned").is_empty()
    }

    /// Remove all rows.
    pub fn clear(&self) {
        self.rows.write().expect("lock poisoned").clear();
    }
}

impl RecordStore for InMemoryRecordStore {
    fn put_item(&self, item: &RecordAttributes) -> StoreResult<()> {
        let key = RecordKey::from_attributes(&self.schema, item).map_err(|err| match err {
            ModelError::MissingKeyField(field) => StoreError::MissingKeyField(field),
            other => StoreError::Backend(other.to_string()),
        })?;
        let mut rows = self.rows.write().expect("lock poisoned");
        rows.insert(key, item.clone());
        Ok(())
    }

    fn get_item(&self, key: &RecordKey) -> StoreResult<Option<RecordAttributes>> {
        let rows = self.rows.read().expect("lock poisoned");
        Ok(rows.get(key).cloned())
    }

    fn query(&self, expression: &QueryExpression) -> StoreResult<Vec<RecordAttributes>> {
        let rows = self.rows.read().expect("lock poisoned");
        let QueryExpression::PartitionKeyEquals(partition_key) = expression;
        Ok(rows
            .iter()
            .filter(|(key, _)| &key.partition_key == partition_key)
            .map(|(_, attrs)| attrs.clone())
            .collect())
    }

    fn scan(&self) -> StoreResult<Vec<RecordAttributes>> {
        let rows = self.rows.read().expect("lock poisoned");
        Ok(rows.values().cloned().collect())
    }
}

impl std::fmt::Debug for InMemoryRecordStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryRecordStore")
            .field("row_count", &self.len())
            .finish()
    }
}
