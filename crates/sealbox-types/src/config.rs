use serde::{Deserialize, Serialize};

/// Default record-table partition key field name.
pub const DEFAULT_PARTITION_KEY_NAME: &str = "partition_key";
/// Default record-table sort key field name.
pub const DEFAULT_SORT_KEY_NAME: &str = "sort_key";
/// Default reserved prefix marking canonicalized context tags.
pub const DEFAULT_CTX_PREFIX: &str = "CTX~";
/// Default sentinel sort key marking a pointer row.
pub const DEFAULT_OBJECT_TARGET: &str = "object";

/// Field-name and sentinel configuration for the document table.
///
/// All values are fixed at construction and passed explicitly into record
/// constructors; nothing consults configuration implicitly. The context-tag
/// prefix is stored upper-case so canonicalization is case-stable.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSchema {
    partition_key_name: String,
    sort_key_name: String,
    ctx_prefix: String,
    object_target: String,
}

impl TableSchema {
    /// Build a schema from explicit field names and sentinels.
    pub fn new(
        partition_key_name: impl Into<String>,
        sort_key_name: impl Into<String>,
        ctx_prefix: impl Into<String>,
        object_target: impl Into<String>,
    ) -> Self {
        Self {
            partition_key_name: partition_key_name.into(),
            sort_key_name: sort_key_name.into(),
            ctx_prefix: ctx_prefix.into().to_uppercase(),
            object_target: object_target.into(),
        }
    }

    /// Name of the partition key field in stored rows.
    pub fn partition_key_name(&self) -> &str {
        &self.partition_key_name
    }

    /// Name of the sort key field in stored rows.
    pub fn sort_key_name(&self) -> &str {
        &self.sort_key_name
    }

    /// Reserved prefix carried by every canonicalized context tag.
    pub fn ctx_prefix(&self) -> &str {
        &self.ctx_prefix
    }

    /// Sentinel sort key value that marks a pointer row.
    pub fn object_target(&self) -> &str {
        &self.object_target
    }
}

impl Default for TableSchema {
    fn default() -> Self {
        Self::new(
            DEFAULT_PARTITION_KEY_NAME,
            DEFAULT_SORT_KEY_NAME,
            DEFAULT_CTX_PREFIX,
            DEFAULT_OBJECT_TARGET,
        )
    }
}
