use serde::{Deserialize, Serialize};

use crate::config::TableSchema;
use crate::context::canonicalize_tag;

/// A lookup expression understood by the record store.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum QueryExpression {
    /// Rows whose partition key equals the given value.
    PartitionKeyEquals(String),
}

/// Query for every document carrying a given context tag.
///
/// The tag is canonicalized at construction with the same rule as
/// [`ContextIndexRecord`], so lookups are case-insensitive and hit the index
/// rows exactly.
///
/// [`ContextIndexRecord`]: crate::index::ContextIndexRecord
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContextQuery {
    partition_key: String,
}

impl ContextQuery {
    pub fn new(schema: &TableSchema, tag: &str) -> Self {
        Self {
            partition_key: canonicalize_tag(schema, tag),
        }
    }

    /// The canonicalized partition key this query matches.
    pub fn partition_key(&self) -> &str {
        &self.partition_key
    }

    /// The equality predicate to hand to the record store. Pure.
    pub fn expression(&self) -> QueryExpression {
        QueryExpression::PartitionKeyEquals(self.partition_key.clone())
    }
}
