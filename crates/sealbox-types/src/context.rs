//! Encryption-context tags and tag-name canonicalization.
//!
//! A context is a flat map of string tags describing a document. Tag names
//! are canonicalized before they become index partition keys: upper-cased,
//! then prefixed with the schema's reserved prefix if not already present.
//! The prefix keeps index rows distinguishable from pointer rows in a raw
//! table scan.

use std::collections::BTreeMap;

use crate::config::TableSchema;
use crate::error::{ModelError, ModelResult};

/// A document's encryption context: tag name to tag value.
///
/// `BTreeMap` gives a deterministic iteration order, which the crypto layer
/// relies on when binding the context as associated data.
pub type Context = BTreeMap<String, String>;

/// Canonicalize a context tag name for use as an index partition key.
///
/// Upper-cases the tag, then prepends the schema's reserved prefix unless it
/// is already present. Idempotent: canonicalizing twice yields the same
/// result as once.
pub fn canonicalize_tag(schema: &TableSchema, raw: &str) -> String {
    let tag = raw.to_uppercase();
    if is_context_key_format(schema, &tag) {
        tag
    } else {
        format!("{}{}", schema.ctx_prefix(), tag)
    }
}

/// Returns `true` iff `key` is in canonical context-key format.
///
/// Case-sensitive: the prefix is stored upper-case and canonicalized keys
/// are fully upper-cased.
pub fn is_context_key_format(schema: &TableSchema, key: &str) -> bool {
    key.starts_with(schema.ctx_prefix())
}

/// Reject contexts that use a reserved table key field name as a tag name.
///
/// The pointer row flattens context tags as sibling fields of the two key
/// fields, so a tag named after either key field would be ambiguous.
pub fn validate_no_reserved_keys(schema: &TableSchema, context: &Context) -> ModelResult<()> {
    for reserved in [schema.partition_key_name(), schema.sort_key_name()] {
        if context.contains_key(reserved) {
            return Err(ModelError::ReservedKeyCollision(reserved.to_string()));
        }
    }
    Ok(())
}
