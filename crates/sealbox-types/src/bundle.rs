use crate::config::TableSchema;
use crate::context::Context;
use crate::error::ModelResult;
use crate::pointer::PointerRecord;

/// A document payload paired with its pointer record.
///
/// The caller-facing result of a retrieval, or the staging structure for a
/// fresh store. Never persisted directly: the pointer and the payload are
/// written to their own stores separately.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DocumentBundle {
    pub key: PointerRecord,
    pub data: Vec<u8>,
}

impl DocumentBundle {
    pub fn new(key: PointerRecord, data: Vec<u8>) -> Self {
        Self { key, data }
    }

    /// Stage a fresh document: generates a new pointer for the payload.
    pub fn from_data_and_context(
        schema: &TableSchema,
        data: Vec<u8>,
        context: Context,
    ) -> ModelResult<Self> {
        Ok(Self::new(PointerRecord::generate(schema, context)?, data))
    }
}
