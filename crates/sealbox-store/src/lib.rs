//! Storage boundary for Sealbox.
//!
//! The document bucket talks to two external storage systems through the
//! traits in this crate:
//!
//! - [`BlobStore`] — opaque objects keyed by string, with attached metadata
//! - [`RecordStore`] — rows addressed by a composite partition/sort key,
//!   queryable by partition key and scannable in full
//!
//! # Design Rules
//!
//! 1. The stores never interpret payloads or row attributes beyond the two
//!    key fields.
//! 2. All I/O errors are propagated, never silently ignored.
//! 3. No retries and no transactionality live at this layer; callers own the
//!    consistency story across stores.
//!
//! In-memory reference backends ([`InMemoryBlobStore`],
//! [`InMemoryRecordStore`]) are provided for tests and embedding.

pub mod error;
pub mod memory;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use memory::{InMemoryBlobStore, InMemoryRecordStore};
pub use traits::{BlobStore, RecordStore};
