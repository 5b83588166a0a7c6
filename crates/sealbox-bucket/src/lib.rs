//! Document bucket orchestration for Sealbox.
//!
//! [`DocumentBucket`] composes the three external collaborators — a
//! [`BlobStore`] for ciphertext objects, a [`RecordStore`] for pointer and
//! index rows, and an [`EnvelopeProvider`] for client-side encryption — into
//! the four bucket operations:
//!
//! - `store` — encrypt a payload under a context and persist it
//! - `retrieve` — fetch, decrypt, and assert the recovered context
//! - `list` — every stored document's bare pointer
//! - `search_by_context_key` — every document carrying a given tag
//!
//! The orchestrator performs no retries and no cross-store compensation: the
//! three writes behind `store` are independent, and a reader racing a writer
//! may observe a pointer row before its blob object exists. That
//! eventual-consistency window is accepted at this layer.
//!
//! [`BlobStore`]: sealbox_store::BlobStore
//! [`RecordStore`]: sealbox_store::RecordStore
//! [`EnvelopeProvider`]: sealbox_crypto::EnvelopeProvider

pub mod bucket;
pub mod error;

pub use bucket::DocumentBucket;
pub use error::{BucketError, BucketResult};
