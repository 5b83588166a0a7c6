//! Envelope encryption boundary for Sealbox.
//!
//! Documents are encrypted client-side before they reach the blob store. The
//! encryption context — the tag map describing the document — is bound into
//! the ciphertext envelope as associated data, so decryption recovers the
//! exact context supplied at encryption time and any tampering with it fails
//! authentication. This recovered context, not the unauthenticated blob
//! metadata, is what retrieval asserts against.
//!
//! # Components
//!
//! - [`EnvelopeProvider`] — the boundary trait the bucket orchestrator uses
//! - [`Envelope`] — the versioned, bincode-serialized wire form
//! - [`AesGcmProvider`] — AES-256-GCM provider with a caller-supplied key

pub mod envelope;
pub mod error;
pub mod provider;
pub mod traits;

pub use envelope::{Envelope, ENVELOPE_VERSION};
pub use error::{CryptoError, CryptoResult};
pub use provider::AesGcmProvider;
pub use traits::{Decrypted, EnvelopeProvider};
