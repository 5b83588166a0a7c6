use thiserror::Error;

use sealbox_crypto::CryptoError;
use sealbox_store::StoreError;
use sealbox_types::ModelError;

/// Errors from bucket operations.
#[derive(Debug, Error)]
pub enum BucketError {
    /// Record model or identifier validation failure.
    #[error("model error: {0}")]
    Model(#[from] ModelError),

    /// Blob-store or record-store failure.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Envelope encryption or decryption failure.
    #[error("crypto error: {0}")]
    Crypto(#[from] CryptoError),

    /// The recovered encryption context failed the caller's expected-keys or
    /// expected-pairs assertion. Security relevant; never downgraded.
    #[error(
        "encryption context mismatch: missing keys {missing_keys:?}, \
         mismatched pairs {mismatched_pairs:?}"
    )]
    ContextMismatch {
        /// Expected context keys absent from the recovered context.
        missing_keys: Vec<String>,
        /// Expected pairs whose recovered value is absent or different.
        mismatched_pairs: Vec<(String, String)>,
    },
}

/// Result alias for bucket operations.
pub type BucketResult<T> = Result<T, BucketError>;
