use thiserror::Error;

/// Errors from envelope encryption and decryption.
///
/// Provider failures are opaque pass-throughs: the bucket layer never
/// recovers from them locally.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CryptoError {
    /// Encryption failed inside the provider.
    #[error("encryption failed: {0}")]
    EncryptionFailure(String),

    /// Decryption or authentication failed inside the provider.
    #[error("decryption failed: {0}")]
    DecryptionFailure(String),

    /// The ciphertext is not a decodable envelope.
    #[error("malformed envelope: {0}")]
    MalformedEnvelope(String),

    /// The envelope carries a version this build does not understand.
    #[error("unsupported envelope version {0}")]
    UnsupportedVersion(u8),

    /// Key material has the wrong length.
    #[error("invalid key length: expected {expected} bytes, got {actual}")]
    InvalidKeyLength { expected: usize, actual: usize },

    /// Key material is not valid hex.
    #[error("invalid hex key material: {0}")]
    InvalidHex(String),

    /// Envelope serialization failure.
    #[error("envelope serialization error: {0}")]
    Serialization(String),
}

/// Result alias for crypto operations.
pub type CryptoResult<T> = Result<T, CryptoError>;
