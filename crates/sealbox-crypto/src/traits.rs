use sealbox_types::Context;

use crate::error::CryptoResult;

/// Output of a successful decryption.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Decrypted {
    /// The recovered plaintext.
    pub plaintext: Vec<u8>,
    /// The encryption context actually bound into the ciphertext at
    /// encryption time. Authenticated; trustworthy for assertions.
    pub context: Context,
}

/// Client-side envelope encryption provider.
///
/// All implementations must satisfy these invariants:
/// - The encryption context is embedded in the ciphertext and covered by
///   authentication; `decrypt` returns exactly the context supplied to
///   `encrypt`.
/// - Tampering with the ciphertext or the embedded context fails decryption.
/// - Failures are opaque to callers; the provider performs no retries.
pub trait EnvelopeProvider: Send + Sync {
    /// Encrypt `plaintext` under `context`, producing a self-describing
    /// ciphertext envelope.
    fn encrypt(&self, plaintext: &[u8], context: &Context) -> CryptoResult<Vec<u8>>;

    /// Decrypt an envelope, returning the plaintext and the recovered
    /// context.
    fn decrypt(&self, ciphertext: &[u8]) -> CryptoResult<Decrypted>;
}
