use serde::{Deserialize, Serialize};

use sealbox_types::Context;

use crate::error::{CryptoError, CryptoResult};

/// Current envelope wire-format version.
pub const ENVELOPE_VERSION: u8 = 1;

/// AES-GCM nonce length in bytes.
pub const NONCE_LEN: usize = 12;

/// The serialized ciphertext envelope.
///
/// The encryption context rides in the header in the clear, but is also
/// bound into the AEAD tag as associated data. A reader can inspect the
/// header context without the key; a tamperer cannot alter it without
/// failing authentication.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    /// Wire-format version.
    pub version: u8,
    /// Encryption context bound at encryption time.
    pub context: Context,
    /// Per-encryption random nonce.
    pub nonce: [u8; NONCE_LEN],
    /// AEAD output: ciphertext with the authentication tag appended.
    pub ciphertext: Vec<u8>,
}

impl Envelope {
    pub fn new(context: Context, nonce: [u8; NONCE_LEN], ciphertext: Vec<u8>) -> Self {
        Self {
            version: ENVELOPE_VERSION,
            context,
            nonce,
            ciphertext,
        }
    }

    /// Serialize to the binary wire form.
    pub fn to_bytes(&self) -> CryptoResult<Vec<u8>> {
        bincode::serialize(self).map_err(|e| CryptoError::Serialization(e.to_string()))
    }

    /// Decode from the binary wire form, rejecting unknown versions.
    pub fn from_bytes(data: &[u8]) -> CryptoResult<Self> {
        let envelope: Envelope = bincode::deserialize(data)
            .map_err(|e| CryptoError::MalformedEnvelope(e.to_string()))?;
        if envelope.version != ENVELOPE_VERSION {
            return Err(CryptoError::UnsupportedVersion(envelope.version));
        }
        Ok(envelope)
    }

    /// The associated-data bytes binding a context into the AEAD tag.
    ///
    /// `Context` is an ordered map, so this serialization is deterministic
    /// for a given set of tags.
    pub fn aad(context: &Context) -> CryptoResult<Vec<u8>> {
        bincode::serialize(context).map_err(|e| CryptoError::Serialization(e.to_string()))
    }
}
