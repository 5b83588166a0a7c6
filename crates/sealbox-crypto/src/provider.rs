use aes_gcm::aead::{Aead, Payload};
use aes_gcm::{Aes256Gcm, KeyInit};
use rand::rngs::OsRng;
use rand::RngCore;

use sealbox_types::Context;

use crate::envelope::{Envelope, NONCE_LEN};
use crate::error::{CryptoError, CryptoResult};
use crate::traits::{Decrypted, EnvelopeProvider};

/// AES-256-GCM key length in bytes.
pub const KEY_LEN: usize = 32;

/// AES-256-GCM envelope provider.
///
/// Encrypts with a caller-supplied 256-bit key and a fresh random nonce per
/// call. The encryption context is serialized into the envelope header and
/// bound as associated data, so the header copy cannot be altered without
/// failing the authentication tag.
pub struct AesGcmProvider {
    key: [u8; KEY_LEN],
}

impl AesGcmProvider {
    /// Build a provider from raw key bytes.
    pub fn new(key: [u8; KEY_LEN]) -> Self {
        Self { key }
    }

    /// Build a provider from a byte slice, checking the length.
    pub fn from_key_bytes(bytes: &[u8]) -> CryptoResult<Self> {
        let key: [u8; KEY_LEN] = bytes
            .try_into()
            .map_err(|_| CryptoError::InvalidKeyLength {
                expected: KEY_LEN,
                actual: bytes.len(),
            })?;
        Ok(Self::new(key))
    }

    /// Build a provider from hex-encoded key material (64 hex characters).
    pub fn from_hex(s: &str) -> CryptoResult<Self> {
        let bytes = hex::decode(s).map_err(|e| CryptoError::InvalidHex(e.to_string()))?;
        Self::from_key_bytes(&bytes)
    }

    /// Generate a provider with a random key. For tests and demos.
    pub fn generate() -> Self {
        let mut key = [0u8; KEY_LEN];
        OsRng.fill_bytes(&mut key);
        Self::new(key)
    }
}

impl std::fmt::Debug for AesGcmProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Key material never appears in debug output.
        f.debug_struct("AesGcmProvider").finish_non_exhaustive()
    }
}

impl EnvelopeProvider for AesGcmProvider {
    fn encrypt(&self, plaintext: &[u8], context: &Context) -> CryptoResult<Vec<u8>> {
        let cipher = Aes256Gcm::new((&self.key).into());
        let mut nonce = [0u8; NONCE_LEN];
        OsRng.fill_bytes(&mut nonce);
        let aad = Envelope::aad(context)?;
        let ciphertext = cipher
            .encrypt(
                aes_gcm::Nonce::from_slice(&nonce),
                Payload {
                    msg: plaintext,
                    aad: &aad,
                },
            )
            .map_err(|_| CryptoError::EncryptionFailure("AEAD seal failed".to_string()))?;
        Envelope::new(context.clone(), nonce, ciphertext).to_bytes()
    }

    fn decrypt(&self, ciphertext: &[u8]) -> CryptoResult<Decrypted> {
        let envelope = Envelope::from_bytes(ciphertext)?;
        let cipher = Aes256Gcm::new((&self.key).into());
        let aad = Envelope::aad(&envelope.context)?;
        let plaintext = cipher
            .decrypt(
                aes_gcm::Nonce::from_slice(&envelope.nonce),
                Payload {
                    msg: &envelope.ciphertext,
                    aad: &aad,
                },
            )
            .map_err(|_| {
                CryptoError::DecryptionFailure("AEAD authentication failed".to_string())
            })?;
        Ok(Decrypted {
            plaintext,
            context: envelope.context,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_context() -> Context {
        let mut context = Context::new();
        context.insert("fleet".to_string(), "bananas".to_string());
        context.insert("region".to_string(), "sp-moon-1".to_string());
        context
    }

    #[test]
    fn roundtrip_recovers_plaintext_and_context() {
        let provider = AesGcmProvider::generate();
        let sealed = provider.encrypt(b"attack at dawn", &sample_context()).unwrap();
        let opened = provider.decrypt(&sealed).unwrap();
        assert_eq!(opened.plaintext, b"attack at dawn");
        assert_eq!(opened.context, sample_context());
    }

    #[test]
    fn empty_plaintext_and_context() {
        let provider = AesGcmProvider::generate();
        let sealed = provider.encrypt(b"", &Context::new()).unwrap();
        let opened = provider.decrypt(&sealed).unwrap();
        assert!(opened.plaintext.is_empty());
        assert!(opened.context.is_empty());
    }

    #[test]
    fn ciphertext_differs_per_call() {
        // Fresh nonce per encryption.
        let provider = AesGcmProvider::generate();
        let a = provider.encrypt(b"same", &Context::new()).unwrap();
        let b = provider.encrypt(b"same", &Context::new()).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn wrong_key_fails_authentication() {
        let sealed = AesGcmProvider::generate()
            .encrypt(b"secret", &sample_context())
            .unwrap();
        let err = AesGcmProvider::generate().decrypt(&sealed).unwrap_err();
        assert!(matches!(err, CryptoError::DecryptionFailure(_)));
    }

    #[test]
    fn tampered_header_context_fails_authentication() {
        let provider = AesGcmProvider::generate();
        let sealed = provider.encrypt(b"secret", &sample_context()).unwrap();

        // Rewrite the header context and re-encode; the AEAD tag still
        // covers the original context, so decryption must fail.
        let mut envelope = Envelope::from_bytes(&sealed).unwrap();
        envelope
            .context
            .insert("fleet".to_string(), "coconuts".to_string());
        let forged = envelope.to_bytes().unwrap();

        let err = provider.decrypt(&forged).unwrap_err();
        assert!(matches!(err, CryptoError::DecryptionFailure(_)));
    }

    #[test]
    fn tampered_ciphertext_fails_authentication() {
        let provider = AesGcmProvider::generate();
        let sealed = provider.encrypt(b"secret", &sample_context()).unwrap();
        let mut envelope = Envelope::from_bytes(&sealed).unwrap();
        let last = envelope.ciphertext.len() - 1;
        envelope.ciphertext[last] ^= 0x01;
        let forged = envelope.to_bytes().unwrap();
        assert!(provider.decrypt(&forged).is_err());
    }

    #[test]
    fn garbage_input_is_malformed() {
        let provider = AesGcmProvider::generate();
        let err = provider.decrypt(&[0xde, 0xad, 0xbe, 0xef]).unwrap_err();
        assert!(matches!(err, CryptoError::MalformedEnvelope(_)));
    }

    #[test]
    fn key_length_is_checked() {
        let err = AesGcmProvider::from_key_bytes(&[0u8; 16]).unwrap_err();
        assert_eq!(
            err,
            CryptoError::InvalidKeyLength {
                expected: KEY_LEN,
                actual: 16
            }
        );
    }

    #[test]
    fn hex_key_roundtrip() {
        let provider = AesGcmProvider::from_hex(&"ab".repeat(32)).unwrap();
        let sealed = provider.encrypt(b"x", &Context::new()).unwrap();
        let again = AesGcmProvider::from_hex(&"ab".repeat(32)).unwrap();
        assert_eq!(again.decrypt(&sealed).unwrap().plaintext, b"x");
    }

    #[test]
    fn bad_hex_is_rejected() {
        assert!(matches!(
            AesGcmProvider::from_hex("zz").unwrap_err(),
            CryptoError::InvalidHex(_)
        ));
    }

    #[test]
    fn debug_redacts_key() {
        let provider = AesGcmProvider::new([0xaa; KEY_LEN]);
        let debug = format!("{provider:?}");
        assert!(!debug.contains("aa"));
    }
}
