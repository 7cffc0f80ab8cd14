//! Authenticated encryption of stored bytes.
//!
//! Provides ChaCha20-Poly1305 sealing with keys derived by Blake3. The
//! reference is bound as associated data, so a ciphertext copied to a
//! different reference fails to open.

use std::fmt;

use chacha20poly1305::{
    aead::{Aead, KeyInit, Payload},
    ChaCha20Poly1305, Key, Nonce,
};
use rand::RngCore;

use layerstore_core::Reference;

use crate::codec::Codec;
use crate::error::{CodecError, Result};

const NONCE_LEN: usize = 12;
const KEY_CONTEXT: &str = "layerstore-sealed-v1 encryption";

/// A 256-bit symmetric key for ChaCha20-Poly1305.
#[derive(Clone)]
pub struct SealingKey([u8; 32]);

impl SealingKey {
    /// Generate a new random key.
    pub fn generate() -> Self {
        let mut bytes = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut bytes);
        Self(bytes)
    }

    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Derive a key from a passphrase.
    ///
    /// Blake3 key derivation with a fixed context; the same passphrase
    /// always yields the same key.
    pub fn derive(passphrase: &[u8]) -> Self {
        Self(blake3::derive_key(KEY_CONTEXT, passphrase))
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Debug for SealingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SealingKey(..)")
    }
}

/// Seals bytes as `nonce || ciphertext`.
///
/// A fresh random nonce is drawn for every encode, so sealing the same
/// bytes twice yields different stored forms.
#[derive(Debug, Clone)]
pub struct SealedCodec {
    key: SealingKey,
}

impl SealedCodec {
    pub fn new(key: SealingKey) -> Self {
        Self { key }
    }

    fn cipher(&self) -> ChaCha20Poly1305 {
        ChaCha20Poly1305::new(Key::from_slice(self.key.as_bytes()))
    }
}

/// Associated data: scheme and path, NUL separated.
fn associated_data(reference: &Reference) -> Vec<u8> {
    let mut aad = Vec::with_capacity(reference.scheme().len() + reference.path().len() + 1);
    aad.extend_from_slice(reference.scheme().as_bytes());
    aad.push(0);
    aad.extend_from_slice(reference.path().as_bytes());
    aad
}

impl Codec<Vec<u8>> for SealedCodec {
    type Encoded = Vec<u8>;

    fn encode(&self, entity: &Vec<u8>, reference: &Reference) -> Result<Vec<u8>> {
        let mut nonce = [0u8; NONCE_LEN];
        rand::thread_rng().fill_bytes(&mut nonce);

        let aad = associated_data(reference);
        let ciphertext = self
            .cipher()
            .encrypt(
                Nonce::from_slice(&nonce),
                Payload {
                    msg: entity,
                    aad: &aad,
                },
            )
            .map_err(|e| CodecError::Encode(e.to_string()))?;

        let mut sealed = Vec::with_capacity(NONCE_LEN + ciphertext.len());
        sealed.extend_from_slice(&nonce);
        sealed.extend_from_slice(&ciphertext);
        Ok(sealed)
    }

    fn decode(&self, encoded: Vec<u8>, reference: &Reference) -> Result<Vec<u8>> {
        if encoded.len() < NONCE_LEN {
            return Err(CodecError::Decode(format!(
                "sealed entity is {} bytes, shorter than its nonce",
                encoded.len()
            )));
        }
        let (nonce, ciphertext) = encoded.split_at(NONCE_LEN);

        let aad = associated_data(reference);
        self.cipher()
            .decrypt(
                Nonce::from_slice(nonce),
                Payload {
                    msg: ciphertext,
                    aad: &aad,
                },
            )
            .map_err(|_| CodecError::Decode("authentication failed".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codec() -> SealedCodec {
        SealedCodec::new(SealingKey::derive(b"correct horse battery staple"))
    }

    #[test]
    fn test_seal_open() {
        let r = Reference::new("vault", "token");
        let sealed = codec().encode(&b"hello, world!".to_vec(), &r).unwrap();

        assert_eq!(sealed.len(), NONCE_LEN + 13 + 16);
        assert_ne!(&sealed[NONCE_LEN..NONCE_LEN + 13], b"hello, world!");
        assert_eq!(codec().decode(sealed, &r).unwrap(), b"hello, world!".to_vec());
    }

    #[test]
    fn test_nonce_differs_per_encode() {
        let r = Reference::new("vault", "token");
        let a = codec().encode(&vec![1, 2, 3], &r).unwrap();
        let b = codec().encode(&vec![1, 2, 3], &r).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_wrong_key_fails() {
        let r = Reference::new("vault", "token");
        let sealed = codec().encode(&b"secret".to_vec(), &r).unwrap();

        let other = SealedCodec::new(SealingKey::generate());
        assert!(matches!(other.decode(sealed, &r), Err(CodecError::Decode(_))));
    }

    #[test]
    fn test_moved_ciphertext_fails() {
        let sealed = codec()
            .encode(&b"secret".to_vec(), &Reference::new("vault", "a"))
            .unwrap();

        let result = codec().decode(sealed, &Reference::new("vault", "b"));
        assert!(matches!(result, Err(CodecError::Decode(_))));
    }

    #[test]
    fn test_tampered_and_truncated_fail() {
        let r = Reference::new("vault", "token");
        let mut sealed = codec().encode(&b"secret".to_vec(), &r).unwrap();
        let last = sealed.len() - 1;
        sealed[last] ^= 0x01;
        assert!(codec().decode(sealed, &r).is_err());

        assert!(codec().decode(vec![0; NONCE_LEN - 1], &r).is_err());
    }

    #[test]
    fn test_key_derivation_deterministic() {
        let k1 = SealingKey::derive(b"pass");
        let k2 = SealingKey::derive(b"pass");
        let k3 = SealingKey::derive(b"other");

        assert_eq!(k1.as_bytes(), k2.as_bytes());
        assert_ne!(k1.as_bytes(), k3.as_bytes());
        assert_eq!(format!("{:?}", k1), "SealingKey(..)");
    }
}
