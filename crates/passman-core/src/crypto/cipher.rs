//! Password encryption with XChaCha20-Poly1305.
//!
//! Payload format (binary):
//! ```text
//! [24 bytes: random nonce][N bytes: ciphertext][16 bytes: Poly1305 tag]
//! ```
//!
//! The associated data (the user's master secret) is authenticated but never
//! stored; it must be presented again at decrypt time.

use chacha20poly1305::{
    aead::{Aead, KeyInit, Payload},
    XChaCha20Poly1305, XNonce,
};
use zeroize::Zeroizing;

use crate::crypto::key::SecretKey;
use crate::error::{PassmanError, Result};

/// Size of an XChaCha20-Poly1305 nonce (192-bit)
pub const NONCE_SIZE: usize = 24;

/// Size of a Poly1305 authentication tag
pub const TAG_SIZE: usize = 16;

/// Smallest well-formed payload: a nonce and a tag around an empty plaintext.
pub const MIN_PAYLOAD_SIZE: usize = NONCE_SIZE + TAG_SIZE;

/// AEAD wrapper around a copy of the vault key.
///
/// Holds no state besides the key. Every [`CipherBlock::encrypt`] call draws
/// a fresh random nonce, so the same block can seal any number of passwords.
#[derive(Debug, Clone)]
pub struct CipherBlock {
    key: SecretKey,
}

impl CipherBlock {
    pub fn new(key: SecretKey) -> Self {
        Self { key }
    }

    /// Construct from raw key bytes, failing on a malformed key length.
    pub fn from_slice(key: &[u8]) -> Result<Self> {
        Ok(Self::new(SecretKey::from_slice(key)?))
    }

    fn aead(&self) -> XChaCha20Poly1305 {
        XChaCha20Poly1305::new(self.key.as_bytes().into())
    }

    /// Seal `plaintext`, binding `associated_data` into the tag.
    ///
    /// Returns `[24-byte nonce][ciphertext][16-byte tag]`.
    ///
    /// # Errors
    ///
    /// - `PassmanError::Entropy` if no nonce could be drawn
    /// - `PassmanError::Crypto` if the primitive refuses the input
    pub fn encrypt(&self, plaintext: &[u8], associated_data: &[u8]) -> Result<Vec<u8>> {
        let mut nonce_bytes = [0u8; NONCE_SIZE];
        getrandom::getrandom(&mut nonce_bytes)
            .map_err(|e| PassmanError::Entropy(format!("failed to generate nonce: {}", e)))?;
        let nonce = XNonce::from_slice(&nonce_bytes);

        let sealed = self
            .aead()
            .encrypt(
                nonce,
                Payload {
                    msg: plaintext,
                    aad: associated_data,
                },
            )
            .map_err(|e| PassmanError::Crypto(format!("encryption failed: {}", e)))?;

        let mut payload = Vec::with_capacity(NONCE_SIZE + sealed.len());
        payload.extend_from_slice(&nonce_bytes);
        payload.extend_from_slice(&sealed);
        Ok(payload)
    }

    /// Open a payload produced by [`CipherBlock::encrypt`].
    ///
    /// # Errors
    ///
    /// - `PassmanError::MalformedCiphertext` if `payload` is shorter than
    ///   [`MIN_PAYLOAD_SIZE`]; the primitive is not invoked
    /// - `PassmanError::AuthenticationFailure` if the tag does not verify.
    ///   The error does not say whether the key or the associated data was wrong.
    pub fn decrypt(&self, payload: &[u8], associated_data: &[u8]) -> Result<Zeroizing<Vec<u8>>> {
        if payload.len() < MIN_PAYLOAD_SIZE {
            return Err(PassmanError::MalformedCiphertext {
                len: payload.len(),
                min: MIN_PAYLOAD_SIZE,
            });
        }

        let (nonce_bytes, sealed) = payload.split_at(NONCE_SIZE);
        let nonce = XNonce::from_slice(nonce_bytes);

        self.aead()
            .decrypt(
                nonce,
                Payload {
                    msg: sealed,
                    aad: associated_data,
                },
            )
            .map(Zeroizing::new)
            .map_err(|_| PassmanError::AuthenticationFailure)
    }
}
