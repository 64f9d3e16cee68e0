//! Cryptographic layer for passman.
//!
//! - **key**: the vault key, persisted hex-encoded in an owner-only file
//! - **cipher**: XChaCha20-Poly1305 sealing of passwords, with the master
//!   secret as associated data
//! - **fingerprint**: deterministic SHA-256 identifiers for (username, site)
//!
//! ## Threat Model
//!
//! We defend against:
//! - Theft of the record store without the key file
//! - Tampering with stored ciphertext
//! - Reading a password without knowing the master secret
//!
//! We do NOT defend against:
//! - Theft of both the key file and the master secret
//! - Compromised OS / keylogger

pub mod cipher;
pub mod fingerprint;
pub mod key;

pub use cipher::{CipherBlock, MIN_PAYLOAD_SIZE, NONCE_SIZE, TAG_SIZE};
pub use fingerprint::{fingerprint, Fingerprint, FINGERPRINT_LEN};
pub use key::{load_or_create, KeyStore, SecretKey, KEY_SIZE};
