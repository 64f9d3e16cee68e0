//! # Passman Core
//!
//! Core library for passman - a local, single-user credential vault.
//!
//! This crate provides the cryptographic and identification layer and the
//! record stores, independent of the CLI interface.
//!
//! ## Architecture
//!
//! - **crypto**: vault key store, XChaCha20-Poly1305 cipher, fingerprints
//! - **account**: the (username, site) identity of an entry
//! - **storage**: record store trait with SQLite and JSON backends
//! - **vault**: add/reveal coordination over a store and a cipher
//!
//! ## Flow
//!
//! Adding an entry fingerprints (username, site), rejects duplicates,
//! encrypts the password with the master secret as associated data, and
//! inserts `(fingerprint, username, site, payload)`. Revealing looks the
//! payload up by fingerprint and decrypts it with the supplied master secret.

pub mod account;
pub mod crypto;
pub mod error;
pub mod fs;
pub mod storage;
pub mod vault;

pub use account::Account;
pub use crypto::{CipherBlock, Fingerprint, KeyStore, SecretKey};
pub use error::{PassmanError, Result};
pub use storage::RecordStore;
pub use vault::Vault;

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
