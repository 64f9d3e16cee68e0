//! Error types for passman core operations.
//!
//! This module defines the error hierarchy for all core operations.
//! Errors are descriptive at the core level; the CLI layer maps these
//! to user-friendly messages and exit codes.

use thiserror::Error;

/// Result type alias for passman operations.
pub type Result<T> = std::result::Result<T, PassmanError>;

/// Core error type for passman operations.
#[derive(Debug, Error)]
pub enum PassmanError {
    /// Key file unreadable or corrupt. The vault cannot operate.
    #[error("Initialization error: {0}")]
    Initialization(String),

    /// An entry with the same fingerprint is already stored
    #[error("Entry already exists for {username} at {site}")]
    DuplicateEntry { username: String, site: String },

    /// Lookup miss
    #[error("Not found: {0}")]
    NotFound(String),

    /// Payload too short to contain a nonce and a tag
    #[error("Invalid ciphertext: {len} bytes (minimum {min})")]
    MalformedCiphertext { len: usize, min: usize },

    /// Tag verification failed (wrong key, wrong master secret, or tampering)
    #[error("Authentication failed: ciphertext could not be verified")]
    AuthenticationFailure,

    /// The OS random source failed
    #[error("Entropy source failure: {0}")]
    Entropy(String),

    /// AEAD primitive construction or sealing error
    #[error("Encryption error: {0}")]
    Crypto(String),

    /// Record store backend error
    #[error("Storage error: {0}")]
    Storage(String),

    /// Invalid user input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// SQLite-specific storage error
    #[error("SQLite error: {source}")]
    Sqlite {
        #[from]
        source: rusqlite::Error,
    },

    /// I/O error
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// JSON serialization/deserialization error
    #[error("JSON error: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },
}

impl PassmanError {
    /// Whether the caller may reasonably retry with different input
    /// (for example prompting for the master secret again).
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            PassmanError::DuplicateEntry { .. }
                | PassmanError::NotFound(_)
                | PassmanError::AuthenticationFailure
                | PassmanError::InvalidInput(_)
        )
    }
}
