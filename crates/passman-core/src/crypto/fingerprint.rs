//! Deterministic entry identifiers.
//!
//! `base64url_nopad(SHA-256(lowercase(username) || lowercase(site)))`
//!
//! The fingerprint is both the storage key and the duplicate-detection token,
//! so this encoding is part of the on-disk format. Changing the hash or the
//! encoding invalidates every existing store.
//!
//! There is no separator between the two fields: `("ab", "c")` and
//! `("a", "bc")` produce the same fingerprint. Existing stores depend on
//! this, so it is kept as a known weakness.

use std::fmt;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::{PassmanError, Result};

/// Length of the encoded fingerprint (32-byte digest, unpadded base64url).
pub const FINGERPRINT_LEN: usize = 43;

const DIGEST_LEN: usize = 32;

/// Text-safe identifier for a (username, site) pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Derive the fingerprint for `username` at `site`. Case-insensitive, total.
    pub fn derive(username: &str, site: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(fold_case(username).as_bytes());
        hasher.update(fold_case(site).as_bytes());
        Self(URL_SAFE_NO_PAD.encode(hasher.finalize()))
    }

    /// Validate an encoded fingerprint read back from a store.
    pub fn parse(encoded: &str) -> Result<Self> {
        let decoded = URL_SAFE_NO_PAD
            .decode(encoded)
            .map_err(|e| PassmanError::Storage(format!("invalid fingerprint {}: {}", encoded, e)))?;
        if decoded.len() != DIGEST_LEN {
            return Err(PassmanError::Storage(format!(
                "invalid fingerprint {}: {} bytes",
                encoded,
                decoded.len()
            )));
        }
        Ok(Self(encoded.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Per-character lowercase mapping.
///
/// `str::to_lowercase` maps a word-final `Σ` to `ς`, so two spellings of the
/// same name could fold differently. Mapping each char on its own does not
/// depend on position.
fn fold_case(value: &str) -> String {
    value.chars().flat_map(char::to_lowercase).collect()
}

/// Shorthand for [`Fingerprint::derive`].
pub fn fingerprint(username: &str, site: &str) -> Fingerprint {
    Fingerprint::derive(username, site)
}
