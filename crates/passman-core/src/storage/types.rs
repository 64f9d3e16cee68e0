//! Record types exchanged with record stores.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::crypto::Fingerprint;

/// A record ready to be inserted. `payload` is an already-encrypted password.
#[derive(Debug, Clone)]
pub struct NewRecord {
    /// Fingerprint of (username, site)
    pub id: Fingerprint,

    pub username: String,

    pub site: String,

    /// `nonce || ciphertext || tag`
    pub payload: Vec<u8>,
}

/// A stored record.
#[derive(Debug, Clone)]
pub struct Record {
    pub id: Fingerprint,
    pub username: String,
    pub site: String,
    pub payload: Vec<u8>,
    pub created_at: DateTime<Utc>,
}

/// A stored record without its payload, for listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordSummary {
    pub id: Fingerprint,
    pub username: String,
    pub site: String,
    pub created_at: DateTime<Utc>,
}

/// Result of [`RecordStore::insert_if_absent`](super::RecordStore::insert_if_absent).
///
/// Any failure other than a duplicate id is reported as an `Err`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted,
    AlreadyExists,
}
