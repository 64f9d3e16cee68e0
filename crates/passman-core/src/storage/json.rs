//! Flat JSON record store.
//!
//! The whole store is one JSON object mapping fingerprint to account:
//!
//! ```json
//! {
//!   "ungWv48Bz-pBQUDeXa4iI7ADYaOWF3qctBD_YfIAFa0": {
//!     "user": "ab",
//!     "site": "c",
//!     "pass": "<base64 payload>",
//!     "created_at": "2024-01-01T00:00:00Z"
//!   }
//! }
//! ```
//!
//! Every insert rewrites the file atomically.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::crypto::Fingerprint;
use crate::error::{PassmanError, Result};
use crate::storage::traits::RecordStore;
use crate::storage::types::{InsertOutcome, NewRecord, Record, RecordSummary};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredAccount {
    user: String,
    site: String,
    pass: String,
    created_at: DateTime<Utc>,
}

/// Record store backed by a single JSON document.
pub struct JsonStore {
    path: PathBuf,
    accounts: BTreeMap<Fingerprint, StoredAccount>,
}

impl JsonStore {
    /// Load the store at `path`. A missing or empty file is an empty store.
    pub fn open(path: &Path) -> Result<Self> {
        let accounts = match fs::read(path) {
            Ok(data) if data.iter().all(u8::is_ascii_whitespace) => BTreeMap::new(),
            Ok(data) => Self::parse_document(path, &data)?,
            Err(err) if err.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => return Err(err.into()),
        };
        tracing::debug!(path = %path.display(), count = accounts.len(), "json record store loaded");
        Ok(Self {
            path: path.to_path_buf(),
            accounts,
        })
    }

    /// Keys are checked the same way SQLite rows are, so a hand-edited
    /// key can never be looked up or listed.
    fn parse_document(path: &Path, data: &[u8]) -> Result<BTreeMap<Fingerprint, StoredAccount>> {
        let raw: BTreeMap<String, StoredAccount> = serde_json::from_slice(data).map_err(|e| {
            PassmanError::Storage(format!("error reading db {}: {}", path.display(), e))
        })?;
        raw.into_iter()
            .map(|(key, account)| Ok((Fingerprint::parse(&key)?, account)))
            .collect()
    }

    fn persist(&self) -> Result<()> {
        let data = serde_json::to_vec_pretty(&self.accounts)?;
        crate::fs::write_atomic(&self.path, &data)?;
        Ok(())
    }
}

impl RecordStore for JsonStore {
    fn insert_if_absent(&mut self, record: &NewRecord) -> Result<InsertOutcome> {
        if self.accounts.contains_key(&record.id) {
            return Ok(InsertOutcome::AlreadyExists);
        }

        self.accounts.insert(
            record.id.clone(),
            StoredAccount {
                user: record.username.clone(),
                site: record.site.clone(),
                pass: STANDARD.encode(&record.payload),
                created_at: Utc::now(),
            },
        );

        if let Err(err) = self.persist() {
            self.accounts.remove(&record.id);
            return Err(err);
        }
        Ok(InsertOutcome::Inserted)
    }

    fn get(&self, id: &Fingerprint) -> Result<Option<Record>> {
        let Some(account) = self.accounts.get(id) else {
            return Ok(None);
        };
        let payload = STANDARD.decode(&account.pass).map_err(|e| {
            PassmanError::Storage(format!("Invalid payload encoding for {}: {}", id, e))
        })?;
        Ok(Some(Record {
            id: id.clone(),
            username: account.user.clone(),
            site: account.site.clone(),
            payload,
            created_at: account.created_at,
        }))
    }

    fn list(&self) -> Result<Vec<RecordSummary>> {
        let mut summaries: Vec<RecordSummary> = self
            .accounts
            .iter()
            .map(|(id, account)| RecordSummary {
                id: id.clone(),
                username: account.user.clone(),
                site: account.site.clone(),
                created_at: account.created_at,
            })
            .collect();
        summaries.sort_by(|a, b| (&a.site, &a.username).cmp(&(&b.site, &b.username)));
        Ok(summaries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn new_record(username: &str, site: &str, payload: &[u8]) -> NewRecord {
        NewRecord {
            id: Fingerprint::derive(username, site),
            username: username.to_string(),
            site: site.to_string(),
            payload: payload.to_vec(),
        }
    }

    #[test]
    fn test_missing_and_empty_files_are_empty_stores() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("passman-db.json");

        assert!(JsonStore::open(&path).unwrap().list().unwrap().is_empty());

        fs::write(&path, "\n").unwrap();
        assert!(JsonStore::open(&path).unwrap().list().unwrap().is_empty());
    }

    #[test]
    fn test_insert_persists_and_reloads() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("passman-db.json");
        let record = new_record("alice", "example.com", &[0, 255, 7]);

        let mut store = JsonStore::open(&path).unwrap();
        assert_eq!(
            store.insert_if_absent(&record).unwrap(),
            InsertOutcome::Inserted
        );

        let reopened = JsonStore::open(&path).unwrap();
        let stored = reopened.get(&record.id).unwrap().unwrap();
        assert_eq!(stored.username, "alice");
        assert_eq!(stored.payload, vec![0, 255, 7]);

        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        let entry = &raw[record.id.as_str()];
        assert_eq!(entry["user"], "alice");
        assert_eq!(entry["site"], "example.com");
        assert_eq!(entry["pass"], STANDARD.encode([0u8, 255, 7]));
    }

    #[test]
    fn test_duplicate_is_reported_and_file_unchanged() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("passman-db.json");

        let mut store = JsonStore::open(&path).unwrap();
        store
            .insert_if_absent(&new_record("alice", "example.com", &[1]))
            .unwrap();
        let before = fs::read(&path).unwrap();

        let outcome = store
            .insert_if_absent(&new_record("ALICE", "Example.com", &[2]))
            .unwrap();
        assert_eq!(outcome, InsertOutcome::AlreadyExists);
        assert_eq!(fs::read(&path).unwrap(), before);
    }

    #[test]
    fn test_corrupt_document_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("passman-db.json");
        fs::write(&path, "{ not json").unwrap();

        let result = JsonStore::open(&path);
        assert!(matches!(result, Err(PassmanError::Storage(_))));
    }

    #[test]
    fn test_malformed_fingerprint_key_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("passman-db.json");
        let account = r#"{"user":"a","site":"b","pass":"AA==","created_at":"2024-01-01T00:00:00Z"}"#;

        fs::write(&path, format!(r#"{{"not-a-fingerprint": {}}}"#, account)).unwrap();
        let err = JsonStore::open(&path).err().unwrap();
        assert!(matches!(err, PassmanError::Storage(_)));
        assert!(err.to_string().contains("not-a-fingerprint"));

        // Valid base64url, wrong digest length.
        fs::write(&path, format!(r#"{{"AAAA": {}}}"#, account)).unwrap();
        assert!(matches!(
            JsonStore::open(&path),
            Err(PassmanError::Storage(_))
        ));

        let id = Fingerprint::derive("a", "b");
        fs::write(&path, format!(r#"{{"{}": {}}}"#, id, account)).unwrap();
        let store = JsonStore::open(&path).unwrap();
        assert_eq!(store.get(&id).unwrap().unwrap().payload, vec![0]);
    }

    #[test]
    fn test_list_sorted_by_site_then_user() {
        let dir = tempdir().unwrap();
        let mut store = JsonStore::open(&dir.path().join("db.json")).unwrap();
        store.insert_if_absent(&new_record("zed", "b.com", &[0])).unwrap();
        store.insert_if_absent(&new_record("bob", "a.com", &[0])).unwrap();
        store.insert_if_absent(&new_record("amy", "b.com", &[0])).unwrap();

        let users: Vec<String> = store
            .list()
            .unwrap()
            .into_iter()
            .map(|s| s.username)
            .collect();
        assert_eq!(users, vec!["bob", "amy", "zed"]);
    }
}
