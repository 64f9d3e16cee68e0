//! Entry coordination: fingerprint, encrypt, store, and the reverse.

use zeroize::Zeroizing;

use crate::account::Account;
use crate::crypto::{CipherBlock, Fingerprint, SecretKey};
use crate::error::{PassmanError, Result};
use crate::storage::{InsertOutcome, NewRecord, RecordStore, RecordSummary};

/// A record store paired with the cipher for the installation's key.
pub struct Vault<S> {
    store: S,
    cipher: CipherBlock,
}

impl<S: RecordStore> Vault<S> {
    pub fn new(store: S, key: SecretKey) -> Self {
        Self {
            store,
            cipher: CipherBlock::new(key),
        }
    }

    /// Encrypt `password` with `associated_data` and store it under the
    /// account's fingerprint.
    ///
    /// # Errors
    ///
    /// - `PassmanError::DuplicateEntry` if the account is already stored;
    ///   the cipher is not invoked and the stored record is untouched
    /// - `PassmanError::Entropy` / `PassmanError::Crypto` from encryption
    /// - storage errors from the backend
    pub fn add(
        &mut self,
        account: &Account,
        password: &[u8],
        associated_data: &[u8],
    ) -> Result<Fingerprint> {
        let id = account.fingerprint();
        if self.store.get(&id)?.is_some() {
            return Err(duplicate(account));
        }

        let payload = self.cipher.encrypt(password, associated_data)?;
        let record = NewRecord {
            id: id.clone(),
            username: account.username.clone(),
            site: account.site.clone(),
            payload,
        };

        match self.store.insert_if_absent(&record)? {
            InsertOutcome::Inserted => {
                tracing::debug!(id = %id, "stored entry");
                Ok(id)
            }
            InsertOutcome::AlreadyExists => Err(duplicate(account)),
        }
    }

    /// Look up the account and decrypt its password with `associated_data`.
    ///
    /// # Errors
    ///
    /// - `PassmanError::NotFound` if no entry exists for the account
    /// - `PassmanError::MalformedCiphertext` if the stored payload is truncated
    /// - `PassmanError::AuthenticationFailure` if the master secret is wrong,
    ///   the key changed, or the payload was tampered with
    pub fn reveal(&self, account: &Account, associated_data: &[u8]) -> Result<Zeroizing<Vec<u8>>> {
        let id = account.fingerprint();
        let record = self.store.get(&id)?.ok_or_else(|| {
            PassmanError::NotFound(format!(
                "no entry for {} at {}",
                account.username, account.site
            ))
        })?;
        tracing::debug!(id = %id, "decrypting entry");
        self.cipher.decrypt(&record.payload, associated_data)
    }

    /// Stored accounts, without decrypting anything.
    pub fn accounts(&self) -> Result<Vec<RecordSummary>> {
        self.store.list()
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

fn duplicate(account: &Account) -> PassmanError {
    PassmanError::DuplicateEntry {
        username: account.username.clone(),
        site: account.site.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::SqliteStore;

    fn vault() -> Vault<SqliteStore> {
        Vault::new(
            SqliteStore::open_in_memory().unwrap(),
            SecretKey::generate().unwrap(),
        )
    }

    fn account(username: &str, site: &str) -> Account {
        Account::new(username, site).unwrap()
    }

    #[test]
    fn test_add_then_reveal() {
        let mut vault = vault();
        let alice = account("alice", "example.com");

        let id = vault.add(&alice, b"hunter2", b"master").unwrap();
        assert_eq!(id, alice.fingerprint());

        let password = vault.reveal(&alice, b"master").unwrap();
        assert_eq!(password.as_slice(), b"hunter2");
    }

    #[test]
    fn test_reveal_is_case_insensitive() {
        let mut vault = vault();
        vault
            .add(&account("Alice", "Example.com"), b"hunter2", b"master")
            .unwrap();

        let password = vault
            .reveal(&account("alice", "example.com"), b"master")
            .unwrap();
        assert_eq!(password.as_slice(), b"hunter2");
    }

    #[test]
    fn test_duplicate_rejected_and_first_kept() {
        let mut vault = vault();
        let alice = account("alice", "example.com");
        vault.add(&alice, b"first", b"master").unwrap();
        let before = vault.store().get(&alice.fingerprint()).unwrap().unwrap();

        let err = vault
            .add(&account("ALICE", "example.com"), b"second", b"other")
            .unwrap_err();
        assert!(matches!(err, PassmanError::DuplicateEntry { .. }));

        let after = vault.store().get(&alice.fingerprint()).unwrap().unwrap();
        assert_eq!(before.payload, after.payload);
        assert_eq!(vault.reveal(&alice, b"master").unwrap().as_slice(), b"first");
    }

    #[test]
    fn test_missing_entry_is_not_found() {
        let vault = vault();
        let err = vault
            .reveal(&account("nobody", "nowhere"), b"master")
            .unwrap_err();
        assert!(matches!(err, PassmanError::NotFound(_)));
    }

    #[test]
    fn test_wrong_master_is_authentication_failure() {
        let mut vault = vault();
        let alice = account("alice", "example.com");
        vault.add(&alice, b"hunter2", b"master").unwrap();

        let err = vault.reveal(&alice, b"not-master").unwrap_err();
        assert!(matches!(err, PassmanError::AuthenticationFailure));
    }

    #[test]
    fn test_truncated_payload_is_malformed() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        let alice = account("alice", "example.com");
        store
            .insert_if_absent(&NewRecord {
                id: alice.fingerprint(),
                username: alice.username.clone(),
                site: alice.site.clone(),
                payload: vec![0u8; 10],
            })
            .unwrap();

        let vault = Vault::new(store, SecretKey::generate().unwrap());
        let err = vault.reveal(&alice, b"master").unwrap_err();
        assert!(matches!(err, PassmanError::MalformedCiphertext { len: 10, .. }));
    }

    #[test]
    fn test_accounts_lists_entries() {
        let mut vault = vault();
        vault
            .add(&account("alice", "example.com"), b"a", b"m")
            .unwrap();
        vault.add(&account("bob", "example.org"), b"b", b"m").unwrap();

        let accounts = vault.accounts().unwrap();
        assert_eq!(accounts.len(), 2);
        assert_eq!(accounts[0].username, "alice");
        assert_eq!(accounts[1].site, "example.org");
    }
}
