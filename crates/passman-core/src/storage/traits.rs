//! Record store trait definition.
//!
//! The `RecordStore` trait is the only view the vault has of persistence.
//! Backends report duplicates through [`InsertOutcome`] rather than through
//! driver-specific errors, so the vault never inspects backend error types.

use super::types::{InsertOutcome, NewRecord, Record, RecordSummary};
use crate::crypto::Fingerprint;
use crate::error::Result;

/// Mapping from fingerprint to record.
///
/// Implementations must ensure:
/// - At most one record per fingerprint
/// - An existing record is never modified by `insert_if_absent`
/// - Payload bytes are returned exactly as inserted
pub trait RecordStore {
    /// Insert `record` unless its fingerprint is already present.
    ///
    /// # Returns
    ///
    /// `InsertOutcome::AlreadyExists` if a record with the same id exists;
    /// the existing record is left untouched.
    ///
    /// # Errors
    ///
    /// Returns `PassmanError::Storage` (or an I/O / SQLite error) if the
    /// backend fails for any other reason.
    fn insert_if_absent(&mut self, record: &NewRecord) -> Result<InsertOutcome>;

    /// Get a record by fingerprint.
    ///
    /// Returns `Ok(Some(record))` if found, `Ok(None)` if not found.
    fn get(&self, id: &Fingerprint) -> Result<Option<Record>>;

    /// List all records, sorted by site then username. Payloads are omitted.
    fn list(&self) -> Result<Vec<RecordSummary>>;
}

impl<S: RecordStore + ?Sized> RecordStore for Box<S> {
    fn insert_if_absent(&mut self, record: &NewRecord) -> Result<InsertOutcome> {
        (**self).insert_if_absent(record)
    }

    fn get(&self, id: &Fingerprint) -> Result<Option<Record>> {
        (**self).get(id)
    }

    fn list(&self) -> Result<Vec<RecordSummary>> {
        (**self).list()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boxed_store_is_a_store() {
        fn _accepts_store<S: RecordStore>(_store: S) {}
        fn _accepts_boxed(store: Box<dyn RecordStore>) {
            _accepts_store(store)
        }
    }
}
