//! Record storage.
//!
//! The vault only needs two operations from a store: insert-if-absent and
//! lookup by fingerprint (plus a payload-free listing for `ls`). Two
//! backends are provided: a SQLite table and a flat JSON document.

pub mod json;
pub mod sqlite;
pub mod traits;
pub mod types;

pub use json::JsonStore;
pub use sqlite::SqliteStore;
pub use traits::RecordStore;
pub use types::{InsertOutcome, NewRecord, Record, RecordSummary};
