//! SQLite record store.
//!
//! One table, keyed by fingerprint. The payload column holds raw
//! `nonce || ciphertext || tag` bytes.

mod row;

use std::path::Path;

use chrono::Utc;
use rusqlite::{Connection, OptionalExtension};

use crate::crypto::Fingerprint;
use crate::error::Result;
use crate::storage::traits::RecordStore;
use crate::storage::types::{InsertOutcome, NewRecord, Record, RecordSummary};

use row::RecordRow;

const SCHEMA: &str = r#"
    CREATE TABLE IF NOT EXISTS pass (
        id TEXT NOT NULL PRIMARY KEY,
        user TEXT NOT NULL,
        site TEXT NOT NULL,
        pass BLOB NOT NULL,
        created_at TEXT NOT NULL
    );
"#;

/// Record store backed by a SQLite database file.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (or create) the database at `path` and run the schema migration.
    ///
    /// A missing database file is created owner-only before SQLite opens
    /// it, so it never exists with wider permissions.
    pub fn open(path: &Path) -> Result<Self> {
        match crate::fs::create_owner_only(path) {
            Ok(_) => tracing::debug!(path = %path.display(), "created sqlite database file"),
            Err(err) if err.kind() == std::io::ErrorKind::AlreadyExists => {}
            Err(err) => return Err(err.into()),
        }
        Self::with_connection(Connection::open(path)?)
    }

    /// Open a throwaway in-memory database.
    pub fn open_in_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch(SCHEMA)?;
        tracing::debug!("sqlite record store ready");
        Ok(Self { conn })
    }
}

impl RecordStore for SqliteStore {
    fn insert_if_absent(&mut self, record: &NewRecord) -> Result<InsertOutcome> {
        let changed = self.conn.execute(
            r#"
            INSERT INTO pass (id, user, site, pass, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ON CONFLICT(id) DO NOTHING
            "#,
            (
                record.id.as_str(),
                record.username.as_str(),
                record.site.as_str(),
                record.payload.as_slice(),
                Utc::now().to_rfc3339(),
            ),
        )?;

        if changed == 0 {
            return Ok(InsertOutcome::AlreadyExists);
        }
        Ok(InsertOutcome::Inserted)
    }

    fn get(&self, id: &Fingerprint) -> Result<Option<Record>> {
        let row = self
            .conn
            .query_row(
                "SELECT id, user, site, pass, created_at FROM pass WHERE id = ?",
                [id.as_str()],
                |row| {
                    Ok(RecordRow {
                        id: row.get(0)?,
                        user: row.get(1)?,
                        site: row.get(2)?,
                        pass: Some(row.get(3)?),
                        created_at: row.get(4)?,
                    })
                },
            )
            .optional()?;

        row.map(Record::try_from).transpose()
    }

    fn list(&self) -> Result<Vec<RecordSummary>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, user, site, created_at FROM pass ORDER BY site, user")?;
        let rows = stmt.query_map([], |row| {
            Ok(RecordRow {
                id: row.get(0)?,
                user: row.get(1)?,
                site: row.get(2)?,
                pass: None,
                created_at: row.get(3)?,
            })
        })?;

        let mut summaries = Vec::new();
        for row in rows {
            summaries.push(RecordSummary::try_from(row?)?);
        }
        Ok(summaries)
    }
}
