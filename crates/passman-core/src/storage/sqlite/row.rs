//! Record row type for database queries.

use chrono::{DateTime, Utc};

use crate::crypto::Fingerprint;
use crate::error::{PassmanError, Result};
use crate::storage::types::{Record, RecordSummary};

/// Raw row data from the pass table, before parsing into domain types.
#[derive(Debug)]
pub struct RecordRow {
    pub id: String,
    pub user: String,
    pub site: String,
    pub pass: Option<Vec<u8>>,
    pub created_at: String,
}

impl RecordRow {
    fn parse_common(&self) -> Result<(Fingerprint, DateTime<Utc>)> {
        let id = Fingerprint::parse(&self.id)?;
        let created_at = DateTime::parse_from_rfc3339(&self.created_at)
            .map_err(|e| PassmanError::Storage(format!("Invalid timestamp: {}", e)))?
            .with_timezone(&Utc);
        Ok((id, created_at))
    }
}

impl TryFrom<RecordRow> for Record {
    type Error = PassmanError;

    fn try_from(row: RecordRow) -> Result<Self> {
        let (id, created_at) = row.parse_common()?;
        let payload = row
            .pass
            .ok_or_else(|| PassmanError::Storage("Row is missing its payload".to_string()))?;
        Ok(Record {
            id,
            username: row.user,
            site: row.site,
            payload,
            created_at,
        })
    }
}

impl TryFrom<RecordRow> for RecordSummary {
    type Error = PassmanError;

    fn try_from(row: RecordRow) -> Result<Self> {
        let (id, created_at) = row.parse_common()?;
        Ok(RecordSummary {
            id,
            username: row.user,
            site: row.site,
            created_at,
        })
    }
}
