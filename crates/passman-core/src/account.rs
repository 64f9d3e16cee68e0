//! Account identity: the (username, site) pair an entry is stored under.

use serde::{Deserialize, Serialize};

use crate::crypto::Fingerprint;
use crate::error::{PassmanError, Result};

/// A username at a site. The password is deliberately not part of this type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub username: String,
    pub site: String,
}

impl Account {
    /// Create an account, rejecting empty or whitespace-only fields.
    pub fn new(username: impl Into<String>, site: impl Into<String>) -> Result<Self> {
        let username = username.into();
        let site = site.into();
        if username.trim().is_empty() {
            return Err(PassmanError::InvalidInput(
                "Username cannot be empty".to_string(),
            ));
        }
        if site.trim().is_empty() {
            return Err(PassmanError::InvalidInput("Site cannot be empty".to_string()));
        }
        Ok(Self { username, site })
    }

    /// Storage identifier for this account.
    pub fn fingerprint(&self) -> Fingerprint {
        Fingerprint::derive(&self.username, &self.site)
    }
}
