//! Application context for the passman CLI.
//!
//! Bundles CLI arguments with the lazily-loaded config and vault home.

use std::path::{Path, PathBuf};

use once_cell::unsync::OnceCell;

use passman_core::storage::{JsonStore, SqliteStore};
use passman_core::{KeyStore, RecordStore, Vault};

use crate::cli::Cli;
use crate::config::{PassmanConfig, StoreBackend};
use crate::constants::{JSON_DB_FILE, KEY_FILE, SQLITE_DB_FILE};

use super::resolver::{load_config, resolve_config_path, resolve_home};

pub type DynVault = Vault<Box<dyn RecordStore>>;

/// Application context shared by command handlers.
pub struct AppContext<'a> {
    cli: &'a Cli,
    config: OnceCell<PassmanConfig>,
    home: OnceCell<PathBuf>,
}

impl<'a> AppContext<'a> {
    pub fn new(cli: &'a Cli) -> Self {
        Self {
            cli,
            config: OnceCell::new(),
            home: OnceCell::new(),
        }
    }

    pub fn quiet(&self) -> bool {
        self.cli.quiet
    }

    /// Vault home given on the command line or via PASSMAN_HOME.
    pub fn cli_home(&self) -> Option<&Path> {
        self.cli.home.as_deref()
    }

    /// Get the config, loading it on first use.
    pub fn config(&self) -> anyhow::Result<&PassmanConfig> {
        self.config
            .get_or_try_init(|| load_config(&resolve_config_path()?))
    }

    /// The vault home directory, created owner-only on first use.
    pub fn home(&self) -> anyhow::Result<&Path> {
        let home = self.home.get_or_try_init(|| -> anyhow::Result<PathBuf> {
            let home = resolve_home(self.cli.home.as_deref(), self.config()?)?;
            passman_core::fs::ensure_private_dir(&home).map_err(|e| {
                anyhow::anyhow!("Failed to create vault home {}: {}", home.display(), e)
            })?;
            tracing::debug!(home = %home.display(), "vault home resolved");
            Ok(home)
        })?;
        Ok(home.as_path())
    }

    /// Load the vault key, creating it on first run.
    pub fn key_store(&self) -> anyhow::Result<KeyStore> {
        Ok(KeyStore::init(self.home()?.join(KEY_FILE))?)
    }

    /// Open the configured record store.
    pub fn open_store(&self) -> anyhow::Result<Box<dyn RecordStore>> {
        let home = self.home()?;
        let store: Box<dyn RecordStore> = match self.config()?.store.backend {
            StoreBackend::Sqlite => Box::new(SqliteStore::open(&home.join(SQLITE_DB_FILE))?),
            StoreBackend::Json => Box::new(JsonStore::open(&home.join(JSON_DB_FILE))?),
        };
        Ok(store)
    }

    /// Load the key first, then open the store, so a corrupt key fails
    /// before any data is touched.
    pub fn open_vault(&self) -> anyhow::Result<DynVault> {
        let keys = self.key_store()?;
        let store = self.open_store()?;
        Ok(Vault::new(store, keys.current()))
    }
}
