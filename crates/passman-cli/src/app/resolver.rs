//! Path resolution for the config file and vault home.

use std::path::{Path, PathBuf};

use crate::config::{default_config_path, default_home_dir, read_config, PassmanConfig};
use crate::constants::CONFIG_ENV;

/// Resolve the config file path, checking PASSMAN_CONFIG first.
pub fn resolve_config_path() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var(CONFIG_ENV) {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value));
        }
    }
    default_config_path()
}

/// Load the config file if present; a missing file means defaults.
pub fn load_config(path: &Path) -> anyhow::Result<PassmanConfig> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        return Ok(PassmanConfig::default());
    }
    read_config(path)
}

/// Resolve the vault home: `--home`/PASSMAN_HOME, then config, then the
/// XDG data directory.
pub fn resolve_home(flag: Option<&Path>, config: &PassmanConfig) -> anyhow::Result<PathBuf> {
    if let Some(path) = flag {
        return Ok(path.to_path_buf());
    }
    if let Some(home) = config.vault.home.as_deref() {
        if !home.trim().is_empty() {
            return Ok(PathBuf::from(home));
        }
    }
    default_home_dir()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StoreBackend;

    #[test]
    fn test_flag_wins_over_config() {
        let config = PassmanConfig::new(Some(PathBuf::from("/from/config")), StoreBackend::Sqlite);
        let home = resolve_home(Some(Path::new("/from/flag")), &config).unwrap();
        assert_eq!(home, PathBuf::from("/from/flag"));
    }

    #[test]
    fn test_config_used_without_flag() {
        let config = PassmanConfig::new(Some(PathBuf::from("/from/config")), StoreBackend::Sqlite);
        assert_eq!(
            resolve_home(None, &config).unwrap(),
            PathBuf::from("/from/config")
        );
    }

    #[test]
    fn test_missing_config_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(&dir.path().join("absent.toml")).unwrap();
        assert!(config.vault.home.is_none());
        assert_eq!(config.store.backend, StoreBackend::Sqlite);
    }
}
