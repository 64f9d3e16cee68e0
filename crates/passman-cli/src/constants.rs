//! Constants used throughout the CLI.

/// Exit codes for the CLI.
///
/// These follow common Unix conventions:
/// - 0: Success
/// - 1: General error (used by anyhow for unhandled errors)
/// - 2: Misuse of shell command (reserved by shells, used by clap)
/// - 3+: Application-specific errors
pub mod exit_codes {
    /// Account or file not found.
    pub const NOT_FOUND: i32 = 3;

    /// Invalid user input or arguments.
    pub const INVALID_INPUT: i32 = 4;

    /// Decryption failed (wrong master secret, changed key, tampered record).
    pub const AUTH_FAILED: i32 = 5;

    /// Account already stored.
    pub const DUPLICATE: i32 = 6;

    /// Stored record is truncated or unreadable.
    pub const CORRUPT: i32 = 7;

    /// Vault key could not be loaded or created.
    pub const INIT_FAILED: i32 = 8;
}

/// Vault key file name inside the vault home.
pub const KEY_FILE: &str = "key";

/// SQLite record store file name.
pub const SQLITE_DB_FILE: &str = "passman.db";

/// JSON record store file name.
pub const JSON_DB_FILE: &str = "passman-db.json";

/// Environment variable holding the password for `new` (skips the prompt).
pub const PASSWORD_ENV: &str = "PASSMAN_PASSWORD";

/// Environment variable holding the master secret (skips the prompt).
pub const MASTER_ENV: &str = "PASSMAN_MASTER";

/// Environment variable overriding the config file location.
pub const CONFIG_ENV: &str = "PASSMAN_CONFIG";

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "PASSMAN_LOG";
