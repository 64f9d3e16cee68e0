//! CLI error types for structured error handling.
//!
//! Each variant maps to an exit code in [`crate::constants::exit_codes`].

use std::fmt;

use passman_core::PassmanError;

/// CLI-specific errors with associated exit codes.
#[derive(Debug)]
pub enum CliError {
    /// Account, config, or vault home not found
    NotFound { message: String, hint: String },

    /// Decryption failed
    AuthFailed {
        message: String,
        hint: Option<String>,
    },

    /// Invalid user input
    InvalidInput(String),

    /// Account already stored
    Duplicate { message: String, hint: String },

    /// Stored data could not be read back
    Corrupt(String),

    /// Vault key could not be loaded or created
    InitFailed { message: String, hint: String },
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::NotFound { message, hint }
            | CliError::Duplicate { message, hint }
            | CliError::InitFailed { message, hint } => {
                write!(f, "{}\n{}", message, hint)
            }
            CliError::AuthFailed { message, hint } => {
                if let Some(h) = hint {
                    write!(f, "{}\n{}", message, h)
                } else {
                    write!(f, "{}", message)
                }
            }
            CliError::InvalidInput(message) | CliError::Corrupt(message) => {
                write!(f, "{}", message)
            }
        }
    }
}

impl std::error::Error for CliError {}

impl CliError {
    /// Create a NotFound error with message and hint.
    pub fn not_found(message: impl Into<String>, hint: impl Into<String>) -> Self {
        CliError::NotFound {
            message: message.into(),
            hint: hint.into(),
        }
    }

    /// Create an AuthFailed error with message and hint.
    pub fn auth_failed_with_hint(message: impl Into<String>, hint: impl Into<String>) -> Self {
        CliError::AuthFailed {
            message: message.into(),
            hint: Some(hint.into()),
        }
    }

    /// Create an InvalidInput error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        CliError::InvalidInput(message.into())
    }

    /// Create a Duplicate error for an account.
    pub fn duplicate(username: &str, site: &str) -> Self {
        CliError::Duplicate {
            message: format!("An entry for {} at {} already exists", username, site),
            hint: "Stored passwords are never overwritten.".to_string(),
        }
    }

    /// Create a NotFound error for an account.
    pub fn account_not_found(username: &str, site: &str) -> Self {
        CliError::not_found(
            format!("No entry for {} at {}", username, site),
            "Run:\n  passman ls",
        )
    }

    /// Map a core error to its CLI counterpart. Errors without a dedicated
    /// exit code return `None` and fall through as general failures.
    pub fn from_core(err: &PassmanError) -> Option<Self> {
        let mapped = match err {
            PassmanError::Initialization(message) => CliError::InitFailed {
                message: format!("Vault key unavailable: {}", message),
                hint: "Restore the key file from a backup. Existing entries cannot be decrypted without it.".to_string(),
            },
            PassmanError::DuplicateEntry { username, site } => CliError::duplicate(username, site),
            PassmanError::NotFound(message) => {
                CliError::not_found(message.clone(), "Run:\n  passman ls")
            }
            PassmanError::MalformedCiphertext { .. } => CliError::Corrupt(err.to_string()),
            PassmanError::Storage(message) => CliError::Corrupt(message.clone()),
            PassmanError::AuthenticationFailure => CliError::auth_failed_with_hint(
                "Decryption failed",
                "Check the master secret. A replaced key file also causes this.",
            ),
            PassmanError::InvalidInput(message) => CliError::InvalidInput(message.clone()),
            PassmanError::Entropy(_)
            | PassmanError::Crypto(_)
            | PassmanError::Sqlite { .. }
            | PassmanError::Io { .. }
            | PassmanError::Json { .. } => return None,
        };
        Some(mapped)
    }

    /// Get the exit code for this error.
    pub fn exit_code(&self) -> i32 {
        use super::constants::exit_codes;
        match self {
            CliError::NotFound { .. } => exit_codes::NOT_FOUND,
            CliError::AuthFailed { .. } => exit_codes::AUTH_FAILED,
            CliError::InvalidInput(_) => exit_codes::INVALID_INPUT,
            CliError::Duplicate { .. } => exit_codes::DUPLICATE,
            CliError::Corrupt(_) => exit_codes::CORRUPT,
            CliError::InitFailed { .. } => exit_codes::INIT_FAILED,
        }
    }

    /// Print error message to stderr and exit with appropriate code.
    pub fn exit(&self) -> ! {
        crate::ui::print_error(&self.to_string());
        std::process::exit(self.exit_code())
    }
}
