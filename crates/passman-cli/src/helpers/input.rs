//! Secret prompting with environment overrides.

use std::io::IsTerminal;

use dialoguer::Password;
use secrecy::{ExposeSecret, SecretString};

use crate::constants::{MASTER_ENV, PASSWORD_ENV};
use crate::errors::CliError;

/// How to obtain one secret from the user.
pub struct SecretPrompt<'a> {
    /// Environment variable that supplies the secret without prompting
    pub env_var: &'a str,
    pub prompt: &'a str,
    /// Ask twice and require both entries to match
    pub confirm: bool,
    /// Human name used in error messages
    pub label: &'a str,
}

impl SecretPrompt<'_> {
    /// Read the secret from the environment or, when allowed, the terminal.
    ///
    /// Empty secrets are rejected as invalid input.
    pub fn read(&self, no_input: bool) -> anyhow::Result<SecretString> {
        let interactive = std::io::stdin().is_terminal() && !no_input;
        self.read_with(std::env::var(self.env_var).ok(), interactive, || {
            let mut password = Password::new().with_prompt(self.prompt);
            if self.confirm {
                password = password.with_confirmation(
                    format!("Confirm {}", self.label),
                    format!("{} entries do not match", capitalize(self.label)),
                );
            }
            password
                .allow_empty_password(true)
                .interact()
                .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", self.label, e))
        })
    }

    fn read_with(
        &self,
        env_value: Option<String>,
        interactive: bool,
        ask: impl FnOnce() -> anyhow::Result<String>,
    ) -> anyhow::Result<SecretString> {
        let value = match env_value.filter(|v| !v.is_empty()) {
            Some(value) => value,
            None if interactive => ask()?,
            None => {
                return Err(CliError::invalid_input(format!(
                    "No {} provided and no TTY available. Set {}.",
                    self.label, self.env_var
                ))
                .into())
            }
        };

        let secret = SecretString::from(value);
        if secret.expose_secret().is_empty() {
            return Err(
                CliError::invalid_input(format!("{} cannot be empty", capitalize(self.label)))
                    .into(),
            );
        }
        Ok(secret)
    }
}

/// Prompt for the password of a new entry, with confirmation.
pub fn prompt_new_password(no_input: bool) -> anyhow::Result<SecretString> {
    SecretPrompt {
        env_var: PASSWORD_ENV,
        prompt: "Password",
        confirm: true,
        label: "password",
    }
    .read(no_input)
}

/// Prompt for the master secret. New entries confirm it, lookups do not.
pub fn prompt_master(confirm: bool, no_input: bool) -> anyhow::Result<SecretString> {
    SecretPrompt {
        env_var: MASTER_ENV,
        prompt: "Master secret",
        confirm,
        label: "master secret",
    }
    .read(no_input)
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
