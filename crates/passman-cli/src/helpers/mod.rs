//! Input helper functions for the CLI.

mod input;

pub use input::{prompt_master, prompt_new_password};
