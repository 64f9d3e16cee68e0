//! Application-level utilities for the passman CLI.
//!
//! This module provides:
//! - Path resolution for the config file and vault home
//! - A lazily-initialized context shared by command handlers

mod context;
mod resolver;

pub use context::AppContext;
pub use resolver::resolve_config_path;
