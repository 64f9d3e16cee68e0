//! UI primitives for the passman CLI.
//!
//! - **Context**: environment detection (TTY, color, unicode)
//! - **Mode**: output mode resolution (json, plain, pretty)
//! - **Theme**: badge tokens and colors
//! - **Render**: tables, receipts, hints, errors

mod context;
mod mode;
pub mod render;
pub mod theme;

pub use context::UiContext;
pub use render::{hint, print_error, receipt, table, Column};
