//! Command handlers, one per subcommand.

mod accounts;
mod init;
mod misc;

pub use accounts::{handle_get, handle_list, handle_new};
pub use init::handle_init;
pub use misc::handle_completions;
