//! UI context for environment detection.

use std::io::IsTerminal;

use super::mode::OutputMode;

/// Terminal and environment context for UI decisions.
#[derive(Debug, Clone)]
pub struct UiContext {
    /// Whether color output is enabled
    pub color: bool,
    /// Whether unicode symbols are enabled
    pub unicode: bool,
    /// Resolved output mode
    pub mode: OutputMode,
}

impl UiContext {
    /// Context for stdout output.
    pub fn from_env(json_flag: bool) -> Self {
        let is_tty = std::io::stdout().is_terminal();
        let term_is_dumb = term_is_dumb();
        Self {
            color: color_allowed(is_tty, term_is_dumb),
            unicode: !term_is_dumb,
            mode: OutputMode::resolve(json_flag, is_tty, term_is_dumb),
        }
    }

    /// Context for diagnostics written to stderr.
    pub fn for_stderr() -> Self {
        let is_tty = std::io::stderr().is_terminal();
        let term_is_dumb = term_is_dumb();
        Self {
            color: color_allowed(is_tty, term_is_dumb),
            unicode: !term_is_dumb,
            mode: OutputMode::resolve(false, is_tty, term_is_dumb),
        }
    }
}

fn term_is_dumb() -> bool {
    std::env::var("TERM").map(|v| v == "dumb").unwrap_or(false)
}

fn color_allowed(is_tty: bool, term_is_dumb: bool) -> bool {
    is_tty && !term_is_dumb && std::env::var_os("NO_COLOR").is_none()
}
