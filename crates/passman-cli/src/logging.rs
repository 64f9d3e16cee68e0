//! Diagnostic logging to stderr.

use tracing_subscriber::EnvFilter;

use crate::constants::LOG_ENV;

/// Install the global subscriber.
///
/// `PASSMAN_LOG` takes precedence; otherwise the level is `warn`, or
/// `debug` with `--verbose`. Output never goes to stdout so revealed
/// passwords stay pipeable.
pub fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));

    // A second init (tests) is harmless.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
