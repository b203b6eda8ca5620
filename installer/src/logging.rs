//! Stderr logging for the installer binaries.
//!
//! Library code logs through the `log` facade only. The binaries install a
//! `tracing-subscriber` formatter on stderr, whose log compatibility layer
//! picks up those records. The level comes from the `-v`/`-q` flags unless
//! `RUST_LOG` overrides it.

use tracing_subscriber::filter::{EnvFilter, LevelFilter};
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::util::TryInitError;

/// Map the `-v` count and `-q` flag to a level filter.
///
/// Warnings are shown by default, `-v` adds informational messages, `-vv`
/// debug output and anything beyond that trace output. `-q` limits output to
/// errors.
#[must_use]
pub const fn level_for(verbosity: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::ERROR;
    }
    match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Install the stderr subscriber at the level selected by the flags.
///
/// # Errors
///
/// Returns [`TryInitError`] if a global subscriber or logger was already
/// installed.
pub fn init(verbosity: u8, quiet: bool) -> Result<(), TryInitError> {
    let filter = EnvFilter::builder()
        .with_default_directive(level_for(verbosity, quiet).into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .try_init()
}
