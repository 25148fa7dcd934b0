//! Install the `tracing` subscriber used by the binary.
//!
//! Events go to stderr so that stdout stays clean for JSON and CSV output.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::ParseError;

/// Map a `-v` count onto a default filter directive.
#[must_use]
pub fn level_for_verbosity(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Parse a single filter directive string.
///
/// # Errors
///
/// Returns the parse error when `directive` is not valid `EnvFilter` syntax.
pub fn parse_directive(directive: &str) -> Result<EnvFilter, ParseError> {
    EnvFilter::try_new(directive)
}

/// Pick the filter: `RUST_LOG` first, then the configured directive, then
/// the verbosity level.
///
/// # Errors
///
/// Returns the parse error of whichever directive was selected.
pub fn select_filter(
    env: Option<&str>,
    configured: Option<&str>,
    verbosity: u8,
) -> Result<EnvFilter, ParseError> {
    let directive = env
        .filter(|value| !value.trim().is_empty())
        .or_else(|| configured.filter(|value| !value.trim().is_empty()))
        .unwrap_or_else(|| level_for_verbosity(verbosity));
    parse_directive(directive)
}

/// Build the filter from the process environment and the resolved settings.
///
/// # Errors
///
/// Returns an error when `RUST_LOG` or the configured directive does not parse.
pub fn build_filter(configured: Option<&str>, verbosity: u8) -> Result<EnvFilter, ParseError> {
    let env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    select_filter(env.as_deref(), configured, verbosity)
}

/// Install a global fmt subscriber. Calling this twice is harmless; the
/// second attempt is ignored.
///
/// # Errors
///
/// Returns an error when the selected filter directive does not parse.
pub fn initialize(configured: Option<&str>, verbosity: u8) -> Result<(), ParseError> {
    let filter = build_filter(configured, verbosity)?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
    Ok(())
}
