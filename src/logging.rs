//! Logging initialisation via tracing-subscriber.
//!
//! Call [`init`] once at startup, after settings are loaded. Diagnostic
//! output goes to stderr so it never mixes with report output on stdout.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::error::FairshareError;

/// Initialise the global tracing subscriber.
///
/// `RUST_LOG` takes precedence; `level` (from settings) is the fallback and
/// must be a level name accepted by [`parse_level`].
pub fn init(level: &str) -> Result<(), FairshareError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::new(parse_level(level)?.to_string()),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| FairshareError::Config(format!("failed to set subscriber: {e}")))?;

    Ok(())
}

/// Parse a log level string, rejecting unknown values
pub fn parse_level(level: &str) -> Result<LevelFilter, FairshareError> {
    if level.is_empty() {
        return Err(FairshareError::Config("log level must not be empty".into()));
    }
    level
        .parse::<LevelFilter>()
        .map_err(|_| FairshareError::Config(format!("unrecognised log level: '{level}'")))
}
