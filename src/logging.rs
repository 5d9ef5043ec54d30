// src/logging.rs
// =============================================================================
// Sets up the log stream: every match, failure and progress message goes
// through `tracing` and is printed to stderr.
//
// RUST_LOG overrides the level chosen with -v, e.g.
//   RUST_LOG=dirb=trace dirb -u ... -f ... -e ...
// =============================================================================

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

// Maps the number of -v flags to a default filter
pub fn default_filter(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    }
}

/// Installs the global subscriber. Call once, before the scan starts.
pub fn init_logging(verbosity: u8) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbosity)));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow!("failed to initialize logging: {}", e))?;

    Ok(())
}
