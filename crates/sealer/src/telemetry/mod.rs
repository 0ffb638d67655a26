//! Telemetry initialisation for the sealer binaries.
//!
//! Structured JSON logs on stderr; stdout is reserved for command output.
//!
//! # Telemetry invariants
//!
//! - **No key material, plaintext, or associated data** may appear in any log
//!   field. Lengths and paths only.
//! - Log level is configurable via `SEALER_LOG_LEVEL` (default: `info`); `RUST_LOG`
//!   takes precedence when set.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

/// Initialise the global tracing subscriber.
///
/// # Errors
///
/// Returns an error if the subscriber has already been set.
pub fn init(log_level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialise tracing subscriber: {e}"))
}
