//! `keygen`: provision a fresh 32-byte key at `SEALER_KEY_PATH`.
//!
//! Startup sequence:
//! 1. Load and validate [`Config`] from environment variables.
//! 2. Initialise structured JSON logging on stderr.
//! 3. Draw the key and atomically replace the key record.

use std::process::ExitCode;

use sealer::{commands, telemetry, Config, SealError};

fn main() -> ExitCode {
    // -----------------------------------------------------------------------
    // 1. Configuration
    // -----------------------------------------------------------------------
    let cfg = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            // Telemetry is not yet up; write to stderr directly.
            let err = SealError::Config(format!("{e:#}"));
            eprintln!("ERROR: {err}");
            return ExitCode::from(err.exit_code());
        }
    };

    // -----------------------------------------------------------------------
    // 2. Telemetry
    // -----------------------------------------------------------------------
    if let Err(e) = telemetry::init(&cfg.log_level) {
        eprintln!("WARN: {e:#}");
    }

    // -----------------------------------------------------------------------
    // 3. Provision
    // -----------------------------------------------------------------------
    commands::exit_code("keygen", commands::keygen(&cfg))
}
