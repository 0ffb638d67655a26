//! `ocb-dec`: open a sealed message read from stdin.
//!
//! Reads one `v1.<nonce>.<ciphertext>` record, loads the key from `SEALER_KEY_PATH`,
//! and writes the plaintext to stdout only if the tag verifies against the
//! key, nonce, ciphertext, and `SEALER_ASSOCIATED_DATA`.

use std::io;
use std::process::ExitCode;

use sealer::{commands, telemetry, Config, SealError};

fn main() -> ExitCode {
    let cfg = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            let err = SealError::Config(format!("{e:#}"));
            eprintln!("ERROR: {err}");
            return ExitCode::from(err.exit_code());
        }
    };

    if let Err(e) = telemetry::init(&cfg.log_level) {
        eprintln!("WARN: {e:#}");
    }

    let result = commands::decrypt(&cfg, io::stdin().lock(), io::stdout().lock());
    commands::exit_code("ocb-dec", result)
}
