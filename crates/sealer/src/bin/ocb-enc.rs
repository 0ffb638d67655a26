//! `ocb-enc`: seal a message read from stdin.
//!
//! Reads at most 1024 bytes of plaintext, loads the key from `SEALER_KEY_PATH`,
//! encrypts under a fresh nonce with `SEALER_ASSOCIATED_DATA` bound into the tag,
//! and prints `v1.<nonce>.<ciphertext>` on stdout.

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

    let result = commands::encrypt(&cfg, io::stdin().lock(), io::stdout().lock());
    commands::exit_code("ocb-enc", result)
}
