//! Configuration loading and validation for the sealer binaries.
//!
//! All values are read from `SEALER_`-prefixed environment variables at
//! startup (`SEALER_KEY_PATH`, `SEALER_ENTROPY_DEVICE`,
//! `SEALER_ASSOCIATED_DATA`, `SEALER_LOG_LEVEL`). Unprefixed variables are
//! ignored. The process will exit with a clear error message if any variable
//! is present but invalid.

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Prefix shared by every environment variable the binaries read.
pub const ENV_PREFIX: &str = "SEALER";

/// Validated sealer configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Location of the raw 32-byte key record.
    #[serde(default = "default_key_path")]
    pub key_path: PathBuf,

    /// Random device to draw from instead of the OS CSPRNG (e.g. `/dev/random`).
    #[serde(default)]
    pub entropy_device: Option<PathBuf>,

    /// Associated data bound into every tag. Agreed out of band by both
    /// parties; never embedded in the sealed message.
    #[serde(default)]
    pub associated_data: String,

    /// Tracing log level (e.g. `"info"`, `"debug"`).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_key_path() -> PathBuf {
    PathBuf::from("./data/key.bin")
}
fn default_log_level() -> String {
    "info".into()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            key_path: default_key_path(),
            entropy_device: None,
            associated_data: String::new(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Load and validate configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if any variable cannot be parsed or fails validation.
    pub fn from_env() -> Result<Self> {
        Self::from_environment(config::Environment::with_prefix(ENV_PREFIX))
    }

    fn from_environment(env: config::Environment) -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(env)
            .build()
            .context("failed to build configuration from environment")?;

        let c: Config = cfg
            .try_deserialize()
            .context("failed to deserialise configuration")?;

        c.validate()?;
        Ok(c)
    }

    /// Validate all fields, returning a descriptive error on the first failure.
    fn validate(&self) -> Result<()> {
        if self.key_path.as_os_str().is_empty() {
            anyhow::bail!("SEALER_KEY_PATH must not be empty");
        }
        if let Some(device) = &self.entropy_device {
            if device.as_os_str().is_empty() {
                anyhow::bail!("SEALER_ENTROPY_DEVICE must not be empty when set");
            }
        }
        Ok(())
    }
}
