//! Common error types shared across crates.

use thiserror::Error;

use crate::protocol::{FormatError, KEY_LEN, NONCE_LEN};

/// Top-level error type surfaced to binaries.
///
/// Every variant maps to a distinct process exit code, see [`SealError::exit_code`]:
/// - [`SealError::Config`] → 2
/// - [`SealError::Entropy`] → 3
/// - [`SealError::Storage`] → 4
/// - [`SealError::InvalidKeyLength`] / [`SealError::InvalidNonceLength`] → 5
/// - [`SealError::Authentication`] → 6
/// - [`SealError::InvalidInput`] → 7
/// - [`SealError::Io`] → 8
#[derive(Debug, Error)]
pub enum SealError {
    /// Configuration is missing or invalid.
    #[error("configuration invalid: {0}")]
    Config(String),

    /// The random source could not supply the requested bytes.
    #[error("entropy failure: {0}")]
    Entropy(String),

    /// The key record could not be created, opened, read, or has the wrong size.
    #[error("key storage failure: {0}")]
    Storage(String),

    /// A key was supplied with the wrong length.
    #[error("invalid key length: expected {KEY_LEN} bytes, got {0}")]
    InvalidKeyLength(usize),

    /// A nonce was supplied with the wrong length.
    #[error("invalid nonce length: expected {NONCE_LEN} bytes, got {0}")]
    InvalidNonceLength(usize),

    /// Tag verification failed. No plaintext was released.
    #[error("authentication failed: wrong key, or ciphertext, nonce, or associated data was modified")]
    Authentication,

    /// Caller input was malformed or too large.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Reading the input or writing the output stream failed.
    #[error("i/o failure: {0}")]
    Io(String),
}

impl SealError {
    /// Returns the process exit code that should be used for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            SealError::Config(_) => 2,
            SealError::Entropy(_) => 3,
            SealError::Storage(_) => 4,
            SealError::InvalidKeyLength(_) | SealError::InvalidNonceLength(_) => 5,
            SealError::Authentication => 6,
            SealError::InvalidInput(_) => 7,
            SealError::Io(_) => 8,
        }
    }

    /// Short machine-readable error code (e.g. `"entropy_failure"`).
    pub fn kind(&self) -> &'static str {
        match self {
            SealError::Config(_) => "config_invalid",
            SealError::Entropy(_) => "entropy_failure",
            SealError::Storage(_) => "storage_failure",
            SealError::InvalidKeyLength(_) => "invalid_key_length",
            SealError::InvalidNonceLength(_) => "invalid_nonce_length",
            SealError::Authentication => "authentication_failure",
            SealError::InvalidInput(_) => "invalid_input",
            SealError::Io(_) => "io_failure",
        }
    }
}

impl From<FormatError> for SealError {
    fn from(e: FormatError) -> Self {
        match e {
            FormatError::NonceLength(got) => SealError::InvalidNonceLength(got),
            other => SealError::InvalidInput(other.to_string()),
        }
    }
}
