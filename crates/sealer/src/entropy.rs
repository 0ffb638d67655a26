//! Cryptographically secure random byte sources.
//!
//! A draw either fills the whole destination buffer or fails. A short read is
//! never padded, retried with a different source, or reported as success.

use std::io::{self, Read};

use thiserror::Error;

/// Errors produced by an [`EntropySource`].
#[derive(Debug, Error)]
pub enum EntropyError {
    /// The source ended before `requested` bytes were produced.
    #[error("insufficient entropy: requested {requested} bytes, got {got}")]
    Insufficient {
        /// Bytes the caller asked for.
        requested: usize,
        /// Bytes actually produced before the source ran dry.
        got: usize,
    },

    /// The source could not be read at all.
    #[error("entropy source unavailable: {0}")]
    Unavailable(String),
}

/// Supplier of cryptographically secure random bytes.
#[cfg_attr(test, mockall::automock)]
pub trait EntropySource {
    /// Fill `dest` entirely with random bytes.
    ///
    /// # Errors
    ///
    /// Returns [`EntropyError`] if the source cannot supply `dest.len()` bytes.
    fn draw(&mut self, dest: &mut [u8]) -> Result<(), EntropyError>;
}

/// The operating system CSPRNG (`getrandom(2)` on Linux).
#[derive(Debug, Default, Clone, Copy)]
pub struct OsEntropy;

impl EntropySource for OsEntropy {
    fn draw(&mut self, dest: &mut [u8]) -> Result<(), EntropyError> {
        getrandom::getrandom(dest).map_err(|e| EntropyError::Unavailable(e.to_string()))
    }
}

/// Entropy read from a blocking random device such as `/dev/random`.
#[derive(Debug)]
pub struct DeviceEntropy<R> {
    reader: R,
}

impl<R: Read> DeviceEntropy<R> {
    /// Wrap a reader that yields random bytes.
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: Read> EntropySource for DeviceEntropy<R> {
    fn draw(&mut self, dest: &mut [u8]) -> Result<(), EntropyError> {
        let requested = dest.len();
        let mut filled = 0;
        while filled < requested {
            match self.reader.read(&mut dest[filled..]) {
                Ok(0) => {
                    return Err(EntropyError::Insufficient {
                        requested,
                        got: filled,
                    })
                }
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(EntropyError::Unavailable(e.to_string())),
            }
        }
        Ok(())
    }
}
