//! Durable storage for the single secret key.
//!
//! # Record format
//!
//! Exactly [`KEY_LEN`] raw bytes: no encoding, no terminator, no metadata.
//! A record of any other length is rejected on load; it is never truncated
//! or padded into a usable key.
//!
//! # Concurrency
//!
//! [`FileKeyStore::store`] replaces the record atomically (temp file + rename)
//! while holding an exclusive writer lock, so a concurrent reader sees either
//! the old key or the new key, never a partial write.

pub mod file;
pub mod memory;

pub use file::FileKeyStore;
pub use memory::MemoryKeyStore;

use std::path::PathBuf;

use thiserror::Error;

use crate::crypto::KEY_LEN;
use crate::key::SecretKey;

/// Errors produced by a [`KeyStore`].
#[derive(Debug, Error)]
pub enum KeyStoreError {
    /// No key has been provisioned at this location yet.
    #[error("no key provisioned")]
    NotProvisioned,

    /// The stored record is not exactly [`KEY_LEN`] bytes.
    #[error("key record has invalid length: expected {expected} bytes, got {got}")]
    InvalidLength {
        /// Required record length.
        expected: usize,
        /// Length actually found (capped at `expected + 1`).
        got: usize,
    },

    /// Another writer holds the lock for this key record.
    #[error("key store is locked by another writer: {}", .0.display())]
    Busy(PathBuf),

    /// The underlying storage could not be created, opened, read, or written.
    #[error("key store I/O error at {}: {source}", .path.display())]
    Io {
        /// File involved in the failed operation.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The in-memory store lock was poisoned by a panicking writer.
    #[error("key store lock poisoned")]
    Poisoned,
}

impl KeyStoreError {
    pub(crate) fn invalid_length(got: usize) -> Self {
        KeyStoreError::InvalidLength {
            expected: KEY_LEN,
            got,
        }
    }
}

/// Persists and retrieves one fixed-size secret key.
#[cfg_attr(test, mockall::automock)]
pub trait KeyStore {
    /// Load the current key.
    ///
    /// # Errors
    ///
    /// Returns [`KeyStoreError::NotProvisioned`] if no record exists and
    /// [`KeyStoreError::InvalidLength`] if the record is not [`KEY_LEN`] bytes.
    fn load(&self) -> Result<SecretKey, KeyStoreError>;

    /// Store (or replace) the key.
    ///
    /// # Errors
    ///
    /// Returns [`KeyStoreError`] if the record cannot be written.
    fn store(&self, key: &SecretKey) -> Result<(), KeyStoreError>;
}
