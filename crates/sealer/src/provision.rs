//! Key provisioning: draw a fresh key and persist it.
//!
//! # Lifecycle
//!
//! 1. [`generate_and_store`] draws [`KEY_LEN`] bytes from the entropy source
//!    directly into a zeroed [`SecretKey`].
//! 2. The key is written verbatim through the [`KeyStore`].
//! 3. The in-memory copy is zeroed on drop, whether or not the write succeeded.
//!
//! Running it again overwrites the record. Anything sealed under the previous
//! key can no longer be opened.
//!
//! # Security invariants
//!
//! - Key bytes are **never** logged or formatted as text.
//! - A failed or short draw never reaches the store.

use thiserror::Error;
use tracing::info;

use crate::crypto::KEY_LEN;
use crate::entropy::{EntropyError, EntropySource};
use crate::key::SecretKey;
use crate::keystore::{KeyStore, KeyStoreError};

/// Errors produced while provisioning a key.
#[derive(Debug, Error)]
pub enum ProvisionError {
    /// The entropy source could not supply a full key.
    #[error("key generation failed: {0}")]
    Entropy(#[from] EntropyError),

    /// The key could not be written.
    #[error("key storage failed: {0}")]
    Storage(#[from] KeyStoreError),
}

/// Draw a new key from `entropy` and write it to `store`.
///
/// # Errors
///
/// Returns [`ProvisionError::Entropy`] on a failed or short draw (nothing is
/// written) and [`ProvisionError::Storage`] if the store rejects the write.
pub fn generate_and_store<E, S>(entropy: &mut E, store: &S) -> Result<(), ProvisionError>
where
    E: EntropySource + ?Sized,
    S: KeyStore + ?Sized,
{
    let mut key = SecretKey::zeroed();
    entropy.draw(key.as_mut_bytes())?;
    store.store(&key)?;

    info!(key_len = KEY_LEN, "key provisioned");
    Ok(())
}
