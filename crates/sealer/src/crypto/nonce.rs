//! Random 96-bit nonces, one per encryption.
//!
//! Nonces are drawn independently at random rather than from a counter, so
//! uniqueness under one key rests on the birthday bound of the 96-bit space.
//! Callers sealing very large volumes under a single key must cap the message
//! count or re-provision; nothing here enforces that.

use super::{CipherError, NONCE_LEN};
use crate::entropy::{EntropyError, EntropySource};

/// A single-use OCB nonce.
///
/// Deliberately not `Copy`/`Clone`: a generated nonce is consumed by exactly
/// one encryption and then travels with the ciphertext.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct Nonce([u8; NONCE_LEN]);

impl Nonce {
    /// Wrap raw nonce bytes (e.g. parsed from a sealed message).
    pub fn from_bytes(bytes: [u8; NONCE_LEN]) -> Self {
        Self(bytes)
    }

    /// Copy a nonce out of a slice.
    ///
    /// # Errors
    ///
    /// Returns [`CipherError::InvalidNonceLength`] unless `bytes` is exactly
    /// [`NONCE_LEN`] bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, CipherError> {
        let array: [u8; NONCE_LEN] = bytes
            .try_into()
            .map_err(|_| CipherError::InvalidNonceLength(bytes.len()))?;
        Ok(Self(array))
    }

    /// Borrow the raw nonce bytes.
    pub fn as_bytes(&self) -> &[u8; NONCE_LEN] {
        &self.0
    }

    /// Consume the nonce, returning its bytes.
    pub fn into_bytes(self) -> [u8; NONCE_LEN] {
        self.0
    }
}

/// Draw a fresh nonce from `entropy`.
///
/// # Errors
///
/// Returns [`EntropyError`] if the source cannot supply [`NONCE_LEN`] bytes.
pub fn generate<E>(entropy: &mut E) -> Result<Nonce, EntropyError>
where
    E: EntropySource + ?Sized,
{
    let mut bytes = [0u8; NONCE_LEN];
    entropy.draw(&mut bytes)?;
    Ok(Nonce(bytes))
}
