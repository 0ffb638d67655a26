//! [`SecretKey`]: the 256-bit symmetric key, zeroed when dropped.

use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::crypto::{CipherError, KEY_LEN};

/// Fixed-size key buffer that holds exactly [`KEY_LEN`] bytes.
///
/// Not `Clone`: a loaded key has exactly one owner for the duration of an
/// operation. When this type is dropped the memory is overwritten with zeroes,
/// on success and failure paths alike.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct SecretKey([u8; KEY_LEN]);

impl SecretKey {
    /// An all-zero key, used as the draw target during provisioning.
    pub(crate) fn zeroed() -> Self {
        Self([0u8; KEY_LEN])
    }

    /// Take ownership of raw key bytes.
    pub fn from_bytes(bytes: [u8; KEY_LEN]) -> Self {
        Self(bytes)
    }

    /// Copy key material out of a slice.
    ///
    /// # Errors
    ///
    /// Returns [`CipherError::InvalidKeyLength`] unless `bytes` is exactly
    /// [`KEY_LEN`] bytes. Never pads or truncates.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, CipherError> {
        if bytes.len() != KEY_LEN {
            return Err(CipherError::InvalidKeyLength(bytes.len()));
        }
        let mut key = Self::zeroed();
        key.0.copy_from_slice(bytes);
        Ok(key)
    }

    /// Borrow the raw key bytes.
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }

    pub(crate) fn as_mut_bytes(&mut self) -> &mut [u8; KEY_LEN] {
        &mut self.0
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never print key material, not even in debug builds.
        f.write_str("SecretKey([REDACTED])")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_slice_accepts_exact_length() {
        let key = SecretKey::from_slice(&[0x42u8; KEY_LEN]).unwrap();
        assert_eq!(key.as_bytes(), &[0x42u8; KEY_LEN]);
    }

    #[test]
    fn from_slice_rejects_short_and_long() {
        assert!(matches!(
            SecretKey::from_slice(&[0u8; 16]),
            Err(CipherError::InvalidKeyLength(16))
        ));
        assert!(matches!(
            SecretKey::from_slice(&[0u8; KEY_LEN + 1]),
            Err(CipherError::InvalidKeyLength(33))
        ));
    }

    #[test]
    fn zeroize_clears_material() {
        let mut key = SecretKey::from_bytes([0xFFu8; KEY_LEN]);
        key.zeroize();
        assert_eq!(key.as_bytes(), &[0u8; KEY_LEN]);
    }

    #[test]
    fn redacted_in_debug() {
        let mut bytes = [0u8; KEY_LEN];
        bytes[0] = 0xFF;
        let key = SecretKey::from_bytes(bytes);
        let shown = format!("{key:?}");
        assert!(shown.contains("REDACTED"));
        assert!(!shown.contains("255"));
    }
}
