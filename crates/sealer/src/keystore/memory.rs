//! [`MemoryKeyStore`]: in-process key record, substituted for the file store in tests.

use std::fmt;
use std::sync::{Arc, RwLock};

use zeroize::Zeroizing;

use super::{KeyStore, KeyStoreError};
use crate::key::SecretKey;

/// Thread-safe in-memory key record.
///
/// Holds the raw record bytes rather than a parsed key, so a malformed record
/// can be injected with [`MemoryKeyStore::with_record`] and is rejected on
/// load exactly as a malformed file would be. Clones share the same record.
#[derive(Clone, Default)]
pub struct MemoryKeyStore {
    inner: Arc<RwLock<Option<Zeroizing<Vec<u8>>>>>,
}

impl MemoryKeyStore {
    /// Create a new, empty [`MemoryKeyStore`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with an arbitrary raw record.
    pub fn with_record(record: &[u8]) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Some(Zeroizing::new(record.to_vec())))),
        }
    }

    /// Returns `true` if a record is present (valid or not).
    pub fn is_provisioned(&self) -> bool {
        self.inner.read().map(|r| r.is_some()).unwrap_or(false)
    }
}

impl fmt::Debug for MemoryKeyStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryKeyStore")
            .field("provisioned", &self.is_provisioned())
            .finish()
    }
}

impl KeyStore for MemoryKeyStore {
    fn load(&self) -> Result<SecretKey, KeyStoreError> {
        let lock = self.inner.read().map_err(|_| KeyStoreError::Poisoned)?;
        let record = lock.as_ref().ok_or(KeyStoreError::NotProvisioned)?;
        SecretKey::from_slice(record).map_err(|_| KeyStoreError::invalid_length(record.len()))
    }

    fn store(&self, key: &SecretKey) -> Result<(), KeyStoreError> {
        let record = Zeroizing::new(key.as_bytes().to_vec());
        let mut lock = self.inner.write().map_err(|_| KeyStoreError::Poisoned)?;
        *lock = Some(record);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::KEY_LEN;

    #[test]
    fn initially_not_provisioned() {
        let store = MemoryKeyStore::new();
        assert!(!store.is_provisioned());
        assert!(matches!(store.load(), Err(KeyStoreError::NotProvisioned)));
    }

    #[test]
    fn store_and_retrieve() {
        let store = MemoryKeyStore::new();
        store.store(&SecretKey::from_bytes([0x42u8; KEY_LEN])).unwrap();
        assert!(store.is_provisioned());
        assert_eq!(store.load().unwrap().as_bytes(), &[0x42u8; KEY_LEN]);
    }

    #[test]
    fn replacement_wins() {
        let store = MemoryKeyStore::new();
        store.store(&SecretKey::from_bytes([0x01u8; KEY_LEN])).unwrap();
        store.store(&SecretKey::from_bytes([0x02u8; KEY_LEN])).unwrap();
        assert_eq!(store.load().unwrap().as_bytes(), &[0x02u8; KEY_LEN]);
    }

    #[test]
    fn clones_share_the_record() {
        let store = MemoryKeyStore::new();
        let reader = store.clone();
        store.store(&SecretKey::from_bytes([0x09u8; KEY_LEN])).unwrap();
        assert_eq!(reader.load().unwrap().as_bytes(), &[0x09u8; KEY_LEN]);
    }

    #[test]
    fn malformed_record_rejected() {
        for len in [0, 16, KEY_LEN - 1, KEY_LEN + 1, 64] {
            let store = MemoryKeyStore::with_record(&vec![0u8; len]);
            match store.load() {
                Err(KeyStoreError::InvalidLength { got, .. }) => assert_eq!(got, len),
                other => panic!("length {len}: expected InvalidLength, got {other:?}"),
            }
        }
    }
}
