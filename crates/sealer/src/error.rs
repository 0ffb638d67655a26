//! Conversions from module errors into the top-level [`SealError`].

use common::SealError;

use crate::crypto::CipherError;
use crate::entropy::EntropyError;
use crate::keystore::KeyStoreError;
use crate::provision::ProvisionError;

impl From<EntropyError> for SealError {
    fn from(e: EntropyError) -> Self {
        SealError::Entropy(e.to_string())
    }
}

impl From<KeyStoreError> for SealError {
    fn from(e: KeyStoreError) -> Self {
        SealError::Storage(e.to_string())
    }
}

impl From<ProvisionError> for SealError {
    fn from(e: ProvisionError) -> Self {
        match e {
            ProvisionError::Entropy(e) => e.into(),
            ProvisionError::Storage(e) => e.into(),
        }
    }
}

impl From<CipherError> for SealError {
    fn from(e: CipherError) -> Self {
        match e {
            CipherError::InvalidKeyLength(got) => SealError::InvalidKeyLength(got),
            CipherError::InvalidNonceLength(got) => SealError::InvalidNonceLength(got),
            CipherError::Authentication => SealError::Authentication,
            CipherError::MessageTooLarge(_) | CipherError::AeadFailure => {
                SealError::InvalidInput(e.to_string())
            }
        }
    }
}
