//! Seal and open [`SealedMessage`]s: nonce generation plus the cipher in one step.

use common::{SealError, SealedMessage};
use tracing::debug;
use zeroize::Zeroizing;

use super::{cipher, nonce, Nonce};
use crate::entropy::EntropySource;
use crate::key::SecretKey;

/// Encrypt `plaintext` under `key` with a nonce freshly drawn from `entropy`.
///
/// # Errors
///
/// Returns [`SealError::Entropy`] if no nonce could be drawn and
/// [`SealError::InvalidInput`] if `plaintext` is too large.
pub fn seal<E>(
    key: &SecretKey,
    entropy: &mut E,
    plaintext: &[u8],
    associated_data: &[u8],
) -> Result<SealedMessage, SealError>
where
    E: EntropySource + ?Sized,
{
    let nonce = nonce::generate(entropy)?;
    let ciphertext = cipher::encrypt(key, &nonce, plaintext, associated_data)?;
    debug!(
        plaintext_len = plaintext.len(),
        aad_len = associated_data.len(),
        "message sealed"
    );
    Ok(SealedMessage {
        nonce: nonce.into_bytes(),
        ciphertext,
    })
}

/// Verify and decrypt a [`SealedMessage`].
///
/// # Errors
///
/// Returns [`SealError::Authentication`] if the tag does not verify.
pub fn open(
    key: &SecretKey,
    message: &SealedMessage,
    associated_data: &[u8],
) -> Result<Zeroizing<Vec<u8>>, SealError> {
    let nonce = Nonce::from_bytes(message.nonce);
    let plaintext = cipher::decrypt(key, &nonce, &message.ciphertext, associated_data)?;
    debug!(plaintext_len = plaintext.len(), "message opened");
    Ok(plaintext)
}
