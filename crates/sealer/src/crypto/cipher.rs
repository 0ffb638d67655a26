//! AES-256-OCB3 encryption and decryption of single bounded messages.
//!
//! **Nonce reuse is catastrophic for OCB.** Encrypting two messages under the
//! same key and nonce leaks their XOR and allows tag forgery. Every call to
//! [`encrypt`] must be given a freshly generated [`Nonce`].
//!
//! The cipher instance is built per call and dropped before returning. The
//! AES-256 key schedule is wiped on drop (`aes` is built with its `zeroize`
//! feature). `ocb3` 0.1 does not wipe its precomputed `L_*` / `L_$` offset
//! table, and those values are derived from the key, so they remain in freed
//! memory until it is reused.

use aes::Aes256;
use ocb3::{
    aead::{generic_array::GenericArray, AeadInPlace, KeyInit},
    Ocb3,
};
use thiserror::Error;
use zeroize::Zeroizing;

use super::nonce::Nonce;
use super::{KEY_LEN, MESSAGE_MAX, NONCE_LEN, TAG_LEN};
use crate::key::SecretKey;

/// AES-256 in OCB3 mode with a 96-bit nonce and a 128-bit tag.
pub type Aes256Ocb3 = Ocb3<Aes256>;

/// Errors produced by the cipher layer.
#[derive(Debug, Error)]
pub enum CipherError {
    /// The key is the wrong length (must be [`KEY_LEN`] bytes).
    #[error("invalid key length: expected {KEY_LEN} bytes, got {0}")]
    InvalidKeyLength(usize),

    /// The nonce is the wrong length (must be [`NONCE_LEN`] bytes).
    #[error("invalid nonce length: expected {NONCE_LEN} bytes, got {0}")]
    InvalidNonceLength(usize),

    /// The message exceeds [`MESSAGE_MAX`] bytes.
    #[error("message too large: {0} bytes exceeds the {MESSAGE_MAX} byte limit")]
    MessageTooLarge(usize),

    /// Tag verification failed (wrong key, or tampered ciphertext, nonce, or
    /// associated data).
    #[error("authentication failed")]
    Authentication,

    /// OCB encryption failed internally.
    #[error("aead operation failed")]
    AeadFailure,
}

/// Encrypt `plaintext`, binding `associated_data` into the tag.
///
/// Returns `ciphertext || tag`, exactly `plaintext.len() + TAG_LEN` bytes.
///
/// # Errors
///
/// Returns [`CipherError::MessageTooLarge`] if `plaintext` exceeds [`MESSAGE_MAX`].
/// Returns [`CipherError::AeadFailure`] on an internal AEAD error (should be
/// unreachable with a valid key and nonce).
pub fn encrypt(
    key: &SecretKey,
    nonce: &Nonce,
    plaintext: &[u8],
    associated_data: &[u8],
) -> Result<Vec<u8>, CipherError> {
    if plaintext.len() > MESSAGE_MAX {
        return Err(CipherError::MessageTooLarge(plaintext.len()));
    }
    let cipher = build_cipher(key)?;

    let mut buffer = Vec::with_capacity(plaintext.len() + TAG_LEN);
    buffer.extend_from_slice(plaintext);
    let tag = cipher
        .encrypt_in_place_detached(
            GenericArray::from_slice(nonce.as_bytes()),
            associated_data,
            &mut buffer,
        )
        .map_err(|_| CipherError::AeadFailure)?;
    buffer.extend_from_slice(&tag);

    debug_assert_eq!(buffer.len(), plaintext.len() + TAG_LEN);
    Ok(buffer)
}

/// Verify and decrypt `ciphertext_with_tag`.
///
/// Decryption runs in a zeroizing scratch buffer; the buffer is handed to the
/// caller only if the tag verifies, otherwise it is wiped on drop.
///
/// # Errors
///
/// Returns [`CipherError::Authentication`] if the input is shorter than a tag
/// or if verification fails. Returns [`CipherError::MessageTooLarge`] if the
/// ciphertext body exceeds [`MESSAGE_MAX`].
pub fn decrypt(
    key: &SecretKey,
    nonce: &Nonce,
    ciphertext_with_tag: &[u8],
    associated_data: &[u8],
) -> Result<Zeroizing<Vec<u8>>, CipherError> {
    let body_len = ciphertext_with_tag
        .len()
        .checked_sub(TAG_LEN)
        .ok_or(CipherError::Authentication)?;
    if body_len > MESSAGE_MAX {
        return Err(CipherError::MessageTooLarge(body_len));
    }
    let cipher = build_cipher(key)?;

    let (body, tag) = ciphertext_with_tag.split_at(body_len);
    let mut buffer = Zeroizing::new(body.to_vec());
    cipher
        .decrypt_in_place_detached(
            GenericArray::from_slice(nonce.as_bytes()),
            associated_data,
            buffer.as_mut_slice(),
            GenericArray::from_slice(tag),
        )
        .map_err(|_| CipherError::Authentication)?;

    Ok(buffer)
}

fn build_cipher(key: &SecretKey) -> Result<Aes256Ocb3, CipherError> {
    let bytes = key.as_bytes();
    Aes256Ocb3::new_from_slice(bytes).map_err(|_| CipherError::InvalidKeyLength(bytes.len()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entropy::{EntropySource, OsEntropy};

    /// The 20 visible characters plus the C string terminator.
    const HELLO: &[u8; 21] = b"Hello, secure world.\0";

    fn random_key() -> SecretKey {
        let mut key = SecretKey::zeroed();
        OsEntropy.draw(key.as_mut_bytes()).unwrap();
        key
    }

    fn random_nonce() -> Nonce {
        let mut bytes = [0u8; NONCE_LEN];
        OsEntropy.draw(&mut bytes).unwrap();
        Nonce::from_bytes(bytes)
    }

    fn zero_key() -> SecretKey {
        SecretKey::from_bytes([0u8; KEY_LEN])
    }

    fn zero_nonce() -> Nonce {
        Nonce::from_bytes([0u8; NONCE_LEN])
    }

    #[test]
    fn round_trip_every_length_up_to_max() {
        let key = random_key();
        let aad = b"header:v1";
        let mut plaintext = vec![0u8; MESSAGE_MAX];
        OsEntropy.draw(&mut plaintext).unwrap();

        for len in 0..=MESSAGE_MAX {
            let nonce = random_nonce();
            let msg = &plaintext[..len];
            let ciphertext = encrypt(&key, &nonce, msg, aad).unwrap();
            assert_eq!(ciphertext.len(), len + TAG_LEN);
            let decrypted = decrypt(&key, &nonce, &ciphertext, aad).unwrap();
            assert_eq!(decrypted.as_slice(), msg);
        }
    }

    #[test]
    fn hello_world_with_zero_key_and_nonce() {
        let ciphertext = encrypt(&zero_key(), &zero_nonce(), HELLO, b"").unwrap();
        assert_eq!(ciphertext.len(), 37);
        assert_ne!(&ciphertext[..HELLO.len()], &HELLO[..]);

        let decrypted = decrypt(&zero_key(), &zero_nonce(), &ciphertext, b"").unwrap();
        assert_eq!(decrypted.as_slice(), &HELLO[..]);

        let other = SecretKey::from_bytes([1u8; KEY_LEN]);
        assert!(matches!(
            decrypt(&other, &zero_nonce(), &ciphertext, b""),
            Err(CipherError::Authentication)
        ));
    }

    #[test]
    fn hello_world_known_ciphertext() {
        const EXPECTED: [u8; 37] = [
            0x1e, 0xb5, 0xa0, 0x9d, 0xba, 0xe1, 0x2e, 0xf3,
            0x1b, 0x71, 0x7a, 0x3c, 0xe0, 0x40, 0x9d, 0xb8,
            0x8c, 0x44, 0xb5, 0x77, 0xcc, 0x81, 0x3c, 0xb9,
            0xbc, 0x78, 0x09, 0x54, 0x03, 0xfc, 0xa1, 0xdb,
            0xd1, 0x17, 0xa0, 0x81, 0xce,
        ];
        let ciphertext = encrypt(&zero_key(), &zero_nonce(), HELLO, b"").unwrap();
        assert_eq!(ciphertext.as_slice(), &EXPECTED[..]);
    }

    /// RFC 7253 Appendix A iterated test for KEYLEN=256, TAGLEN=128.
    #[test]
    fn rfc7253_iterated_vector() {
        const EXPECTED_TAG: [u8; TAG_LEN] = [
            0xd9, 0x0e, 0xb8, 0xe9, 0xc9, 0x77, 0xc8, 0x8b,
            0x79, 0xdd, 0x79, 0x3d, 0x7f, 0xfa, 0x16, 0x1c,
        ];
        let mut key_bytes = [0u8; KEY_LEN];
        key_bytes[KEY_LEN - 1] = 128;
        let key = SecretKey::from_bytes(key_bytes);

        let nonce = |n: u32| {
            let mut bytes = [0u8; NONCE_LEN];
            bytes[NONCE_LEN - 4..].copy_from_slice(&n.to_be_bytes());
            Nonce::from_bytes(bytes)
        };

        let mut transcript = Vec::new();
        for i in 0..128u32 {
            let s = vec![0u8; i as usize];
            transcript.extend(encrypt(&key, &nonce(3 * i + 1), &s, &s).unwrap());
            transcript.extend(encrypt(&key, &nonce(3 * i + 2), &s, b"").unwrap());
            transcript.extend(encrypt(&key, &nonce(3 * i + 3), b"", &s).unwrap());
        }
        let tag = encrypt(&key, &nonce(385), b"", &transcript).unwrap();
        assert_eq!(tag.as_slice(), &EXPECTED_TAG[..]);
    }

    #[test]
    fn aes_key_schedule_is_wiped_on_drop() {
        fn assert_zeroize_on_drop<T: zeroize::ZeroizeOnDrop>() {}
        assert_zeroize_on_drop::<Aes256>();
    }

    #[test]
    fn encryption_is_deterministic_for_fixed_inputs() {
        let a = encrypt(&zero_key(), &zero_nonce(), HELLO, b"").unwrap();
        let b = encrypt(&zero_key(), &zero_nonce(), HELLO, b"").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn every_ciphertext_and_tag_bit_flip_is_detected() {
        let key = random_key();
        let nonce = random_nonce();
        let ciphertext = encrypt(&key, &nonce, HELLO, b"aad").unwrap();

        for bit in 0..ciphertext.len() * 8 {
            let mut tampered = ciphertext.clone();
            tampered[bit / 8] ^= 1 << (bit % 8);
            assert!(
                matches!(
                    decrypt(&key, &nonce, &tampered, b"aad"),
                    Err(CipherError::Authentication)
                ),
                "bit {bit} flip was not detected"
            );
        }
    }

    #[test]
    fn every_nonce_bit_flip_is_detected() {
        let key = random_key();
        let nonce_bytes = [0x5Cu8; NONCE_LEN];
        let ciphertext = encrypt(&key, &Nonce::from_bytes(nonce_bytes), HELLO, b"").unwrap();

        for bit in 0..NONCE_LEN * 8 {
            let mut tampered = nonce_bytes;
            tampered[bit / 8] ^= 1 << (bit % 8);
            assert!(matches!(
                decrypt(&key, &Nonce::from_bytes(tampered), &ciphertext, b""),
                Err(CipherError::Authentication)
            ));
        }
    }

    #[test]
    fn every_associated_data_bit_flip_is_detected() {
        let key = random_key();
        let nonce = random_nonce();
        let aad = b"tenant=42;route=/v1".to_vec();
        let ciphertext = encrypt(&key, &nonce, HELLO, &aad).unwrap();

        for bit in 0..aad.len() * 8 {
            let mut tampered = aad.clone();
            tampered[bit / 8] ^= 1 << (bit % 8);
            assert!(matches!(
                decrypt(&key, &nonce, &ciphertext, &tampered),
                Err(CipherError::Authentication)
            ));
        }
    }

    #[test]
    fn missing_or_extra_associated_data_fails() {
        let key = random_key();
        let nonce = random_nonce();
        let ciphertext = encrypt(&key, &nonce, HELLO, b"bound").unwrap();
        assert!(decrypt(&key, &nonce, &ciphertext, b"").is_err());

        let unbound = encrypt(&key, &nonce, HELLO, b"").unwrap();
        assert!(decrypt(&key, &nonce, &unbound, b"bound").is_err());
    }

    #[test]
    fn truncated_ciphertext_fails() {
        let key = random_key();
        let nonce = random_nonce();
        let ciphertext = encrypt(&key, &nonce, HELLO, b"").unwrap();

        assert!(matches!(
            decrypt(&key, &nonce, &ciphertext[..TAG_LEN - 1], b""),
            Err(CipherError::Authentication)
        ));
        assert!(matches!(
            decrypt(&key, &nonce, &ciphertext[..ciphertext.len() - 1], b""),
            Err(CipherError::Authentication)
        ));
    }

    #[test]
    fn oversized_plaintext_rejected() {
        let big = vec![0u8; MESSAGE_MAX + 1];
        assert!(matches!(
            encrypt(&zero_key(), &zero_nonce(), &big, b""),
            Err(CipherError::MessageTooLarge(n)) if n == MESSAGE_MAX + 1
        ));
    }

    #[test]
    fn oversized_ciphertext_rejected() {
        let big = vec![0u8; MESSAGE_MAX + 1 + TAG_LEN];
        assert!(matches!(
            decrypt(&zero_key(), &zero_nonce(), &big, b""),
            Err(CipherError::MessageTooLarge(_))
        ));
    }

    #[test]
    fn empty_plaintext_still_authenticated() {
        let key = random_key();
        let nonce = random_nonce();
        let ciphertext = encrypt(&key, &nonce, b"", b"only aad").unwrap();
        assert_eq!(ciphertext.len(), TAG_LEN);
        assert!(decrypt(&key, &nonce, &ciphertext, b"only aad")
            .unwrap()
            .is_empty());
        assert!(decrypt(&key, &nonce, &ciphertext, b"other aad").is_err());
    }
}
