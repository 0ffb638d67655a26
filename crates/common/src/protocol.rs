//! Sizes and the on-the-wire framing of a sealed message.
//!
//! A sealed message is the nonce used for encryption plus the ciphertext with
//! its authentication tag appended. The nonce is not secret but must travel
//! with the ciphertext. Associated data is never embedded; both parties agree
//! on it out of band.
//!
//! Two framings are supported:
//!
//! ```text
//! binary: nonce (12 bytes) || ciphertext || tag (16 bytes)
//! text:   v1.<base64url-no-pad(nonce)>.<base64url-no-pad(ciphertext+tag)>
//! ```

use std::fmt;
use std::str::FromStr;

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use thiserror::Error;

/// Byte length of an AES-256 key (32 bytes = 256 bits).
pub const KEY_LEN: usize = 32;

/// Byte length of an OCB nonce (12 bytes = 96 bits).
pub const NONCE_LEN: usize = 12;

/// Byte length of the OCB authentication tag.
pub const TAG_LEN: usize = 16;

/// Largest plaintext accepted by a single encryption call.
pub const MESSAGE_MAX: usize = 1024;

/// Prefix that appears at the start of every text-framed message.
pub const VERSION_PREFIX: &str = "v1";

/// Errors produced while parsing a framed message.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormatError {
    /// The binary record is too short to hold a nonce and a tag.
    #[error("sealed message too short: {0} bytes")]
    TooShort(usize),

    /// The text record does not match `v1.<nonce>.<ciphertext>`.
    #[error("invalid sealed message format")]
    InvalidFormat,

    /// The decoded nonce is not exactly [`NONCE_LEN`] bytes.
    #[error("invalid nonce length in sealed message: expected {NONCE_LEN} bytes, got {0}")]
    NonceLength(usize),
}

/// A nonce paired with the ciphertext (tag included) it was used for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SealedMessage {
    /// Raw nonce bytes.
    pub nonce: [u8; NONCE_LEN],
    /// Raw ciphertext + authentication tag bytes.
    pub ciphertext: Vec<u8>,
}

impl SealedMessage {
    /// Encode as `nonce || ciphertext_with_tag`.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(NONCE_LEN + self.ciphertext.len());
        out.extend_from_slice(&self.nonce);
        out.extend_from_slice(&self.ciphertext);
        out
    }

    /// Split a binary record back into nonce and ciphertext.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::TooShort`] if `bytes` cannot hold a nonce and a tag.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, FormatError> {
        if bytes.len() < NONCE_LEN + TAG_LEN {
            return Err(FormatError::TooShort(bytes.len()));
        }
        let (nonce_bytes, ciphertext) = bytes.split_at(NONCE_LEN);
        let mut nonce = [0u8; NONCE_LEN];
        nonce.copy_from_slice(nonce_bytes);
        Ok(Self {
            nonce,
            ciphertext: ciphertext.to_vec(),
        })
    }

    /// Encode this message to its canonical text representation.
    pub fn to_string_repr(&self) -> String {
        format!(
            "{}.{}.{}",
            VERSION_PREFIX,
            URL_SAFE_NO_PAD.encode(self.nonce),
            URL_SAFE_NO_PAD.encode(&self.ciphertext),
        )
    }
}

impl fmt::Display for SealedMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_repr())
    }
}

impl FromStr for SealedMessage {
    type Err = FormatError;

    /// Parse a `v1.<nonce>.<ciphertext>` string.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.splitn(3, '.').collect();
        if parts.len() != 3 || parts[0] != VERSION_PREFIX {
            return Err(FormatError::InvalidFormat);
        }
        let nonce_bytes = URL_SAFE_NO_PAD
            .decode(parts[1])
            .map_err(|_| FormatError::InvalidFormat)?;
        if nonce_bytes.len() != NONCE_LEN {
            return Err(FormatError::NonceLength(nonce_bytes.len()));
        }
        let mut nonce = [0u8; NONCE_LEN];
        nonce.copy_from_slice(&nonce_bytes);

        let ciphertext = URL_SAFE_NO_PAD
            .decode(parts[2])
            .map_err(|_| FormatError::InvalidFormat)?;

        Ok(Self { nonce, ciphertext })
    }
}
