//! AES-256-OCB3 authenticated encryption (RFC 7253).
//!
//! This module is free of file and process I/O. It provides the nonce
//! generator and the symmetric encrypt/decrypt engine used by the commands.
//!
//! # Security invariants
//!
//! - A `(key, nonce)` pair is used for exactly one encryption. [`envelope::seal`]
//!   draws the nonce itself so callers never choose one.
//! - Decrypted bytes are only returned after the tag has verified.

pub mod cipher;
pub mod envelope;
pub mod nonce;

pub use cipher::{decrypt, encrypt, CipherError};
pub use common::protocol::{KEY_LEN, MESSAGE_MAX, NONCE_LEN, TAG_LEN};
pub use envelope::{open, seal};
pub use nonce::Nonce;
