//! `sealer`: key provisioning and AES-256-OCB3 authenticated encryption.
//!
//! Pipeline:
//! 1. [`provision::generate_and_store`] draws a 32-byte key from an
//!    [`entropy::EntropySource`] and writes it through a [`keystore::KeyStore`].
//! 2. For each message the key is loaded, [`crypto::nonce::generate`] draws a
//!    fresh 12-byte nonce, and [`crypto::cipher::encrypt`] produces
//!    `ciphertext || tag`.
//! 3. Nonce and ciphertext travel together as a [`common::SealedMessage`];
//!    [`crypto::cipher::decrypt`] reverses the process and refuses to release
//!    any plaintext unless the tag verifies.

pub mod commands;
pub mod config;
pub mod crypto;
pub mod entropy;
mod error;
pub mod key;
pub mod keystore;
pub mod provision;
pub mod telemetry;

pub use common::{SealError, SealedMessage};
pub use config::Config;
pub use key::SecretKey;
