//! Common constants, message framing, and errors shared across `ocb-sealer` crates.

pub mod error;
pub mod protocol;

pub use error::SealError;
pub use protocol::{FormatError, SealedMessage, KEY_LEN, MESSAGE_MAX, NONCE_LEN, TAG_LEN};
