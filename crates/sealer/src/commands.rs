//! Command implementations behind the `keygen`, `ocb-enc`, and `ocb-dec` binaries.
//!
//! Each command is a thin I/O wrapper: it resolves the key store and entropy
//! source from [`Config`], moves bytes between the given streams, and returns a
//! [`SealError`] whose kind decides the process exit code.

use std::fs::File;
use std::io::{Read, Write};
use std::process::ExitCode;

use common::{SealError, SealedMessage, MESSAGE_MAX, NONCE_LEN, TAG_LEN};
use tracing::{error, info};
use zeroize::Zeroizing;

use crate::config::Config;
use crate::crypto::envelope;
use crate::entropy::{DeviceEntropy, EntropySource, OsEntropy};
use crate::keystore::{FileKeyStore, KeyStore};
use crate::provision;

/// Upper bound on a text-framed record read from input. Base64 grows data by
/// 4/3, so twice the largest binary record leaves room for the prefix,
/// separators, and trailing whitespace.
const MAX_SEALED_TEXT: usize = 2 * (NONCE_LEN + MESSAGE_MAX + TAG_LEN);

/// Provision a new key at `cfg.key_path`, replacing any existing key.
///
/// # Errors
///
/// Returns [`SealError::Entropy`] or [`SealError::Storage`].
pub fn keygen(cfg: &Config) -> Result<(), SealError> {
    let store = FileKeyStore::new(&cfg.key_path);
    let mut entropy = entropy_source(cfg)?;
    provision::generate_and_store(entropy.as_mut(), &store)?;
    info!(path = %store.path().display(), "keygen complete");
    Ok(())
}

/// Read a plaintext from `input`, seal it, and write the text-framed record
/// followed by a newline to `output`.
///
/// # Errors
///
/// Returns [`SealError::InvalidInput`] if the plaintext exceeds
/// [`MESSAGE_MAX`] bytes, plus any key store or entropy failure.
pub fn encrypt<R: Read, W: Write>(cfg: &Config, input: R, mut output: W) -> Result<(), SealError> {
    let plaintext = read_bounded(input, MESSAGE_MAX, "plaintext")?;
    let key = FileKeyStore::new(&cfg.key_path).load()?;
    let mut entropy = entropy_source(cfg)?;

    let sealed = envelope::seal(
        &key,
        entropy.as_mut(),
        &plaintext,
        cfg.associated_data.as_bytes(),
    )?;

    writeln!(output, "{sealed}")
        .and_then(|()| output.flush())
        .map_err(|e| SealError::Io(format!("failed to write sealed message: {e}")))?;
    info!(plaintext_len = plaintext.len(), "message encrypted");
    Ok(())
}

/// Read a text-framed record from `input`, open it, and write the plaintext
/// to `output`. Nothing is written unless the tag verifies.
///
/// # Errors
///
/// Returns [`SealError::Authentication`] if verification fails and
/// [`SealError::InvalidInput`] if the record is malformed.
pub fn decrypt<R: Read, W: Write>(cfg: &Config, input: R, mut output: W) -> Result<(), SealError> {
    let raw = read_bounded(input, MAX_SEALED_TEXT, "sealed message")?;
    let text = std::str::from_utf8(&raw)
        .map_err(|_| SealError::InvalidInput("sealed message is not valid UTF-8".into()))?;
    let message: SealedMessage = text.trim().parse()?;

    let key = FileKeyStore::new(&cfg.key_path).load()?;
    let plaintext = envelope::open(&key, &message, cfg.associated_data.as_bytes())?;

    output
        .write_all(&plaintext)
        .and_then(|()| output.flush())
        .map_err(|e| SealError::Io(format!("failed to write plaintext: {e}")))?;
    info!(plaintext_len = plaintext.len(), "message decrypted");
    Ok(())
}

/// Log a command failure, print a one-line diagnostic, and pick the exit code.
pub fn exit_code(command: &str, result: Result<(), SealError>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(command, kind = e.kind(), error = %e, "command failed");
            eprintln!("ERROR: {command}: {e}");
            ExitCode::from(e.exit_code())
        }
    }
}

fn entropy_source(cfg: &Config) -> Result<Box<dyn EntropySource>, SealError> {
    match &cfg.entropy_device {
        Some(path) => {
            let device = File::open(path).map_err(|e| {
                SealError::Entropy(format!(
                    "cannot open entropy device {}: {e}",
                    path.display()
                ))
            })?;
            Ok(Box::new(DeviceEntropy::new(device)))
        }
        None => Ok(Box::new(OsEntropy)),
    }
}

/// Read all of `input`, failing if it holds more than `max` bytes.
fn read_bounded<R: Read>(
    input: R,
    max: usize,
    what: &str,
) -> Result<Zeroizing<Vec<u8>>, SealError> {
    let mut buf = Zeroizing::new(Vec::new());
    input
        .take(max as u64 + 1)
        .read_to_end(&mut buf)
        .map_err(|e| SealError::Io(format!("failed to read {what}: {e}")))?;
    if buf.len() > max {
        return Err(SealError::InvalidInput(format!(
            "{what} exceeds the {max} byte limit"
        )));
    }
    Ok(buf)
}
