//! [`FileKeyStore`]: the key record as a single raw 32-byte file.

use std::fs::{self, File, OpenOptions, TryLockError};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, info};
use zeroize::Zeroizing;

use super::{KeyStore, KeyStoreError};
use crate::crypto::KEY_LEN;
use crate::key::SecretKey;

/// Key store backed by one file on disk.
///
/// Writes go to a temporary file in the same directory (mode `0600` on Unix),
/// are flushed to disk, and then renamed over the record. Writers take an
/// exclusive OS lock on a sibling `<file>.lock`; a second writer fails with
/// [`KeyStoreError::Busy`] rather than waiting.
#[derive(Debug, Clone)]
pub struct FileKeyStore {
    path: PathBuf,
}

impl FileKeyStore {
    /// Create a store for the record at `path`. Nothing is touched until
    /// [`KeyStore::load`] or [`KeyStore::store`] is called.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the key record.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn dir(&self) -> &Path {
        match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        }
    }

    fn lock_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".lock");
        self.path.with_file_name(name)
    }
}

impl KeyStore for FileKeyStore {
    fn load(&self) -> Result<SecretKey, KeyStoreError> {
        let file = match File::open(&self.path) {
            Ok(f) => f,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(KeyStoreError::NotProvisioned)
            }
            Err(e) => return Err(io_error(&self.path, e)),
        };

        // One byte past KEY_LEN is enough to tell "too long" apart from "exact".
        let mut buf = Zeroizing::new(Vec::with_capacity(KEY_LEN + 1));
        file.take(KEY_LEN as u64 + 1)
            .read_to_end(&mut buf)
            .map_err(|e| io_error(&self.path, e))?;

        if buf.len() != KEY_LEN {
            return Err(KeyStoreError::invalid_length(buf.len()));
        }
        let key =
            SecretKey::from_slice(&buf).map_err(|_| KeyStoreError::invalid_length(buf.len()))?;

        debug!(path = %self.path.display(), "key record loaded");
        Ok(key)
    }

    fn store(&self, key: &SecretKey) -> Result<(), KeyStoreError> {
        let dir = self.dir();
        fs::create_dir_all(dir).map_err(|e| io_error(dir, e))?;

        let _lock = WriterLock::acquire(self.lock_path())?;

        let mut tmp = NamedTempFile::new_in(dir).map_err(|e| io_error(dir, e))?;
        tmp.write_all(key.as_bytes())
            .map_err(|e| io_error(tmp.path(), e))?;
        tmp.as_file()
            .sync_all()
            .map_err(|e| io_error(tmp.path(), e))?;
        tmp.persist(&self.path)
            .map_err(|e| io_error(&self.path, e.error))?;
        sync_dir(dir)?;

        info!(path = %self.path.display(), "key record written");
        Ok(())
    }
}

/// Exclusive advisory lock held on `<file>.lock` for the duration of a write.
///
/// The lock file itself is left in place. The kernel releases the lock when
/// the handle is closed, so a writer that dies mid-write never wedges the store.
#[derive(Debug)]
struct WriterLock {
    _file: File,
}

impl WriterLock {
    fn acquire(path: PathBuf) -> Result<Self, KeyStoreError> {
        let file = match OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)
        {
            Ok(f) => f,
            Err(e) => return Err(KeyStoreError::Io { path, source: e }),
        };
        match file.try_lock() {
            Ok(()) => Ok(Self { _file: file }),
            Err(TryLockError::WouldBlock) => Err(KeyStoreError::Busy(path)),
            Err(TryLockError::Error(e)) => Err(KeyStoreError::Io { path, source: e }),
        }
    }
}

#[cfg(unix)]
fn sync_dir(dir: &Path) -> Result<(), KeyStoreError> {
    File::open(dir)
        .and_then(|d| d.sync_all())
        .map_err(|e| io_error(dir, e))
}

#[cfg(not(unix))]
fn sync_dir(_dir: &Path) -> Result<(), KeyStoreError> {
    Ok(())
}

fn io_error(path: &Path, source: io::Error) -> KeyStoreError {
    KeyStoreError::Io {
        path: path.to_path_buf(),
        source,
    }
}
