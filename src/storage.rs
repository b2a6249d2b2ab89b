//! Storage
//!
//! The persistence seam for the order store: one key-value slot holding a
//! single string payload, injected so the store can be exercised without
//! any particular host environment.

use std::{
    cell::RefCell,
    fs, io,
    path::{Path, PathBuf},
};

use mockall::automock;
use thiserror::Error;

/// Errors raised by a storage slot.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying I/O failure reading or writing the slot.
    #[error("storage I/O failed: {0}")]
    Io(#[from] io::Error),
}

/// A single persistent key-value slot holding one string payload.
///
/// In the original deployment this is one browser storage key; here any
/// implementation may be injected, and reads/writes are synchronous with a
/// single-writer assumption.
#[automock]
pub trait StorageSlot {
    /// Read the current payload, `None` when nothing has been written yet.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] when the backing medium fails.
    fn read(&self) -> Result<Option<String>, StorageError>;

    /// Replace the payload wholesale.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] when the backing medium fails.
    fn write(&self, payload: &str) -> Result<(), StorageError>;
}

/// In-process slot, for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemorySlot {
    payload: RefCell<Option<String>>,
}

impl MemorySlot {
    /// Create an empty slot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageSlot for MemorySlot {
    fn read(&self) -> Result<Option<String>, StorageError> {
        Ok(self.payload.borrow().clone())
    }

    fn write(&self, payload: &str) -> Result<(), StorageError> {
        *self.payload.borrow_mut() = Some(payload.to_owned());

        Ok(())
    }
}

/// Slot backed by a single file on disk.
#[derive(Debug, Clone)]
pub struct FileSlot {
    path: PathBuf,
}

impl FileSlot {
    /// Create a slot at the given path; the file need not exist yet.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StorageSlot for FileSlot {
    fn read(&self) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(&self.path) {
            Ok(payload) => Ok(Some(payload)),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(error) => Err(StorageError::Io(error)),
        }
    }

    fn write(&self, payload: &str) -> Result<(), StorageError> {
        fs::write(&self.path, payload)?;

        Ok(())
    }
}
