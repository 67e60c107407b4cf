use super::backend::{StorageBackend, VaultFile};
use crate::error::{Result, StorageError};
use std::cell::{Cell, RefCell};

/// In-memory storage backend for testing.
///
/// Uses `RefCell` for interior mutability since vault is single-threaded.
/// This keeps the `StorageBackend` trait on `&self`, like the file backend.
#[derive(Default)]
pub struct MemBackend {
    file: RefCell<Option<VaultFile>>,
    simulate_write_error: Cell<bool>,
    saves: Cell<usize>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from existing content, as if it had been read from disk.
    pub fn with_file(file: VaultFile) -> Self {
        let backend = Self::default();
        *backend.file.borrow_mut() = Some(file);
        backend
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.simulate_write_error.set(simulate);
    }

    /// Number of successful saves so far.
    pub fn save_count(&self) -> usize {
        self.saves.get()
    }

    /// What a fresh process would load right now.
    pub fn persisted(&self) -> Option<VaultFile> {
        self.file.borrow().clone()
    }
}

impl StorageBackend for MemBackend {
    fn load(&self) -> Result<Option<VaultFile>> {
        Ok(self.file.borrow().clone())
    }

    fn save(&self, file: &VaultFile) -> Result<()> {
        if self.simulate_write_error.get() {
            return Err(StorageError::Io(std::io::Error::other("Simulated write error")).into());
        }
        *self.file.borrow_mut() = Some(file.clone());
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }
}
