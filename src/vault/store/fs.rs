use super::fs_backend::FsBackend;
use super::local_store::LocalStore;
use crate::error::Result;
use std::path::{Path, PathBuf};

/// Production local store: one JSON file, rewritten atomically per mutation.
pub type FileStore = LocalStore<FsBackend>;

impl FileStore {
    pub fn open_file(data_file: impl Into<PathBuf>) -> Result<Self> {
        let backend = FsBackend::new(data_file);
        tracing::debug!(path = %backend.data_file().display(), "opening file store");
        LocalStore::open(backend)
    }

    pub fn data_file(&self) -> &Path {
        self.backend.data_file()
    }
}
