use super::backend::{StorageBackend, VaultFile};
use crate::error::{Result, StorageError};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Stores the vault in a single JSON file.
pub struct FsBackend {
    data_file: PathBuf,
}

impl FsBackend {
    pub fn new(data_file: impl Into<PathBuf>) -> Self {
        Self {
            data_file: data_file.into(),
        }
    }

    pub fn data_file(&self) -> &Path {
        &self.data_file
    }

    fn parent_dir(&self) -> PathBuf {
        match self.data_file.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    fn ensure_dir(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path).map_err(StorageError::Io)?;
        }
        Ok(())
    }
}

impl StorageBackend for FsBackend {
    fn load(&self) -> Result<Option<VaultFile>> {
        if !self.data_file.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.data_file).map_err(StorageError::Io)?;
        if content.trim().is_empty() {
            return Ok(None);
        }
        VaultFile::from_json(&content).map(Some)
    }

    fn save(&self, file: &VaultFile) -> Result<()> {
        let dir = self.parent_dir();
        self.ensure_dir(&dir)?;

        let content = file.to_json()?;

        // The temp file lives next to the target so the rename stays on one
        // filesystem. Dropping it on any error path removes it.
        let mut tmp = NamedTempFile::new_in(&dir).map_err(StorageError::Io)?;
        tmp.write_all(content.as_bytes()).map_err(StorageError::Io)?;
        tmp.as_file().sync_all().map_err(StorageError::Io)?;
        tmp.persist(&self.data_file)
            .map_err(|e| StorageError::Io(e.error))?;

        tracing::debug!(
            path = %self.data_file.display(),
            records = file.records.len(),
            "saved vault file"
        );
        Ok(())
    }
}
