use super::allocator::IdAllocator;
use super::backend::{StorageBackend, VaultFile};
use super::{BackendKind, RecordStore};
use crate::error::{Result, VaultError};
use crate::model::{validate_name, Record, RecordId, Timestamp};

/// Record store that keeps the whole set in memory and rewrites it through a
/// [`StorageBackend`] on every mutation.
pub struct LocalStore<B: StorageBackend> {
    /// The underlying storage backend.
    /// Exposed as pub(crate) for testing and internal access only.
    pub(crate) backend: B,
    records: Vec<Record>,
    ids: IdAllocator,
}

impl<B: StorageBackend> LocalStore<B> {
    /// Load whatever the backend holds and seed the allocator from it.
    pub fn open(backend: B) -> Result<Self> {
        let file = backend.load()?.unwrap_or_default();
        tracing::debug!(records = file.records.len(), "opened local store");
        Ok(Self::with_contents(backend, file))
    }

    /// Build a store around content that was already loaded.
    pub fn with_contents(backend: B, file: VaultFile) -> Self {
        let ids = IdAllocator::seeded(&file.records, file.next_id);
        Self {
            backend,
            records: file.records,
            ids,
        }
    }

    /// Persist `records` and only then make them the visible set.
    fn commit(&mut self, records: Vec<Record>) -> Result<()> {
        let file = VaultFile {
            next_id: Some(self.ids.peek()),
            records,
        };
        self.backend.save(&file)?;
        self.records = file.records;
        Ok(())
    }

    fn position(&self, id: &RecordId) -> Option<usize> {
        self.records.iter().position(|r| &r.id == id)
    }
}

impl<B: StorageBackend> RecordStore for LocalStore<B> {
    fn add(&mut self, name: &str, value: &str) -> Result<Record> {
        validate_name(name)?;

        // Consumed even if the save fails, so it is never handed out twice.
        let id = self.ids.next()?;
        let record = Record::new(id, name.to_string(), value.to_string());

        let mut next = self.records.clone();
        next.push(record.clone());
        self.commit(next)?;

        tracing::debug!(id = %record.id, "added record");
        Ok(record)
    }

    fn list(&self) -> Result<Vec<Record>> {
        Ok(self.records.clone())
    }

    fn update(&mut self, id: &RecordId, name: &str, value: &str) -> Result<bool> {
        validate_name(name)?;

        let Some(pos) = self.position(id) else {
            return Ok(false);
        };

        let mut next = self.records.clone();
        let record = &mut next[pos];
        record.name = name.to_string();
        record.value = value.to_string();
        record.updated = Some(Timestamp::now());
        self.commit(next)?;

        tracing::debug!(%id, "updated record");
        Ok(true)
    }

    fn delete(&mut self, id: &RecordId) -> Result<bool> {
        let Some(pos) = self.position(id) else {
            return Ok(false);
        };

        let mut next = self.records.clone();
        next.remove(pos);
        self.commit(next)?;

        tracing::debug!(%id, "deleted record");
        Ok(true)
    }

    fn find(&self, id: &RecordId) -> Result<Option<Record>> {
        Ok(self.position(id).map(|pos| self.records[pos].clone()))
    }

    fn parse_id(&self, raw: &str) -> Result<RecordId> {
        raw.trim()
            .parse::<u64>()
            .map(RecordId::Local)
            .map_err(|_| VaultError::validation(format!("Invalid record ID: {}", raw.trim())))
    }

    fn kind(&self) -> BackendKind {
        BackendKind::File
    }
}
