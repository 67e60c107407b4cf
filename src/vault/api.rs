//! # API Facade
//!
//! The single entry point every UI goes through. [`VaultApi`] owns the store
//! and the optional [`BackupWriter`], and each method:
//!
//! - **Normalizes inputs**: textual ids become [`RecordId`]s via the active
//!   store's `parse_id`, and sort field/order text is parsed here.
//! - **Dispatches** to the matching `commands::*::run`.
//! - **Backs up** the fresh snapshot after a mutation that changed something.
//!
//! A failed backup never fails the call. It is logged and appended to the
//! result as a warning.
//!
//! ## Generic Over RecordStore
//!
//! - Production: `VaultApi<FileStore>` or `VaultApi<RemoteStore<DataApiCollection>>`
//! - Testing: `VaultApi<InMemoryStore>`

use crate::backup::BackupWriter;
use crate::commands::{self, CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::RecordId;
use crate::query::{SortField, SortOrder};
use crate::store::RecordStore;
use std::path::Path;

pub struct VaultApi<S: RecordStore> {
    store: S,
    backups: Option<BackupWriter>,
}

impl<S: RecordStore> VaultApi<S> {
    pub fn new(store: S, backups: Option<BackupWriter>) -> Self {
        Self { store, backups }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn add_record(&mut self, name: &str, value: &str) -> Result<CmdResult> {
        let result = commands::add::run(&mut self.store, name, value)?;
        Ok(self.backed_up(result))
    }

    pub fn list_records(&self) -> Result<CmdResult> {
        commands::list::run(&self.store)
    }

    pub fn update_record(&mut self, id: &str, name: &str, value: &str) -> Result<CmdResult> {
        let id = self.parse_id(id)?;
        let result = commands::update::run(&mut self.store, &id, name, value)?;
        Ok(self.backed_up(result))
    }

    pub fn delete_record(&mut self, id: &str) -> Result<CmdResult> {
        let id = self.parse_id(id)?;
        let result = commands::delete::run(&mut self.store, &id)?;
        Ok(self.backed_up(result))
    }

    pub fn search(&self, keyword: &str) -> Result<CmdResult> {
        commands::search::run(&self.store, keyword)
    }

    pub fn sort(&self, field: &str, order: &str) -> Result<CmdResult> {
        let field: SortField = field.parse()?;
        let order: SortOrder = order.parse()?;
        commands::sort::run(&self.store, field, order)
    }

    pub fn export(&self, path: &Path) -> Result<CmdResult> {
        commands::export::run(&self.store, path)
    }

    pub fn stats(&self) -> Result<CmdResult> {
        commands::stats::run(&self.store)
    }

    fn parse_id(&self, raw: &str) -> Result<RecordId> {
        self.store.parse_id(raw)
    }

    fn backed_up(&self, mut result: CmdResult) -> CmdResult {
        let Some(writer) = &self.backups else {
            return result;
        };
        if !result.is_mutation() {
            return result;
        }

        let written = self.store.list().and_then(|records| writer.write(&records));
        match written {
            Ok(path) => {
                result.add_message(CmdMessage::info(format!("Backup created: {}", path.display())));
            }
            Err(e) => {
                tracing::warn!(error = %e, "backup failed");
                result.add_message(CmdMessage::warning(format!("Backup failed: {}", e)));
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::error::VaultError;
    use crate::model::Record;
    use crate::store::memory::fixtures::StoreFixture;
    use crate::store::memory::InMemoryStore;
    use std::fs;
    use tempfile::TempDir;

    fn backup_files(dir: &Path) -> Vec<std::path::PathBuf> {
        match fs::read_dir(dir) {
            Ok(entries) => entries.map(|e| e.unwrap().path()).collect(),
            Err(_) => Vec::new(),
        }
    }

    #[test]
    fn mutations_write_backups() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("backups");
        let mut api = VaultApi::new(InMemoryStore::new(), Some(BackupWriter::new(&dir)));

        let added = api.add_record("Alice", "x").unwrap();
        assert_eq!(added.messages.len(), 2);
        assert!(added.messages[1].content.starts_with("Backup created: "));

        let files = backup_files(&dir);
        assert_eq!(files.len(), 1);
        let snapshot: Vec<Record> =
            serde_json::from_str(&fs::read_to_string(&files[0]).unwrap()).unwrap();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].name, "Alice");
    }

    #[test]
    fn misses_and_reads_do_not_back_up() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("backups");
        let mut api = VaultApi::new(
            StoreFixture::new().with_records(2).build(),
            Some(BackupWriter::new(&dir)),
        );

        api.update_record("9", "x", "y").unwrap();
        api.delete_record("9").unwrap();
        api.list_records().unwrap();
        api.stats().unwrap();

        assert!(backup_files(&dir).is_empty());
    }

    #[test]
    fn failed_backup_is_a_warning() {
        let temp = TempDir::new().unwrap();
        let blocker = temp.path().join("not-a-dir");
        fs::write(&blocker, "").unwrap();
        let mut api = VaultApi::new(InMemoryStore::new(), Some(BackupWriter::new(&blocker)));

        let result = api.add_record("Alice", "x").unwrap();
        let last = result.messages.last().unwrap();
        assert_eq!(last.level, MessageLevel::Warning);
        assert_eq!(api.store().list().unwrap().len(), 1);
    }

    #[test]
    fn ids_are_parsed_by_the_active_store() {
        let mut api = VaultApi::new(StoreFixture::new().with_records(2).build(), None);

        let err = api.delete_record("abc").unwrap_err();
        assert!(matches!(err, VaultError::Validation(_)));

        let deleted = api.delete_record(" 2 ").unwrap();
        assert_eq!(deleted.affected_records[0].name, "Record 2");
    }

    #[test]
    fn sort_parses_field_and_order() {
        let api = VaultApi::new(StoreFixture::new().with_records(3).build(), None);

        let result = api.sort("Created", "Descending").unwrap();
        assert_eq!(result.listed_records[0].name, "Record 3");

        assert!(matches!(api.sort("value", ""), Err(VaultError::Validation(_))));
        assert!(matches!(api.sort("name", "sideways"), Err(VaultError::Validation(_))));
    }
}
