use super::local_store::LocalStore;
use super::mem_backend::MemBackend;

pub type InMemoryStore = LocalStore<MemBackend>;

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::from_backend(MemBackend::new())
    }

    pub fn from_backend(backend: MemBackend) -> Self {
        let file = backend.persisted().unwrap_or_default();
        LocalStore::with_contents(backend, file)
    }

    pub fn backend(&self) -> &MemBackend {
        &self.backend
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::{Record, RecordId, Timestamp};
    use crate::store::backend::VaultFile;

    pub struct StoreFixture {
        records: Vec<Record>,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                records: Vec::new(),
            }
        }

        /// Add a record with a fixed creation time (RFC 3339 or anything
        /// unparseable) and the next sequential id.
        pub fn with_record(mut self, name: &str, value: &str, created: &str) -> Self {
            let id = RecordId::Local(self.records.len() as u64 + 1);
            let created = Timestamp::parse(created);
            self.records.push(Record {
                id,
                name: name.to_string(),
                value: value.to_string(),
                created: created.clone(),
                updated: Some(created),
            });
            self
        }

        pub fn with_records(mut self, count: usize) -> Self {
            for i in 0..count {
                let name = format!("Record {}", i + 1);
                let value = format!("Value {}", i + 1);
                let created = format!("2024-01-{:02}T09:00:00.000Z", (i % 28) + 1);
                self = self.with_record(&name, &value, &created);
            }
            self
        }

        pub fn records(&self) -> Vec<Record> {
            self.records.clone()
        }

        pub fn build(self) -> InMemoryStore {
            InMemoryStore::from_backend(MemBackend::with_file(VaultFile {
                next_id: None,
                records: self.records,
            }))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::StoreFixture;
    use crate::model::RecordId;
    use crate::store::RecordStore;

    #[test]
    fn fixture_store_continues_numbering() {
        let mut store = StoreFixture::new().with_records(3).build();
        assert_eq!(store.list().unwrap().len(), 3);

        let added = store.add("fourth", "").unwrap();
        assert_eq!(added.id, RecordId::Local(4));
    }
}
