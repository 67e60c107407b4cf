use super::collection::{DocumentCollection, RecordChanges, RecordDocument};
use crate::error::{Result, StorageError};
use std::cell::{Cell, RefCell};

/// In-memory document collection for testing the remote store.
///
/// Generates 24-hex ids like a real document store and counts calls so tests
/// can check that each store operation maps to one backend operation.
#[derive(Default)]
pub struct MemCollection {
    docs: RefCell<Vec<RecordDocument>>,
    counter: Cell<u64>,
    calls: Cell<usize>,
    simulate_failure: Cell<bool>,
}

impl MemCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every call fail as if the backend were unreachable.
    pub fn set_simulate_failure(&self, fail: bool) {
        self.simulate_failure.set(fail);
    }

    pub fn call_count(&self) -> usize {
        self.calls.get()
    }

    /// Put a document straight into the collection, bypassing the store.
    pub fn seed(&self, doc: RecordDocument) -> String {
        let id = doc.id.clone().unwrap_or_else(|| self.generate_id());
        self.docs.borrow_mut().push(RecordDocument {
            id: Some(id.clone()),
            ..doc
        });
        id
    }

    fn generate_id(&self) -> String {
        let n = self.counter.get() + 1;
        self.counter.set(n);
        format!("{:024x}", 0x65a0_0000_0000_0000_0000_0000u128 + n as u128)
    }

    fn call(&self) -> Result<()> {
        self.calls.set(self.calls.get() + 1);
        if self.simulate_failure.get() {
            return Err(StorageError::Remote("Simulated backend failure".to_string()).into());
        }
        Ok(())
    }
}

impl DocumentCollection for MemCollection {
    fn ping(&self) -> Result<()> {
        self.call()
    }

    fn insert_one(&self, doc: &RecordDocument) -> Result<String> {
        self.call()?;
        let id = self.generate_id();
        self.docs.borrow_mut().push(RecordDocument {
            id: Some(id.clone()),
            ..doc.clone()
        });
        Ok(id)
    }

    fn find_all(&self) -> Result<Vec<RecordDocument>> {
        self.call()?;
        Ok(self.docs.borrow().clone())
    }

    fn find_one(&self, id: &str) -> Result<Option<RecordDocument>> {
        self.call()?;
        Ok(self
            .docs
            .borrow()
            .iter()
            .find(|d| d.id.as_deref() == Some(id))
            .cloned())
    }

    fn update_one(&self, id: &str, changes: &RecordChanges) -> Result<bool> {
        self.call()?;
        let mut docs = self.docs.borrow_mut();
        match docs.iter_mut().find(|d| d.id.as_deref() == Some(id)) {
            Some(doc) => {
                doc.name = changes.name.clone();
                doc.value = changes.value.clone();
                doc.updated = Some(changes.updated.clone());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn delete_one(&self, id: &str) -> Result<bool> {
        self.call()?;
        let mut docs = self.docs.borrow_mut();
        let before = docs.len();
        docs.retain(|d| d.id.as_deref() != Some(id));
        Ok(docs.len() < before)
    }
}
