use super::collection::{is_object_id, DocumentCollection, RecordChanges, RecordDocument};
use super::{BackendKind, RecordStore};
use crate::error::{Result, StorageError, VaultError};
use crate::model::{validate_name, Record, RecordId, Timestamp};

/// Record store backed by a remote document collection.
///
/// Holds no copy of the records: every call goes to the backend, and ids are
/// whatever the backend generated on insert.
pub struct RemoteStore<C: DocumentCollection> {
    collection: C,
}

impl<C: DocumentCollection> RemoteStore<C> {
    /// Wrap `collection`, failing if the backend does not answer.
    pub fn connect(collection: C) -> Result<Self> {
        collection.ping()?;
        tracing::debug!("connected to remote collection");
        Ok(Self { collection })
    }

    pub fn collection(&self) -> &C {
        &self.collection
    }

    fn hex_id(id: &RecordId) -> Option<&str> {
        match id {
            RecordId::Remote(hex) => Some(hex.as_str()),
            RecordId::Local(_) => None,
        }
    }
}

fn to_record(doc: RecordDocument) -> Result<Record> {
    doc.into_record().ok_or_else(|| {
        VaultError::Storage(StorageError::Remote(
            "document without _id in response".to_string(),
        ))
    })
}

impl<C: DocumentCollection> RecordStore for RemoteStore<C> {
    fn add(&mut self, name: &str, value: &str) -> Result<Record> {
        validate_name(name)?;

        let doc = RecordDocument::new_insert(name, value, Timestamp::now());
        let id = self.collection.insert_one(&doc)?;
        tracing::debug!(%id, "inserted remote record");

        Ok(Record {
            id: RecordId::Remote(id),
            name: doc.name,
            value: doc.value,
            created: doc.created,
            updated: doc.updated,
        })
    }

    fn list(&self) -> Result<Vec<Record>> {
        self.collection
            .find_all()?
            .into_iter()
            .map(to_record)
            .collect()
    }

    fn update(&mut self, id: &RecordId, name: &str, value: &str) -> Result<bool> {
        validate_name(name)?;
        let Some(hex) = Self::hex_id(id) else {
            return Ok(false);
        };

        let changes = RecordChanges {
            name: name.to_string(),
            value: value.to_string(),
            updated: Timestamp::now(),
        };
        let matched = self.collection.update_one(hex, &changes)?;
        tracing::debug!(%id, matched, "updated remote record");
        Ok(matched)
    }

    fn delete(&mut self, id: &RecordId) -> Result<bool> {
        let Some(hex) = Self::hex_id(id) else {
            return Ok(false);
        };
        let deleted = self.collection.delete_one(hex)?;
        tracing::debug!(%id, deleted, "deleted remote record");
        Ok(deleted)
    }

    fn find(&self, id: &RecordId) -> Result<Option<Record>> {
        let Some(hex) = Self::hex_id(id) else {
            return Ok(None);
        };
        self.collection.find_one(hex)?.map(to_record).transpose()
    }

    fn parse_id(&self, raw: &str) -> Result<RecordId> {
        let raw = raw.trim();
        if is_object_id(raw) {
            Ok(RecordId::Remote(raw.to_ascii_lowercase()))
        } else {
            Err(VaultError::validation(format!(
                "Invalid record ID: {} (expected 24 hexadecimal characters)",
                raw
            )))
        }
    }

    fn kind(&self) -> BackendKind {
        BackendKind::Remote
    }
}
