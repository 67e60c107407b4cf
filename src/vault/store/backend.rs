use crate::error::Result;
use crate::model::Record;
use serde::{Deserialize, Serialize};

/// The unit of durability for the local store: every record plus the
/// allocator's high-water mark.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VaultFile {
    #[serde(default)]
    pub next_id: Option<u64>,
    pub records: Vec<Record>,
}

/// Accepts both the current envelope and a bare array of records.
#[derive(Deserialize)]
#[serde(untagged)]
enum OnDisk {
    Envelope(VaultFile),
    Legacy(Vec<Record>),
}

impl VaultFile {
    pub fn from_json(content: &str) -> Result<Self> {
        let parsed: OnDisk = serde_json::from_str(content)?;
        Ok(match parsed {
            OnDisk::Envelope(file) => file,
            OnDisk::Legacy(records) => VaultFile {
                next_id: None,
                records,
            },
        })
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Abstract interface for raw storage I/O.
/// This trait handles the "how" of storage (filesystem vs memory),
/// while LocalStore handles the "what" (ids, timestamps, rollback).
pub trait StorageBackend {
    /// Load the full record set. `Ok(None)` when nothing was ever saved.
    fn load(&self) -> Result<Option<VaultFile>>;

    /// Replace the full record set.
    /// MUST be atomic (write to a temporary file, then rename) so readers never
    /// observe a partially written set.
    fn save(&self, file: &VaultFile) -> Result<()>;
}
