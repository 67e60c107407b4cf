//! # Storage Layer
//!
//! This module defines the storage abstraction for vault. The [`RecordStore`]
//! trait is the one contract every UI talks to; which backend sits behind it is
//! decided once at startup.
//!
//! ## Two Backends
//!
//! - **Local** ([`local_store::LocalStore`]): the whole record set lives in memory and is
//!   rewritten to a single JSON file on every mutation. The raw I/O is delegated to a
//!   [`backend::StorageBackend`]:
//!   - [`fs_backend::FsBackend`]: the real data file, replaced atomically.
//!   - [`mem_backend::MemBackend`]: no persistence, with simulated write failures for tests.
//! - **Remote** ([`remote_store::RemoteStore`]): every call is forwarded to a document
//!   collection ([`collection::DocumentCollection`]). Nothing is cached; `list` always
//!   re-fetches.
//!   - [`data_api::DataApiCollection`]: HTTP data API client.
//!   - [`mem_collection::MemCollection`]: in-memory collection for tests.
//!
//! ## Consistency
//!
//! - Local identifiers come from an [`allocator::IdAllocator`] and are never reissued,
//!   not even after the record holding them is deleted.
//! - A failed write leaves the store exactly as it was before the call: the local store
//!   mutates a copy and only swaps it in once the backend accepted it.
//! - `update` and `delete` report a missing id as `false`, not as an error.
//!
//! ## Storage Layout
//!
//! ```text
//! $VAULT_HOME/
//! ├── config.json         # Configuration
//! ├── vault.json          # {"next_id": N, "records": [...]}
//! └── backups/            # backup_<timestamp>.json snapshots
//! ```

use crate::error::Result;
use crate::model::{Record, RecordId};
use serde::{Deserialize, Serialize};
use std::fmt;

pub mod allocator;
pub mod backend;
pub mod collection;
pub mod data_api;
pub mod fs;
pub mod fs_backend;
pub mod local_store;
pub mod mem_backend;
pub mod mem_collection;
pub mod memory;
pub mod remote_store;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    #[default]
    File,
    Remote,
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendKind::File => write!(f, "file"),
            BackendKind::Remote => write!(f, "remote"),
        }
    }
}

/// Abstract interface for record storage.
///
/// Implementations own the authoritative record set. Everything they hand out
/// is an owned copy.
pub trait RecordStore {
    /// Create a record with a fresh id and `created == updated == now`.
    fn add(&mut self, name: &str, value: &str) -> Result<Record>;

    /// Snapshot of every record.
    fn list(&self) -> Result<Vec<Record>>;

    /// Replace name and value. `Ok(false)` when no record has this id.
    fn update(&mut self, id: &RecordId, name: &str, value: &str) -> Result<bool>;

    /// Remove a record. `Ok(false)` when no record has this id.
    fn delete(&mut self, id: &RecordId) -> Result<bool>;

    fn find(&self, id: &RecordId) -> Result<Option<Record>>;

    /// Convert the textual id a user typed into this backend's id.
    fn parse_id(&self, raw: &str) -> Result<RecordId>;

    fn kind(&self) -> BackendKind;
}
