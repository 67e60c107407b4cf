//! # Command Layer
//!
//! One submodule per user operation. Each command is a plain function over a
//! [`RecordStore`](crate::store::RecordStore) (and, for the read-side commands,
//! the [query engine](crate::query)) that returns a [`CmdResult`].
//!
//! Commands do not print, prompt, or pick exit codes. They return data and
//! leave presentation to whichever UI called them (the one-shot CLI and the
//! interactive menu share every command).
//!
//! ## Structured Returns
//!
//! [`CmdResult`] carries:
//! - `affected_records`: records created or modified by the call
//! - `listed_records`: records to display (list, search, sort)
//! - `stats`: aggregate statistics (stats)
//! - `paths`: files written (export)
//! - `messages`: leveled messages (info, success, warning, error)
//!
//! "Not found" outcomes are error-level messages, not `Err`: the operation ran
//! and had nothing to act on.
//!
//! ## Testing Strategy
//!
//! Command tests run against `InMemoryStore` and cover every branch a UI can
//! observe. Storage semantics are tested in the store modules.

use crate::model::Record;
use crate::query::Stats;
use serde::Serialize;
use std::path::PathBuf;

pub mod add;
pub mod delete;
pub mod export;
pub mod list;
pub mod search;
pub mod sort;
pub mod stats;
pub mod update;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_records: Vec<Record>,
    pub listed_records: Vec<Record>,
    pub stats: Option<Stats>,
    pub paths: Vec<PathBuf>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_message(mut self, message: CmdMessage) -> Self {
        self.messages.push(message);
        self
    }

    pub fn with_affected_records(mut self, records: Vec<Record>) -> Self {
        self.affected_records = records;
        self
    }

    pub fn with_listed_records(mut self, records: Vec<Record>) -> Self {
        self.listed_records = records;
        self
    }

    pub fn with_stats(mut self, stats: Stats) -> Self {
        self.stats = Some(stats);
        self
    }

    pub fn with_paths(mut self, paths: Vec<PathBuf>) -> Self {
        self.paths = paths;
        self
    }

    /// Whether the command changed anything a backup should capture.
    pub fn is_mutation(&self) -> bool {
        !self.affected_records.is_empty()
    }
}
