use crate::error::Result;
use crate::model::Record;
use chrono::{DateTime, SecondsFormat, Utc};
use std::fs;
use std::path::PathBuf;

/// Writes full-snapshot backups into one directory.
#[derive(Debug, Clone)]
pub struct BackupWriter {
    dir: PathBuf,
}

impl BackupWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn write(&self, records: &[Record]) -> Result<PathBuf> {
        self.write_at(records, Utc::now())
    }

    /// Write `records` as pretty JSON to `backup_<timestamp>.json`, creating the
    /// directory on first use.
    pub fn write_at(&self, records: &[Record], at: DateTime<Utc>) -> Result<PathBuf> {
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir)?;
        }

        let path = self.free_path(&backup_stem(at));
        let content = serde_json::to_string_pretty(records)?;
        fs::write(&path, content)?;

        tracing::info!(path = %path.display(), records = records.len(), "backup written");
        Ok(path)
    }

    fn free_path(&self, stem: &str) -> PathBuf {
        let first = self.dir.join(format!("{}.json", stem));
        if !first.exists() {
            return first;
        }
        let mut n = 1;
        loop {
            let candidate = self.dir.join(format!("{}-{}.json", stem, n));
            if !candidate.exists() {
                return candidate;
            }
            n += 1;
        }
    }
}

/// `backup_2024-05-01T12-00-00.000Z`: sortable, and safe on every filesystem.
pub fn backup_stem(at: DateTime<Utc>) -> String {
    let stamp = at
        .to_rfc3339_opts(SecondsFormat::Millis, true)
        .replace(':', "-");
    format!("backup_{}", stamp)
}
