use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::Record;
use crate::store::RecordStore;
use chrono::{DateTime, SecondsFormat, Utc};
use std::fs;
use std::path::Path;

pub fn run<S: RecordStore>(store: &S, path: &Path) -> Result<CmdResult> {
    let records = store.list()?;
    if records.is_empty() {
        return Ok(CmdResult::default().with_message(CmdMessage::info("No records to export.")));
    }

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let report = render_export(&records, Utc::now(), &file_name);

    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() && !dir.exists() {
            fs::create_dir_all(dir)?;
        }
    }
    fs::write(path, report)?;
    tracing::info!(path = %path.display(), records = records.len(), "exported records");

    Ok(CmdResult::default()
        .with_paths(vec![path.to_path_buf()])
        .with_message(CmdMessage::success(format!(
            "Data exported successfully to {}",
            path.display()
        ))))
}

/// The export report: a fixed header followed by one line per record.
pub fn render_export(records: &[Record], now: DateTime<Utc>, file_name: &str) -> String {
    let mut out = format!(
        "===== Vault Export =====\n\
         Date/Time: {}\n\
         Total Records: {}\n\
         File: {}\n\
         =========================\n\n",
        now.to_rfc3339_opts(SecondsFormat::Millis, true),
        records.len(),
        file_name
    );
    for r in records {
        out.push_str(&format!(
            "ID: {} | Name: {} | Value: {} | Created: {}\n",
            r.id, r.name, r.value, r.created
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::store::memory::fixtures::StoreFixture;
    use crate::store::memory::InMemoryStore;
    use chrono::TimeZone;
    use tempfile::TempDir;

    #[test]
    fn renders_header_and_lines() {
        let records = StoreFixture::new()
            .with_record("Alice", "x", "2024-01-01T00:00:00.000Z")
            .with_record("Bob", "y", "not a date")
            .records();
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 8, 30, 0).unwrap();

        let report = render_export(&records, now, "export.txt");
        let expected = "===== Vault Export =====\n\
                        Date/Time: 2024-06-01T08:30:00.000Z\n\
                        Total Records: 2\n\
                        File: export.txt\n\
                        =========================\n\
                        \n\
                        ID: 1 | Name: Alice | Value: x | Created: 2024-01-01T00:00:00.000Z\n\
                        ID: 2 | Name: Bob | Value: y | Created: not a date\n";
        assert_eq!(report, expected);
    }

    #[test]
    fn writes_the_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("out").join("vault.txt");
        let store = StoreFixture::new().with_records(3).build();

        let result = run(&store, &path).unwrap();
        assert_eq!(result.paths, vec![path.clone()]);
        assert_eq!(result.messages[0].level, MessageLevel::Success);

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("Total Records: 3"));
        assert!(content.contains("File: vault.txt"));
        assert_eq!(content.lines().filter(|l| l.starts_with("ID: ")).count(), 3);
    }

    #[test]
    fn empty_store_writes_nothing() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("export.txt");
        let store = InMemoryStore::new();

        let result = run(&store, &path).unwrap();
        assert!(result.paths.is_empty());
        assert_eq!(result.messages[0].content, "No records to export.");
        assert!(!path.exists());
    }
}
