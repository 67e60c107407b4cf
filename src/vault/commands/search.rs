use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::query;
use crate::store::RecordStore;

pub fn run<S: RecordStore>(store: &S, keyword: &str) -> Result<CmdResult> {
    let records = store.list()?;
    let matches = query::search(&records, keyword.trim());

    if matches.is_empty() {
        return Ok(CmdResult::default().with_message(CmdMessage::info("No records found.")));
    }

    let message = CmdMessage::info(format!("Found {} matching records:", matches.len()));
    Ok(CmdResult::default()
        .with_message(message)
        .with_listed_records(matches))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StoreFixture;

    #[test]
    fn finds_by_name_and_id() {
        let store = StoreFixture::new()
            .with_record("Alice", "x", "2024-01-01")
            .with_record("Bob", "y", "2024-01-02")
            .build();

        let by_name = run(&store, "ALI").unwrap();
        assert_eq!(by_name.listed_records.len(), 1);
        assert_eq!(by_name.messages[0].content, "Found 1 matching records:");

        let by_id = run(&store, "2").unwrap();
        assert_eq!(by_id.listed_records[0].name, "Bob");
    }

    #[test]
    fn no_match_reports_nothing_found() {
        let store = StoreFixture::new().with_records(3).build();
        let result = run(&store, "zzz").unwrap();
        assert!(result.listed_records.is_empty());
        assert_eq!(result.messages[0].content, "No records found.");
    }
}
