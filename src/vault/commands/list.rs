use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::RecordStore;

pub fn run<S: RecordStore>(store: &S) -> Result<CmdResult> {
    let records = store.list()?;
    if records.is_empty() {
        return Ok(CmdResult::default().with_message(CmdMessage::info("No records found.")));
    }
    Ok(CmdResult::default().with_listed_records(records))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::store::memory::fixtures::StoreFixture;
    use crate::store::memory::InMemoryStore;

    #[test]
    fn empty_store_reports_nothing_found() {
        let store = InMemoryStore::new();
        let result = run(&store).unwrap();
        assert!(result.listed_records.is_empty());
        assert_eq!(result.messages[0].level, MessageLevel::Info);
        assert_eq!(result.messages[0].content, "No records found.");
    }

    #[test]
    fn lists_in_insertion_order() {
        let store = StoreFixture::new().with_records(3).build();
        let result = run(&store).unwrap();
        let names: Vec<_> = result.listed_records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Record 1", "Record 2", "Record 3"]);
        assert!(result.messages.is_empty());
    }
}
