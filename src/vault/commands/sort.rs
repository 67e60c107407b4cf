use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::query::{self, SortField, SortOrder};
use crate::store::RecordStore;

pub fn run<S: RecordStore>(store: &S, field: SortField, order: SortOrder) -> Result<CmdResult> {
    let records = store.list()?;
    if records.is_empty() {
        return Ok(CmdResult::default().with_message(CmdMessage::info("No records found.")));
    }

    let sorted = query::sort_by(&records, field, order);
    Ok(CmdResult::default()
        .with_message(CmdMessage::info("Sorted Records:"))
        .with_listed_records(sorted))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StoreFixture;
    use crate::store::memory::InMemoryStore;

    #[test]
    fn sorts_snapshot_without_touching_the_store() {
        let store = StoreFixture::new()
            .with_record("Bob", "", "2024-01-01")
            .with_record("alice", "", "2024-01-02")
            .build();

        let result = run(&store, SortField::Name, SortOrder::Ascending).unwrap();
        let names: Vec<_> = result.listed_records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["alice", "Bob"]);

        let stored: Vec<_> = store.list().unwrap().into_iter().map(|r| r.name).collect();
        assert_eq!(stored, vec!["Bob", "alice"]);
    }

    #[test]
    fn empty_store() {
        let store = InMemoryStore::new();
        let result = run(&store, SortField::Created, SortOrder::Descending).unwrap();
        assert!(result.listed_records.is_empty());
        assert_eq!(result.messages[0].content, "No records found.");
    }
}
