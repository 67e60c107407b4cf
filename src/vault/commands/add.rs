use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::RecordStore;

pub fn run<S: RecordStore>(store: &mut S, name: &str, value: &str) -> Result<CmdResult> {
    let record = store.add(name, value)?;
    let message = CmdMessage::success(format!("Record added successfully! (ID: {})", record.id));
    Ok(CmdResult::default()
        .with_affected_records(vec![record])
        .with_message(message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::error::VaultError;
    use crate::model::RecordId;
    use crate::store::memory::InMemoryStore;

    #[test]
    fn adds_and_reports_the_new_record() {
        let mut store = InMemoryStore::new();
        let result = run(&mut store, "Alice", "x").unwrap();

        assert_eq!(result.affected_records.len(), 1);
        assert_eq!(result.affected_records[0].id, RecordId::Local(1));
        assert_eq!(result.messages[0].level, MessageLevel::Success);
        assert!(result.messages[0].content.contains("ID: 1"));
        assert_eq!(store.list().unwrap().len(), 1);
    }

    #[test]
    fn blank_name_is_rejected() {
        let mut store = InMemoryStore::new();
        let err = run(&mut store, "  ", "x").unwrap_err();
        assert!(matches!(err, VaultError::Validation(_)));
        assert!(store.list().unwrap().is_empty());
    }
}
