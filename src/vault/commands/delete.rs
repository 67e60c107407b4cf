use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::RecordId;
use crate::store::RecordStore;

pub fn run<S: RecordStore>(store: &mut S, id: &RecordId) -> Result<CmdResult> {
    let Some(existing) = store.find(id)? else {
        return Ok(CmdResult::default().with_message(CmdMessage::error("Record not found.")));
    };

    if !store.delete(id)? {
        // Gone between the lookup and the delete (remote backend).
        return Ok(CmdResult::default().with_message(CmdMessage::error("Record not found.")));
    }

    Ok(CmdResult::default()
        .with_affected_records(vec![existing])
        .with_message(CmdMessage::success("Record deleted!")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::store::memory::fixtures::StoreFixture;

    #[test]
    fn deletes_and_reports_the_removed_record() {
        let mut store = StoreFixture::new().with_records(2).build();
        let result = run(&mut store, &RecordId::Local(1)).unwrap();

        assert_eq!(result.affected_records[0].name, "Record 1");
        assert_eq!(result.messages[0].level, MessageLevel::Success);
        assert_eq!(store.list().unwrap().len(), 1);
    }

    #[test]
    fn missing_record_is_a_noop() {
        let mut store = StoreFixture::new().with_records(2).build();
        let saves = store.backend().save_count();

        let result = run(&mut store, &RecordId::Local(42)).unwrap();
        assert!(result.affected_records.is_empty());
        assert_eq!(result.messages[0].content, "Record not found.");
        assert_eq!(store.backend().save_count(), saves);
    }
}
