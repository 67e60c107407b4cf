use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::RecordId;
use crate::store::RecordStore;

pub fn run<S: RecordStore>(
    store: &mut S,
    id: &RecordId,
    name: &str,
    value: &str,
) -> Result<CmdResult> {
    if !store.update(id, name, value)? {
        return Ok(CmdResult::default().with_message(CmdMessage::error("Record not found.")));
    }

    let affected = store.find(id)?.into_iter().collect();
    Ok(CmdResult::default()
        .with_affected_records(affected)
        .with_message(CmdMessage::success("Record updated!")))
}
