use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, VaultError};
use crate::query;
use crate::store::RecordStore;

pub fn run<S: RecordStore>(store: &S) -> Result<CmdResult> {
    let records = store.list()?;
    match query::statistics(&records) {
        Ok(stats) => Ok(CmdResult::default().with_stats(stats)),
        Err(VaultError::EmptyCollection) => {
            Ok(CmdResult::default().with_message(CmdMessage::info("No records found.")))
        }
        Err(e) => Err(e),
    }
}
