use crate::error::{Result, StorageError};
use crate::model::{Record, RecordId};

/// Hands out sequential integer ids for the local store.
///
/// Seeded past both the highest id on disk and the persisted high-water mark,
/// so ids of deleted records are never handed out again. `u64::MAX` is never
/// issued: reaching it means the id space is used up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdAllocator {
    next: u64,
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl IdAllocator {
    pub fn seeded(records: &[Record], high_water: Option<u64>) -> Self {
        let after_max = records
            .iter()
            .filter_map(|r| match r.id {
                RecordId::Local(n) => Some(n.saturating_add(1)),
                RecordId::Remote(_) => None,
            })
            .max()
            .unwrap_or(1);
        let next = after_max.max(high_water.unwrap_or(1)).max(1);
        tracing::debug!(next, "seeded id allocator");
        Self { next }
    }

    pub fn next(&mut self) -> Result<RecordId> {
        if self.next == u64::MAX {
            return Err(StorageError::IdsExhausted.into());
        }
        let id = self.next;
        self.next += 1;
        Ok(RecordId::Local(id))
    }

    /// The id the next call to [`IdAllocator::next`] will return.
    pub fn peek(&self) -> u64 {
        self.next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::VaultError;

    fn record(id: u64) -> Record {
        Record::new(RecordId::Local(id), format!("r{}", id), String::new())
    }

    #[test]
    fn starts_at_one_when_empty() {
        let mut ids = IdAllocator::seeded(&[], None);
        assert_eq!(ids.next().unwrap(), RecordId::Local(1));
        assert_eq!(ids.next().unwrap(), RecordId::Local(2));
    }

    #[test]
    fn seeds_past_highest_existing_id() {
        let records = vec![record(4), record(9), record(2)];
        let mut ids = IdAllocator::seeded(&records, None);
        assert_eq!(ids.next().unwrap(), RecordId::Local(10));
    }

    #[test]
    fn persisted_high_water_wins_over_records() {
        // Record 9 was deleted, only 4 remains.
        let records = vec![record(4)];
        let mut ids = IdAllocator::seeded(&records, Some(10));
        assert_eq!(ids.next().unwrap(), RecordId::Local(10));
    }

    #[test]
    fn stale_high_water_is_ignored() {
        let records = vec![record(12)];
        let ids = IdAllocator::seeded(&records, Some(3));
        assert_eq!(ids.peek(), 13);
    }

    #[test]
    fn top_of_id_space_is_refused_not_wrapped() {
        let mut ids = IdAllocator::seeded(&[record(u64::MAX)], None);
        assert_eq!(ids.peek(), u64::MAX);
        assert!(matches!(
            ids.next(),
            Err(VaultError::Storage(StorageError::IdsExhausted))
        ));

        let mut ids = IdAllocator::seeded(&[record(u64::MAX - 2)], None);
        assert_eq!(ids.next().unwrap(), RecordId::Local(u64::MAX - 1));
        assert!(ids.next().is_err());
        assert_eq!(ids.peek(), u64::MAX);
    }
}
