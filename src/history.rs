use std::collections::VecDeque;

use tracing::debug;

use crate::record::InvestmentRecord;
use crate::types::InvestmentId;

/// most recent entries kept by default
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

/// newest-first list of investment records, bounded to `capacity` entries
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryCollection {
    records: VecDeque<InvestmentRecord>,
    capacity: usize,
}

impl HistoryCollection {
    /// a `capacity` of zero is clamped to one
    pub fn new(capacity: usize) -> Self {
        Self {
            records: VecDeque::with_capacity(capacity.min(DEFAULT_HISTORY_LIMIT)),
            capacity: capacity.max(1),
        }
    }

    /// rebuild from records already ordered newest-first, dropping the oldest overflow
    pub fn from_records(capacity: usize, records: Vec<InvestmentRecord>) -> Self {
        let mut history = Self::new(capacity);
        history.records = records.into_iter().take(history.capacity).collect();
        history
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn contains(&self, id: InvestmentId) -> bool {
        self.records.iter().any(|r| r.id == id)
    }

    /// insert as newest; returns the evicted oldest record when over capacity
    pub fn push(&mut self, record: InvestmentRecord) -> Option<InvestmentRecord> {
        self.records.push_front(record);
        if self.records.len() > self.capacity {
            let evicted = self.records.pop_back();
            if let Some(old) = &evicted {
                debug!(id = %old.id, name = %old.name, "evicted oldest investment from history");
            }
            evicted
        } else {
            None
        }
    }

    pub fn get(&self, id: InvestmentId) -> Option<&InvestmentRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// swap in an updated record with the same id, keeping its position
    pub fn replace(&mut self, record: InvestmentRecord) -> Option<InvestmentRecord> {
        let slot = self.records.iter_mut().find(|r| r.id == record.id)?;
        Some(std::mem::replace(slot, record))
    }

    pub fn remove(&mut self, id: InvestmentId) -> Option<InvestmentRecord> {
        let index = self.records.iter().position(|r| r.id == id)?;
        self.records.remove(index)
    }

    /// drop everything, returning how many records were removed
    pub fn clear(&mut self) -> usize {
        let count = self.records.len();
        self.records.clear();
        count
    }

    pub fn iter(&self) -> impl Iterator<Item = &InvestmentRecord> {
        self.records.iter()
    }

    pub fn to_vec(&self) -> Vec<InvestmentRecord> {
        self.records.iter().cloned().collect()
    }
}

impl Default for HistoryCollection {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LIMIT)
    }
}
