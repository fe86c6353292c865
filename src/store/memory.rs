use crate::errors::{Result, TrackerError};
use crate::history::HistoryCollection;
use crate::record::InvestmentRecord;
use crate::store::InvestmentStore;
use crate::types::InvestmentId;

/// process-local store backed directly by a history collection
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    history: HistoryCollection,
}

impl MemoryStore {
    pub fn new(capacity: usize) -> Self {
        Self {
            history: HistoryCollection::new(capacity),
        }
    }

    pub fn history(&self) -> &HistoryCollection {
        &self.history
    }
}

/// apply a create to a collection, shared with the file store
pub(crate) fn apply_create(history: &mut HistoryCollection, record: InvestmentRecord) -> Result<()> {
    if history.contains(record.id) {
        return Err(TrackerError::DuplicateInvestment { id: record.id });
    }
    history.push(record);
    Ok(())
}

pub(crate) fn apply_update(history: &mut HistoryCollection, record: InvestmentRecord) -> Result<()> {
    let id = record.id;
    history
        .replace(record)
        .map(|_| ())
        .ok_or(TrackerError::InvestmentNotFound { id })
}

pub(crate) fn apply_delete(history: &mut HistoryCollection, id: InvestmentId) -> Result<()> {
    history
        .remove(id)
        .map(|_| ())
        .ok_or(TrackerError::InvestmentNotFound { id })
}

impl InvestmentStore for MemoryStore {
    fn create(&mut self, record: InvestmentRecord) -> Result<()> {
        apply_create(&mut self.history, record)
    }

    fn get(&self, id: InvestmentId) -> Result<Option<InvestmentRecord>> {
        Ok(self.history.get(id).cloned())
    }

    fn update(&mut self, record: InvestmentRecord) -> Result<()> {
        apply_update(&mut self.history, record)
    }

    fn delete(&mut self, id: InvestmentId) -> Result<()> {
        apply_delete(&mut self.history, id)
    }

    fn clear(&mut self) -> Result<usize> {
        Ok(self.history.clear())
    }

    fn list(&self) -> Result<Vec<InvestmentRecord>> {
        Ok(self.history.to_vec())
    }
}
