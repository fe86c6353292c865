pub mod file;
pub mod memory;

use crate::errors::Result;
use crate::record::InvestmentRecord;
use crate::types::InvestmentId;

pub use file::FileStore;
pub use memory::MemoryStore;

/// persistence surface for the investment history.
///
/// The store owns ordering (newest-first) and the retention cap. A failed
/// mutation commits nothing.
pub trait InvestmentStore: Send {
    /// add a new record as the newest entry; evicts the oldest past the cap
    fn create(&mut self, record: InvestmentRecord) -> Result<()>;

    fn get(&self, id: InvestmentId) -> Result<Option<InvestmentRecord>>;

    /// replace the record with the same id
    fn update(&mut self, record: InvestmentRecord) -> Result<()>;

    fn delete(&mut self, id: InvestmentId) -> Result<()>;

    /// delete every record, returning how many were removed
    fn clear(&mut self) -> Result<usize>;

    /// all records, newest-first
    fn list(&self) -> Result<Vec<InvestmentRecord>>;
}
