use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::errors::{Result, TrackerError};
use crate::history::HistoryCollection;
use crate::record::InvestmentRecord;
use crate::store::memory::{apply_create, apply_delete, apply_update};
use crate::store::InvestmentStore;
use crate::types::InvestmentId;

/// history kept as a json array on local disk, newest-first.
///
/// Every mutation is applied to a copy, written to a sibling temp file and
/// renamed over the target; the in-memory history only changes once the
/// write succeeded.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    history: HistoryCollection,
}

impl FileStore {
    /// load the history at `path`; a missing file starts empty
    pub fn open(path: impl AsRef<Path>, capacity: usize) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let records: Vec<InvestmentRecord> = match fs::read(&path) {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Vec::new(),
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(err) if err.kind() == ErrorKind::NotFound => Vec::new(),
            Err(err) => return Err(err.into()),
        };

        let history = HistoryCollection::from_records(capacity, records);
        info!(path = %path.display(), records = history.len(), "opened investment file store");

        Ok(Self { path, history })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn commit(&mut self, next: HistoryCollection) -> Result<()> {
        if let Err(err) = write_atomic(&self.path, &next.to_vec()) {
            warn!(path = %self.path.display(), error = %err, "failed to persist investment history");
            return Err(err);
        }
        self.history = next;
        Ok(())
    }
}

fn write_atomic(path: &Path, records: &[InvestmentRecord]) -> Result<()> {
    let json = serde_json::to_vec_pretty(records)?;

    let file_name = path
        .file_name()
        .ok_or_else(|| TrackerError::Persistence {
            message: format!("not a file path: {}", path.display()),
        })?
        .to_string_lossy();
    let tmp = path.with_file_name(format!(".{}.tmp", file_name));

    let written = fs::File::create(&tmp).and_then(|mut file| {
        file.write_all(&json)?;
        file.sync_all()?;
        fs::rename(&tmp, path)
    });
    if let Err(err) = written {
        // the temp file may or may not exist at this point
        let _ = fs::remove_file(&tmp);
        return Err(err.into());
    }
    Ok(())
}

impl InvestmentStore for FileStore {
    fn create(&mut self, record: InvestmentRecord) -> Result<()> {
        let mut next = self.history.clone();
        apply_create(&mut next, record)?;
        self.commit(next)
    }

    fn get(&self, id: InvestmentId) -> Result<Option<InvestmentRecord>> {
        Ok(self.history.get(id).cloned())
    }

    fn update(&mut self, record: InvestmentRecord) -> Result<()> {
        let mut next = self.history.clone();
        apply_update(&mut next, record)?;
        self.commit(next)
    }

    fn delete(&mut self, id: InvestmentId) -> Result<()> {
        let mut next = self.history.clone();
        apply_delete(&mut next, id)?;
        self.commit(next)
    }

    fn clear(&mut self) -> Result<usize> {
        let mut next = self.history.clone();
        let count = next.clear();
        self.commit(next)?;
        Ok(count)
    }

    fn list(&self) -> Result<Vec<InvestmentRecord>> {
        Ok(self.history.to_vec())
    }
}
