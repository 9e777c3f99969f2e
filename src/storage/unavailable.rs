use std::io;
use std::path::PathBuf;

use super::{KeyValueStore, StorageError};

/// Stand-in for a data directory that could not be opened.
///
/// Reads find nothing and every write fails with the original cause, so the
/// app keeps running in memory and reports each lost save.
#[derive(Debug, Clone)]
pub struct UnavailableStore {
    dir: PathBuf,
    kind: io::ErrorKind,
    reason: String,
}

impl UnavailableStore {
    pub fn new(dir: impl Into<PathBuf>, cause: &io::Error) -> Self {
        Self {
            dir: dir.into(),
            kind: cause.kind(),
            reason: cause.to_string(),
        }
    }
}

impl KeyValueStore for UnavailableStore {
    fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Ok(None)
    }

    fn set(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Write {
            path: self.dir.clone(),
            source: io::Error::new(self.kind, self.reason.clone()),
        })
    }
}
