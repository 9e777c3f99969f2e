//! Durable key/value storage used to persist application state.
//!
//! `KeyValueStore` is the persistence seam: the tracker store only ever reads
//! and writes whole values by key. `FileStore` keeps one JSON file per key on
//! disk; `MemoryStore` is an in-process stand-in used by tests.

mod file;
#[cfg(test)]
mod memory;
mod unavailable;

pub use file::FileStore;
#[cfg(test)]
pub use memory::MemoryStore;
pub use unavailable::UnavailableStore;

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by a `KeyValueStore` backend.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("invalid storage key {0:?}")]
    InvalidKey(String),

    #[error("failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode value for key {key:?}: {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// A string-valued key/value store.
pub trait KeyValueStore {
    /// Return the value stored under `key`, or `None` when absent.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value stored under `key`.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }
}

/// Keys become file names, so keep them to a conservative character set.
pub(crate) fn validate_key(key: &str) -> Result<(), StorageError> {
    let ok = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.')
        && !key.starts_with('.');
    if ok {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}
