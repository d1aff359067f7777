//! CLI command implementations.

pub mod get;
pub mod inspect;
pub mod invoke;

use recledger_store::{FileStore, FileStoreConfig, InMemoryStore, StateStore, StoreError};
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, info};

/// Errors reported by CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// The store could not be opened or read.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// The service returned an error response.
    #[error("{function} failed ({status}): {message}")]
    Invocation {
        /// The invoked operation.
        function: String,
        /// Numeric response status.
        status: u16,
        /// Response message.
        message: String,
    },

    /// No value is stored under the key.
    #[error("no value stored under key {0:?}")]
    KeyNotFound(String),

    /// Output could not be encoded.
    #[error("output error: {0}")]
    Output(#[from] serde_json::Error),
}

/// How to open the host store.
#[derive(Debug, Clone)]
pub struct StoreOptions {
    /// Log file path; `None` selects an ephemeral in-memory store.
    pub path: Option<PathBuf>,
    /// Whether to fsync after every write.
    pub sync_on_write: bool,
}

/// Opens the store described by `options`.
pub fn open_store(options: &StoreOptions) -> Result<Box<dyn StateStore>, CliError> {
    match &options.path {
        Some(path) => {
            info!("Opening store at {:?}", path);
            let config = FileStoreConfig::new().sync_on_write(options.sync_on_write);
            Ok(Box::new(FileStore::open_with_config(path, config)?))
        }
        None => {
            debug!("No store path given, using an in-memory store");
            Ok(Box::new(InMemoryStore::new()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn open_memory_store() {
        let options = StoreOptions {
            path: None,
            sync_on_write: true,
        };
        let store = open_store(&options).unwrap();
        assert!(store.is_empty().unwrap());
    }

    #[test]
    fn open_file_store_persists() {
        let dir = tempdir().unwrap();
        let options = StoreOptions {
            path: Some(dir.path().join("state.log")),
            sync_on_write: false,
        };

        let mut store = open_store(&options).unwrap();
        store.put("1", b"{}").unwrap();
        drop(store);

        let store = open_store(&options).unwrap();
        assert_eq!(store.get("1").unwrap(), Some(b"{}".to_vec()));
    }
}
