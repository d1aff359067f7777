//! Error types for store operations.

use std::io;
use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The store's on-disk log is corrupted.
    #[error("store corrupted at offset {offset}: {message}")]
    Corrupted {
        /// Byte offset of the bad frame.
        offset: u64,
        /// Description of the corruption.
        message: String,
    },

    /// The key cannot be stored.
    #[error("invalid key: {0}")]
    InvalidKey(String),

    /// The store no longer accepts writes.
    #[error("store is closed")]
    Closed,

    /// Any other failure reported by a host-provided store.
    #[error("{0}")]
    Other(String),
}

impl StoreError {
    /// Creates a corruption error.
    pub fn corrupted(offset: u64, message: impl Into<String>) -> Self {
        Self::Corrupted {
            offset,
            message: message.into(),
        }
    }

    /// Creates a generic host store error.
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other(message.into())
    }
}
