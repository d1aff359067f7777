//! Error types for the record service.

use recledger_store::StoreError;
use thiserror::Error;

/// Result type for service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Errors that can occur while handling an invocation.
///
/// None of these escape to the host as a panic; [`crate::Contract`]
/// implementations turn them into error responses.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Wrong number of positional arguments.
    #[error("incorrect number of arguments: expected {expected}, got {actual}")]
    InvalidArgument {
        /// Number of arguments the operation takes.
        expected: usize,
        /// Number of arguments supplied.
        actual: usize,
    },

    /// The store rejected a put.
    #[error("failed to record {key}: {source}")]
    StorageWrite {
        /// The key that could not be written.
        key: String,
        /// The underlying store failure.
        #[source]
        source: StoreError,
    },

    /// Opening or advancing a range scan failed, or a scanned value could
    /// not be returned as JSON.
    #[error("failed to read state: {message}")]
    StorageRead {
        /// Description of the failure.
        message: String,
    },

    /// The invocation named no known operation.
    #[error("unknown operation: {name:?}")]
    UnknownOperation {
        /// The name that was supplied.
        name: String,
    },

    /// A record could not be serialized.
    #[error("encoding error: {0}")]
    Encode(#[from] serde_json::Error),
}

impl ServiceError {
    /// Creates an invalid argument error.
    pub fn invalid_argument(expected: usize, actual: usize) -> Self {
        Self::InvalidArgument { expected, actual }
    }

    /// Creates a storage write error.
    pub fn storage_write(key: impl Into<String>, source: StoreError) -> Self {
        Self::StorageWrite {
            key: key.into(),
            source,
        }
    }

    /// Creates a storage read error.
    pub fn storage_read(message: impl Into<String>) -> Self {
        Self::StorageRead {
            message: message.into(),
        }
    }

    /// Creates an unknown operation error.
    pub fn unknown_operation(name: impl Into<String>) -> Self {
        Self::UnknownOperation { name: name.into() }
    }
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        Self::storage_read(err.to_string())
    }
}
