//! # RecLedger Store
//!
//! The key/value store abstraction a host hands to the record service.
//!
//! Stores are **ordered byte maps**: keys are strings, values are opaque
//! bytes. A store never interprets the values it holds.
//!
//! ## Design Principles
//!
//! - Stores offer point reads, overwriting puts and ordered range scans
//! - Range scans hand out a scoped iterator that is released on drop
//! - Must be `Send + Sync` so a host can share one across threads
//! - Callers own all value format interpretation
//!
//! ## Available Stores
//!
//! - [`InMemoryStore`] - For testing and ephemeral hosts
//! - [`FileStore`] - Durable append-only log replayed into an ordered index
//!
//! ## Example
//!
//! ```rust
//! use recledger_store::{InMemoryStore, StateStore};
//!
//! let mut store = InMemoryStore::new();
//! store.put("1", b"hello").unwrap();
//! assert_eq!(store.get("1").unwrap(), Some(b"hello".to_vec()));
//!
//! let keys: Vec<String> = store
//!     .scan("0", "9")
//!     .unwrap()
//!     .map(|kv| kv.unwrap().key)
//!     .collect();
//! assert_eq!(keys, vec!["1".to_string()]);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod file;
mod iterator;
mod memory;
mod store;

pub use error::{StoreError, StoreResult};
pub use file::{FileStore, FileStoreConfig};
pub use iterator::{KeyValue, StateIterator};
pub use memory::InMemoryStore;
pub use store::StateStore;
