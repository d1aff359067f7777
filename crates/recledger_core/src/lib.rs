//! # RecLedger Core
//!
//! The ledger record service.
//!
//! This crate provides:
//! - [`Record`], the five-field value stored under each key
//! - [`Command`] dispatch from host [`Invocation`]s
//! - [`RecordService`], implementing `record` and `queryAll` against a host
//!   [`StateStore`]
//! - The [`Contract`] lifecycle trait a host drives (`init`, `invoke`)
//!
//! The service keeps no state of its own. Every operation receives the store
//! handle explicitly and runs to completion before returning.
//!
//! ## Example
//!
//! ```rust
//! use recledger_core::{Contract, Invocation, RecordService};
//! use recledger_store::InMemoryStore;
//!
//! let service = RecordService::default();
//! let mut store = InMemoryStore::new();
//!
//! let response = service.invoke(
//!     &mut store,
//!     &Invocation::new("record", ["1", "pump", "2024-01-01", "true", "open", "alice"]),
//! );
//! assert!(response.is_ok());
//!
//! let response = service.invoke(&mut store, &Invocation::new("queryAll", Vec::<String>::new()));
//! assert_eq!(
//!     response.payload_str(),
//!     Some(r#"[{"Key":"1","Record":{"name":"pump","date":"2024-01-01","enabled":"true","status":"open","reporter":"alice"}}]"#)
//! );
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod command;
mod config;
mod error;
mod record;
mod response;
mod service;

pub use command::{Command, Invocation};
pub use config::{ServiceConfig, DEFAULT_RANGE_END, DEFAULT_RANGE_START};
pub use error::{ServiceError, ServiceResult};
pub use record::{QueryResult, Record};
pub use response::{Response, Status};
pub use service::{Contract, RecordService};

pub use recledger_store::StateStore;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
