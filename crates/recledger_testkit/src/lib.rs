//! # RecLedger Testkit
//!
//! Test utilities for RecLedger.
//!
//! This crate provides:
//! - Store fixtures (in-memory and temp-file backed)
//! - A failure-injecting store that also tracks open scans
//! - Property-based test generators using proptest
//!
//! ## Usage
//!
//! ```rust,ignore
//! use recledger_testkit::prelude::*;
//!
//! #[test]
//! fn test_with_store() {
//!     with_file_store(|store| {
//!         store.put("1", b"{}").unwrap();
//!     });
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod failing;
pub mod fixtures;
pub mod generators;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::failing::*;
    pub use crate::fixtures::*;
    pub use crate::generators::*;
}

pub use failing::*;
pub use fixtures::*;
pub use generators::*;
