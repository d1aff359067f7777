//! Test fixtures and store helpers.
//!
//! Provides convenience functions for setting up test stores
//! and common test scenarios.

use recledger_core::{Contract, Invocation, Record, RecordService};
use recledger_store::{FileStore, InMemoryStore, StateStore};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A file-backed test store with automatic cleanup.
pub struct TestFileStore {
    /// The store instance.
    pub store: FileStore,
    /// The temporary directory (kept alive to prevent cleanup).
    temp_dir: TempDir,
}

impl TestFileStore {
    /// Creates a new file store inside a fresh temp directory.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let store = FileStore::open(&temp_dir.path().join("state.log"))
            .expect("Failed to open file store");
        Self { store, temp_dir }
    }

    /// Returns the path of the store's log file.
    pub fn path(&self) -> PathBuf {
        self.temp_dir.path().join("state.log")
    }

    /// Drops the open store and opens the same log again.
    pub fn reopen(&mut self) {
        self.store = FileStore::open(&self.path()).expect("Failed to reopen file store");
    }
}

impl Default for TestFileStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::ops::Deref for TestFileStore {
    type Target = FileStore;

    fn deref(&self) -> &Self::Target {
        &self.store
    }
}

impl std::ops::DerefMut for TestFileStore {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.store
    }
}

/// Runs a test with a temporary file-backed store.
pub fn with_file_store<F, R>(f: F) -> R
where
    F: FnOnce(&mut FileStore) -> R,
{
    let mut test_store = TestFileStore::new();
    f(&mut test_store.store)
}

/// Runs a test with a temporary file-backed store and its log path.
pub fn with_file_store_path<F, R>(f: F) -> R
where
    F: FnOnce(&mut FileStore, &Path) -> R,
{
    let mut test_store = TestFileStore::new();
    let path = test_store.path();
    f(&mut test_store.store, &path)
}

/// Builds the six `record` arguments for `key` and `record`.
pub fn record_args(key: &str, record: &Record) -> Vec<String> {
    vec![
        key.to_string(),
        record.name.clone(),
        record.date.clone(),
        record.enabled.clone(),
        record.status.clone(),
        record.reporter.clone(),
    ]
}

/// Builds a `record` invocation.
pub fn record_invocation(key: &str, record: &Record) -> Invocation {
    Invocation::new("record", record_args(key, record))
}

/// Builds a `queryAll` invocation.
pub fn query_all_invocation() -> Invocation {
    Invocation::new("queryAll", Vec::<String>::new())
}

/// A deterministic sample record derived from `seed`.
pub fn sample_record(seed: usize) -> Record {
    Record::new(
        format!("asset-{seed}"),
        format!("2024-01-{:02}", seed % 28 + 1),
        if seed % 2 == 0 { "true" } else { "false" },
        "open",
        format!("reporter-{}", seed % 3),
    )
}

/// Test scenario helpers.
pub mod scenarios {
    use super::*;

    /// Creates an in-memory store holding a sample record under each key,
    /// written through the service.
    pub fn populated_store(keys: &[&str]) -> InMemoryStore {
        let service = RecordService::default();
        let mut store = InMemoryStore::new();
        for (i, key) in keys.iter().enumerate() {
            let response = service.invoke(&mut store, &record_invocation(key, &sample_record(i)));
            assert!(response.is_ok(), "seeding {key} failed: {}", response.message);
        }
        store
    }

    /// Reads back and decodes the record stored under `key`.
    pub fn stored_record(store: &dyn StateStore, key: &str) -> Option<Record> {
        store
            .get(key)
            .expect("Failed to read store")
            .map(|bytes| Record::from_json(&bytes).expect("Stored value is not a record"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_store_reopen() {
        let mut test_store = TestFileStore::new();
        test_store.put("1", b"{}").unwrap();
        test_store.reopen();
        assert_eq!(test_store.get("1").unwrap(), Some(b"{}".to_vec()));
    }

    #[test]
    fn test_with_file_store() {
        with_file_store(|store| {
            store.put("1", b"{}").unwrap();
            assert_eq!(store.len().unwrap(), 1);
        });
    }

    #[test]
    fn test_populated_scenario() {
        let store = scenarios::populated_store(&["1", "2"]);
        assert_eq!(store.len().unwrap(), 2);
        assert_eq!(
            scenarios::stored_record(&store, "2"),
            Some(sample_record(1))
        );
    }

    #[test]
    fn test_record_args() {
        let args = record_args("9", &sample_record(0));
        assert_eq!(args.len(), 6);
        assert_eq!(args[0], "9");
    }
}
