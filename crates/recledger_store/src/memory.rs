//! In-memory store for testing.

use crate::error::{StoreError, StoreResult};
use crate::iterator::{KeyValue, StateIterator};
use crate::store::StateStore;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::ops::Bound;

/// An in-memory ordered store.
///
/// This store keeps every key in a `BTreeMap` and is suitable for:
/// - Unit tests
/// - Integration tests
/// - Ephemeral hosts that don't need persistence
///
/// # Thread Safety
///
/// This store is thread-safe and can be shared across threads. Scans copy
/// the requested range out under a read lock, so an open iterator never
/// blocks writers.
///
/// # Example
///
/// ```rust
/// use recledger_store::{InMemoryStore, StateStore};
///
/// let mut store = InMemoryStore::new();
/// store.put("key", b"value").unwrap();
/// assert_eq!(store.len().unwrap(), 1);
/// ```
#[derive(Debug, Default)]
pub struct InMemoryStore {
    data: RwLock<BTreeMap<String, Vec<u8>>>,
}

impl InMemoryStore {
    /// Creates a new empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new in-memory store with pre-existing entries.
    #[must_use]
    pub fn with_entries<K, V, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Vec<u8>>,
    {
        let data = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            data: RwLock::new(data),
        }
    }

    /// Returns a copy of every entry in key order.
    ///
    /// Useful for testing and debugging.
    #[must_use]
    pub fn entries(&self) -> Vec<KeyValue> {
        self.data
            .read()
            .iter()
            .map(|(k, v)| KeyValue::new(k.clone(), v.clone()))
            .collect()
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.data.write().clear();
    }
}

/// Snapshot the `[start, end)` slice of an ordered map.
pub(crate) fn snapshot_range(
    map: &BTreeMap<String, Vec<u8>>,
    start: &str,
    end: &str,
) -> Vec<KeyValue> {
    let upper = if end.is_empty() {
        Bound::Unbounded
    } else if start >= end {
        return Vec::new();
    } else {
        Bound::Excluded(end)
    };

    map.range::<str, _>((Bound::Included(start), upper))
        .map(|(k, v)| KeyValue::new(k.clone(), v.clone()))
        .collect()
}

impl StateStore for InMemoryStore {
    fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        Ok(self.data.read().get(key).cloned())
    }

    fn put(&mut self, key: &str, value: &[u8]) -> StoreResult<()> {
        if key.is_empty() {
            return Err(StoreError::InvalidKey("key must not be empty".into()));
        }
        self.data.write().insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn scan(&self, start: &str, end: &str) -> StoreResult<StateIterator<'_>> {
        let entries = snapshot_range(&self.data.read(), start, end);
        Ok(StateIterator::from_entries(entries))
    }

    fn len(&self) -> StoreResult<usize> {
        Ok(self.data.read().len())
    }
}
