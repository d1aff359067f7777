//! Host store trait definition.

use crate::error::StoreResult;
use crate::iterator::StateIterator;

/// An ordered key/value store supplied by the host.
///
/// Stores are **opaque byte maps**. They provide point reads, overwriting
/// writes and ordered range scans. The record service owns all value format
/// interpretation - stores never look inside a value.
///
/// # Invariants
///
/// - `put` replaces any previous value stored under the same key
/// - `get` returns exactly the bytes last written under a key
/// - `scan` yields keys in ascending lexical (byte) order
/// - Stores must be `Send + Sync` so a host can share them across threads
///
/// # Implementors
///
/// - [`super::InMemoryStore`] - For testing
/// - [`super::FileStore`] - For durable storage
pub trait StateStore: Send + Sync {
    /// Returns the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>>;

    /// Writes `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The key is empty
    /// - The write cannot be made durable
    fn put(&mut self, key: &str, value: &[u8]) -> StoreResult<()>;

    /// Opens a scan over every key `k` with `start <= k < end`.
    ///
    /// An empty `end` leaves the range unbounded above. The returned handle
    /// is released when dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if the scan cannot be opened. Failures while
    /// advancing are reported through the iterator's items.
    fn scan(&self, start: &str, end: &str) -> StoreResult<StateIterator<'_>>;

    /// Returns the number of stored keys.
    ///
    /// # Errors
    ///
    /// Returns an error if the count cannot be determined.
    fn len(&self) -> StoreResult<usize>;

    /// Returns `true` if the store holds no keys.
    ///
    /// # Errors
    ///
    /// Returns an error if the count cannot be determined.
    fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.len()? == 0)
    }
}

#[cfg(test)]
mod tests {
    /// Returns `true` if `key` falls inside the half-open scan range.
    fn in_range(key: &str, start: &str, end: &str) -> bool {
        key >= start && (end.is_empty() || key < end)
    }

    #[test]
    fn range_is_half_open() {
        assert!(in_range("0", "0", "999"));
        assert!(in_range("500", "0", "999"));
        assert!(in_range("9989", "0", "999"));
        assert!(!in_range("999", "0", "999"));
        assert!(!in_range("A", "0", "999"));
    }

    #[test]
    fn empty_end_is_unbounded() {
        assert!(in_range("zzz", "0", ""));
        assert!(!in_range("", "0", ""));
    }
}
