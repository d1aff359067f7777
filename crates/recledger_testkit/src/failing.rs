//! Failure-injecting store.
//!
//! [`FailingStore`] wraps an [`InMemoryStore`] and can be told to reject
//! puts, refuse to open scans, or fail part-way through a scan. It also
//! counts scans that are still open, so tests can check that callers
//! release their iterators on every path.

use recledger_store::{InMemoryStore, KeyValue, StateIterator, StateStore, StoreError, StoreResult};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Which operations a [`FailingStore`] should fail.
#[derive(Debug, Clone, Default)]
pub struct Failures {
    /// Reject every put.
    pub put: bool,
    /// Refuse to open scans.
    pub scan_open: bool,
    /// Fail the scan when advancing to this zero-based position.
    pub scan_advance_at: Option<usize>,
}

/// An in-memory store with injectable failures.
#[derive(Debug, Default)]
pub struct FailingStore {
    inner: InMemoryStore,
    failures: Failures,
    put_attempts: usize,
    open_scans: Arc<AtomicUsize>,
}

impl FailingStore {
    /// Creates a store that fails nothing until configured.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an existing in-memory store.
    pub fn wrap(inner: InMemoryStore) -> Self {
        Self {
            inner,
            ..Self::default()
        }
    }

    /// Rejects every put.
    #[must_use]
    pub fn fail_puts(mut self) -> Self {
        self.failures.put = true;
        self
    }

    /// Refuses to open scans.
    #[must_use]
    pub fn fail_scan_open(mut self) -> Self {
        self.failures.scan_open = true;
        self
    }

    /// Fails scans when they reach `position`.
    #[must_use]
    pub fn fail_scan_at(mut self, position: usize) -> Self {
        self.failures.scan_advance_at = Some(position);
        self
    }

    /// Number of puts attempted, including rejected ones.
    pub fn put_attempts(&self) -> usize {
        self.put_attempts
    }

    /// Number of scans opened and not yet released.
    pub fn open_scans(&self) -> usize {
        self.open_scans.load(Ordering::SeqCst)
    }

    /// The wrapped store.
    pub fn inner(&self) -> &InMemoryStore {
        &self.inner
    }
}

/// Decrements the open-scan count when dropped.
struct ScanGuard(Arc<AtomicUsize>);

impl ScanGuard {
    fn open(counter: &Arc<AtomicUsize>) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(Arc::clone(counter))
    }
}

impl Drop for ScanGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

struct GuardedScan {
    entries: std::vec::IntoIter<KeyValue>,
    position: usize,
    fail_at: Option<usize>,
    failed: bool,
    _guard: ScanGuard,
}

impl Iterator for GuardedScan {
    type Item = StoreResult<KeyValue>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        if self.fail_at == Some(self.position) {
            self.failed = true;
            return Some(Err(StoreError::other(format!(
                "injected scan failure at position {}",
                self.position
            ))));
        }
        self.position += 1;
        self.entries.next().map(Ok)
    }
}

impl StateStore for FailingStore {
    fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        self.inner.get(key)
    }

    fn put(&mut self, key: &str, value: &[u8]) -> StoreResult<()> {
        self.put_attempts += 1;
        if self.failures.put {
            return Err(StoreError::other(format!("injected put failure for {key}")));
        }
        self.inner.put(key, value)
    }

    fn scan(&self, start: &str, end: &str) -> StoreResult<StateIterator<'_>> {
        if self.failures.scan_open {
            return Err(StoreError::other("injected scan open failure"));
        }
        let entries: Vec<KeyValue> = self.inner.scan(start, end)?.collect::<StoreResult<_>>()?;
        Ok(StateIterator::new(GuardedScan {
            entries: entries.into_iter(),
            position: 0,
            fail_at: self.failures.scan_advance_at,
            failed: false,
            _guard: ScanGuard::open(&self.open_scans),
        }))
    }

    fn len(&self) -> StoreResult<usize> {
        self.inner.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> InMemoryStore {
        InMemoryStore::with_entries([("1", b"a".to_vec()), ("2", b"b".to_vec())])
    }

    #[test]
    fn passes_through_by_default() {
        let mut store = FailingStore::new();
        store.put("1", b"x").unwrap();
        assert_eq!(store.get("1").unwrap(), Some(b"x".to_vec()));
        assert_eq!(store.put_attempts(), 1);
    }

    #[test]
    fn rejected_put_is_counted_but_not_applied() {
        let mut store = FailingStore::new().fail_puts();
        assert!(store.put("1", b"x").is_err());
        assert_eq!(store.put_attempts(), 1);
        assert!(store.inner().is_empty().unwrap());
    }

    #[test]
    fn scan_open_failure() {
        let store = FailingStore::wrap(seeded()).fail_scan_open();
        assert!(store.scan("0", "9").is_err());
        assert_eq!(store.open_scans(), 0);
    }

    #[test]
    fn scan_advance_failure_then_stops() {
        let store = FailingStore::wrap(seeded()).fail_scan_at(1);
        let mut iter = store.scan("0", "9").unwrap();
        assert!(iter.next().unwrap().is_ok());
        assert!(iter.next().unwrap().is_err());
        assert!(iter.next().is_none());
    }

    #[test]
    fn open_scans_are_tracked() {
        let store = FailingStore::wrap(seeded());
        let iter = store.scan("0", "9").unwrap();
        assert_eq!(store.open_scans(), 1);
        iter.close();
        assert_eq!(store.open_scans(), 0);
    }
}
