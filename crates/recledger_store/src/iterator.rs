//! Range scan iterator handle.

use crate::error::StoreResult;

/// A single key/value pair yielded by a range scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyValue {
    /// The stored key.
    pub key: String,
    /// The raw stored bytes.
    pub value: Vec<u8>,
}

impl KeyValue {
    /// Creates a new key/value pair.
    pub fn new(key: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// A scoped handle over the results of a range scan.
///
/// The handle owns whatever resources the store allocated for the scan and
/// releases them when dropped, so every exit path of a caller (including
/// early returns through `?`) closes the scan. [`StateIterator::close`] is
/// available for callers that want to release the handle explicitly.
///
/// Advancing the iterator can fail; each item is a [`StoreResult`].
pub struct StateIterator<'a> {
    inner: Box<dyn Iterator<Item = StoreResult<KeyValue>> + Send + 'a>,
}

impl<'a> StateIterator<'a> {
    /// Wraps a store-specific iterator.
    pub fn new<I>(inner: I) -> Self
    where
        I: Iterator<Item = StoreResult<KeyValue>> + Send + 'a,
    {
        Self {
            inner: Box::new(inner),
        }
    }

    /// Creates an iterator over an already materialized snapshot.
    pub fn from_entries(entries: Vec<KeyValue>) -> Self {
        Self::new(entries.into_iter().map(Ok))
    }

    /// Releases the scan.
    pub fn close(self) {
        drop(self);
    }
}

impl Iterator for StateIterator<'_> {
    type Item = StoreResult<KeyValue>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}

impl std::fmt::Debug for StateIterator<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateIterator").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;

    #[test]
    fn snapshot_iterator_yields_in_order() {
        let iter = StateIterator::from_entries(vec![
            KeyValue::new("1", b"a".to_vec()),
            KeyValue::new("2", b"b".to_vec()),
        ]);
        let keys: Vec<String> = iter.map(|kv| kv.unwrap().key).collect();
        assert_eq!(keys, vec!["1", "2"]);
    }

    #[test]
    fn errors_pass_through() {
        let mut iter = StateIterator::new(std::iter::once(Err(StoreError::other("cursor lost"))));
        assert!(matches!(iter.next(), Some(Err(StoreError::Other(_)))));
        assert!(iter.next().is_none());
    }
}
