//! Service configuration.

/// Default inclusive lower bound of the `queryAll` scan.
pub const DEFAULT_RANGE_START: &str = "0";

/// Default exclusive upper bound of the `queryAll` scan.
pub const DEFAULT_RANGE_END: &str = "999";

/// Configuration for a [`crate::RecordService`].
///
/// The `queryAll` range defaults to `["0", "999")`. Keys are compared
/// lexically, so `"1000"` is inside that range while `"999"` and `"A"` are
/// not. That bound is kept for compatibility with existing ledgers; widen it
/// explicitly if every key should be visible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Inclusive lower bound of the `queryAll` scan.
    pub range_start: String,

    /// Exclusive upper bound of the `queryAll` scan (empty = unbounded).
    pub range_end: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            range_start: DEFAULT_RANGE_START.to_string(),
            range_end: DEFAULT_RANGE_END.to_string(),
        }
    }
}

impl ServiceConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets both scan bounds.
    #[must_use]
    pub fn with_range(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.range_start = start.into();
        self.range_end = end.into();
        self
    }

    /// Sets the inclusive lower scan bound.
    #[must_use]
    pub fn range_start(mut self, start: impl Into<String>) -> Self {
        self.range_start = start.into();
        self
    }

    /// Sets the exclusive upper scan bound.
    #[must_use]
    pub fn range_end(mut self, end: impl Into<String>) -> Self {
        self.range_end = end.into();
        self
    }
}
