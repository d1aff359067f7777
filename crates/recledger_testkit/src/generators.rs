//! Property-based test generators using proptest.

use proptest::prelude::*;
use recledger_core::Record;

/// Strategy for keys inside the default `["0", "999")` scan range.
pub fn in_range_key_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[0-8][0-9]{0,3}|9[0-8][0-9]{0,2}|99[0-8][0-9]?|99|9").expect("Invalid regex")
}

/// Strategy for keys that sort after the default scan range.
pub fn out_of_range_key_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[A-Za-z][A-Za-z0-9_-]{0,15}").expect("Invalid regex")
}

/// Strategy for any non-empty key.
pub fn key_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        3 => in_range_key_strategy(),
        1 => out_of_range_key_strategy(),
    ]
}

/// Strategy for a single free-form field value, including empty strings
/// and non-ASCII text.
pub fn field_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just("true".to_string()),
        Just("false".to_string()),
        "\\PC{0,24}",
    ]
}

/// Strategy for records.
pub fn record_strategy() -> impl Strategy<Value = Record> {
    (
        field_strategy(),
        field_strategy(),
        field_strategy(),
        field_strategy(),
        field_strategy(),
    )
        .prop_map(|(name, date, enabled, status, reporter)| {
            Record::new(name, date, enabled, status, reporter)
        })
}

/// Strategy for argument lists whose length is anything but six.
pub fn wrong_arity_args_strategy() -> impl Strategy<Value = Vec<String>> {
    prop_oneof![
        prop::collection::vec(field_strategy(), 0..6),
        prop::collection::vec(field_strategy(), 7..12),
    ]
}

/// Configuration for property tests.
#[derive(Debug, Clone)]
pub struct PropTestConfig {
    /// Number of test cases to run.
    pub cases: u32,
    /// Maximum shrink iterations.
    pub max_shrink_iters: u32,
}

impl Default for PropTestConfig {
    fn default() -> Self {
        Self {
            cases: 256,
            max_shrink_iters: 1000,
        }
    }
}

impl PropTestConfig {
    /// Creates a configuration for quick tests.
    #[must_use]
    pub fn quick() -> Self {
        Self {
            cases: 32,
            max_shrink_iters: 100,
        }
    }

    /// Converts to proptest config.
    #[must_use]
    pub fn to_proptest_config(&self) -> ProptestConfig {
        ProptestConfig {
            cases: self.cases,
            max_shrink_iters: self.max_shrink_iters,
            ..ProptestConfig::default()
        }
    }
}
