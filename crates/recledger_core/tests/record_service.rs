//! Integration tests for the record service against the provided stores.

use recledger_core::{
    Contract, Invocation, QueryResult, Record, RecordService, ServiceConfig, ServiceError,
    StateStore,
};
use recledger_store::InMemoryStore;
use recledger_testkit::prelude::*;

fn query_keys(service: &RecordService, store: &mut dyn StateStore) -> Vec<String> {
    let response = service.invoke(store, &query_all_invocation());
    assert!(response.is_ok(), "queryAll failed: {}", response.message);
    let entries: Vec<QueryResult> = serde_json::from_slice(&response.payload).unwrap();
    entries.into_iter().map(|e| e.key).collect()
}

#[test]
fn record_then_query_all_returns_exactly_those_keys() {
    let service = RecordService::default();
    let mut store = scenarios::populated_store(&["1", "2", "500"]);

    assert_eq!(query_keys(&service, &mut store), vec!["1", "2", "500"]);
}

#[test]
fn keys_outside_range_are_excluded() {
    let service = RecordService::default();
    let mut store = scenarios::populated_store(&["1", "A", "999", "zebra"]);

    assert_eq!(store.len().unwrap(), 4);
    assert_eq!(query_keys(&service, &mut store), vec!["1"]);
}

#[test]
fn lexical_order_not_numeric() {
    let service = RecordService::default();
    let mut store = scenarios::populated_store(&["10", "9", "100", "2"]);

    assert_eq!(query_keys(&service, &mut store), vec!["10", "100", "2", "9"]);
}

#[test]
fn query_all_payload_shape() {
    let service = RecordService::default();
    let mut store = InMemoryStore::new();
    let record = Record::new("valve", "yesterday", "no", "closed", "carol");
    assert!(service.invoke(&mut store, &record_invocation("7", &record)).is_ok());

    let response = service.invoke(&mut store, &query_all_invocation());
    assert_eq!(
        response.payload_str().unwrap(),
        r#"[{"Key":"7","Record":{"name":"valve","date":"yesterday","enabled":"no","status":"closed","reporter":"carol"}}]"#
    );

    let value: serde_json::Value = serde_json::from_slice(&response.payload).unwrap();
    assert_eq!(value[0]["Record"]["enabled"], "no");
}

#[test]
fn overwrite_replaces_previous_value() {
    let service = RecordService::default();
    let mut store = InMemoryStore::new();

    service.invoke(&mut store, &record_invocation("1", &sample_record(1)));
    service.invoke(&mut store, &record_invocation("1", &sample_record(2)));

    assert_eq!(store.len().unwrap(), 1);
    assert_eq!(scenarios::stored_record(&store, "1"), Some(sample_record(2)));
}

#[test]
fn unknown_operation_mutates_nothing() {
    let service = RecordService::default();
    let mut store = scenarios::populated_store(&["1", "2"]);
    let before = store.entries();

    for name in ["delete", "", "QueryAll", "recordAll"] {
        let response = service.invoke(&mut store, &Invocation::new(name, ["1"]));
        assert!(!response.is_ok());
        assert!(response.message.starts_with("unknown operation"));
    }
    assert_eq!(store.entries(), before);
}

#[test]
fn write_failure_surfaces_key_and_attempts_once() {
    let service = RecordService::default();
    let mut store = FailingStore::new().fail_puts();

    let response = service.invoke(&mut store, &record_invocation("42", &sample_record(0)));
    assert!(!response.is_ok());
    assert!(response.message.contains("failed to record 42"));
    assert_eq!(store.put_attempts(), 1);
}

#[test]
fn wrong_arity_never_reaches_store() {
    let service = RecordService::default();
    let mut store = FailingStore::new();

    let response = service.invoke(&mut store, &Invocation::new("record", ["1", "a", "b"]));
    assert!(!response.is_ok());
    assert_eq!(store.put_attempts(), 0);
}

#[test]
fn scan_open_failure_is_read_error() {
    let service = RecordService::default();
    let store = FailingStore::wrap(scenarios::populated_store(&["1"])).fail_scan_open();

    let result = service.query_all(&store);
    assert!(matches!(result, Err(ServiceError::StorageRead { .. })));
    assert_eq!(store.open_scans(), 0);
}

#[test]
fn scan_advance_failure_discards_partial_results_and_releases_scan() {
    let service = RecordService::default();
    let mut store =
        FailingStore::wrap(scenarios::populated_store(&["1", "2", "3"])).fail_scan_at(2);

    let response = service.invoke(&mut store, &query_all_invocation());
    assert!(!response.is_ok());
    assert!(response.payload.is_empty());
    assert!(response.message.contains("injected scan failure"));
    assert_eq!(store.open_scans(), 0);
}

#[test]
fn successful_scan_is_released() {
    let service = RecordService::default();
    let store = FailingStore::wrap(scenarios::populated_store(&["1", "2"]));

    assert_eq!(service.query_all(&store).unwrap().len(), 2);
    assert_eq!(store.open_scans(), 0);
}

#[test]
fn custom_range_widens_visibility() {
    let service = RecordService::new(ServiceConfig::new().with_range("", ""));
    let mut store = scenarios::populated_store(&["1", "A", "999"]);

    assert_eq!(query_keys(&service, &mut store), vec!["1", "999", "A"]);
}

#[test]
fn file_store_round_trip_survives_reopen() {
    let service = RecordService::default();
    let mut test_store = TestFileStore::new();

    for key in ["1", "2", "500", "A"] {
        let response = service.invoke(&mut test_store.store, &record_invocation(key, &sample_record(3)));
        assert!(response.is_ok());
    }
    test_store.reopen();

    assert_eq!(query_keys(&service, &mut test_store.store), vec!["1", "2", "500"]);
    assert_eq!(
        scenarios::stored_record(&test_store.store, "A"),
        Some(sample_record(3))
    );
}

#[test]
fn init_is_a_no_op() {
    let service = RecordService::default();
    let mut store = FailingStore::new().fail_puts().fail_scan_open();

    let response = service.init(&mut store);
    assert!(response.is_ok());
    assert_eq!(store.put_attempts(), 0);
}
