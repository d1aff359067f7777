//! The record service and the host lifecycle trait.

use crate::command::{Command, Invocation};
use crate::config::ServiceConfig;
use crate::error::{ServiceError, ServiceResult};
use crate::record::{QueryResult, Record};
use crate::response::Response;
use recledger_store::StateStore;
use tracing::{debug, info, warn};

/// The lifecycle a host drives a contract through.
///
/// Hosts call [`Contract::init`] once when the contract is installed and
/// [`Contract::invoke`] for every request after that. Both receive the
/// host's store explicitly; a contract holds no state of its own.
///
/// Neither method fails: errors come back as [`Response::error`].
pub trait Contract {
    /// Called when the contract is instantiated.
    fn init(&self, store: &mut dyn StateStore) -> Response;

    /// Called for every invocation.
    fn invoke(&self, store: &mut dyn StateStore, invocation: &Invocation) -> Response;
}

/// Stores and lists [`Record`]s in a host store.
#[derive(Debug, Clone, Default)]
pub struct RecordService {
    config: ServiceConfig,
}

impl RecordService {
    /// Creates a service with the given configuration.
    #[must_use]
    pub fn new(config: ServiceConfig) -> Self {
        Self { config }
    }

    /// Returns the service configuration.
    #[must_use]
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Runs a resolved command and returns its payload.
    ///
    /// `record` yields an empty payload; `queryAll` yields the JSON array of
    /// `{"Key", "Record"}` entries.
    ///
    /// # Errors
    ///
    /// Propagates the errors of [`RecordService::record`] and
    /// [`RecordService::query_all`].
    pub fn execute<S>(&self, store: &mut S, command: Command) -> ServiceResult<Vec<u8>>
    where
        S: StateStore + ?Sized,
    {
        match command {
            Command::Record { key, record } => {
                self.record(store, &key, &record)?;
                Ok(Vec::new())
            }
            Command::QueryAll => {
                let results = self.query_all(store)?;
                let payload = serde_json::to_vec(&results)?;
                debug!(
                    "queryAll result: {}",
                    String::from_utf8_lossy(&payload)
                );
                Ok(payload)
            }
        }
    }

    /// Writes `record` under `key` with a single put.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::StorageWrite`] naming the key if the store
    /// rejects the put.
    pub fn record<S>(&self, store: &mut S, key: &str, record: &Record) -> ServiceResult<()>
    where
        S: StateStore + ?Sized,
    {
        let value = record.to_json()?;
        store
            .put(key, &value)
            .map_err(|e| ServiceError::storage_write(key, e))?;
        info!(key, "recorded");
        Ok(())
    }

    /// Lists every entry whose key lies in the configured scan range, in the
    /// order the store yields them.
    ///
    /// Keys outside `[range_start, range_end)` are silently left out.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::StorageRead`] if the scan cannot be opened, an
    /// advance fails, or a stored value is not JSON. Nothing collected before
    /// the failure is returned, and the scan is released either way.
    pub fn query_all<S>(&self, store: &S) -> ServiceResult<Vec<QueryResult>>
    where
        S: StateStore + ?Sized,
    {
        let ServiceConfig {
            range_start,
            range_end,
        } = &self.config;

        let iter = store.scan(range_start, range_end)?;
        let mut results = Vec::new();
        for item in iter {
            let kv = item?;
            results.push(QueryResult::from_stored(kv.key, kv.value)?);
        }

        info!(
            start = %range_start,
            end = %range_end,
            count = results.len(),
            "queryAll"
        );
        Ok(results)
    }
}

impl Contract for RecordService {
    fn init(&self, _store: &mut dyn StateStore) -> Response {
        debug!("init");
        Response::success(Vec::new())
    }

    fn invoke(&self, store: &mut dyn StateStore, invocation: &Invocation) -> Response {
        debug!(
            function = %invocation.function,
            args = invocation.args.len(),
            "invoke"
        );

        let result = Command::parse(invocation).and_then(|command| self.execute(store, command));
        if let Err(e) = &result {
            warn!(function = %invocation.function, error = %e, "invocation failed");
        }
        result.into()
    }
}
