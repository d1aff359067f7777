//! The stored record and the `queryAll` entry shape.

use crate::error::{ServiceError, ServiceResult};
use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;

/// The five-field value stored under a key.
///
/// Every field is an opaque string. `enabled` and `status` in particular are
/// kept verbatim; no boolean or enum domain is enforced.
///
/// Serialized as a JSON object with fields in declaration order:
///
/// ```json
/// {"name":"..","date":"..","enabled":"..","status":"..","reporter":".."}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Record {
    /// Record name.
    pub name: String,
    /// Free-form date.
    pub date: String,
    /// Enabled flag, as supplied.
    pub enabled: String,
    /// Status, as supplied.
    pub status: String,
    /// Who reported the record.
    pub reporter: String,
}

impl Record {
    /// Creates a record from its five fields.
    pub fn new(
        name: impl Into<String>,
        date: impl Into<String>,
        enabled: impl Into<String>,
        status: impl Into<String>,
        reporter: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            date: date.into(),
            enabled: enabled.into(),
            status: status.into(),
            reporter: reporter.into(),
        }
    }

    /// Encodes the record as stored bytes.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Encode`] if serialization fails.
    pub fn to_json(&self) -> ServiceResult<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    /// Decodes a record from stored bytes.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Encode`] if the bytes are not a five-field
    /// record object.
    pub fn from_json(bytes: &[u8]) -> ServiceResult<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

/// One entry of the `queryAll` result.
///
/// The stored value is carried as raw JSON, so it is echoed back exactly as
/// it sits in the store.
#[derive(Debug, Serialize, Deserialize)]
pub struct QueryResult {
    /// The stored key.
    #[serde(rename = "Key")]
    pub key: String,
    /// The stored value.
    #[serde(rename = "Record")]
    pub record: Box<RawValue>,
}

impl QueryResult {
    /// Wraps a scanned key/value pair.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::StorageRead`] if the value is not valid
    /// UTF-8 JSON.
    pub fn from_stored(key: String, value: Vec<u8>) -> ServiceResult<Self> {
        let text = String::from_utf8(value).map_err(|_| {
            ServiceError::storage_read(format!("value under key {key:?} is not UTF-8"))
        })?;
        let record = RawValue::from_string(text).map_err(|e| {
            ServiceError::storage_read(format!("value under key {key:?} is not valid JSON: {e}"))
        })?;
        Ok(Self { key, record })
    }

    /// Decodes the carried value as a [`Record`].
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Encode`] if the value is not a record object.
    pub fn decode(&self) -> ServiceResult<Record> {
        Record::from_json(self.record.get().as_bytes())
    }
}
