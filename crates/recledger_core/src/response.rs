//! Host-facing invocation results.

use crate::error::ServiceResult;

/// Outcome class of a [`Response`], using ledger peer status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    /// The invocation succeeded.
    Ok,
    /// The invocation failed; see [`Response::message`].
    Error,
}

impl Status {
    /// Returns the numeric status code (200 or 500).
    #[must_use]
    pub const fn code(self) -> u16 {
        match self {
            Self::Ok => 200,
            Self::Error => 500,
        }
    }
}

/// The value a contract hands back to its host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// Outcome class.
    pub status: Status,
    /// Human-readable error text; empty on success.
    pub message: String,
    /// Result bytes; empty on error.
    pub payload: Vec<u8>,
}

impl Response {
    /// Creates a success response carrying `payload`.
    pub fn success(payload: impl Into<Vec<u8>>) -> Self {
        Self {
            status: Status::Ok,
            message: String::new(),
            payload: payload.into(),
        }
    }

    /// Creates an error response.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: Status::Error,
            message: message.into(),
            payload: Vec::new(),
        }
    }

    /// Returns `true` if the invocation succeeded.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.status == Status::Ok
    }

    /// Returns the payload as UTF-8 text, if it is.
    #[must_use]
    pub fn payload_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.payload).ok()
    }
}

impl From<ServiceResult<Vec<u8>>> for Response {
    fn from(result: ServiceResult<Vec<u8>>) -> Self {
        match result {
            Ok(payload) => Self::success(payload),
            Err(e) => Self::error(e.to_string()),
        }
    }
}
