//! Host invocations and the commands they resolve to.

use crate::error::{ServiceError, ServiceResult};
use crate::record::Record;

/// A function name plus positional string arguments, as delivered by a host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// The requested operation name.
    pub function: String,
    /// Positional arguments.
    pub args: Vec<String>,
}

impl Invocation {
    /// Creates an invocation.
    pub fn new<I, A>(function: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<String>,
    {
        Self {
            function: function.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Splits a flat argument list into function name and parameters.
    ///
    /// The first element names the function; an empty list yields an empty
    /// function name, which no command accepts.
    pub fn from_args<I, A>(args: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<String>,
    {
        let mut args = args.into_iter().map(Into::into);
        let function = args.next().unwrap_or_default();
        Self {
            function,
            args: args.collect(),
        }
    }
}

/// A resolved service command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Store `record` under `key`, replacing any previous value.
    Record {
        /// The target key.
        key: String,
        /// The value to store.
        record: Record,
    },
    /// Return every record whose key is inside the configured scan range.
    QueryAll,
}

impl Command {
    /// Operation name for [`Command::Record`].
    pub const RECORD: &'static str = "record";

    /// Operation name for [`Command::QueryAll`].
    pub const QUERY_ALL: &'static str = "queryAll";

    /// Number of positional arguments `record` takes.
    pub const RECORD_ARITY: usize = 6;

    /// Resolves an invocation.
    ///
    /// `queryAll` ignores any arguments it is given.
    ///
    /// # Errors
    ///
    /// - [`ServiceError::UnknownOperation`] for any name other than
    ///   `record` or `queryAll`
    /// - [`ServiceError::InvalidArgument`] if `record` does not get exactly
    ///   six arguments
    pub fn parse(invocation: &Invocation) -> ServiceResult<Self> {
        match invocation.function.as_str() {
            Self::RECORD => match invocation.args.as_slice() {
                [key, name, date, enabled, status, reporter] => Ok(Self::Record {
                    key: key.clone(),
                    record: Record::new(
                        name.as_str(),
                        date.as_str(),
                        enabled.as_str(),
                        status.as_str(),
                        reporter.as_str(),
                    ),
                }),
                args => Err(ServiceError::invalid_argument(
                    Self::RECORD_ARITY,
                    args.len(),
                )),
            },
            Self::QUERY_ALL => Ok(Self::QueryAll),
            other => Err(ServiceError::unknown_operation(other)),
        }
    }

    /// Returns the operation name of this command.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Record { .. } => Self::RECORD,
            Self::QueryAll => Self::QUERY_ALL,
        }
    }
}

impl TryFrom<&Invocation> for Command {
    type Error = ServiceError;

    fn try_from(invocation: &Invocation) -> ServiceResult<Self> {
        Self::parse(invocation)
    }
}
