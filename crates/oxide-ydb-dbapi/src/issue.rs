//! Status issues reported by the native client.

use std::fmt;

/// Status of a failed native operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusCode {
    /// The object already exists.
    AlreadyExists,
    /// A precondition (e.g. a unique key) failed.
    PreconditionFailed,
    /// The operation is not supported by the server.
    Unsupported,
    /// The operation is not implemented by the server.
    Unimplemented,
    /// The request was malformed.
    BadRequest,
    /// The referenced scheme object is missing or invalid.
    SchemeError,
    /// The response was truncated.
    TruncatedResponse,
    /// The transport connection failed.
    ConnectionError,
    /// The transaction was aborted.
    Aborted,
    /// The service is unavailable.
    Unavailable,
    /// The service is overloaded.
    Overloaded,
    /// The outcome of the operation is unknown.
    Undetermined,
    /// The operation timed out.
    Timeout,
    /// The operation was cancelled.
    Cancelled,
    /// The session is busy with another request.
    SessionBusy,
    /// The session expired.
    SessionExpired,
    /// No session could be taken from the pool.
    SessionPoolEmpty,
    /// Query execution failed with a generic error.
    GenericError,
    /// Server-side internal error.
    InternalError,
    /// Any other status.
    Other,
}

/// A failure reported by the native client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    /// Status code.
    pub status: StatusCode,
    /// Human readable message.
    pub message: String,
}

impl Issue {
    /// Creates a new issue.
    #[must_use]
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.status, self.message)
    }
}

impl std::error::Error for Issue {}
