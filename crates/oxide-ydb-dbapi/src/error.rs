//! DBAPI error taxonomy.

use oxide_ydb_types::TypeError;
use thiserror::Error;

use crate::issue::{Issue, StatusCode};

/// DBAPI errors.
///
/// Every variant carries a message and, when it originates from the
/// native client, the issue it was classified from.
#[derive(Debug, Error)]
pub enum DbApiError {
    /// Error in the driver interface itself (e.g. connecting).
    #[error("interface error: {message}")]
    Interface {
        /// Error message.
        message: String,
        /// Originating issue.
        issue: Option<Issue>,
    },

    /// Unclassified database error.
    #[error("database error: {message}")]
    Database {
        /// Error message.
        message: String,
        /// Originating issue.
        issue: Option<Issue>,
    },

    /// Problem with the processed data.
    #[error("data error: {message}")]
    Data {
        /// Error message.
        message: String,
        /// Originating issue.
        issue: Option<Issue>,
    },

    /// Transient failure in the database's operation.
    #[error("operational error: {message}")]
    Operational {
        /// Error message.
        message: String,
        /// Originating issue.
        issue: Option<Issue>,
    },

    /// Relational integrity violated.
    #[error("integrity error: {message}")]
    Integrity {
        /// Error message.
        message: String,
        /// Originating issue.
        issue: Option<Issue>,
    },

    /// Internal database error.
    #[error("internal error: {message}")]
    Internal {
        /// Error message.
        message: String,
        /// Originating issue.
        issue: Option<Issue>,
    },

    /// Usage error: bad statement, missing table, untyped value.
    #[error("programming error: {message}")]
    Programming {
        /// Error message.
        message: String,
        /// Originating issue.
        issue: Option<Issue>,
    },

    /// Unsupported operation.
    #[error("not supported: {message}")]
    NotSupported {
        /// Error message.
        message: String,
        /// Originating issue.
        issue: Option<Issue>,
    },
}

impl DbApiError {
    /// Creates a programming error without an issue.
    #[must_use]
    pub fn programming(message: impl Into<String>) -> Self {
        Self::Programming {
            message: message.into(),
            issue: None,
        }
    }

    /// Creates an interface error without an issue.
    #[must_use]
    pub fn interface(message: impl Into<String>) -> Self {
        Self::Interface {
            message: message.into(),
            issue: None,
        }
    }

    /// Returns the originating issue, if any.
    #[must_use]
    pub const fn issue(&self) -> Option<&Issue> {
        match self {
            Self::Interface { issue, .. }
            | Self::Database { issue, .. }
            | Self::Data { issue, .. }
            | Self::Operational { issue, .. }
            | Self::Integrity { issue, .. }
            | Self::Internal { issue, .. }
            | Self::Programming { issue, .. }
            | Self::NotSupported { issue, .. } => issue.as_ref(),
        }
    }

    /// Returns `true` for programming (usage) errors.
    #[must_use]
    pub const fn is_programming(&self) -> bool {
        matches!(self, Self::Programming { .. })
    }
}

impl From<Issue> for DbApiError {
    fn from(issue: Issue) -> Self {
        let message = issue.message.clone();
        let status = issue.status;
        let issue = Some(issue);
        match status {
            StatusCode::AlreadyExists | StatusCode::PreconditionFailed => {
                Self::Integrity { message, issue }
            }
            StatusCode::Unsupported | StatusCode::Unimplemented => {
                Self::NotSupported { message, issue }
            }
            StatusCode::BadRequest | StatusCode::SchemeError => {
                Self::Programming { message, issue }
            }
            StatusCode::TruncatedResponse
            | StatusCode::ConnectionError
            | StatusCode::Aborted
            | StatusCode::Unavailable
            | StatusCode::Overloaded
            | StatusCode::Undetermined
            | StatusCode::Timeout
            | StatusCode::Cancelled
            | StatusCode::SessionBusy
            | StatusCode::SessionExpired
            | StatusCode::SessionPoolEmpty => Self::Operational { message, issue },
            StatusCode::GenericError => Self::Data { message, issue },
            StatusCode::InternalError => Self::Internal { message, issue },
            StatusCode::Other => Self::Database { message, issue },
        }
    }
}

impl From<TypeError> for DbApiError {
    fn from(err: TypeError) -> Self {
        Self::programming(err.to_string())
    }
}

/// Result type alias for driver operations.
pub type Result<T> = std::result::Result<T, DbApiError>;
