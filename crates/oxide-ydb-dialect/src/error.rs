//! Error types for the dialect.

use oxide_ydb_dbapi::DbApiError;
use oxide_ydb_types::TypeError;
use thiserror::Error;

/// Errors raised by a schema lookup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// The table is unknown.
    #[error("table not found: {0}")]
    TableNotFound(String),

    /// The table exists but has no such column.
    #[error("column not found: {table}.{column}")]
    ColumnNotFound {
        /// Table name.
        table: String,
        /// Column name.
        column: String,
    },

    /// The schema source failed for another reason.
    #[error("failed to describe {table}: {message}")]
    Describe {
        /// Table name.
        table: String,
        /// Error message.
        message: String,
    },
}

impl SchemaError {
    /// Returns `true` when the error only means "no fact available".
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::TableNotFound(_) | Self::ColumnNotFound { .. })
    }
}

/// Errors raised while preparing or executing a statement.
#[derive(Debug, Error)]
pub enum DialectError {
    /// A value or declared type has no wire type.
    #[error(transparent)]
    Type(#[from] TypeError),

    /// An expanded parameter cannot be attributed to exactly one placeholder.
    #[error("expanded parameter '{slot}' of '{placeholder}' is ambiguous")]
    AmbiguousExpansion {
        /// The expanding placeholder.
        placeholder: String,
        /// The conflicting expanded parameter name.
        slot: String,
    },

    /// Two placeholders share a name.
    #[error("duplicate bind placeholder '{0}'")]
    DuplicatePlaceholder(String),

    /// The statement text references a parameter that was not supplied.
    #[error("statement references parameter '{0}' that was not supplied")]
    MissingParameter(String),

    /// Schema lookup failed.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// The driver failed.
    #[error(transparent)]
    Driver(#[from] DbApiError),
}

impl DialectError {
    /// Returns `true` for errors that are usage errors of the caller.
    #[must_use]
    pub const fn is_programming_error(&self) -> bool {
        match self {
            Self::Type(_)
            | Self::AmbiguousExpansion { .. }
            | Self::DuplicatePlaceholder(_)
            | Self::MissingParameter(_) => true,
            Self::Schema(_) => false,
            Self::Driver(err) => err.is_programming(),
        }
    }
}

impl From<DialectError> for DbApiError {
    fn from(err: DialectError) -> Self {
        match err {
            DialectError::Driver(inner) => inner,
            DialectError::Schema(inner) => Self::Database {
                message: inner.to_string(),
                issue: None,
            },
            other => Self::programming(other.to_string()),
        }
    }
}

/// Result type alias for dialect operations.
pub type Result<T> = std::result::Result<T, DialectError>;
