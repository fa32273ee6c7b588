//! Error types for type mapping.

use thiserror::Error;

/// Errors raised when a value or an abstract type has no YDB wire type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeError {
    /// A runtime value whose dynamic type has no mapping rule.
    #[error("{type_name} bind variables not supported")]
    UnsupportedValueType {
        /// Name of the offending dynamic type.
        type_name: String,
    },

    /// An abstract column type missing from the descriptor table.
    #[error("type {0} has no YDB wire type")]
    UnsupportedType(String),
}

/// Result type alias for type mapping.
pub type Result<T> = std::result::Result<T, TypeError>;
