//! Queries and typed parameters handed to the cursor.

use std::collections::BTreeMap;
use std::fmt;

use oxide_ydb_types::{ResolvedBindType, Value};
use sha2::{Digest, Sha256};

/// Declared parameter types keyed by parameter name.
pub type ParameterTypes = BTreeMap<String, ResolvedBindType>;

/// One set of parameters keyed by wire name (`$name`).
pub type Parameters = BTreeMap<String, TypedValue>;

/// A parameter value, optionally carrying its declared type.
///
/// Untyped values are left to the server's implicit typing.
#[derive(Debug, Clone, PartialEq)]
pub struct TypedValue {
    /// The value.
    pub value: Value,
    /// Declared type, if one was resolved.
    pub ty: Option<ResolvedBindType>,
}

impl TypedValue {
    /// Creates a typed value.
    #[must_use]
    pub const fn typed(value: Value, ty: ResolvedBindType) -> Self {
        Self {
            value,
            ty: Some(ty),
        }
    }

    /// Creates an untyped value.
    #[must_use]
    pub const fn untyped(value: Value) -> Self {
        Self { value, ty: None }
    }
}

impl fmt::Display for TypedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.ty {
            Some(ty) => write!(f, "{} AS {ty}", self.value),
            None => write!(f, "{}", self.value),
        }
    }
}

/// A statement as the cursor receives it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct YdbQuery {
    /// YQL text with `$name` parameter references.
    pub yql_text: String,
    /// Declared parameter types.
    pub parameters_types: ParameterTypes,
    /// Whether the statement is a scheme (DDL) statement.
    pub is_ddl: bool,
}

impl YdbQuery {
    /// Creates a data query with no declared types.
    #[must_use]
    pub fn new(yql_text: impl Into<String>) -> Self {
        Self {
            yql_text: yql_text.into(),
            parameters_types: ParameterTypes::new(),
            is_ddl: false,
        }
    }

    /// Creates a scheme query.
    #[must_use]
    pub fn ddl(yql_text: impl Into<String>) -> Self {
        Self {
            is_ddl: true,
            ..Self::new(yql_text)
        }
    }

    /// Sets the declared parameter types.
    #[must_use]
    pub fn with_types(mut self, parameters_types: ParameterTypes) -> Self {
        self.parameters_types = parameters_types;
        self
    }
}

/// A data query ready for the native client.
///
/// The name doubles as the server-side prepared query cache key. It hashes
/// the declared types together with the text, so the same text with a
/// parameter of a different type never hits a stale prepared query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataQuery {
    /// YQL text.
    pub yql_text: String,
    /// Declared parameter types.
    pub parameters_types: ParameterTypes,
    /// Cache key: hex SHA-256 of text and sorted types.
    pub name: String,
}

impl DataQuery {
    /// Creates a data query and computes its name.
    #[must_use]
    pub fn new(yql_text: impl Into<String>, parameters_types: ParameterTypes) -> Self {
        let yql_text = yql_text.into();
        let mut hasher = Sha256::new();
        hasher.update(yql_text.as_bytes());
        for (name, ty) in &parameters_types {
            hasher.update(name.as_bytes());
            hasher.update(ty.to_string().as_bytes());
        }
        let name = hex::encode(hasher.finalize());
        Self {
            yql_text,
            parameters_types,
            name,
        }
    }
}

#[cfg(test)]
mod tests {
    use oxide_ydb_types::PrimitiveType;

    use super::*;

    fn types(ty: ResolvedBindType) -> ParameterTypes {
        [("$id".to_string(), ty)].into_iter().collect()
    }

    #[test]
    fn test_data_query_name_depends_on_types() {
        let text = "SELECT * FROM t WHERE id = $id";
        let a = DataQuery::new(text, types(ResolvedBindType::required(PrimitiveType::Int64)));
        let b = DataQuery::new(text, types(ResolvedBindType::optional(PrimitiveType::Int64)));
        let c = DataQuery::new(text, types(ResolvedBindType::required(PrimitiveType::Int64)));
        assert_ne!(a.name, b.name);
        assert_eq!(a.name, c.name);
        assert_eq!(a.name.len(), 64);
    }

    #[test]
    fn test_typed_value_display() {
        let v = TypedValue::typed(Value::Int(1), ResolvedBindType::optional(PrimitiveType::Int64));
        assert_eq!(v.to_string(), "1 AS Optional<Int64>");
        assert_eq!(TypedValue::untyped(Value::Null).to_string(), "NULL");
    }

    #[test]
    fn test_ddl_query() {
        let q = YdbQuery::ddl("DROP TABLE t");
        assert!(q.is_ddl);
        assert!(q.parameters_types.is_empty());
    }
}
