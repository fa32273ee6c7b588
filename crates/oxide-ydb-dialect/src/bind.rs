//! Bind placeholders of a compiled statement.
//!
//! The statement compiler decides which placeholders exist; this module only
//! models what it hands over: names, expansion slots, declared types and the
//! statement's DML target.

use std::collections::BTreeMap;

use oxide_ydb_types::{SqlType, Value};

use crate::error::Result;
use crate::resolver::{self, BindTypes};
use crate::schema::SchemaLookup;

/// One row of execution parameters, keyed by placeholder or slot name.
pub type ParameterSet = BTreeMap<String, Value>;

/// How a placeholder maps onto wire parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindKind {
    /// One wire parameter named after the placeholder.
    Single,
    /// One wire parameter per list element, in element order.
    Expanding(Vec<String>),
}

/// A named placeholder in a compiled statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindPlaceholder {
    /// Placeholder name, unique within the statement.
    pub name: String,
    /// Single or expanding.
    pub kind: BindKind,
    /// Type given by the statement author, if any.
    pub declared_type: Option<SqlType>,
    /// Value is inlined into the statement text.
    pub literal_execute: bool,
}

impl BindPlaceholder {
    /// Creates an untyped single placeholder.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: BindKind::Single,
            declared_type: None,
            literal_execute: false,
        }
    }

    /// Creates an expanding placeholder with explicit slots.
    #[must_use]
    pub fn expanding<I, S>(name: impl Into<String>, slots: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            kind: BindKind::Expanding(slots.into_iter().map(Into::into).collect()),
            ..Self::new(name)
        }
    }

    /// Sets the declared type.
    #[must_use]
    pub fn declared(mut self, ty: SqlType) -> Self {
        self.declared_type = Some(ty);
        self
    }

    /// Marks the placeholder as literal-execute.
    #[must_use]
    pub const fn literal_execute(mut self) -> Self {
        self.literal_execute = true;
        self
    }

    /// Returns `true` for expanding placeholders.
    #[must_use]
    pub const fn is_expanding(&self) -> bool {
        matches!(self.kind, BindKind::Expanding(_))
    }

    /// Wire parameter names this placeholder contributes.
    #[must_use]
    pub fn slots(&self) -> Vec<&str> {
        match &self.kind {
            BindKind::Single => vec![self.name.as_str()],
            BindKind::Expanding(slots) => slots.iter().map(String::as_str).collect(),
        }
    }

    /// Declared type, ignoring the "no type" placeholder.
    #[must_use]
    pub fn effective_declared_type(&self) -> Option<&SqlType> {
        self.declared_type.as_ref().filter(|ty| !ty.is_null())
    }
}

/// The table and columns written by an INSERT or UPDATE.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DmlTarget {
    /// Target table.
    pub table: String,
    /// Columns receiving values.
    pub columns: Vec<String>,
}

impl DmlTarget {
    /// Creates a target.
    #[must_use]
    pub fn new(table: impl Into<String>, columns: &[&str]) -> Self {
        Self {
            table: table.into(),
            columns: columns.iter().map(|c| (*c).to_string()).collect(),
        }
    }

    /// Returns whether `column` is written by the statement.
    #[must_use]
    pub fn writes(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }
}

/// Compiler output consumed by the dialect.
///
/// `text` references parameters as `:name` markers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompiledStatement {
    /// Statement text.
    pub text: String,
    /// Placeholders in bind-name order.
    pub placeholders: Vec<BindPlaceholder>,
    /// Target of an INSERT/UPDATE.
    pub dml_target: Option<DmlTarget>,
    /// Whether the statement is DDL.
    pub is_ddl: bool,
}

impl CompiledStatement {
    /// Creates a statement with no placeholders.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Adds a placeholder.
    #[must_use]
    pub fn placeholder(mut self, placeholder: BindPlaceholder) -> Self {
        self.placeholders.push(placeholder);
        self
    }

    /// Sets the DML target.
    #[must_use]
    pub fn target(mut self, target: DmlTarget) -> Self {
        self.dml_target = Some(target);
        self
    }

    /// Marks the statement as DDL.
    #[must_use]
    pub const fn ddl(mut self) -> Self {
        self.is_ddl = true;
        self
    }

    /// Resolves the wire types of this statement's binds.
    ///
    /// # Errors
    ///
    /// See [`resolver::resolve`].
    pub fn bind_types<S>(&self, rows: &[ParameterSet], schema: &S) -> Result<BindTypes>
    where
        S: SchemaLookup + ?Sized,
    {
        resolver::resolve(&self.placeholders, self.dml_target.as_ref(), rows, schema)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_slots() {
        let p = BindPlaceholder::new("id");
        assert_eq!(p.slots(), vec!["id"]);
        assert!(!p.is_expanding());
    }

    #[test]
    fn test_expanding_slots() {
        let p = BindPlaceholder::expanding("ids", ["ids_1", "ids_2"]);
        assert!(p.is_expanding());
        assert_eq!(p.slots(), vec!["ids_1", "ids_2"]);
    }

    #[test]
    fn test_null_declared_type_is_ignored() {
        let p = BindPlaceholder::new("x").declared(SqlType::Null);
        assert!(p.effective_declared_type().is_none());
        let p = BindPlaceholder::new("x").declared(SqlType::Text);
        assert_eq!(p.effective_declared_type(), Some(&SqlType::Text));
    }

    #[test]
    fn test_dml_target_writes() {
        let target = DmlTarget::new("users", &["id", "email"]);
        assert!(target.writes("email"));
        assert!(!target.writes("name"));
    }
}
