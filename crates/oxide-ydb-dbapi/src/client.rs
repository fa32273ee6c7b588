//! The native client seam.
//!
//! The driver never talks to the network itself. Everything goes through a
//! [`NativeClient`], which owns sessions, retries and transport.

use futures::future::BoxFuture;
use oxide_ydb_types::{ResolvedBindType, TableDescription, Value};

use crate::issue::Issue;
use crate::query::{DataQuery, Parameters};

/// A result row.
pub type Row = Vec<Value>;

/// A column of a result set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultColumn {
    /// Column name.
    pub name: String,
    /// Column type.
    pub ty: ResolvedBindType,
}

/// One result set returned by a query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultSet {
    /// Result columns.
    pub columns: Vec<ResultColumn>,
    /// Rows, one value per column.
    pub rows: Vec<Row>,
}

/// Kind of a scheme entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// A table.
    Table,
    /// A directory.
    Directory,
    /// Anything else (topics, views, ...).
    Other,
}

/// An entry of a scheme directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemeEntry {
    /// Entry name, relative to the listed directory.
    pub name: String,
    /// Entry kind.
    pub kind: EntryKind,
}

impl SchemeEntry {
    /// Creates a new entry.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: EntryKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// Operations the driver needs from the native YDB client.
///
/// Paths passed in are absolute (`/database/dir/table`).
pub trait NativeClient: Send + Sync {
    /// Executes a data query in its own transaction.
    fn execute_data_query<'a>(
        &'a self,
        query: &'a DataQuery,
        parameters: &'a Parameters,
    ) -> BoxFuture<'a, Result<Vec<ResultSet>, Issue>>;

    /// Executes a read-only scan query, streaming result sets.
    fn execute_scan_query<'a>(
        &'a self,
        query: &'a DataQuery,
        parameters: &'a Parameters,
    ) -> BoxFuture<'a, Result<Vec<ResultSet>, Issue>>;

    /// Executes a scheme (DDL) statement.
    fn execute_scheme<'a>(&'a self, yql_text: &'a str) -> BoxFuture<'a, Result<(), Issue>>;

    /// Describes a table.
    fn describe_table<'a>(
        &'a self,
        path: &'a str,
    ) -> BoxFuture<'a, Result<TableDescription, Issue>>;

    /// Checks that a scheme path exists.
    fn describe_path<'a>(&'a self, path: &'a str) -> BoxFuture<'a, Result<SchemeEntry, Issue>>;

    /// Lists a scheme directory.
    fn list_directory<'a>(
        &'a self,
        path: &'a str,
    ) -> BoxFuture<'a, Result<Vec<SchemeEntry>, Issue>>;
}
