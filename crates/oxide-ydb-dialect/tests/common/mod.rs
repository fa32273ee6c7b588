#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use futures::future::BoxFuture;
use oxide_ydb_dbapi::{
    DataQuery, EntryKind, Issue, NativeClient, Parameters, ResultSet, SchemeEntry, StatusCode,
};
use oxide_ydb_dialect::{ParameterSet, StaticSchema};
use oxide_ydb_types::{ColumnDescription, PrimitiveType, TableDescription, Value};

/// `users(id Uint64 NOT NULL PK, email Utf8 NULL, name Utf8 NOT NULL, score Int64 NULL)`.
pub fn users_table() -> TableDescription {
    TableDescription::new("users")
        .column(ColumnDescription::new("id", PrimitiveType::Uint64))
        .column(ColumnDescription::new("email", PrimitiveType::Utf8).nullable())
        .column(ColumnDescription::new("name", PrimitiveType::Utf8))
        .column(ColumnDescription::new("score", PrimitiveType::Int64).nullable())
        .primary_key(&["id"])
}

/// Like [`users_table`] but with a physically nullable primary key.
pub fn nullable_key_table() -> TableDescription {
    TableDescription::new("events")
        .column(ColumnDescription::new("id", PrimitiveType::Int64).nullable())
        .column(ColumnDescription::new("val", PrimitiveType::Int64).nullable())
        .primary_key(&["id"])
}

pub fn schema() -> StaticSchema {
    StaticSchema::new()
        .with_table(users_table())
        .with_table(nullable_key_table())
}

pub fn row(entries: &[(&str, Value)]) -> ParameterSet {
    entries
        .iter()
        .map(|(name, value)| ((*name).to_string(), value.clone()))
        .collect()
}

/// Native client that records queries and serves descriptions from memory.
#[derive(Default)]
pub struct FakeClient {
    pub data_queries: Mutex<Vec<(DataQuery, Parameters)>>,
    pub schemes: Mutex<Vec<String>>,
    pub tables: HashMap<String, TableDescription>,
    pub describe_calls: AtomicUsize,
    pub unavailable: bool,
}

impl FakeClient {
    pub fn with_table(mut self, path: &str, table: TableDescription) -> Self {
        self.tables.insert(path.to_string(), table);
        self
    }

    pub fn describes(&self) -> usize {
        self.describe_calls.load(Ordering::SeqCst)
    }

    pub fn last_query(&self) -> Option<(DataQuery, Parameters)> {
        self.data_queries.lock().unwrap().last().cloned()
    }
}

impl NativeClient for FakeClient {
    fn execute_data_query<'a>(
        &'a self,
        query: &'a DataQuery,
        parameters: &'a Parameters,
    ) -> BoxFuture<'a, Result<Vec<ResultSet>, Issue>> {
        Box::pin(async move {
            if self.unavailable {
                return Err(Issue::new(StatusCode::Unavailable, "node down"));
            }
            self.data_queries
                .lock()
                .unwrap()
                .push((query.clone(), parameters.clone()));
            Ok(Vec::new())
        })
    }

    fn execute_scan_query<'a>(
        &'a self,
        query: &'a DataQuery,
        parameters: &'a Parameters,
    ) -> BoxFuture<'a, Result<Vec<ResultSet>, Issue>> {
        self.execute_data_query(query, parameters)
    }

    fn execute_scheme<'a>(&'a self, yql_text: &'a str) -> BoxFuture<'a, Result<(), Issue>> {
        Box::pin(async move {
            self.schemes.lock().unwrap().push(yql_text.to_string());
            Ok(())
        })
    }

    fn describe_table<'a>(
        &'a self,
        path: &'a str,
    ) -> BoxFuture<'a, Result<TableDescription, Issue>> {
        Box::pin(async move {
            self.describe_calls.fetch_add(1, Ordering::SeqCst);
            if self.unavailable {
                return Err(Issue::new(StatusCode::Unavailable, "node down"));
            }
            self.tables
                .get(path)
                .cloned()
                .ok_or_else(|| Issue::new(StatusCode::SchemeError, format!("no table {path}")))
        })
    }

    fn describe_path<'a>(&'a self, path: &'a str) -> BoxFuture<'a, Result<SchemeEntry, Issue>> {
        Box::pin(async move {
            if self.tables.contains_key(path) {
                Ok(SchemeEntry::new(path, EntryKind::Table))
            } else {
                Err(Issue::new(StatusCode::SchemeError, format!("no path {path}")))
            }
        })
    }

    fn list_directory<'a>(
        &'a self,
        _path: &'a str,
    ) -> BoxFuture<'a, Result<Vec<SchemeEntry>, Issue>> {
        Box::pin(async move { Ok(Vec::new()) })
    }
}
