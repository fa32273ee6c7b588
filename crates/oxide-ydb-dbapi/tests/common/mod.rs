#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use futures::future::BoxFuture;
use oxide_ydb_dbapi::{
    DataQuery, EntryKind, Issue, NativeClient, Parameters, ResultColumn, ResultSet, SchemeEntry,
    StatusCode,
};
use oxide_ydb_types::{PrimitiveType, ResolvedBindType, TableDescription, Value};

/// In-memory native client that records what it was asked to run.
#[derive(Default)]
pub struct FakeClient {
    pub data_queries: Mutex<Vec<(DataQuery, Parameters)>>,
    pub scan_queries: Mutex<Vec<(DataQuery, Parameters)>>,
    pub schemes: Mutex<Vec<String>>,
    pub results: Mutex<VecDeque<Result<Vec<ResultSet>, Issue>>>,
    pub tables: HashMap<String, TableDescription>,
    pub directories: HashMap<String, Vec<SchemeEntry>>,
}

impl FakeClient {
    pub fn push_result(&self, result: Result<Vec<ResultSet>, Issue>) {
        self.results.lock().unwrap().push_back(result);
    }

    fn next_result(&self) -> Result<Vec<ResultSet>, Issue> {
        self.results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}

impl NativeClient for FakeClient {
    fn execute_data_query<'a>(
        &'a self,
        query: &'a DataQuery,
        parameters: &'a Parameters,
    ) -> BoxFuture<'a, Result<Vec<ResultSet>, Issue>> {
        Box::pin(async move {
            self.data_queries
                .lock()
                .unwrap()
                .push((query.clone(), parameters.clone()));
            self.next_result()
        })
    }

    fn execute_scan_query<'a>(
        &'a self,
        query: &'a DataQuery,
        parameters: &'a Parameters,
    ) -> BoxFuture<'a, Result<Vec<ResultSet>, Issue>> {
        Box::pin(async move {
            self.scan_queries
                .lock()
                .unwrap()
                .push((query.clone(), parameters.clone()));
            self.next_result()
        })
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
            } else if path == "/broken" {
                Err(Issue::new(StatusCode::Unavailable, "node down"))
            } else {
                Err(Issue::new(StatusCode::SchemeError, format!("no path {path}")))
            }
        })
    }

    fn list_directory<'a>(
        &'a self,
        path: &'a str,
    ) -> BoxFuture<'a, Result<Vec<SchemeEntry>, Issue>> {
        Box::pin(async move { Ok(self.directories.get(path).cloned().unwrap_or_default()) })
    }
}

pub fn int_column(name: &str) -> ResultColumn {
    ResultColumn {
        name: name.to_string(),
        ty: ResolvedBindType::required(PrimitiveType::Int64),
    }
}

pub fn int_rows(values: &[i64]) -> ResultSet {
    ResultSet {
        columns: vec![int_column("id")],
        rows: values.iter().map(|v| vec![Value::Int(*v)]).collect(),
    }
}
