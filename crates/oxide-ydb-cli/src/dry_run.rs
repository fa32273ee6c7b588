//! A native client that records queries instead of sending them.

use futures::future::BoxFuture;
use oxide_ydb_dbapi::{
    DataQuery, EntryKind, Issue, NativeClient, Parameters, ResultSet, SchemeEntry, StatusCode,
};
use oxide_ydb_dialect::{DescribeTable, StaticSchema};
use oxide_ydb_types::TableDescription;
use parking_lot::Mutex;
use tracing::debug;

/// What the dry-run client was asked to run.
#[derive(Debug, Clone)]
pub enum Recorded {
    Data(DataQuery, Parameters),
    Scheme(String),
}

/// Serves table descriptions from a fixture and records every query.
pub struct DryRunClient {
    database: String,
    schema: StaticSchema,
    recorded: Mutex<Vec<Recorded>>,
}

impl DryRunClient {
    pub fn new(database: impl Into<String>, schema: StaticSchema) -> Self {
        Self {
            database: database.into(),
            schema,
            recorded: Mutex::new(Vec::new()),
        }
    }

    pub fn take(&self) -> Vec<Recorded> {
        std::mem::take(&mut *self.recorded.lock())
    }

    fn relative<'a>(&self, path: &'a str) -> &'a str {
        path.strip_prefix(self.database.as_str())
            .map_or(path, |p| p.trim_start_matches('/'))
    }

    fn record_data(
        &self,
        query: &DataQuery,
        parameters: &Parameters,
    ) -> Result<Vec<ResultSet>, Issue> {
        debug!(name = %query.name, "recorded data query");
        self.recorded
            .lock()
            .push(Recorded::Data(query.clone(), parameters.clone()));
        Ok(Vec::new())
    }
}

impl NativeClient for DryRunClient {
    fn execute_data_query<'a>(
        &'a self,
        query: &'a DataQuery,
        parameters: &'a Parameters,
    ) -> BoxFuture<'a, Result<Vec<ResultSet>, Issue>> {
        Box::pin(async move { self.record_data(query, parameters) })
    }

    fn execute_scan_query<'a>(
        &'a self,
        query: &'a DataQuery,
        parameters: &'a Parameters,
    ) -> BoxFuture<'a, Result<Vec<ResultSet>, Issue>> {
        Box::pin(async move { self.record_data(query, parameters) })
    }

    fn execute_scheme<'a>(&'a self, yql_text: &'a str) -> BoxFuture<'a, Result<(), Issue>> {
        Box::pin(async move {
            self.recorded.lock().push(Recorded::Scheme(yql_text.to_string()));
            Ok(())
        })
    }

    fn describe_table<'a>(
        &'a self,
        path: &'a str,
    ) -> BoxFuture<'a, Result<TableDescription, Issue>> {
        Box::pin(async move {
            self.schema
                .describe_table(self.relative(path))
                .map_err(|err| Issue::new(StatusCode::SchemeError, err.to_string()))
        })
    }

    fn describe_path<'a>(&'a self, path: &'a str) -> BoxFuture<'a, Result<SchemeEntry, Issue>> {
        Box::pin(async move {
            let table = self.relative(path);
            self.schema
                .describe_table(table)
                .map(|_| SchemeEntry::new(table, EntryKind::Table))
                .map_err(|err| Issue::new(StatusCode::SchemeError, err.to_string()))
        })
    }

    fn list_directory<'a>(
        &'a self,
        _path: &'a str,
    ) -> BoxFuture<'a, Result<Vec<SchemeEntry>, Issue>> {
        Box::pin(async move { Ok(Vec::new()) })
    }
}
