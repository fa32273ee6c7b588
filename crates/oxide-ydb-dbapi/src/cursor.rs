//! DBAPI-style cursor.

use std::collections::VecDeque;
use std::sync::Arc;

use tracing::debug;

use crate::client::{NativeClient, ResultSet, Row};
use crate::error::Result;
use crate::query::{DataQuery, Parameters, YdbQuery};

/// Name and rendered type of a result column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnInfo {
    /// Column name.
    pub name: String,
    /// Rendered YQL type, e.g. `Optional<Utf8>`.
    pub type_code: String,
}

/// Executes queries and buffers their rows.
///
/// Rows of successive `execute` calls are appended to the same buffer until
/// they are fetched or the cursor is closed.
pub struct Cursor<C: NativeClient> {
    client: Arc<C>,
    table_path_prefix: String,
    use_scan_query: bool,
    description: Option<Vec<ColumnInfo>>,
    rows: VecDeque<Row>,
    /// Number of rows `fetchmany(None)` returns.
    pub arraysize: usize,
}

impl<C: NativeClient> Cursor<C> {
    /// Creates a cursor over `client`.
    #[must_use]
    pub fn new(client: Arc<C>, table_path_prefix: impl Into<String>, use_scan_query: bool) -> Self {
        Self {
            client,
            table_path_prefix: table_path_prefix.into(),
            use_scan_query,
            description: None,
            rows: VecDeque::new(),
            arraysize: 1,
        }
    }

    /// Executes one statement.
    ///
    /// Scheme statements go through scheme execution; data statements run as
    /// data queries, or scan queries when the cursor was configured so.
    ///
    /// # Errors
    ///
    /// Returns the classified native issue.
    pub async fn execute(
        &mut self,
        operation: &YdbQuery,
        parameters: Option<&Parameters>,
    ) -> Result<()> {
        let yql_text = self.with_pragma(&operation.yql_text);

        if operation.is_ddl {
            debug!("executing scheme query");
            self.client.execute_scheme(&yql_text).await?;
            return Ok(());
        }

        let empty = Parameters::new();
        let parameters = parameters.unwrap_or(&empty);
        let query = DataQuery::new(yql_text, operation.parameters_types.clone());
        debug!(
            name = %query.name,
            typed = query.parameters_types.len(),
            scan = self.use_scan_query,
            "executing data query"
        );

        let result_sets = if self.use_scan_query {
            self.client.execute_scan_query(&query, parameters).await?
        } else {
            self.client.execute_data_query(&query, parameters).await?
        };
        self.buffer(result_sets);
        Ok(())
    }

    /// Executes the statement once per parameter set.
    ///
    /// # Errors
    ///
    /// Stops at and returns the first failure.
    pub async fn executemany(
        &mut self,
        operation: &YdbQuery,
        seq_of_parameters: &[Parameters],
    ) -> Result<()> {
        for parameters in seq_of_parameters {
            self.execute(operation, Some(parameters)).await?;
        }
        Ok(())
    }

    /// Returns the next buffered row.
    pub fn fetchone(&mut self) -> Option<Row> {
        self.rows.pop_front()
    }

    /// Returns up to `size` rows, [`arraysize`](Self::arraysize) when `size`
    /// is `None` or zero.
    pub fn fetchmany(&mut self, size: Option<usize>) -> Vec<Row> {
        let size = size.filter(|n| *n > 0).unwrap_or(self.arraysize);
        let n = size.min(self.rows.len());
        self.rows.drain(..n).collect()
    }

    /// Returns all remaining rows.
    pub fn fetchall(&mut self) -> Vec<Row> {
        self.rows.drain(..).collect()
    }

    /// Skips the remaining rows of the current result.
    pub fn nextset(&mut self) {
        self.rows.clear();
    }

    /// Number of rows still buffered.
    #[must_use]
    pub fn rowcount(&self) -> usize {
        self.rows.len()
    }

    /// Columns of the last result set, if any.
    #[must_use]
    pub fn description(&self) -> Option<&[ColumnInfo]> {
        self.description.as_deref()
    }

    /// Drops buffered rows and the description.
    pub fn close(&mut self) {
        self.rows.clear();
        self.description = None;
    }

    fn with_pragma(&self, yql_text: &str) -> String {
        if self.table_path_prefix.is_empty() {
            yql_text.to_string()
        } else {
            format!(
                "PRAGMA TablePathPrefix = \"{}\";\n{yql_text}",
                self.table_path_prefix
            )
        }
    }

    fn buffer(&mut self, result_sets: Vec<ResultSet>) {
        for result_set in result_sets {
            self.description = Some(
                result_set
                    .columns
                    .iter()
                    .map(|c| ColumnInfo {
                        name: c.name.clone(),
                        type_code: c.ty.to_string(),
                    })
                    .collect(),
            );
            self.rows.extend(result_set.rows);
        }
    }
}
