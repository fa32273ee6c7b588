//! The YQL dialect.
//!
//! Database-specific behavior lives behind the [`Dialect`] trait;
//! [`YqlDialect`] adds the execution glue that prepares statements and hands
//! them to a DBAPI cursor.

use std::sync::Arc;

use oxide_ydb_dbapi::{Connection, ConnectionConfig, Cursor, NativeClient};
use tracing::{debug, warn};

use crate::bind::{CompiledStatement, ParameterSet};
use crate::config::DialectOptions;
use crate::error::{Result, SchemaError};
use crate::prepare::{self, PreparedQuery};
use crate::schema::{SchemaCache, SchemaLookup};

/// Trait for SQL dialect-specific behavior.
pub trait Dialect {
    /// Returns the name of the dialect.
    fn name(&self) -> &'static str;

    /// Returns the identifier quote character.
    fn identifier_quote(&self) -> char {
        '"'
    }

    /// Returns the prefix of parameter references in statement text.
    fn parameter_prefix(&self) -> char {
        '?'
    }

    /// Returns whether the dialect supports a RETURNING clause.
    fn supports_returning(&self) -> bool {
        false
    }

    /// Returns whether the dialect has a native UPSERT statement.
    fn supports_upsert(&self) -> bool {
        false
    }

    /// Quotes an identifier.
    fn quote_identifier(&self, name: &str) -> String {
        let quote = self.identifier_quote();
        format!("{quote}{name}{quote}")
    }
}

/// Statement used to check that a connection is alive.
pub const PING_STATEMENT: &str = "SELECT 1 AS value";

/// YDB's YQL dialect.
#[derive(Debug, Default, Clone)]
pub struct YqlDialect {
    options: DialectOptions,
    schema: Arc<SchemaCache>,
}

impl Dialect for YqlDialect {
    fn name(&self) -> &'static str {
        "yql"
    }

    fn identifier_quote(&self) -> char {
        '`'
    }

    fn parameter_prefix(&self) -> char {
        '$'
    }

    fn supports_upsert(&self) -> bool {
        true
    }
}

impl YqlDialect {
    /// Creates a dialect with its own schema cache.
    #[must_use]
    pub fn new(options: DialectOptions) -> Self {
        Self {
            options,
            schema: Arc::new(SchemaCache::new()),
        }
    }

    /// Uses a shared schema cache.
    #[must_use]
    pub fn with_schema_cache(mut self, schema: Arc<SchemaCache>) -> Self {
        self.schema = schema;
        self
    }

    /// Returns the dialect options.
    #[must_use]
    pub const fn options(&self) -> &DialectOptions {
        &self.options
    }

    /// Returns the schema cache.
    #[must_use]
    pub const fn schema_cache(&self) -> &Arc<SchemaCache> {
        &self.schema
    }

    /// Returns the connection settings with the database path made absolute.
    #[must_use]
    pub fn create_connect_args(&self, config: ConnectionConfig) -> ConnectionConfig {
        config.normalized()
    }

    /// Prepares `statement` using the cached schema.
    ///
    /// # Errors
    ///
    /// See [`prepare::prepare`].
    pub fn prepare(
        &self,
        statement: &CompiledStatement,
        rows: &[ParameterSet],
    ) -> Result<PreparedQuery> {
        self.prepare_with(statement, rows, &*self.schema)
    }

    /// Prepares `statement` against an explicit schema lookup.
    ///
    /// # Errors
    ///
    /// See [`prepare::prepare`].
    pub fn prepare_with<S>(
        &self,
        statement: &CompiledStatement,
        rows: &[ParameterSet],
        schema: &S,
    ) -> Result<PreparedQuery>
    where
        S: SchemaLookup + ?Sized,
    {
        prepare::prepare(statement, rows, schema, &self.options)
    }

    /// Makes sure the DML target of `statement` is in the schema cache.
    ///
    /// A table the database does not know is skipped; its binds are then
    /// typed from values alone.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Describe`] when describing fails otherwise.
    pub async fn warm_schema<C: NativeClient>(
        &self,
        connection: &Connection<C>,
        statement: &CompiledStatement,
    ) -> Result<()> {
        let Some(target) = &statement.dml_target else {
            return Ok(());
        };
        if self.schema.contains(&target.table) {
            return Ok(());
        }
        match connection.describe(&target.table).await {
            Ok(description) => {
                debug!(table = %target.table, "cached table description");
                self.schema.insert(target.table.clone(), description);
                Ok(())
            }
            Err(err) if err.is_programming() => {
                warn!(table = %target.table, error = %err, "cannot describe DML target");
                Ok(())
            }
            Err(err) => Err(SchemaError::Describe {
                table: target.table.clone(),
                message: err.to_string(),
            }
            .into()),
        }
    }

    /// Prepares and executes `statement` with one parameter row.
    ///
    /// Scheme statements clear the schema cache.
    ///
    /// # Errors
    ///
    /// Resolution errors are returned before anything is sent.
    pub async fn do_execute<C: NativeClient>(
        &self,
        connection: &Connection<C>,
        cursor: &mut Cursor<C>,
        statement: &CompiledStatement,
        parameters: Option<&ParameterSet>,
    ) -> Result<()> {
        self.warm_schema(connection, statement).await?;
        let rows = parameters.map(std::slice::from_ref).unwrap_or_default();
        let prepared = self.prepare(statement, rows)?;
        cursor.execute(&prepared.query, prepared.single()).await?;
        if statement.is_ddl {
            self.schema.clear();
        }
        Ok(())
    }

    /// Prepares `statement` once for all rows and executes it per row.
    ///
    /// # Errors
    ///
    /// Resolution errors are returned before anything is sent.
    pub async fn do_executemany<C: NativeClient>(
        &self,
        connection: &Connection<C>,
        cursor: &mut Cursor<C>,
        statement: &CompiledStatement,
        rows: &[ParameterSet],
    ) -> Result<()> {
        self.warm_schema(connection, statement).await?;
        let prepared = self.prepare(statement, rows)?;
        cursor.executemany(&prepared.query, &prepared.parameters).await?;
        Ok(())
    }

    /// Runs [`PING_STATEMENT`] on a fresh cursor.
    ///
    /// # Errors
    ///
    /// Returns the driver error when the database cannot be reached.
    pub async fn do_ping<C: NativeClient>(&self, connection: &Connection<C>) -> Result<bool> {
        let mut cursor = connection.cursor();
        let prepared = self.prepare(&CompiledStatement::new(PING_STATEMENT), &[])?;
        let outcome = cursor.execute(&prepared.query, None).await;
        cursor.close();
        outcome?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quoting() {
        let dialect = YqlDialect::default();
        assert_eq!(dialect.name(), "yql");
        assert_eq!(dialect.quote_identifier("users"), "`users`");
        assert_eq!(dialect.parameter_prefix(), '$');
        assert!(dialect.supports_upsert());
        assert!(!dialect.supports_returning());
    }

    #[test]
    fn test_create_connect_args() {
        let dialect = YqlDialect::default();
        let config = ConnectionConfig {
            database: "local".into(),
            ..ConnectionConfig::default()
        };
        assert_eq!(dialect.create_connect_args(config).database, "/local");
    }
}
