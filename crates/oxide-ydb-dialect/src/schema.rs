//! Column facts used to decide optionality.
//!
//! The resolver only asks two questions about a written column: is it
//! nullable, and is it part of the primary key. [`SchemaLookup`] is that
//! seam. Caching lives behind it, never in the resolver.

use std::collections::HashMap;
use std::sync::Arc;

use oxide_ydb_types::TableDescription;
use parking_lot::RwLock;
use tracing::trace;

use crate::error::SchemaError;

/// Nullability facts about one column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnFact {
    /// The column accepts NULL.
    pub nullable: bool,
    /// The column is part of the primary key.
    pub primary_key: bool,
}

/// Answers nullability questions about table columns.
pub trait SchemaLookup {
    /// Returns whether `table.column` is nullable.
    ///
    /// # Errors
    ///
    /// Returns a not-found error for unknown tables or columns.
    fn is_nullable(&self, table: &str, column: &str) -> Result<bool, SchemaError>;

    /// Returns whether `table.column` is part of the primary key.
    ///
    /// # Errors
    ///
    /// Returns a not-found error for unknown tables or columns.
    fn is_primary_key(&self, table: &str, column: &str) -> Result<bool, SchemaError>;

    /// Returns both facts, or `None` when the column is unknown.
    ///
    /// # Errors
    ///
    /// Propagates failures other than not-found.
    fn column_fact(&self, table: &str, column: &str) -> Result<Option<ColumnFact>, SchemaError> {
        let facts = self
            .is_nullable(table, column)
            .and_then(|nullable| Ok((nullable, self.is_primary_key(table, column)?)));
        match facts {
            Ok((nullable, primary_key)) => Ok(Some(ColumnFact {
                nullable,
                primary_key,
            })),
            Err(err) if err.is_not_found() => Ok(None),
            Err(err) => Err(err),
        }
    }
}

/// Produces table descriptions on demand.
pub trait DescribeTable {
    /// Describes `table`.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::TableNotFound`] for unknown tables.
    fn describe_table(&self, table: &str) -> Result<TableDescription, SchemaError>;
}

/// A schema lookup that knows no tables.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoSchema;

impl SchemaLookup for NoSchema {
    fn is_nullable(&self, table: &str, _column: &str) -> Result<bool, SchemaError> {
        Err(SchemaError::TableNotFound(table.to_string()))
    }

    fn is_primary_key(&self, table: &str, _column: &str) -> Result<bool, SchemaError> {
        Err(SchemaError::TableNotFound(table.to_string()))
    }
}

/// A single description answers for the table it is named after.
impl SchemaLookup for TableDescription {
    fn is_nullable(&self, table: &str, column: &str) -> Result<bool, SchemaError> {
        if self.name != table {
            return Err(SchemaError::TableNotFound(table.to_string()));
        }
        nullable_in(self, table, column)
    }

    fn is_primary_key(&self, table: &str, column: &str) -> Result<bool, SchemaError> {
        if self.name != table {
            return Err(SchemaError::TableNotFound(table.to_string()));
        }
        primary_key_in(self, table, column)
    }
}

fn nullable_in(
    description: &TableDescription,
    table: &str,
    column: &str,
) -> Result<bool, SchemaError> {
    description
        .find_column(column)
        .map(|c| c.nullable)
        .ok_or_else(|| SchemaError::ColumnNotFound {
            table: table.to_string(),
            column: column.to_string(),
        })
}

fn primary_key_in(
    description: &TableDescription,
    table: &str,
    column: &str,
) -> Result<bool, SchemaError> {
    nullable_in(description, table, column)?;
    Ok(description.is_primary_key(column))
}

/// A fixed set of table descriptions.
#[derive(Debug, Default, Clone)]
pub struct StaticSchema {
    tables: HashMap<String, TableDescription>,
}

impl StaticSchema {
    /// Creates an empty schema.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a table description.
    #[must_use]
    pub fn with_table(mut self, table: TableDescription) -> Self {
        self.tables.insert(table.name.clone(), table);
        self
    }

    fn table(&self, table: &str) -> Result<&TableDescription, SchemaError> {
        self.tables
            .get(table)
            .ok_or_else(|| SchemaError::TableNotFound(table.to_string()))
    }
}

impl SchemaLookup for StaticSchema {
    fn is_nullable(&self, table: &str, column: &str) -> Result<bool, SchemaError> {
        nullable_in(self.table(table)?, table, column)
    }

    fn is_primary_key(&self, table: &str, column: &str) -> Result<bool, SchemaError> {
        primary_key_in(self.table(table)?, table, column)
    }
}

impl DescribeTable for StaticSchema {
    fn describe_table(&self, table: &str) -> Result<TableDescription, SchemaError> {
        self.table(table).cloned()
    }
}

/// Thread-safe cache of table descriptions keyed by table name.
///
/// Used directly it only knows what was inserted; wrap it in
/// [`ReadThrough`] to describe missing tables on first use.
#[derive(Debug, Default)]
pub struct SchemaCache {
    tables: RwLock<HashMap<String, Arc<TableDescription>>>,
}

impl SchemaCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached description of `table`.
    #[must_use]
    pub fn get(&self, table: &str) -> Option<Arc<TableDescription>> {
        let hit = self.tables.read().get(table).cloned();
        trace!(table, hit = hit.is_some(), "schema cache lookup");
        hit
    }

    /// Returns whether `table` is cached.
    #[must_use]
    pub fn contains(&self, table: &str) -> bool {
        self.tables.read().contains_key(table)
    }

    /// Caches `description` under `table`.
    pub fn insert(&self, table: impl Into<String>, description: TableDescription) {
        self.tables.write().insert(table.into(), Arc::new(description));
    }

    /// Forgets `table`, e.g. after DDL touching it.
    pub fn invalidate(&self, table: &str) {
        self.tables.write().remove(table);
    }

    /// Forgets every table.
    pub fn clear(&self) {
        self.tables.write().clear();
    }

    /// Returns the description of `table`, describing and caching it on a miss.
    ///
    /// # Errors
    ///
    /// Propagates the source's error; failures are not cached.
    pub fn get_or_describe<D>(
        &self,
        table: &str,
        source: &D,
    ) -> Result<Arc<TableDescription>, SchemaError>
    where
        D: DescribeTable + ?Sized,
    {
        if let Some(hit) = self.get(table) {
            return Ok(hit);
        }
        let description = Arc::new(source.describe_table(table)?);
        self.tables
            .write()
            .entry(table.to_string())
            .or_insert_with(|| Arc::clone(&description));
        Ok(description)
    }

    fn lookup<D>(
        &self,
        table: &str,
        source: Option<&D>,
    ) -> Result<Arc<TableDescription>, SchemaError>
    where
        D: DescribeTable + ?Sized,
    {
        match source {
            Some(source) => self.get_or_describe(table, source),
            None => self
                .get(table)
                .ok_or_else(|| SchemaError::TableNotFound(table.to_string())),
        }
    }
}

impl SchemaLookup for SchemaCache {
    fn is_nullable(&self, table: &str, column: &str) -> Result<bool, SchemaError> {
        nullable_in(&*self.lookup::<NoSource>(table, None)?, table, column)
    }

    fn is_primary_key(&self, table: &str, column: &str) -> Result<bool, SchemaError> {
        primary_key_in(&*self.lookup::<NoSource>(table, None)?, table, column)
    }
}

enum NoSource {}

impl DescribeTable for NoSource {
    fn describe_table(&self, _table: &str) -> Result<TableDescription, SchemaError> {
        match *self {}
    }
}

/// A [`SchemaCache`] that describes missing tables through a source.
pub struct ReadThrough<'a, D: ?Sized> {
    cache: &'a SchemaCache,
    source: &'a D,
}

impl<'a, D: DescribeTable + ?Sized> ReadThrough<'a, D> {
    /// Combines a cache with a description source.
    #[must_use]
    pub const fn new(cache: &'a SchemaCache, source: &'a D) -> Self {
        Self { cache, source }
    }
}

impl<D: DescribeTable + ?Sized> SchemaLookup for ReadThrough<'_, D> {
    fn is_nullable(&self, table: &str, column: &str) -> Result<bool, SchemaError> {
        nullable_in(&*self.cache.lookup(table, Some(self.source))?, table, column)
    }

    fn is_primary_key(&self, table: &str, column: &str) -> Result<bool, SchemaError> {
        primary_key_in(&*self.cache.lookup(table, Some(self.source))?, table, column)
    }
}
