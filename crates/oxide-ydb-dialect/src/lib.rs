//! # oxide-ydb-dialect
//!
//! YQL dialect adapter for YDB.
//!
//! Before a parameterized statement is sent, every wire parameter needs a
//! declared YDB type. The [`resolver`] derives it from the statement's
//! [`BindPlaceholder`]s, the parameter rows and the schema of the table
//! being written; [`prepare`] turns the result into a [`YdbQuery`] with
//! typed parameters; [`YqlDialect`] runs it through a DBAPI cursor.
//!
//! ```rust
//! use oxide_ydb_dialect::{
//!     BindPlaceholder, CompiledStatement, DialectOptions, ParameterSet, YqlDialect,
//! };
//! use oxide_ydb_types::Value;
//!
//! let statement = CompiledStatement::new("SELECT * FROM users WHERE id = :id")
//!     .placeholder(BindPlaceholder::new("id"));
//! let row = ParameterSet::from([("id".to_string(), Value::Int(5))]);
//!
//! let prepared = YqlDialect::new(DialectOptions::new().with_declare(true))
//!     .prepare(&statement, &[row])
//!     .unwrap();
//! assert_eq!(
//!     prepared.query.yql_text,
//!     "DECLARE $`id` as Int64;\nSELECT * FROM users WHERE id = $`id`"
//! );
//! ```
//!
//! [`YdbQuery`]: oxide_ydb_dbapi::YdbQuery

pub mod bind;
pub mod config;
pub mod dialect;
pub mod error;
pub mod expansion;
pub mod prepare;
pub mod resolver;
pub mod schema;

pub use bind::{BindKind, BindPlaceholder, CompiledStatement, DmlTarget, ParameterSet};
pub use config::DialectOptions;
pub use dialect::{Dialect, YqlDialect, PING_STATEMENT};
pub use error::{DialectError, Result, SchemaError};
pub use expansion::{expanded_slot_names, slots_from_keys};
pub use prepare::PreparedQuery;
pub use resolver::{resolve, BindTypes};
pub use schema::{
    ColumnFact, DescribeTable, NoSchema, ReadThrough, SchemaCache, SchemaLookup, StaticSchema,
};
