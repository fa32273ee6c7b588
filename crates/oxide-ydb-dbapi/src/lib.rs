//! # oxide-ydb-dbapi
//!
//! A minimal DBAPI-style driver for YDB.
//!
//! The driver wraps a [`NativeClient`] (sessions, retries and transport
//! live there) and exposes the familiar cursor surface:
//!
//! - [`Connection`]: cursor factory plus table metadata
//! - [`Cursor`]: `execute`, `executemany`, `fetchone`, `fetchmany`, `fetchall`
//! - [`YdbQuery`]: YQL text, declared parameter types, DDL flag
//! - [`DbApiError`]: the DBAPI error taxonomy, classified from native issues

pub mod client;
pub mod config;
pub mod connection;
pub mod cursor;
pub mod error;
pub mod issue;
pub mod query;

pub use client::{EntryKind, NativeClient, ResultColumn, ResultSet, Row, SchemeEntry};
pub use config::ConnectionConfig;
pub use connection::Connection;
pub use cursor::{ColumnInfo, Cursor};
pub use error::{DbApiError, Result};
pub use issue::{Issue, StatusCode};
pub use query::{DataQuery, ParameterTypes, Parameters, TypedValue, YdbQuery};
