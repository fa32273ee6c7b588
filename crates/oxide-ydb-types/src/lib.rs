//! # oxide-ydb-types
//!
//! Type model shared by the YDB driver and the YQL dialect.
//!
//! - [`SqlType`]: abstract column/bind types as the statement author sees them
//! - [`WireType`] / [`ResolvedBindType`]: what is declared to YDB
//! - [`Value`]: runtime parameter values with a dynamic type
//! - [`descriptor`]: the mapping between the three
//!
//! ```rust
//! use oxide_ydb_types::{descriptor, SqlType, Value};
//!
//! let ty = descriptor::infer_sql_type(&Value::list([1_i64, 2, 3]))
//!     .unwrap()
//!     .unwrap();
//! assert_eq!(ty, SqlType::list(SqlType::Int64));
//! assert_eq!(descriptor::wire_type(&ty).unwrap().to_string(), "List<Int64>");
//! ```

pub mod descriptor;
pub mod error;
pub mod sql_type;
pub mod table;
pub mod value;
pub mod wire;

pub use error::{Result, TypeError};
pub use sql_type::SqlType;
pub use table::{ColumnDescription, TableDescription};
pub use value::{ToYdbValue, Value};
pub use wire::{PrimitiveType, ResolvedBindType, WireType};
