//! Abstract (toolkit-side) column and value types.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Precision used for decimals inferred from runtime values.
pub const DEFAULT_DECIMAL_PRECISION: u8 = 22;

/// Scale used for decimals inferred from runtime values.
pub const DEFAULT_DECIMAL_SCALE: u8 = 9;

/// Abstract SQL types as seen by the statement author.
///
/// These describe what a column or a bind *means*; the
/// [descriptor table](crate::descriptor) maps them onto YDB wire types.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SqlType {
    /// The "no type" placeholder. Never declared on the wire.
    Null,
    /// Boolean.
    Boolean,

    // Sized integers
    /// Signed 8-bit integer.
    Int8,
    /// Signed 16-bit integer.
    Int16,
    /// Signed 32-bit integer.
    Int32,
    /// Signed 64-bit integer.
    Int64,
    /// Unsigned 8-bit integer.
    UInt8,
    /// Unsigned 16-bit integer.
    UInt16,
    /// Unsigned 32-bit integer.
    UInt32,
    /// Unsigned 64-bit integer.
    UInt64,
    /// Generic integer of unspecified width.
    Integer,

    // Floating point
    /// Single precision float.
    Float,
    /// Double precision float.
    Double,
    /// Fixed-point decimal.
    Decimal {
        /// Total number of digits.
        precision: u8,
        /// Number of digits after the decimal point.
        scale: u8,
    },

    // Strings
    /// UTF-8 text (`CHAR`, `VARCHAR`, `TEXT`, ...).
    Text,
    /// Binary string (`BINARY`, `BLOB`).
    Binary,

    // Date/time
    /// Calendar date.
    Date,
    /// Date and time with second precision.
    DateTime,
    /// Date and time with microsecond precision.
    Timestamp,
    /// Time delta.
    Interval,

    // Documents
    /// JSON text.
    Json,
    /// Binary JSON document.
    JsonDocument,
    /// A path into a JSON value.
    JsonPath,
    /// An integer index into a JSON array.
    JsonIndex,
    /// UUID.
    Uuid,

    // Containers
    /// Homogeneous list.
    List(Box<SqlType>),
    /// Homogeneous set.
    Set(Box<SqlType>),
    /// Named fields, always kept in sorted key order.
    Struct(BTreeMap<String, SqlType>),

    /// Database-specific type with no known mapping.
    Custom(String),
}

impl SqlType {
    /// Returns `true` for the "no type" placeholder.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Creates a list type.
    #[must_use]
    pub fn list(item: Self) -> Self {
        Self::List(Box::new(item))
    }

    /// Creates a set type.
    #[must_use]
    pub fn set(item: Self) -> Self {
        Self::Set(Box::new(item))
    }

    /// Creates a struct type; fields end up sorted by name.
    #[must_use]
    pub fn structure<I, K>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, Self)>,
        K: Into<String>,
    {
        Self::Struct(fields.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Decimal with the precision and scale used for inferred values.
    #[must_use]
    pub const fn default_decimal() -> Self {
        Self::Decimal {
            precision: DEFAULT_DECIMAL_PRECISION,
            scale: DEFAULT_DECIMAL_SCALE,
        }
    }
}

impl fmt::Display for SqlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("NULL"),
            Self::Boolean => f.write_str("BOOLEAN"),
            Self::Int8 => f.write_str("INT8"),
            Self::Int16 => f.write_str("INT16"),
            Self::Int32 => f.write_str("INT32"),
            Self::Int64 => f.write_str("INT64"),
            Self::UInt8 => f.write_str("UINT8"),
            Self::UInt16 => f.write_str("UINT16"),
            Self::UInt32 => f.write_str("UINT32"),
            Self::UInt64 => f.write_str("UINT64"),
            Self::Integer => f.write_str("INTEGER"),
            Self::Float => f.write_str("FLOAT"),
            Self::Double => f.write_str("DOUBLE"),
            Self::Decimal { precision, scale } => write!(f, "DECIMAL({precision}, {scale})"),
            Self::Text => f.write_str("TEXT"),
            Self::Binary => f.write_str("BINARY"),
            Self::Date => f.write_str("DATE"),
            Self::DateTime => f.write_str("DATETIME"),
            Self::Timestamp => f.write_str("TIMESTAMP"),
            Self::Interval => f.write_str("INTERVAL"),
            Self::Json => f.write_str("JSON"),
            Self::JsonDocument => f.write_str("JSONDOCUMENT"),
            Self::JsonPath => f.write_str("JSONPATH"),
            Self::JsonIndex => f.write_str("JSONINDEX"),
            Self::Uuid => f.write_str("UUID"),
            Self::List(item) => write!(f, "LIST<{item}>"),
            Self::Set(item) => write!(f, "SET<{item}>"),
            Self::Struct(fields) => {
                f.write_str("STRUCT<")?;
                for (i, (name, ty)) in fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{name}: {ty}")?;
                }
                f.write_str(">")
            }
            Self::Custom(name) => f.write_str(name),
        }
    }
}
