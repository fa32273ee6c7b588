//! Runtime parameter values.
//!
//! Callers convert whatever native values they hold into [`Value`] before a
//! statement is executed; bind types are inferred from these variants rather
//! than from reflection.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeDelta, Utc};
use rust_decimal::Decimal;

/// A parameter value with a dynamic type.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// NULL value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Floating point value.
    Float(f64),
    /// Fixed-point decimal value.
    Decimal(Decimal),
    /// Text value.
    Text(String),
    /// Byte string value.
    Bytes(Vec<u8>),
    /// Calendar date.
    Date(NaiveDate),
    /// Date and time.
    DateTime(NaiveDateTime),
    /// Time delta.
    Interval(TimeDelta),
    /// Ordered list of values.
    List(Vec<Value>),
    /// Set of values.
    Set(Vec<Value>),
    /// Mapping with ordered keys.
    Struct(BTreeMap<String, Value>),
    /// A host value with no wire representation, kept by type name so that
    /// type resolution can report it.
    Opaque(String),
}

impl Value {
    /// Returns `true` for [`Value::Null`].
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Name of the dynamic type, used in error messages.
    #[must_use]
    pub fn type_name(&self) -> &str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Decimal(_) => "decimal",
            Self::Text(_) => "text",
            Self::Bytes(_) => "bytes",
            Self::Date(_) => "date",
            Self::DateTime(_) => "datetime",
            Self::Interval(_) => "interval",
            Self::List(_) => "list",
            Self::Set(_) => "set",
            Self::Struct(_) => "struct",
            Self::Opaque(name) => name,
        }
    }

    /// Builds a list from convertible items.
    pub fn list<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: ToYdbValue,
    {
        Self::List(items.into_iter().map(ToYdbValue::to_ydb_value).collect())
    }

    /// Builds a set from convertible items.
    pub fn set<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: ToYdbValue,
    {
        Self::Set(items.into_iter().map(ToYdbValue::to_ydb_value).collect())
    }

    /// Builds a struct from named convertible fields.
    pub fn structure<I, K, T>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, T)>,
        K: Into<String>,
        T: ToYdbValue,
    {
        Self::Struct(
            fields
                .into_iter()
                .map(|(k, v)| (k.into(), v.to_ydb_value()))
                .collect(),
        )
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("NULL"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Decimal(d) => write!(f, "{d}"),
            Self::Text(s) => write!(f, "{s:?}"),
            Self::Bytes(b) => {
                f.write_str("b\"")?;
                for byte in b {
                    write!(f, "\\x{byte:02x}")?;
                }
                f.write_str("\"")
            }
            Self::Date(d) => write!(f, "{d}"),
            Self::DateTime(dt) => write!(f, "{dt}"),
            Self::Interval(td) => write!(f, "{td}"),
            Self::List(items) | Self::Set(items) => {
                let (open, close) = if matches!(self, Self::Set(_)) {
                    ("{", "}")
                } else {
                    ("[", "]")
                };
                f.write_str(open)?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str(close)
            }
            Self::Struct(fields) => {
                f.write_str("<|")?;
                for (i, (name, value)) in fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{name}: {value}")?;
                }
                f.write_str("|>")
            }
            Self::Opaque(name) => write!(f, "<{name}>"),
        }
    }
}

/// Trait for types that can be converted to parameter values.
pub trait ToYdbValue {
    /// Converts the value to a [`Value`].
    fn to_ydb_value(self) -> Value;
}

impl ToYdbValue for Value {
    fn to_ydb_value(self) -> Value {
        self
    }
}

impl ToYdbValue for bool {
    fn to_ydb_value(self) -> Value {
        Value::Bool(self)
    }
}

impl ToYdbValue for i64 {
    fn to_ydb_value(self) -> Value {
        Value::Int(self)
    }
}

impl ToYdbValue for i32 {
    fn to_ydb_value(self) -> Value {
        Value::Int(i64::from(self))
    }
}

impl ToYdbValue for i16 {
    fn to_ydb_value(self) -> Value {
        Value::Int(i64::from(self))
    }
}

impl ToYdbValue for i8 {
    fn to_ydb_value(self) -> Value {
        Value::Int(i64::from(self))
    }
}

impl ToYdbValue for u32 {
    fn to_ydb_value(self) -> Value {
        Value::Int(i64::from(self))
    }
}

impl ToYdbValue for u16 {
    fn to_ydb_value(self) -> Value {
        Value::Int(i64::from(self))
    }
}

impl ToYdbValue for u8 {
    fn to_ydb_value(self) -> Value {
        Value::Int(i64::from(self))
    }
}

impl ToYdbValue for f64 {
    fn to_ydb_value(self) -> Value {
        Value::Float(self)
    }
}

impl ToYdbValue for f32 {
    fn to_ydb_value(self) -> Value {
        Value::Float(f64::from(self))
    }
}

impl ToYdbValue for Decimal {
    fn to_ydb_value(self) -> Value {
        Value::Decimal(self)
    }
}

impl ToYdbValue for String {
    fn to_ydb_value(self) -> Value {
        Value::Text(self)
    }
}

impl ToYdbValue for &str {
    fn to_ydb_value(self) -> Value {
        Value::Text(String::from(self))
    }
}

impl ToYdbValue for Vec<u8> {
    fn to_ydb_value(self) -> Value {
        Value::Bytes(self)
    }
}

impl ToYdbValue for &[u8] {
    fn to_ydb_value(self) -> Value {
        Value::Bytes(self.to_vec())
    }
}

impl ToYdbValue for NaiveDate {
    fn to_ydb_value(self) -> Value {
        Value::Date(self)
    }
}

impl ToYdbValue for NaiveDateTime {
    fn to_ydb_value(self) -> Value {
        Value::DateTime(self)
    }
}

impl ToYdbValue for DateTime<Utc> {
    fn to_ydb_value(self) -> Value {
        Value::DateTime(self.naive_utc())
    }
}

impl ToYdbValue for TimeDelta {
    fn to_ydb_value(self) -> Value {
        Value::Interval(self)
    }
}

impl<T: ToYdbValue> ToYdbValue for BTreeMap<String, T> {
    fn to_ydb_value(self) -> Value {
        Value::Struct(
            self.into_iter()
                .map(|(k, v)| (k, v.to_ydb_value()))
                .collect(),
        )
    }
}

impl<T: ToYdbValue> ToYdbValue for Option<T> {
    fn to_ydb_value(self) -> Value {
        match self {
            Some(v) => v.to_ydb_value(),
            None => Value::Null,
        }
    }
}
