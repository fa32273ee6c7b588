//! YDB wire types.
//!
//! A [`WireType`] is what gets declared to the database for a parameter or
//! reported for a result column. Nullability is carried separately by
//! [`ResolvedBindType::optional`] so that nested list items and struct
//! fields are never optional.

use std::fmt;

use serde::{Deserialize, Serialize};

/// YDB primitive type tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PrimitiveType {
    /// `Bool`.
    Bool,
    /// `Int8`.
    Int8,
    /// `Uint8`.
    Uint8,
    /// `Int16`.
    Int16,
    /// `Uint16`.
    Uint16,
    /// `Int32`.
    Int32,
    /// `Uint32`.
    Uint32,
    /// `Int64`.
    Int64,
    /// `Uint64`.
    Uint64,
    /// `Float`.
    Float,
    /// `Double`.
    Double,
    /// `String` (arbitrary bytes).
    String,
    /// `Utf8`.
    Utf8,
    /// `Json`.
    Json,
    /// `JsonDocument`.
    JsonDocument,
    /// `Yson`.
    Yson,
    /// `Uuid`.
    Uuid,
    /// `Date`.
    Date,
    /// `Datetime` (seconds).
    Datetime,
    /// `Timestamp` (microseconds).
    Timestamp,
    /// `Interval`.
    Interval,
    /// `DyNumber`.
    DyNumber,
}

impl PrimitiveType {
    /// Returns the YQL spelling of the type.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bool => "Bool",
            Self::Int8 => "Int8",
            Self::Uint8 => "Uint8",
            Self::Int16 => "Int16",
            Self::Uint16 => "Uint16",
            Self::Int32 => "Int32",
            Self::Uint32 => "Uint32",
            Self::Int64 => "Int64",
            Self::Uint64 => "Uint64",
            Self::Float => "Float",
            Self::Double => "Double",
            Self::String => "String",
            Self::Utf8 => "Utf8",
            Self::Json => "Json",
            Self::JsonDocument => "JsonDocument",
            Self::Yson => "Yson",
            Self::Uuid => "Uuid",
            Self::Date => "Date",
            Self::Datetime => "Datetime",
            Self::Timestamp => "Timestamp",
            Self::Interval => "Interval",
            Self::DyNumber => "DyNumber",
        }
    }
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A concrete YDB type, without the optional wrapper.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WireType {
    /// A primitive type.
    Primitive(PrimitiveType),
    /// `Decimal(precision,scale)`.
    Decimal {
        /// Total number of digits.
        precision: u8,
        /// Number of digits after the decimal point.
        scale: u8,
    },
    /// `List<T>`.
    List(Box<WireType>),
    /// `Struct<...>` with members in declaration order.
    Struct(Vec<(String, WireType)>),
}

impl WireType {
    /// Creates a `List<T>`.
    #[must_use]
    pub fn list(item: Self) -> Self {
        Self::List(Box::new(item))
    }

    /// Returns the primitive tag, if this is a primitive.
    #[must_use]
    pub const fn as_primitive(&self) -> Option<PrimitiveType> {
        match self {
            Self::Primitive(p) => Some(*p),
            _ => None,
        }
    }
}

impl From<PrimitiveType> for WireType {
    fn from(p: PrimitiveType) -> Self {
        Self::Primitive(p)
    }
}

impl fmt::Display for WireType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primitive(p) => f.write_str(p.name()),
            Self::Decimal { precision, scale } => write!(f, "Decimal({precision},{scale})"),
            Self::List(item) => write!(f, "List<{item}>"),
            Self::Struct(members) => {
                f.write_str("Struct<")?;
                for (i, (name, ty)) in members.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{name}:{ty}")?;
                }
                f.write_str(">")
            }
        }
    }
}

/// The type declared for one bind parameter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResolvedBindType {
    /// The concrete wire type.
    pub wire_type: WireType,
    /// Whether the type is wrapped in `Optional<...>`.
    pub optional: bool,
}

impl ResolvedBindType {
    /// Creates a non-optional bind type.
    #[must_use]
    pub fn required(wire_type: impl Into<WireType>) -> Self {
        Self {
            wire_type: wire_type.into(),
            optional: false,
        }
    }

    /// Creates an optional bind type.
    #[must_use]
    pub fn optional(wire_type: impl Into<WireType>) -> Self {
        Self {
            wire_type: wire_type.into(),
            optional: true,
        }
    }
}

impl fmt::Display for ResolvedBindType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.optional {
            write!(f, "Optional<{}>", self.wire_type)
        } else {
            write!(f, "{}", self.wire_type)
        }
    }
}
