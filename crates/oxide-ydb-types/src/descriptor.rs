//! Type descriptor table.
//!
//! Maps abstract [`SqlType`]s onto YDB [`WireType`]s, and runtime
//! [`Value`]s onto the abstract type used to declare them. Both mappings
//! are pure lookups with no state.

use crate::error::{Result, TypeError};
use crate::sql_type::SqlType;
use crate::value::Value;
use crate::wire::{PrimitiveType, WireType};

/// Returns the wire type declared for an abstract type.
///
/// Nested list items and struct members are mapped recursively and are
/// never optional.
///
/// # Errors
///
/// Returns [`TypeError::UnsupportedType`] for [`SqlType::Null`],
/// [`SqlType::Custom`], and containers holding either.
pub fn wire_type(ty: &SqlType) -> Result<WireType> {
    let primitive = match ty {
        SqlType::Boolean => PrimitiveType::Bool,
        SqlType::Int8 => PrimitiveType::Int8,
        SqlType::Int16 => PrimitiveType::Int16,
        SqlType::Int32 => PrimitiveType::Int32,
        SqlType::Int64 | SqlType::Integer | SqlType::JsonIndex => PrimitiveType::Int64,
        SqlType::UInt8 => PrimitiveType::Uint8,
        SqlType::UInt16 => PrimitiveType::Uint16,
        SqlType::UInt32 => PrimitiveType::Uint32,
        SqlType::UInt64 => PrimitiveType::Uint64,
        SqlType::Float => PrimitiveType::Float,
        SqlType::Double => PrimitiveType::Double,
        SqlType::Text | SqlType::JsonPath => PrimitiveType::Utf8,
        SqlType::Binary => PrimitiveType::String,
        SqlType::Date => PrimitiveType::Date,
        SqlType::DateTime => PrimitiveType::Datetime,
        SqlType::Timestamp => PrimitiveType::Timestamp,
        SqlType::Interval => PrimitiveType::Interval,
        SqlType::Json => PrimitiveType::Json,
        SqlType::JsonDocument => PrimitiveType::JsonDocument,
        SqlType::Uuid => PrimitiveType::Uuid,
        SqlType::Decimal { precision, scale } => {
            return Ok(WireType::Decimal {
                precision: *precision,
                scale: *scale,
            });
        }
        // Sets travel as lists.
        SqlType::List(item) | SqlType::Set(item) => {
            return Ok(WireType::list(wire_type(item)?));
        }
        SqlType::Struct(fields) => {
            let members = fields
                .iter()
                .map(|(name, ty)| Ok((name.clone(), wire_type(ty)?)))
                .collect::<Result<Vec<_>>>()?;
            return Ok(WireType::Struct(members));
        }
        SqlType::Null | SqlType::Custom(_) => {
            return Err(TypeError::UnsupportedType(ty.to_string()));
        }
    };
    Ok(WireType::Primitive(primitive))
}

/// Infers the abstract type of a runtime value.
///
/// Returns `Ok(None)` when the value carries no type information: a null,
/// an empty list or set, or a container whose first element (or any struct
/// field) is itself indeterminate.
///
/// # Errors
///
/// Returns [`TypeError::UnsupportedValueType`] for [`Value::Opaque`]
/// anywhere in the inspected value.
pub fn infer_sql_type(value: &Value) -> Result<Option<SqlType>> {
    let ty = match value {
        Value::Null => return Ok(None),
        Value::Bool(_) => SqlType::Boolean,
        Value::Int(_) => SqlType::Int64,
        Value::Float(_) => SqlType::Double,
        Value::Decimal(_) => SqlType::default_decimal(),
        Value::Text(_) => SqlType::Text,
        Value::Bytes(_) => SqlType::Binary,
        Value::Date(_) => SqlType::Date,
        Value::DateTime(_) => SqlType::Timestamp,
        Value::Interval(_) => SqlType::Interval,
        Value::List(items) => match first_item_type(items)? {
            Some(item) => SqlType::list(item),
            None => return Ok(None),
        },
        Value::Set(items) => match first_item_type(items)? {
            Some(item) => SqlType::set(item),
            None => return Ok(None),
        },
        Value::Struct(fields) => {
            // Every field is inspected so that an unsupported value raises
            // even after an indeterminate one.
            let mut types = std::collections::BTreeMap::new();
            let mut indeterminate = false;
            for (name, field) in fields {
                match infer_sql_type(field)? {
                    Some(ty) => {
                        types.insert(name.clone(), ty);
                    }
                    None => indeterminate = true,
                }
            }
            if indeterminate {
                return Ok(None);
            }
            SqlType::Struct(types)
        }
        Value::Opaque(type_name) => {
            return Err(TypeError::UnsupportedValueType {
                type_name: type_name.clone(),
            });
        }
    };
    Ok(Some(ty))
}

fn first_item_type(items: &[Value]) -> Result<Option<SqlType>> {
    match items.first() {
        Some(first) => infer_sql_type(first),
        None => Ok(None),
    }
}
