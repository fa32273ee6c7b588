//! JSON fixtures describing a compiled statement and its parameters.
//!
//! ```json
//! {
//!   "statement": "INSERT INTO users (id, email) VALUES (:id, :email)",
//!   "placeholders": [{"name": "id"}, {"name": "email"}],
//!   "target": {"table": "users", "columns": ["id", "email"]},
//!   "tables": [{"name": "users", "columns": [...], "primary_key": ["id"]}],
//!   "rows": [{"id": 1, "email": null}]
//! }
//! ```
//!
//! Row values are plain JSON. Types JSON cannot express use a one-key
//! object: `{"$date": "2024-05-01"}`, `{"$datetime": "2024-05-01T12:00:00"}`,
//! `{"$decimal": "12.50"}`, `{"$bytes": "cafe"}`, `{"$set": [1, 2]}`,
//! `{"$interval_ms": 1500}`, `{"$opaque": "function"}`.

use std::path::Path;
use std::str::FromStr;

use anyhow::{bail, Context};
use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use oxide_ydb_dialect::{
    slots_from_keys, BindPlaceholder, CompiledStatement, DmlTarget, ParameterSet, StaticSchema,
};
use oxide_ydb_types::{SqlType, TableDescription, Value};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{Map, Value as Json};

/// A placeholder as written in a fixture.
#[derive(Debug, Clone, Deserialize)]
pub struct PlaceholderSpec {
    pub name: String,
    /// Explicit expansion slots.
    #[serde(default)]
    pub slots: Option<Vec<String>>,
    /// Expanding, with slots recovered from the row keys.
    #[serde(default)]
    pub expanding: bool,
    #[serde(default, rename = "type")]
    pub declared_type: Option<SqlType>,
    #[serde(default)]
    pub literal_execute: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TargetSpec {
    pub table: String,
    pub columns: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Fixture {
    pub statement: String,
    #[serde(default)]
    pub ddl: bool,
    #[serde(default)]
    pub placeholders: Vec<PlaceholderSpec>,
    #[serde(default)]
    pub target: Option<TargetSpec>,
    #[serde(default)]
    pub tables: Vec<TableDescription>,
    #[serde(default)]
    pub rows: Vec<Map<String, Json>>,
}

impl Fixture {
    /// Reads a fixture file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("invalid fixture {}", path.display()))
    }

    /// Converts the parameter rows.
    pub fn rows(&self) -> anyhow::Result<Vec<ParameterSet>> {
        self.rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|(name, value)| {
                        let value =
                            json_to_value(value).with_context(|| format!("parameter '{name}'"))?;
                        Ok((name.clone(), value))
                    })
                    .collect::<anyhow::Result<ParameterSet>>()
            })
            .collect()
    }

    /// Builds the compiled statement.
    pub fn statement(&self, rows: &[ParameterSet]) -> anyhow::Result<CompiledStatement> {
        let names: Vec<&str> = self.placeholders.iter().map(|p| p.name.as_str()).collect();
        let mut statement = CompiledStatement::new(&self.statement);
        statement.is_ddl = self.ddl;
        statement.dml_target = self.target.as_ref().map(|t| DmlTarget {
            table: t.table.clone(),
            columns: t.columns.clone(),
        });

        for spec in &self.placeholders {
            let mut placeholder = match (&spec.slots, spec.expanding) {
                (Some(slots), _) => BindPlaceholder::expanding(&spec.name, slots.iter().cloned()),
                (None, true) => {
                    let others: Vec<&str> =
                        names.iter().copied().filter(|n| *n != spec.name).collect();
                    let slots = slots_from_keys(&spec.name, rows, &others)?;
                    BindPlaceholder::expanding(&spec.name, slots)
                }
                (None, false) => BindPlaceholder::new(&spec.name),
            };
            placeholder.declared_type.clone_from(&spec.declared_type);
            placeholder.literal_execute = spec.literal_execute;
            statement = statement.placeholder(placeholder);
        }
        Ok(statement)
    }

    /// Returns the fixture tables as a schema.
    pub fn schema(&self) -> StaticSchema {
        self.tables
            .iter()
            .cloned()
            .fold(StaticSchema::new(), StaticSchema::with_table)
    }
}

/// Converts a JSON value into a parameter value.
pub fn json_to_value(json: &Json) -> anyhow::Result<Value> {
    Ok(match json {
        Json::Null => Value::Null,
        Json::Bool(b) => Value::Bool(*b),
        Json::Number(n) => match (n.as_i64(), n.as_f64()) {
            (Some(i), _) => Value::Int(i),
            (None, Some(f)) if n.is_f64() => Value::Float(f),
            _ => bail!("integer {n} does not fit in Int64"),
        },
        Json::String(s) => Value::Text(s.clone()),
        Json::Array(items) => Value::List(
            items
                .iter()
                .map(json_to_value)
                .collect::<anyhow::Result<_>>()?,
        ),
        Json::Object(map) => match tagged(map) {
            Some((tag, inner)) => tagged_value(tag, inner)?,
            None => Value::Struct(
                map.iter()
                    .map(|(k, v)| Ok((k.clone(), json_to_value(v)?)))
                    .collect::<anyhow::Result<_>>()?,
            ),
        },
    })
}

fn tagged(map: &Map<String, Json>) -> Option<(&str, &Json)> {
    if map.len() != 1 {
        return None;
    }
    map.iter()
        .next()
        .filter(|(k, _)| k.starts_with('$'))
        .map(|(k, v)| (k.as_str(), v))
}

fn tagged_value(tag: &str, inner: &Json) -> anyhow::Result<Value> {
    let text = || inner.as_str().with_context(|| format!("{tag} expects a string"));
    Ok(match tag {
        "$date" => Value::Date(NaiveDate::parse_from_str(text()?, "%Y-%m-%d")?),
        "$datetime" => Value::DateTime(NaiveDateTime::parse_from_str(
            text()?,
            "%Y-%m-%dT%H:%M:%S%.f",
        )?),
        "$decimal" => Value::Decimal(Decimal::from_str(text()?)?),
        "$bytes" => Value::Bytes(hex::decode(text()?)?),
        "$opaque" => Value::Opaque(text()?.to_string()),
        "$interval_ms" => {
            let millis = inner.as_i64().context("$interval_ms expects an integer")?;
            Value::Interval(TimeDelta::milliseconds(millis))
        }
        "$set" => match json_to_value(inner)? {
            Value::List(items) => Value::Set(items),
            _ => bail!("$set expects an array"),
        },
        other => bail!("unknown value tag {other}"),
    })
}
