//! Turning a compiled statement and its parameter rows into a YDB query.
//!
//! Statement text references parameters as `:name`. YDB wants `$name`, and
//! parameter keys carry the `$` too. When parameters are present on a
//! non-DDL statement, each value is paired with its resolved type.

use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use oxide_ydb_dbapi::{ParameterTypes, Parameters, TypedValue, YdbQuery};
use regex::{Captures, Regex};
use tracing::debug;

use crate::bind::{CompiledStatement, ParameterSet};
use crate::config::DialectOptions;
use crate::error::{DialectError, Result};
use crate::resolver::BindTypes;
use crate::schema::SchemaLookup;

/// Quoted literals and `::` are matched so that markers inside them are
/// left alone; only the last alternative captures a marker name.
static MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"'(?:[^'\\]|\\.)*'|"(?:[^"\\]|\\.)*"|`[^`]*`|::|:([A-Za-z_][A-Za-z0-9_]*)"#)
        .expect("marker pattern is valid")
});

/// A query and its parameter rows, ready for a cursor.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedQuery {
    /// The query with `$name` references and declared types.
    pub query: YdbQuery,
    /// One parameter set per row; empty for parameterless statements.
    pub parameters: Vec<Parameters>,
}

impl PreparedQuery {
    /// Parameters of a single execution.
    #[must_use]
    pub fn single(&self) -> Option<&Parameters> {
        self.parameters.first()
    }
}

/// Returns the wire name of a parameter.
#[must_use]
pub fn wire_name(name: &str) -> String {
    format!("${name}")
}

/// Rewrites `:name` markers into `` $`name` ``.
///
/// # Errors
///
/// Returns [`DialectError::MissingParameter`] for a marker whose name is not
/// in `names`.
pub fn format_variables(text: &str, names: &BTreeSet<&str>) -> Result<String> {
    let mut missing = None;
    let formatted = MARKER.replace_all(text, |caps: &Captures<'_>| match caps.get(1) {
        Some(name) if names.contains(name.as_str()) => format!("$`{}`", name.as_str()),
        Some(name) => {
            missing.get_or_insert_with(|| name.as_str().to_string());
            caps[0].to_string()
        }
        None => caps[0].to_string(),
    });
    match missing {
        Some(name) => Err(DialectError::MissingParameter(name)),
        None => Ok(formatted.into_owned()),
    }
}

/// Renders one `DECLARE` line per typed parameter, in name order.
#[must_use]
pub fn declare_section(types: &BindTypes) -> String {
    types
        .iter()
        .map(|(name, ty)| format!("DECLARE $`{name}` as {ty};"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Pairs each value with its resolved type and prefixes keys with `$`.
#[must_use]
pub fn merge_types(rows: &[ParameterSet], types: &BindTypes) -> Vec<Parameters> {
    rows.iter()
        .map(|row| {
            row.iter()
                .map(|(name, value)| {
                    let typed = match types.get(name) {
                        Some(ty) => TypedValue::typed(value.clone(), ty.clone()),
                        None => TypedValue::untyped(value.clone()),
                    };
                    (wire_name(name), typed)
                })
                .collect()
        })
        .collect()
}

/// Prepares `statement` for execution with `rows`.
///
/// # Errors
///
/// Propagates resolution errors, and [`DialectError::MissingParameter`] for
/// markers without a supplied value.
pub fn prepare<S>(
    statement: &CompiledStatement,
    rows: &[ParameterSet],
    schema: &S,
    options: &DialectOptions,
) -> Result<PreparedQuery>
where
    S: SchemaLookup + ?Sized,
{
    let names: BTreeSet<&str> = rows
        .iter()
        .flat_map(|row| row.keys())
        .map(String::as_str)
        .collect();
    let text = format_variables(&statement.text, &names)?;

    if statement.is_ddl || names.is_empty() {
        debug!(ddl = statement.is_ddl, "prepared untyped statement");
        let query = if statement.is_ddl {
            YdbQuery::ddl(text)
        } else {
            YdbQuery::new(text)
        };
        return Ok(PreparedQuery {
            query,
            parameters: merge_types(rows, &BindTypes::new()),
        });
    }

    let types = statement.bind_types(rows, schema)?;
    let text = if options.add_declare_for_yql_stmt_vars && !types.is_empty() {
        format!("{}\n{text}", declare_section(&types))
    } else {
        text
    };
    debug!(typed = types.len(), rows = rows.len(), "prepared statement");

    let parameters = merge_types(rows, &types);
    let parameters_types: ParameterTypes = types
        .into_iter()
        .map(|(name, ty)| (wire_name(&name), ty))
        .collect();
    Ok(PreparedQuery {
        query: YdbQuery::new(text).with_types(parameters_types),
        parameters,
    })
}
