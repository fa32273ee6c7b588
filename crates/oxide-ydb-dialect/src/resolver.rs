//! Bind-type resolution.
//!
//! For every wire parameter of a statement, decide the YDB type to declare:
//! the base type comes from the declared type or the first non-null value,
//! optionality from the written column's schema and from observed nulls.
//! Binds with no type evidence are left out of the result.

use std::collections::{BTreeMap, HashSet};

use oxide_ydb_types::{descriptor, ResolvedBindType, SqlType, Value};
use tracing::{debug, trace, warn};

use crate::bind::{BindPlaceholder, DmlTarget, ParameterSet};
use crate::error::{DialectError, Result};
use crate::schema::SchemaLookup;

/// Resolved types keyed by wire parameter name.
pub type BindTypes = BTreeMap<String, ResolvedBindType>;

/// Resolves the wire types of `placeholders` for a batch of parameter rows.
///
/// `target` is the table and columns written by an INSERT or UPDATE; a
/// placeholder named after a written, nullable, non-key column is optional.
/// Rows missing a key contribute no evidence for it. Schema lookup failures
/// are logged and treated like an unknown column.
///
/// # Errors
///
/// - [`DialectError::DuplicatePlaceholder`] when two placeholders share a name
/// - [`DialectError::AmbiguousExpansion`] when an expansion slot collides
///   with another placeholder or slot
/// - [`DialectError::Type`] when the chosen value or declared type has no
///   wire type
pub fn resolve<S>(
    placeholders: &[BindPlaceholder],
    target: Option<&DmlTarget>,
    rows: &[ParameterSet],
    schema: &S,
) -> Result<BindTypes>
where
    S: SchemaLookup + ?Sized,
{
    check_names(placeholders)?;

    let mut types = BindTypes::new();
    for placeholder in placeholders.iter().filter(|p| !p.literal_execute) {
        let slots = placeholder.slots();
        let observed = observed_values(&slots, rows);

        let mut optional = bound_to_nullable_column(&placeholder.name, target, schema);
        if observed.is_empty() || observed.iter().any(|v| v.is_null()) {
            optional = true;
        }

        let Some(base) = base_type(placeholder, &observed)? else {
            debug!(bind = %placeholder.name, "no type evidence, bind left untyped");
            continue;
        };
        let wire_type = descriptor::wire_type(&base)?;
        let resolved = ResolvedBindType {
            wire_type,
            optional,
        };
        trace!(bind = %placeholder.name, ty = %resolved, slots = slots.len(), "resolved bind");

        for slot in slots {
            types.insert(slot.to_string(), resolved.clone());
        }
    }
    Ok(types)
}

fn check_names(placeholders: &[BindPlaceholder]) -> Result<()> {
    let mut names = HashSet::new();
    for placeholder in placeholders {
        if !names.insert(placeholder.name.as_str()) {
            return Err(DialectError::DuplicatePlaceholder(placeholder.name.clone()));
        }
    }

    let mut taken = HashSet::new();
    for placeholder in placeholders.iter().filter(|p| p.is_expanding()) {
        for slot in placeholder.slots() {
            let collides =
                (slot != placeholder.name && names.contains(slot)) || !taken.insert(slot);
            if collides {
                return Err(DialectError::AmbiguousExpansion {
                    placeholder: placeholder.name.clone(),
                    slot: slot.to_string(),
                });
            }
        }
    }
    Ok(())
}

/// Values of `slots` in row order, then slot order within a row.
fn observed_values<'a>(slots: &[&str], rows: &'a [ParameterSet]) -> Vec<&'a Value> {
    rows.iter()
        .flat_map(|row| slots.iter().filter_map(move |slot| row.get(*slot)))
        .collect()
}

/// Schema facts only decide optionality, so a failing lookup counts as no fact.
fn bound_to_nullable_column<S>(name: &str, target: Option<&DmlTarget>, schema: &S) -> bool
where
    S: SchemaLookup + ?Sized,
{
    let Some(target) = target.filter(|t| t.writes(name)) else {
        return false;
    };
    match schema.column_fact(&target.table, name) {
        Ok(fact) => fact.is_some_and(|f| f.nullable && !f.primary_key),
        Err(err) => {
            warn!(table = %target.table, column = name, error = %err, "schema lookup failed");
            false
        }
    }
}

fn base_type(placeholder: &BindPlaceholder, observed: &[&Value]) -> Result<Option<SqlType>> {
    if let Some(declared) = placeholder.effective_declared_type() {
        return Ok(Some(declared.clone()));
    }
    match observed.iter().find(|v| !v.is_null()) {
        Some(value) => Ok(descriptor::infer_sql_type(value)?),
        None => Ok(None),
    }
}
