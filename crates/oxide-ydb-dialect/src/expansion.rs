//! Slot naming for expanding placeholders.
//!
//! A compiler expands `IN (:ids)` into one parameter per element, named
//! `ids_1`, `ids_2`, ... Placeholders carry these slots explicitly; the
//! helpers here produce them, or recover them from parameter keys for
//! callers that only have the names.

use std::collections::BTreeSet;

use crate::bind::ParameterSet;
use crate::error::{DialectError, Result};

/// Returns the slot names for an expansion of `count` elements.
#[must_use]
pub fn expanded_slot_names(name: &str, count: usize) -> Vec<String> {
    (1..=count).map(|i| format!("{name}_{i}")).collect()
}

/// Recovers the slots of expanding placeholder `name` from parameter keys.
///
/// A key belongs to `name` when everything before its last underscore equals
/// `name`. Slots are ordered by their numeric suffix.
///
/// # Errors
///
/// Returns [`DialectError::AmbiguousExpansion`] when a recovered slot is
/// also the name of another placeholder in `other_placeholders`.
pub fn slots_from_keys(
    name: &str,
    rows: &[ParameterSet],
    other_placeholders: &[&str],
) -> Result<Vec<String>> {
    let keys: BTreeSet<&str> = rows.iter().flat_map(|row| row.keys()).map(String::as_str).collect();

    let mut slots: Vec<&str> = keys
        .into_iter()
        .filter(|key| key.rsplit_once('_').is_some_and(|(prefix, _)| prefix == name))
        .collect();

    if let Some(slot) = slots.iter().find(|slot| other_placeholders.contains(*slot)) {
        return Err(DialectError::AmbiguousExpansion {
            placeholder: name.to_string(),
            slot: (*slot).to_string(),
        });
    }

    slots.sort_by_key(|slot| {
        slot.rsplit_once('_')
            .and_then(|(_, suffix)| suffix.parse::<u64>().ok())
            .unwrap_or(u64::MAX)
    });
    Ok(slots.into_iter().map(str::to_string).collect())
}

#[cfg(test)]
mod tests {
    use oxide_ydb_types::Value;

    use super::*;

    fn row(keys: &[&str]) -> ParameterSet {
        keys.iter().map(|k| ((*k).to_string(), Value::Int(1))).collect()
    }

    #[test]
    fn test_expanded_slot_names() {
        assert_eq!(expanded_slot_names("ids", 3), vec!["ids_1", "ids_2", "ids_3"]);
        assert!(expanded_slot_names("ids", 0).is_empty());
    }

    #[test]
    fn test_slots_are_ordered_numerically() {
        let rows = [row(&["ids_10", "ids_2", "ids_1", "name"])];
        let slots = slots_from_keys("ids", &rows, &["name"]).unwrap();
        assert_eq!(slots, vec!["ids_1", "ids_2", "ids_10"]);
    }

    #[test]
    fn test_underscored_names_do_not_leak() {
        let rows = [row(&["user_ids_1", "user_ids_2", "ids_1"])];
        assert_eq!(slots_from_keys("ids", &rows, &[]).unwrap(), vec!["ids_1"]);
        assert_eq!(
            slots_from_keys("user_ids", &rows, &[]).unwrap(),
            vec!["user_ids_1", "user_ids_2"]
        );
    }

    #[test]
    fn test_collision_with_other_placeholder() {
        let rows = [row(&["ids_1", "ids_2"])];
        let err = slots_from_keys("ids", &rows, &["ids_2"]).unwrap_err();
        assert!(matches!(
            err,
            DialectError::AmbiguousExpansion { ref slot, .. } if slot == "ids_2"
        ));
    }
}
