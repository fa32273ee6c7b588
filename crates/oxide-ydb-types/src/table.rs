//! Table descriptions as reported by the database.

use serde::{Deserialize, Serialize};

use crate::wire::WireType;

/// A described column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDescription {
    /// Column name.
    pub name: String,
    /// Wire type with the optional wrapper removed.
    pub wire_type: WireType,
    /// Whether the column type is `Optional<...>`.
    #[serde(default)]
    pub nullable: bool,
}

impl ColumnDescription {
    /// Creates a NOT NULL column.
    #[must_use]
    pub fn new(name: impl Into<String>, wire_type: impl Into<WireType>) -> Self {
        Self {
            name: name.into(),
            wire_type: wire_type.into(),
            nullable: false,
        }
    }

    /// Marks the column nullable.
    #[must_use]
    pub const fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }
}

/// A described table: its columns and primary key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableDescription {
    /// Table name (path relative to the database root).
    pub name: String,
    /// Columns in declaration order.
    pub columns: Vec<ColumnDescription>,
    /// Primary key column names.
    #[serde(default)]
    pub primary_key: Vec<String>,
}

impl TableDescription {
    /// Creates an empty description.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
            primary_key: Vec::new(),
        }
    }

    /// Adds a column.
    #[must_use]
    pub fn column(mut self, column: ColumnDescription) -> Self {
        self.columns.push(column);
        self
    }

    /// Sets the primary key.
    #[must_use]
    pub fn primary_key(mut self, columns: &[&str]) -> Self {
        self.primary_key = columns.iter().map(|c| (*c).to_string()).collect();
        self
    }

    /// Looks up a column by name.
    #[must_use]
    pub fn find_column(&self, name: &str) -> Option<&ColumnDescription> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Returns whether `name` is part of the primary key.
    #[must_use]
    pub fn is_primary_key(&self, name: &str) -> bool {
        self.primary_key.iter().any(|c| c == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wire::PrimitiveType;

    #[test]
    fn test_table_description_builder() {
        let table = TableDescription::new("users")
            .column(ColumnDescription::new("id", PrimitiveType::Uint64))
            .column(ColumnDescription::new("email", PrimitiveType::Utf8).nullable())
            .primary_key(&["id"]);

        assert!(table.is_primary_key("id"));
        assert!(!table.is_primary_key("email"));
        assert!(table.find_column("email").is_some_and(|c| c.nullable));
        assert!(table.find_column("missing").is_none());
    }

    #[test]
    fn test_deserialize_description() {
        let json = r#"{
            "name": "items",
            "columns": [
                {"name": "id", "wire_type": {"Primitive": "Int64"}},
                {
                    "name": "price",
                    "wire_type": {"Decimal": {"precision": 22, "scale": 9}},
                    "nullable": true
                }
            ],
            "primary_key": ["id"]
        }"#;
        let table: TableDescription = serde_json::from_str(json).unwrap();
        assert_eq!(table.columns.len(), 2);
        assert!(!table.columns[0].nullable);
        assert_eq!(table.columns[1].wire_type.to_string(), "Decimal(22,9)");
    }
}
