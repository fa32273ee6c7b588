//! Connection configuration.

use serde::{Deserialize, Serialize};

/// Settings for a [`Connection`](crate::Connection).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionConfig {
    /// gRPC endpoint, e.g. `grpc://localhost:2136`.
    pub endpoint: String,
    /// Database root path; always starts with `/`.
    pub database: String,
    /// Directory prepended to relative table names by the server.
    pub table_path_prefix: String,
    /// Run data queries as scan queries.
    pub use_scan_query: bool,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            endpoint: String::from("grpc://localhost:2136"),
            database: String::from("/local"),
            table_path_prefix: String::new(),
            use_scan_query: false,
        }
    }
}

impl ConnectionConfig {
    /// Creates a configuration for `endpoint` and `database`.
    #[must_use]
    pub fn new(endpoint: impl Into<String>, database: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            database: database.into(),
            ..Self::default()
        }
        .normalized()
    }

    /// Sets the table path prefix.
    #[must_use]
    pub fn table_path_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.table_path_prefix = prefix.into();
        self
    }

    /// Enables scan queries.
    #[must_use]
    pub const fn use_scan_query(mut self, enabled: bool) -> Self {
        self.use_scan_query = enabled;
        self
    }

    /// Returns the configuration with the database path made absolute.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        if !self.database.starts_with('/') {
            self.database.insert(0, '/');
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_is_made_absolute() {
        let config = ConnectionConfig::new("grpc://localhost:2136", "local");
        assert_eq!(config.database, "/local");
        let config = ConnectionConfig::new("grpc://localhost:2136", "/local");
        assert_eq!(config.database, "/local");
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let config: ConnectionConfig =
            serde_json::from_str(r#"{"database": "prod", "use_scan_query": true}"#).unwrap();
        let config = config.normalized();
        assert_eq!(config.database, "/prod");
        assert_eq!(config.endpoint, "grpc://localhost:2136");
        assert!(config.use_scan_query);
        assert!(config.table_path_prefix.is_empty());
    }
}
