//! Dialect options.

use serde::{Deserialize, Serialize};

/// Options controlling how statements are prepared.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DialectOptions {
    /// Prepend a `DECLARE $name as <Type>;` line per typed parameter.
    pub add_declare_for_yql_stmt_vars: bool,
}

impl DialectOptions {
    /// Creates the default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables or disables the DECLARE section.
    #[must_use]
    pub const fn with_declare(mut self, enabled: bool) -> Self {
        self.add_declare_for_yql_stmt_vars = enabled;
        self
    }
}
