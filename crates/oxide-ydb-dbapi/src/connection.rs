//! Connection: cursor factory and scheme metadata.

use std::sync::Arc;

use oxide_ydb_types::TableDescription;
use tracing::trace;

use crate::client::{EntryKind, NativeClient};
use crate::config::ConnectionConfig;
use crate::cursor::Cursor;
use crate::error::{DbApiError, Result};
use crate::issue::StatusCode;

/// A connection to one YDB database.
pub struct Connection<C: NativeClient> {
    client: Arc<C>,
    config: ConnectionConfig,
}

impl<C: NativeClient> Clone for Connection<C> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
            config: self.config.clone(),
        }
    }
}

impl<C: NativeClient> Connection<C> {
    /// Creates a connection over an established native client.
    #[must_use]
    pub fn new(client: Arc<C>, config: ConnectionConfig) -> Self {
        Self {
            client,
            config: config.normalized(),
        }
    }

    /// Returns the connection configuration.
    #[must_use]
    pub const fn config(&self) -> &ConnectionConfig {
        &self.config
    }

    /// Returns the native client.
    #[must_use]
    pub const fn client(&self) -> &Arc<C> {
        &self.client
    }

    /// Creates a new cursor.
    #[must_use]
    pub fn cursor(&self) -> Cursor<C> {
        Cursor::new(
            Arc::clone(&self.client),
            self.config.table_path_prefix.clone(),
            self.config.use_scan_query,
        )
    }

    /// Resolves a table path against the database root.
    ///
    /// Absolute paths are returned unchanged.
    #[must_use]
    pub fn full_path(&self, table_path: &str) -> String {
        if table_path.starts_with('/') {
            table_path.to_string()
        } else {
            format!("{}/{table_path}", self.config.database.trim_end_matches('/'))
        }
    }

    /// Describes a table.
    ///
    /// # Errors
    ///
    /// A missing table is a programming error; other failures are classified
    /// from the native issue.
    pub async fn describe(&self, table_path: &str) -> Result<TableDescription> {
        let full_path = self.full_path(table_path);
        trace!(path = %full_path, "describing table");
        Ok(self.client.describe_table(&full_path).await?)
    }

    /// Returns whether a scheme object exists at `path`.
    ///
    /// # Errors
    ///
    /// Failures other than a scheme error are returned.
    pub async fn check_exists(&self, path: &str) -> Result<bool> {
        match self.client.describe_path(&self.full_path(path)).await {
            Ok(_) => Ok(true),
            Err(issue) if issue.status == StatusCode::SchemeError => Ok(false),
            Err(issue) => Err(DbApiError::from(issue)),
        }
    }

    /// Lists all tables below the database root, relative to it.
    ///
    /// Sub-directories are walked; dot-prefixed (system) directories are
    /// skipped.
    ///
    /// # Errors
    ///
    /// Returns the first listing failure.
    pub async fn get_table_names(&self) -> Result<Vec<String>> {
        let root = self.config.database.trim_end_matches('/').to_string();
        let mut pending = vec![root.clone()];
        let mut tables = Vec::new();

        while let Some(dir) = pending.pop() {
            for entry in self.client.list_directory(&dir).await? {
                let path = format!("{dir}/{}", entry.name);
                match entry.kind {
                    EntryKind::Table => {
                        let relative = path
                            .strip_prefix(&root)
                            .map_or(path.as_str(), |p| p.trim_start_matches('/'));
                        tables.push(relative.to_string());
                    }
                    EntryKind::Directory if !entry.name.starts_with('.') => pending.push(path),
                    EntryKind::Directory | EntryKind::Other => {}
                }
            }
        }

        tables.sort();
        Ok(tables)
    }
}
