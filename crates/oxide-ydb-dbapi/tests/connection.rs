//! Connection metadata operations.

mod common;
use common::*;

use std::sync::Arc;

use oxide_ydb_dbapi::{Connection, ConnectionConfig, EntryKind, SchemeEntry};
use oxide_ydb_types::{ColumnDescription, PrimitiveType, TableDescription};

fn fake() -> FakeClient {
    let mut client = FakeClient::default();
    client.tables.insert(
        "/local/users".to_string(),
        TableDescription::new("users")
            .column(ColumnDescription::new("id", PrimitiveType::Uint64))
            .primary_key(&["id"]),
    );
    client.directories.insert(
        "/local".to_string(),
        vec![
            SchemeEntry::new("users", EntryKind::Table),
            SchemeEntry::new("app", EntryKind::Directory),
            SchemeEntry::new(".sys", EntryKind::Directory),
            SchemeEntry::new("events", EntryKind::Other),
        ],
    );
    client.directories.insert(
        "/local/app".to_string(),
        vec![SchemeEntry::new("orders", EntryKind::Table)],
    );
    client.directories.insert(
        "/local/.sys".to_string(),
        vec![SchemeEntry::new("partition_stats", EntryKind::Table)],
    );
    client
}

fn connect(client: FakeClient) -> Connection<FakeClient> {
    Connection::new(Arc::new(client), ConnectionConfig::new("grpc://localhost:2136", "local"))
}

#[test]
fn full_path_joins_database_root() {
    let conn = connect(FakeClient::default());
    assert_eq!(conn.full_path("users"), "/local/users");
    assert_eq!(conn.full_path("/other/users"), "/other/users");
}

#[tokio::test]
async fn describe_resolves_relative_path() {
    let conn = connect(fake());
    let table = conn.describe("users").await.unwrap();
    assert_eq!(table.columns[0].name, "id");
    assert!(table.is_primary_key("id"));
}

#[tokio::test]
async fn describe_missing_table_is_programming_error() {
    let conn = connect(fake());
    let err = conn.describe("missing").await.unwrap_err();
    assert!(err.is_programming());
}

#[tokio::test]
async fn check_exists() {
    let conn = connect(fake());
    assert!(conn.check_exists("users").await.unwrap());
    assert!(!conn.check_exists("missing").await.unwrap());
    assert!(conn.check_exists("/broken").await.is_err());
}

#[tokio::test]
async fn table_names_skip_system_directories() {
    let conn = connect(fake());
    let names = conn.get_table_names().await.unwrap();
    assert_eq!(names, vec!["app/orders".to_string(), "users".to_string()]);
}
