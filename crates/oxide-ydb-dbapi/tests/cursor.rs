//! Cursor behaviour against an in-memory native client.

mod common;
use common::*;

use std::sync::Arc;

use oxide_ydb_dbapi::{
    Connection, ConnectionConfig, DbApiError, Issue, Parameters, StatusCode, TypedValue, YdbQuery,
};
use oxide_ydb_types::{PrimitiveType, ResolvedBindType, Value};

fn connection(client: FakeClient) -> (Arc<FakeClient>, Connection<FakeClient>) {
    let client = Arc::new(client);
    let conn = Connection::new(
        Arc::clone(&client),
        ConnectionConfig::new("grpc://localhost:2136", "local"),
    );
    (client, conn)
}

fn params(name: &str, value: i64) -> Parameters {
    [(
        name.to_string(),
        TypedValue::typed(
            Value::Int(value),
            ResolvedBindType::required(PrimitiveType::Int64),
        ),
    )]
    .into_iter()
    .collect()
}

#[tokio::test]
async fn ddl_goes_through_scheme_execution() {
    let (client, conn) = connection(FakeClient::default());
    let mut cur = conn.cursor();
    cur.execute(&YdbQuery::ddl("CREATE TABLE foo(id Int64, PRIMARY KEY (id))"), None)
        .await
        .unwrap();

    assert_eq!(client.schemes.lock().unwrap().len(), 1);
    assert!(client.data_queries.lock().unwrap().is_empty());
}

#[tokio::test]
async fn data_query_carries_types_and_parameters() {
    let (client, conn) = connection(FakeClient::default());
    client.push_result(Ok(vec![int_rows(&[1, 2, 3])]));

    let mut types = oxide_ydb_dbapi::ParameterTypes::new();
    types.insert(
        "$id".to_string(),
        ResolvedBindType::required(PrimitiveType::Int64),
    );
    let query = YdbQuery::new("SELECT id FROM t WHERE id > $id").with_types(types);

    let mut cur = conn.cursor();
    cur.execute(&query, Some(&params("$id", 0))).await.unwrap();

    let recorded = client.data_queries.lock().unwrap();
    assert_eq!(recorded.len(), 1);
    assert_eq!(recorded[0].0.parameters_types.len(), 1);
    assert!(recorded[0].1.contains_key("$id"));
    drop(recorded);

    assert_eq!(cur.rowcount(), 3);
    let description = cur.description().unwrap();
    assert_eq!(description[0].name, "id");
    assert_eq!(description[0].type_code, "Int64");
}

#[tokio::test]
async fn fetch_methods_consume_buffer() {
    let (client, conn) = connection(FakeClient::default());
    client.push_result(Ok(vec![int_rows(&[1, 2, 3, 4])]));

    let mut cur = conn.cursor();
    cur.execute(&YdbQuery::new("SELECT id FROM t"), None)
        .await
        .unwrap();

    assert_eq!(cur.fetchone(), Some(vec![Value::Int(1)]));
    assert_eq!(cur.fetchmany(None).len(), 1);
    cur.arraysize = 5;
    assert_eq!(cur.fetchmany(Some(1)), vec![vec![Value::Int(3)]]);
    assert_eq!(cur.fetchall(), vec![vec![Value::Int(4)]]);
    assert_eq!(cur.fetchone(), None);
    assert!(cur.fetchmany(None).is_empty());
}

#[tokio::test]
async fn fetchmany_zero_falls_back_to_arraysize() {
    let (client, conn) = connection(FakeClient::default());
    client.push_result(Ok(vec![int_rows(&[1, 2, 3])]));

    let mut cur = conn.cursor();
    cur.execute(&YdbQuery::new("SELECT id FROM t"), None)
        .await
        .unwrap();

    cur.arraysize = 2;
    assert_eq!(
        cur.fetchmany(Some(0)),
        vec![vec![Value::Int(1)], vec![Value::Int(2)]]
    );
    assert_eq!(cur.rowcount(), 1);
}

#[tokio::test]
async fn rows_of_successive_executes_are_chained() {
    let (client, conn) = connection(FakeClient::default());
    client.push_result(Ok(vec![int_rows(&[1])]));
    client.push_result(Ok(vec![int_rows(&[2])]));

    let mut cur = conn.cursor();
    let query = YdbQuery::new("SELECT id FROM t WHERE id = $id");
    cur.executemany(&query, &[params("$id", 1), params("$id", 2)])
        .await
        .unwrap();

    assert_eq!(client.data_queries.lock().unwrap().len(), 2);
    assert_eq!(cur.fetchall(), vec![vec![Value::Int(1)], vec![Value::Int(2)]]);

    cur.close();
    assert!(cur.description().is_none());
}

#[tokio::test]
async fn table_path_prefix_adds_pragma() {
    let client = Arc::new(FakeClient::default());
    let conn = Connection::new(
        Arc::clone(&client),
        ConnectionConfig::new("grpc://localhost:2136", "/local").table_path_prefix("/local/app"),
    );
    conn.cursor()
        .execute(&YdbQuery::new("SELECT 1"), None)
        .await
        .unwrap();

    let recorded = client.data_queries.lock().unwrap();
    assert_eq!(
        recorded[0].0.yql_text,
        "PRAGMA TablePathPrefix = \"/local/app\";\nSELECT 1"
    );
}

#[tokio::test]
async fn scan_queries_when_configured() {
    let client = Arc::new(FakeClient::default());
    let conn = Connection::new(
        Arc::clone(&client),
        ConnectionConfig::new("grpc://localhost:2136", "/local").use_scan_query(true),
    );
    conn.cursor()
        .execute(&YdbQuery::new("SELECT 1"), None)
        .await
        .unwrap();

    assert_eq!(client.scan_queries.lock().unwrap().len(), 1);
    assert!(client.data_queries.lock().unwrap().is_empty());
}

#[tokio::test]
async fn native_issues_are_classified() {
    let (client, conn) = connection(FakeClient::default());
    client.push_result(Err(Issue::new(StatusCode::PreconditionFailed, "duplicate key")));

    let err = conn
        .cursor()
        .execute(&YdbQuery::new("INSERT INTO t(id) VALUES (1)"), None)
        .await
        .unwrap_err();
    assert!(matches!(err, DbApiError::Integrity { .. }));
    assert_eq!(err.issue().unwrap().message, "duplicate key");
}
