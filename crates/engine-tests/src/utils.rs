#![allow(dead_code)]

use crate::TEST_EXTERNAL_URI;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use model::{core::value::Value, wire::results::QueryResults};
use tower::ServiceExt;

/// 25 rows, `n` from 0 to 24.
pub const NUMBERS_25_DDL: &str =
    "CREATE TABLE numbers AS SELECT range::INTEGER AS n FROM range(25);";

pub const NUMBERS_20_DDL: &str =
    "CREATE TABLE numbers AS SELECT range::INTEGER AS n FROM range(20);";

pub const MOODS_DDL: &str = r#"
    CREATE TYPE mood AS ENUM ('ok', 'bad');
    CREATE TABLE moods (id INTEGER, mood mood, tags VARCHAR[]);
    INSERT INTO moods VALUES (1, 'ok', ['a', 'b']), (2, 'bad', []);
"#;

pub const ORDERS_DDL: &str = r#"
    CREATE TABLE customers (id INTEGER PRIMARY KEY, name VARCHAR NOT NULL);
    CREATE TABLE orders (
        id INTEGER PRIMARY KEY,
        customer_id INTEGER NOT NULL,
        total DECIMAL(10, 2) NOT NULL,
        placed_on DATE NOT NULL
    );
    INSERT INTO customers VALUES (1, 'Ada'), (2, 'Grace'), (3, 'Linus');
    INSERT INTO orders
        SELECT i, (i % 3) + 1, (i * 10.5)::DECIMAL(10, 2), DATE '2024-01-01' + i::INTEGER
        FROM range(1, 58) t(i);
    CREATE SCHEMA reporting;
    CREATE VIEW reporting.order_totals AS
        SELECT c.name, sum(o.total) AS total
        FROM orders o JOIN customers c ON c.id = o.customer_id
        GROUP BY c.name;
"#;

pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.clone().oneshot(request).await.expect("router response");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("response body");
    let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, json)
}

pub async fn post_statement(app: &Router, sql: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/v1/statement")
        .body(Body::from(sql.to_string()))
        .expect("request");
    send(app, request).await
}

/// GET a `nextUri` (absolute, pointing at [`TEST_EXTERNAL_URI`]) or a path.
pub async fn get(app: &Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let path = uri.strip_prefix(TEST_EXTERNAL_URI).unwrap_or(uri);
    let request = Request::builder().uri(path).body(Body::empty()).expect("request");
    send(app, request).await
}

pub fn parse(json: serde_json::Value) -> QueryResults {
    serde_json::from_value(json).expect("QueryResults body")
}

/// Submit `sql` and follow `nextUri` until the chain ends.
pub async fn run_chain(app: &Router, sql: &str) -> Vec<QueryResults> {
    let (status, json) = post_statement(app, sql).await;
    assert_eq!(status, StatusCode::OK, "{json}");
    let mut pages = vec![parse(json)];

    while let Some(next) = pages.last().and_then(|p| p.next_uri.clone()) {
        let (status, json) = get(app, &next).await;
        assert_eq!(status, StatusCode::OK, "{json}");
        pages.push(parse(json));
        assert!(pages.len() < 64, "pagination did not terminate");
    }
    pages
}

pub fn all_rows(pages: &[QueryResults]) -> Vec<Vec<Value>> {
    pages
        .iter()
        .flat_map(|p| p.data.clone().unwrap_or_default())
        .collect()
}

pub fn first_column_i64(pages: &[QueryResults]) -> Vec<i64> {
    all_rows(pages)
        .iter()
        .map(|row| row[0].as_i64().expect("integer cell"))
        .collect()
}
