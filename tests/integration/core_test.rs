//! Firebolt Core backend integration tests.

use super::stub::{closed_port, core_config, Stub};
use axum::http::StatusCode;
use boltbench::db::{Backend, CoreBackend};
use boltbench::error::BenchError;
use pretty_assertions::assert_eq;

#[tokio::test]
async fn test_tsv_response_becomes_rows() {
    let stub = Stub::start(StatusCode::OK, "a\tb\n1\tx\n2\ty\n").await;
    let mut backend = CoreBackend::new(&stub.config()).unwrap();

    let result = backend.execute("SELECT a, b FROM t", false).await.unwrap();

    assert_eq!(result.columns, vec!["a", "b"]);
    assert_eq!(result.row_count, 2);
    assert_eq!(result.data[0].get("a"), Some("1"));
    assert_eq!(result.data[1].get("b"), Some("y"));
    assert!(result.execution_time_ms >= 0.0);
    assert_eq!(result.rows_scanned, None);
    assert_eq!(result.bytes_read, None);
}

#[tokio::test]
async fn test_request_carries_database_and_sql() {
    let stub = Stub::start(StatusCode::OK, "x\n1\n").await;
    let mut backend = CoreBackend::new(&stub.config()).unwrap();

    backend.execute("SELECT 1 AS x", false).await.unwrap();

    let requests = stub.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].body, "SELECT 1 AS x");
    assert_eq!(requests[0].params.get("database").map(String::as_str), Some("plg_demo"));
    assert_eq!(requests[0].params.get("advanced_mode").map(String::as_str), Some("1"));
}

#[tokio::test]
async fn test_request_is_plain_text() {
    let stub = Stub::start(StatusCode::OK, "x\n1\n").await;
    let mut backend = CoreBackend::new(&stub.config()).unwrap();

    backend.execute("SELECT 1 AS x", true).await.unwrap();

    let headers = &stub.requests()[0].headers;
    assert_eq!(
        headers.get("content-type").and_then(|v| v.to_str().ok()),
        Some("text/plain")
    );
}

#[tokio::test]
async fn test_disable_cache_prefixes_one_set_statement() {
    let stub = Stub::start(StatusCode::OK, "x\n1\n").await;
    let mut backend = CoreBackend::new(&stub.config()).unwrap();

    backend.execute("SELECT 1 AS x", true).await.unwrap();

    let body = &stub.requests()[0].body;
    assert_eq!(body, "SET enable_result_cache = FALSE;\nSELECT 1 AS x");
    assert_eq!(body.matches("enable_result_cache").count(), 1);
}

#[tokio::test]
async fn test_error_status_is_query_error_with_body() {
    let stub = Stub::start(StatusCode::INTERNAL_SERVER_ERROR, "syntax error").await;
    let mut backend = CoreBackend::new(&stub.config()).unwrap();

    let err = backend.execute("SELEC 1", false).await.unwrap_err();

    assert!(matches!(err, BenchError::Query(_)));
    assert!(err.to_string().contains("syntax error"));
}

#[tokio::test]
async fn test_empty_body_is_empty_result() {
    let stub = Stub::start(StatusCode::OK, "").await;
    let mut backend = CoreBackend::new(&stub.config()).unwrap();

    let result = backend.execute("CREATE TABLE t (a INT)", false).await.unwrap();

    assert!(result.columns.is_empty());
    assert!(result.data.is_empty());
    assert_eq!(result.row_count, 0);
}

#[tokio::test]
async fn test_unreachable_endpoint_is_query_error() {
    let mut backend = CoreBackend::new(&core_config(closed_port().await)).unwrap();

    let err = backend.execute("SELECT 1", false).await.unwrap_err();

    assert!(matches!(err, BenchError::Query(_)));
    assert!(err.to_string().contains("Query execution error"));
}

#[tokio::test]
async fn test_close_is_idempotent_and_reopens() {
    let stub = Stub::start(StatusCode::OK, "x\n1\n").await;
    let mut backend = CoreBackend::new(&stub.config()).unwrap();
    assert!(!backend.is_open());

    backend.execute("SELECT 1", false).await.unwrap();
    assert!(backend.is_open());

    backend.close().await.unwrap();
    backend.close().await.unwrap();
    assert!(!backend.is_open());

    backend.execute("SELECT 1", false).await.unwrap();
    assert_eq!(stub.requests().len(), 2);
}
