//! End-to-end runner tests against the Firebolt Core stub.

use super::stub::Stub;
use axum::http::StatusCode;
use boltbench::error::BenchError;
use boltbench::runner::Runner;
use boltbench::runtime::Runtime;
use pretty_assertions::assert_eq;

#[tokio::test]
async fn test_runner_benchmark_disables_cache_every_run() {
    let stub = Stub::start(StatusCode::OK, "n\n42\n").await;
    let mut runner = Runner::new(Some(Runtime::Core), &stub.config())
        .await
        .unwrap();

    let result = runner.benchmark("SELECT 42 AS n", 3, 1).await.unwrap();
    runner.close().await.unwrap();

    assert_eq!(result.data[0].get("n"), Some("42"));
    let requests = stub.requests();
    assert_eq!(requests.len(), 4);
    assert!(requests
        .iter()
        .all(|r| r.body.starts_with("SET enable_result_cache = FALSE;\n")));
}

#[tokio::test]
async fn test_runner_auto_detects_reachable_core() {
    let stub = Stub::start(StatusCode::OK, "test\n1\n").await;
    let mut runner = Runner::new(None, &stub.config()).await.unwrap();

    assert_eq!(runner.runtime(), Runtime::Core);
    let result = runner.execute("SELECT 1 as test", false).await.unwrap();
    assert_eq!(result.row_count, 1);
}

#[tokio::test]
async fn test_runner_execute_file() {
    let stub = Stub::start(StatusCode::OK, "x\n1\n").await;
    let mut runner = Runner::new(Some(Runtime::Core), &stub.config())
        .await
        .unwrap();
    let file = tempfile::NamedTempFile::new().unwrap();
    std::fs::write(file.path(), "SELECT 1 AS x").unwrap();

    runner.execute_file(file.path()).await.unwrap();

    assert_eq!(stub.requests()[0].body, "SELECT 1 AS x");
}

#[tokio::test]
async fn test_runner_missing_file_sends_nothing() {
    let stub = Stub::start(StatusCode::OK, "").await;
    let mut runner = Runner::new(Some(Runtime::Core), &stub.config())
        .await
        .unwrap();

    let err = runner.execute_file("/no/such/file.sql").await.unwrap_err();

    assert!(matches!(err, BenchError::FileNotFound(_)));
    assert!(stub.requests().is_empty());
}

#[tokio::test]
async fn test_runner_comparison_against_stub() {
    let stub = Stub::start(StatusCode::OK, "v\n1\n").await;
    let mut runner = Runner::new(Some(Runtime::Core), &stub.config())
        .await
        .unwrap();

    let result = runner
        .run_benchmark_comparison(
            "stub",
            "SELECT v FROM t",
            "SELECT v FROM t",
            Some("CREATE AGGREGATING INDEX i ON t (v, COUNT(*))"),
            Some("DROP AGGREGATING INDEX i ON t"),
            2,
        )
        .await
        .unwrap();

    assert_eq!(result.name, "stub");
    let bodies: Vec<String> = stub.requests().into_iter().map(|r| r.body).collect();
    assert_eq!(bodies.len(), 8);
    assert_eq!(bodies[3], "CREATE AGGREGATING INDEX i ON t (v, COUNT(*))");
    assert_eq!(bodies[7], "DROP AGGREGATING INDEX i ON t");
}
