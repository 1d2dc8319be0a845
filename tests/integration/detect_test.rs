//! Runtime auto-detection integration tests.

use super::stub::{closed_port, core_config, Stub};
use axum::http::StatusCode;
use boltbench::runtime::{detect_runtime, Runtime};

#[tokio::test]
async fn test_reachable_core_wins_over_credentials() {
    let stub = Stub::start(StatusCode::OK, "").await;
    let mut config = stub.config();
    config.cloud.client_id = Some("id".to_string());
    config.cloud.client_secret = Some("secret".to_string());

    assert_eq!(detect_runtime(None, &config).await, Runtime::Core);
}

#[tokio::test]
async fn test_unreachable_core_with_credentials_selects_cloud() {
    let mut config = core_config(closed_port().await);
    config.cloud.client_id = Some("id".to_string());
    config.cloud.client_secret = Some("secret".to_string());

    assert_eq!(detect_runtime(None, &config).await, Runtime::Cloud);
}

#[tokio::test]
async fn test_non_200_probe_with_credentials_selects_cloud() {
    let stub = Stub::start_with_probe(StatusCode::NOT_FOUND, StatusCode::OK, "").await;
    let mut config = stub.config();
    config.cloud.client_id = Some("id".to_string());
    config.cloud.client_secret = Some("secret".to_string());

    assert_eq!(detect_runtime(None, &config).await, Runtime::Cloud);
}

#[tokio::test]
async fn test_non_200_probe_without_credentials_defaults_to_core() {
    let stub = Stub::start_with_probe(StatusCode::NOT_FOUND, StatusCode::OK, "").await;

    assert_eq!(detect_runtime(None, &stub.config()).await, Runtime::Core);
}

#[tokio::test]
async fn test_partial_credentials_default_to_core() {
    let mut config = core_config(closed_port().await);
    config.cloud.client_id = Some("id".to_string());

    assert_eq!(detect_runtime(None, &config).await, Runtime::Core);
}

#[tokio::test]
async fn test_nothing_available_defaults_to_core() {
    let config = core_config(closed_port().await);

    assert_eq!(detect_runtime(None, &config).await, Runtime::Core);
}

#[tokio::test]
async fn test_explicit_runtime_skips_probe() {
    let stub = Stub::start(StatusCode::OK, "").await;

    assert_eq!(
        detect_runtime(Some(Runtime::Cloud), &stub.config()).await,
        Runtime::Cloud
    );
}
