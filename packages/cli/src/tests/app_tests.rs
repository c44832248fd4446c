use crate::build_app;
use crate::config::Config;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use mindgate_mindsdb::test_utils::RecordingGateway;
use std::net::{IpAddr, Ipv4Addr};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tower::ServiceExt;

fn test_config(data_dir: &TempDir) -> Config {
    Config {
        port: 8000,
        bind_addr: IpAddr::V4(Ipv4Addr::LOCALHOST),
        cors_origin: "http://localhost:3000".to_string(),
        mindsdb_host: "http://127.0.0.1:47334".to_string(),
        mindsdb_user: None,
        mindsdb_password: None,
        mindsdb_project: "marketing_agents".to_string(),
        data_dir: data_dir.path().to_path_buf(),
        request_timeout: Duration::from_secs(5),
        connect_timeout: Duration::from_secs(1),
    }
}

#[tokio::test]
async fn test_cors_preflight_allows_configured_origin() {
    let data_dir = TempDir::new().unwrap();
    let app = build_app(Arc::new(RecordingGateway::accepting()), &test_config(&data_dir)).unwrap();

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/agents")
        .header("origin", "http://localhost:3000")
        .header("access-control-request-method", "POST")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("access-control-allow-origin").unwrap(),
        "http://localhost:3000"
    );
}

#[tokio::test]
async fn test_health_through_full_stack() {
    let data_dir = TempDir::new().unwrap();
    let app = build_app(Arc::new(RecordingGateway::accepting()), &test_config(&data_dir)).unwrap();

    let request = Request::builder()
        .method(Method::GET)
        .uri("/api/health")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[test]
fn test_invalid_cors_origin_is_rejected() {
    let data_dir = TempDir::new().unwrap();
    let mut config = test_config(&data_dir);
    config.cors_origin = "http://bad\norigin".to_string();

    assert!(build_app(Arc::new(RecordingGateway::accepting()), &config).is_err());
}
