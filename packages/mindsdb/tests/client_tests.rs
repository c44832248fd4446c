// ABOUTME: Integration tests for the MindsDB client against a mocked SQL API
// ABOUTME: Covers connection strategies, namespace bootstrap and response classification

use mindgate_mindsdb::{GatewayError, MindsDbClient, MindsDbConfig, QueryResult, SqlGateway};
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SHOW_PROJECT: &str = "SHOW DATABASES WHERE name = 'marketing_agents'";
const CREATE_PROJECT: &str = "CREATE PROJECT marketing_agents";

async fn mount_status(server: &MockServer, status: u16, times: u64) {
    Mock::given(method("GET"))
        .and(path("/api/status"))
        .respond_with(ResponseTemplate::new(status))
        .expect(times)
        .mount(server)
        .await;
}

async fn mount_statement(server: &MockServer, sql: &str, body: serde_json::Value, times: u64) {
    Mock::given(method("POST"))
        .and(path("/api/sql/query"))
        .and(body_partial_json(json!({ "query": sql })))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(times)
        .mount(server)
        .await;
}

fn existing_project() -> serde_json::Value {
    json!({
        "type": "table",
        "column_names": ["NAME"],
        "data": [["marketing_agents"]]
    })
}

#[tokio::test]
async fn test_connect_without_login_when_status_is_reachable() {
    let server = MockServer::start().await;
    mount_status(&server, 200, 1).await;
    Mock::given(method("POST"))
        .and(path("/api/login"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    mount_statement(&server, SHOW_PROJECT, existing_project(), 1).await;
    mount_statement(&server, CREATE_PROJECT, json!({"type": "ok"}), 0).await;

    let client = MindsDbClient::connect(MindsDbConfig::new(server.uri()))
        .await
        .expect("connect should succeed");

    assert_eq!(client.namespace(), "marketing_agents");
}

#[tokio::test]
async fn test_connect_creates_missing_project() {
    let server = MockServer::start().await;
    mount_status(&server, 200, 1).await;
    mount_statement(
        &server,
        SHOW_PROJECT,
        json!({"type": "table", "column_names": ["NAME"], "data": []}),
        1,
    )
    .await;
    mount_statement(&server, CREATE_PROJECT, json!({"type": "ok"}), 1).await;

    MindsDbClient::connect(MindsDbConfig::new(server.uri()))
        .await
        .expect("connect should succeed");
}

#[tokio::test]
async fn test_namespace_failure_is_not_fatal() {
    let server = MockServer::start().await;
    mount_status(&server, 200, 1).await;
    Mock::given(method("POST"))
        .and(path("/api/sql/query"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let result = MindsDbClient::connect(MindsDbConfig::new(server.uri())).await;

    assert!(result.is_ok(), "namespace errors must be swallowed");
}

#[tokio::test]
async fn test_try_ensure_namespace_reports_create_failure() {
    let server = MockServer::start().await;
    mount_status(&server, 200, 1).await;
    mount_statement(
        &server,
        SHOW_PROJECT,
        json!({"type": "table", "column_names": ["NAME"], "data": []}),
        2,
    )
    .await;
    mount_statement(
        &server,
        CREATE_PROJECT,
        json!({"type": "error", "error_message": "permission denied"}),
        2,
    )
    .await;

    let client = MindsDbClient::connect(MindsDbConfig::new(server.uri()))
        .await
        .expect("connect swallows bootstrap errors");
    let err = client.try_ensure_namespace().await.unwrap_err();

    assert!(matches!(err, GatewayError::Execution(_)));
    assert!(err.to_string().contains("permission denied"));
}

#[tokio::test]
async fn test_connect_falls_through_to_empty_credentials() {
    let server = MockServer::start().await;
    // First probe (no login) is rejected, the next one succeeds
    Mock::given(method("GET"))
        .and(path("/api/status"))
        .respond_with(ResponseTemplate::new(401))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    mount_status(&server, 200, 1).await;
    Mock::given(method("POST"))
        .and(path("/api/login"))
        .and(body_partial_json(json!({"username": "", "password": ""})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    mount_statement(&server, SHOW_PROJECT, existing_project(), 1).await;

    MindsDbClient::connect(MindsDbConfig::new(server.uri()))
        .await
        .expect("second strategy should connect");
}

#[tokio::test]
async fn test_connect_fails_after_last_strategy() {
    let server = MockServer::start().await;
    mount_status(&server, 503, 3).await;
    Mock::given(method("POST"))
        .and(path("/api/login"))
        .respond_with(ResponseTemplate::new(200))
        .expect(2)
        .mount(&server)
        .await;

    let config = MindsDbConfig::new(server.uri()).with_credentials("analyst", "secret");
    let err = MindsDbClient::connect(config)
        .await
        .err()
        .expect("all strategies should fail");

    assert!(matches!(err, GatewayError::Connection(_)));
    assert!(!err.to_string().contains("secret"));
}

#[tokio::test]
async fn test_query_classifies_responses() {
    let server = MockServer::start().await;
    mount_status(&server, 200, 1).await;
    mount_statement(&server, SHOW_PROJECT, existing_project(), 1).await;
    mount_statement(
        &server,
        "SELECT * FROM marketing_agents.missing LIMIT 1;",
        json!({"type": "error", "error_message": "Table 'missing' not found"}),
        1,
    )
    .await;
    mount_statement(
        &server,
        "SHOW TABLES FROM marketing_agents;",
        json!({
            "type": "table",
            "column_names": ["Tables_in_marketing_agents"],
            "data": [["campaign_spring"]]
        }),
        1,
    )
    .await;

    let client = MindsDbClient::connect(MindsDbConfig::new(server.uri()))
        .await
        .unwrap();

    let err = client
        .query("SELECT * FROM marketing_agents.missing LIMIT 1;")
        .await
        .unwrap_err();
    assert!(matches!(err, GatewayError::Execution(_)));
    assert!(err.to_string().contains("not found"));

    let result = client
        .query("SHOW TABLES FROM marketing_agents;")
        .await
        .unwrap();
    match result {
        QueryResult::Table(table) => {
            assert_eq!(table.first_column_values(), vec!["campaign_spring"]);
        }
        other => panic!("expected a table, got {:?}", other),
    }
}
