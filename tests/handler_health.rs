mod common;

use axum_test::TestServer;
use serde_json::Value;

#[tokio::test]
async fn test_health_endpoint_success() {
    let (state, _repo) = common::create_test_state();
    let server = TestServer::new(common::test_app(state)).unwrap();

    let response = server.get("/health").await;

    response.assert_status_ok();

    let json = response.json::<Value>();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["checks"]["storage"]["status"], "ok");
}

#[tokio::test]
async fn test_health_endpoint_structure() {
    let (state, _repo) = common::create_test_state();
    let server = TestServer::new(common::test_app(state)).unwrap();

    let response = server.get("/health").await;

    let json = response.json::<Value>();

    assert!(json.get("status").is_some());
    assert!(json.get("version").is_some());
    assert!(json.get("checks").is_some());
    assert!(json["checks"].get("storage").is_some());
}
