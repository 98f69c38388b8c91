mod common;

use axum::http::{StatusCode, header};
use axum_test::TestServer;
use serde_json::{Value, json};
use vehicle_registry::domain::repositories::{TokenRepository, TokenRole};
use vehicle_registry::utils::token::{generate_token, hash_token};

#[tokio::test]
async fn test_missing_token_returns_401_with_bearer_challenge() {
    let (state, _repo) = common::create_test_state();
    let server = TestServer::new(common::test_app(state)).unwrap();

    let response = server.get("/api/vehicles").await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(
        response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
        "Bearer"
    );
    assert_eq!(response.json::<Value>()["error"]["code"], "unauthorized");
}

#[tokio::test]
async fn test_unknown_token_returns_401() {
    let (state, _repo) = common::create_test_state();
    let server = TestServer::new(common::test_app(state)).unwrap();

    let response = server
        .get("/api/vehicles")
        .authorization_bearer("not-a-real-token")
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_revoked_token_returns_401() {
    let (state, repo) = common::create_test_state();
    let server = TestServer::new(common::test_app(state)).unwrap();

    let raw = generate_token();
    let hash = hash_token(common::TEST_SIGNING_SECRET, &raw);
    let token = repo.create_token("doomed", &hash, TokenRole::Admin).await.unwrap();

    server
        .get("/api/vehicles")
        .authorization_bearer(&raw)
        .await
        .assert_status_ok();

    repo.revoke_token(token.id).await.unwrap();

    server
        .get("/api/vehicles")
        .authorization_bearer(&raw)
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_readonly_token_can_read() {
    let (state, repo) = common::create_test_state();
    let server = TestServer::new(common::test_app(state)).unwrap();

    let admin = common::seed_admin_token(&repo).await;
    let readonly = common::seed_readonly_token(&repo).await;

    let created = server
        .post("/api/vehicles")
        .authorization_bearer(&admin)
        .json(&common::vehicle_payload("ABC1234"))
        .await
        .json::<Value>();

    let id = created["id"].as_i64().unwrap();

    server
        .get("/api/vehicles")
        .authorization_bearer(&readonly)
        .await
        .assert_status_ok();

    server
        .get(&format!("/api/vehicles/{id}"))
        .authorization_bearer(&readonly)
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn test_readonly_token_cannot_write() {
    let (state, repo) = common::create_test_state();
    let server = TestServer::new(common::test_app(state)).unwrap();

    let admin = common::seed_admin_token(&repo).await;
    let readonly = common::seed_readonly_token(&repo).await;

    let created = server
        .post("/api/vehicles")
        .authorization_bearer(&admin)
        .json(&common::vehicle_payload("ABC1234"))
        .await
        .json::<Value>();

    let id = created["id"].as_i64().unwrap();

    let response = server
        .post("/api/vehicles")
        .authorization_bearer(&readonly)
        .json(&common::vehicle_payload("XYZ9876"))
        .await;
    response.assert_status(StatusCode::FORBIDDEN);
    assert_eq!(response.json::<Value>()["error"]["code"], "forbidden");

    server
        .put(&format!("/api/vehicles/{id}"))
        .authorization_bearer(&readonly)
        .json(&json!({ "status": "CONNECTED" }))
        .await
        .assert_status(StatusCode::FORBIDDEN);

    server
        .delete(&format!("/api/vehicles/{id}"))
        .authorization_bearer(&readonly)
        .await
        .assert_status(StatusCode::FORBIDDEN);

    // The record is untouched.
    server
        .get(&format!("/api/vehicles/{id}"))
        .authorization_bearer(&admin)
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn test_health_does_not_require_auth() {
    let (state, _repo) = common::create_test_state();
    let server = TestServer::new(common::test_app(state)).unwrap();

    server.get("/health").await.assert_status_ok();
}
