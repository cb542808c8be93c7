//! Integration tests for login, bearer resolution, and health.

mod helpers;

use http::StatusCode;
use serde_json::json;

use helpers::{IINS, PASSWORD, TestApp};

#[tokio::test]
async fn test_login_success() {
    let app = TestApp::new().await;
    let id = app.register("login@example.com", IINS[0]).await;

    let response = app
        .request(
            "POST",
            "/auth/login",
            Some(json!({ "email": "  LOGIN@Example.com ", "password": PASSWORD })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(!response.str_field("accessToken").is_empty());
    assert_eq!(response.body["user"]["id"], id);
    assert_eq!(response.body["user"]["role"]["name"], "USER");
    assert_eq!(response.body["user"]["fullName"], "Иванов Иван Иванович");
    assert!(response.body["user"].get("passwordHash").is_none());
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let app = TestApp::new().await;
    let id = app.register("known@example.com", IINS[0]).await;

    let wrong_password = app
        .request(
            "POST",
            "/auth/login",
            Some(json!({ "email": "known@example.com", "password": "wrong-password" })),
            None,
        )
        .await;
    let unknown_user = app
        .request(
            "POST",
            "/auth/login",
            Some(json!({ "email": "nobody@example.com", "password": PASSWORD })),
            None,
        )
        .await;

    app.deactivate(&id).await;
    let inactive = app
        .request(
            "POST",
            "/auth/login",
            Some(json!({ "email": "known@example.com", "password": PASSWORD })),
            None,
        )
        .await;

    for response in [&wrong_password, &unknown_user, &inactive] {
        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
        assert_eq!(response.message(), "Invalid credentials");
    }
    assert_eq!(wrong_password.body, unknown_user.body);
    assert_eq!(unknown_user.body, inactive.body);
}

#[tokio::test]
async fn test_login_with_non_string_fields_is_unauthorized() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/auth/login",
            Some(json!({ "email": 42, "password": ["x"] })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let response = app
        .request("POST", "/auth/login", Some(json!({})), None)
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_with_malformed_json_is_bad_request() {
    let app = TestApp::new().await;
    let response = app
        .request_raw("POST", "/auth/login", "{\"email\":".to_string(), None)
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_me_returns_fresh_identity() {
    let app = TestApp::new().await;
    let (id, token) = app.register_and_login("me@example.com", IINS[0]).await;

    let response = app.request("GET", "/auth/me", None, Some(&token)).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.str_field("id"), id);
    assert_eq!(response.str_field("email"), "me@example.com");
    assert_eq!(response.body["role"]["name"], "USER");
}

#[tokio::test]
async fn test_me_without_token_is_unauthorized() {
    let app = TestApp::new().await;

    let missing = app.request("GET", "/auth/me", None, None).await;
    let garbage = app
        .request("GET", "/auth/me", None, Some("not-a-jwt"))
        .await;

    for response in [&missing, &garbage] {
        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
        assert_eq!(response.message(), "Invalid or expired token");
    }
}

#[tokio::test]
async fn test_token_of_deactivated_user_is_rejected() {
    let app = TestApp::new().await;
    let (id, token) = app.register_and_login("gone@example.com", IINS[0]).await;

    app.deactivate(&id).await;

    let response = app.request("GET", "/auth/me", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_role_change_applies_to_existing_token() {
    let app = TestApp::new().await;
    let (id, token) = app.register_and_login("promoted@example.com", IINS[0]).await;

    let before = app.request("GET", "/users", None, Some(&token)).await;
    assert_eq!(before.status, StatusCode::FORBIDDEN);

    // The token still carries the old role claim.
    app.set_role(&id, "ADMIN").await;

    let after = app.request("GET", "/users", None, Some(&token)).await;
    assert_eq!(after.status, StatusCode::OK);

    let me = app.request("GET", "/auth/me", None, Some(&token)).await;
    assert_eq!(me.body["role"]["name"], "ADMIN");
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::new().await;
    let response = app.request("GET", "/health", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.str_field("status"), "ok");
    assert_eq!(response.str_field("database"), "connected");
}
