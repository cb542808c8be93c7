//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use serde_json::{Value, json};
use tower::ServiceExt;

use fno_core::config::{AppConfig, AuthConfig, DatabaseConfig, StoreBackend};
use fno_core::types::UserId;
use fno_database::{MemoryUserStore, UserStore};
use fno_entity::user::UserChanges;

pub const PASSWORD: &str = "password123";

/// Valid, distinct IINs for test users.
pub const IINS: [&str; 4] = ["880125301713", "900101500009", "950315400016", "010203500018"];

/// Test application context over the in-memory store.
pub struct TestApp {
    /// The full Axum application, middleware included
    pub router: Router,
    /// Direct store access for setup
    pub store: MemoryUserStore,
    /// Application config
    pub config: AppConfig,
}

impl TestApp {
    /// Create a new test application with the default and admin roles seeded.
    pub async fn new() -> Self {
        let config = test_config();
        let store = MemoryUserStore::with_roles(&[
            config.auth.default_role.as_str(),
            config.auth.admin_role.as_str(),
        ])
        .await;

        let state = fno_api::AppState::new(config.clone(), Arc::new(store.clone()));
        let router = fno_api::build_app(state);

        Self {
            router,
            store,
            config,
        }
    }

    /// Register a user through the public endpoint and return its id.
    pub async fn register(&self, email: &str, iin: &str) -> String {
        let response = self
            .request("POST", "/users/register", Some(register_body(email, iin)), None)
            .await;
        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "Registration failed: {:?}",
            response.body
        );
        response.str_field("id")
    }

    /// Login and return the access token.
    pub async fn login(&self, email: &str, password: &str) -> String {
        let response = self
            .request(
                "POST",
                "/auth/login",
                Some(json!({ "email": email, "password": password })),
                None,
            )
            .await;
        assert_eq!(
            response.status,
            StatusCode::OK,
            "Login failed: {:?}",
            response.body
        );
        response.str_field("accessToken")
    }

    /// Register, then log in. Returns `(id, token)`.
    pub async fn register_and_login(&self, email: &str, iin: &str) -> (String, String) {
        let id = self.register(email, iin).await;
        let token = self.login(email, PASSWORD).await;
        (id, token)
    }

    /// Register a user, move it to the admin role, and log in.
    pub async fn admin(&self, email: &str, iin: &str) -> (String, String) {
        let id = self.register(email, iin).await;
        self.set_role(&id, &self.config.auth.admin_role).await;
        let token = self.login(email, PASSWORD).await;
        (id, token)
    }

    /// Change a user's role directly in the store.
    pub async fn set_role(&self, id: &str, role: &str) {
        let role = self
            .store
            .find_role_by_name(role)
            .await
            .expect("role lookup")
            .expect("role seeded");
        let changes = UserChanges {
            role_id: Some(role.id),
            ..UserChanges::default()
        };
        self.store
            .update_user(parse_id(id), changes)
            .await
            .expect("update")
            .expect("user exists");
    }

    /// Id of a seeded role, as the wire string.
    pub async fn store_role_id(&self, role: &str) -> String {
        self.store
            .find_role_by_name(role)
            .await
            .expect("role lookup")
            .expect("role seeded")
            .id
            .to_string()
    }

    /// Flip a user's active flag directly in the store.
    pub async fn deactivate(&self, id: &str) {
        let changes = UserChanges {
            is_active: Some(false),
            ..UserChanges::default()
        };
        self.store
            .update_user(parse_id(id), changes)
            .await
            .expect("update")
            .expect("user exists");
    }

    /// Make an HTTP request with a JSON body.
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();
        self.request_raw(method, path, body_str, token).await
    }

    /// Make an HTTP request with a raw body, for malformed payloads.
    pub async fn request_raw(
        &self,
        method: &str,
        path: &str,
        body: String,
        token: Option<&str>,
    ) -> TestResponse {
        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {token}"));
        }

        let req = req.body(Body::from(body)).expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}

impl TestResponse {
    /// A string field of the body; panics when missing.
    pub fn str_field(&self, key: &str) -> String {
        self.body
            .get(key)
            .and_then(Value::as_str)
            .unwrap_or_else(|| panic!("missing `{key}` in {:?}", self.body))
            .to_string()
    }

    /// The `message` of an error body.
    pub fn message(&self) -> String {
        self.str_field("message")
    }
}

pub fn register_body(email: &str, iin: &str) -> Value {
    json!({
        "email": email,
        "password": PASSWORD,
        "firstName": "Иван",
        "lastName": "Иванов",
        "patronymic": "Иванович",
        "iin": iin,
    })
}

fn parse_id(id: &str) -> UserId {
    id.parse().expect("valid user id")
}

fn test_config() -> AppConfig {
    AppConfig {
        database: DatabaseConfig {
            backend: StoreBackend::Memory,
            ..DatabaseConfig::default()
        },
        auth: AuthConfig {
            jwt_secret: "integration-test-secret".to_string(),
            ..AuthConfig::default()
        },
        ..AppConfig::default()
    }
}
