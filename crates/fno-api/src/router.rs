//! Route definitions for the FNO HTTP API.

use axum::Router;
use axum::routing::{get, post};

use crate::handlers;
use crate::state::AppState;

/// Builds the router with every route, without outer layers.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(auth_routes())
        .merge(user_routes())
        .route("/health", get(handlers::health::health))
        .with_state(state)
}

/// Login and current identity
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/me", get(handlers::auth::me))
}

/// Registration and user management
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users/register", post(handlers::user::register))
        .route(
            "/users",
            post(handlers::user::create).get(handlers::user::list),
        )
        .route(
            "/users/{id}",
            get(handlers::user::get)
                .patch(handlers::user::update)
                .delete(handlers::user::remove),
        )
}
