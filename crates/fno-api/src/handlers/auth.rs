//! Login and current-identity handlers.

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use serde_json::error::Category;
use validator::Validate;

use fno_auth::Identity;
use fno_core::error::AppError;
use fno_service::LoginResult;
use fno_service::auth::service::INVALID_CREDENTIALS;

use crate::dto::LoginRequest;
use crate::error::ApiResult;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /auth/login
///
/// A body that parses as JSON but lacks string `email`/`password` fields
/// fails like wrong credentials; only unparseable JSON is a 400.
pub async fn login(State(state): State<AppState>, body: Bytes) -> ApiResult<Json<LoginResult>> {
    let req: LoginRequest = serde_json::from_slice(&body).map_err(|e| match e.classify() {
        Category::Syntax | Category::Eof => AppError::validation("Malformed JSON body"),
        Category::Data | Category::Io => AppError::authentication(INVALID_CREDENTIALS),
    })?;
    if req.validate().is_err() {
        return Err(AppError::authentication(INVALID_CREDENTIALS).into());
    }

    let result = state.auth.login(&req.email, &req.password).await?;
    Ok(Json(result))
}

/// GET /auth/me
pub async fn me(AuthUser(identity): AuthUser) -> Json<Identity> {
    Json(identity)
}
