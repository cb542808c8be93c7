//! User endpoints.

use axum::Json;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use fno_service::{UpdateUser, UserView};

use crate::dto::{CreateUserRequest, RegisterUserRequest, UpdateUserRequest};
use crate::error::ApiResult;
use crate::extractors::{AppJson, AuthUser, parse_user_id};
use crate::state::AppState;

/// POST /users/register (public)
pub async fn register(
    State(state): State<AppState>,
    AppJson(req): AppJson<RegisterUserRequest>,
) -> ApiResult<(StatusCode, Json<UserView>)> {
    let user = state.users.register(req.into()).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// POST /users (admin)
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    body: Bytes,
) -> ApiResult<(StatusCode, Json<UserView>)> {
    state.gate.require_admin(&auth)?;
    let req = AppJson::<CreateUserRequest>::parse(&body)?;
    let user = state.users.create(req.into()).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// GET /users (admin)
pub async fn list(State(state): State<AppState>, auth: AuthUser) -> ApiResult<Json<Vec<UserView>>> {
    state.gate.require_admin(&auth)?;
    Ok(Json(state.users.find_all().await?))
}

/// GET /users/{id} (admin or self)
pub async fn get(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<UserView>> {
    let id = parse_user_id(&id)?;
    state.gate.require_view_access(&auth, id)?;
    Ok(Json(state.users.find_one(id).await?))
}

/// PATCH /users/{id} (admin or self; role admin only)
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    AppJson(req): AppJson<UpdateUserRequest>,
) -> ApiResult<Json<UserView>> {
    let id = parse_user_id(&id)?;
    let input = UpdateUser::from(req);
    state
        .gate
        .require_update_access(&auth, id, input.has_role_id())?;
    Ok(Json(state.users.update(id, input).await?))
}

/// DELETE /users/{id} (admin, soft delete)
pub async fn remove(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<UserView>> {
    state.gate.require_admin(&auth)?;
    let id = parse_user_id(&id)?;
    Ok(Json(state.users.remove(id).await?))
}
