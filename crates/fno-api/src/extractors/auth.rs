//! `AuthUser` extractor: reads the bearer token and resolves the caller.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::TypedHeader;
use axum_extra::headers::Authorization;
use axum_extra::headers::authorization::Bearer;

use fno_auth::Identity;
use fno_auth::jwt::INVALID_TOKEN;
use fno_core::error::AppError;

use crate::error::ApiError;
use crate::state::AppState;

/// The authenticated caller, with the role freshly read from the store.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Identity);

impl std::ops::Deref for AuthUser {
    type Target = Identity;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| AppError::authentication(INVALID_TOKEN))?;

        let identity = state.tokens.verify(bearer.token()).await?;
        Ok(AuthUser(identity))
    }
}
