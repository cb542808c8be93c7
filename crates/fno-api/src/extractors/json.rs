//! JSON body extractor whose rejections render as validation errors.

use axum::Json;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;

use fno_core::error::AppError;
use fno_core::result::AppResult;

use crate::error::ApiError;

/// Like [`axum::Json`], but a malformed or mistyped body becomes a 400
/// with the standard error body.
#[derive(Debug, Clone, Copy, Default)]
pub struct AppJson<T>(pub T);

impl<S, T> FromRequest<S> for AppJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(AppError::validation(rejection.body_text()).into()),
        }
    }
}

impl<T: DeserializeOwned> AppJson<T> {
    /// Parses an already-buffered body, for handlers that must authorize
    /// before looking at the payload.
    pub fn parse(body: &[u8]) -> AppResult<T> {
        serde_json::from_slice(body)
            .map_err(|e| AppError::validation(format!("Failed to deserialize the JSON body: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::RegisterUserRequest;

    #[test]
    fn test_parse_reports_missing_field() {
        let err = AppJson::<RegisterUserRequest>::parse(br#"{"email":"a@example.com"}"#)
            .unwrap_err();
        assert!(err.message.contains("missing field"));
    }
}
