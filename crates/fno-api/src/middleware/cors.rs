//! CORS layer configuration.

use std::time::Duration;

use axum::http::{HeaderName, HeaderValue, Method};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::warn;

use fno_core::config::CorsConfig;

/// Builds a CORS tower layer from configuration.
///
/// Credentials are only allowed with an explicit origin list; a `"*"`
/// origin turns them off.
pub fn build_cors_layer(config: &CorsConfig) -> CorsLayer {
    let wildcard = config.allowed_origins.iter().any(|o| o == "*");

    let origins = if wildcard {
        AllowOrigin::from(Any)
    } else {
        let list: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|o| match o.parse() {
                Ok(v) => Some(v),
                Err(_) => {
                    warn!(origin = %o, "Ignoring invalid CORS origin");
                    None
                }
            })
            .collect();
        AllowOrigin::list(list)
    };

    let methods: Vec<Method> = config
        .allowed_methods
        .iter()
        .filter_map(|m| m.parse().ok())
        .collect();

    let headers: Vec<HeaderName> = config
        .allowed_headers
        .iter()
        .filter_map(|h| h.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(methods)
        .allow_headers(headers)
        .allow_credentials(config.allow_credentials && !wildcard)
        .max_age(Duration::from_secs(config.max_age_seconds))
}
