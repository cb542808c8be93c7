//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use fno_auth::{AccessGate, CredentialVerifier, JwtDecoder, JwtEncoder, PasswordHasher, TokenVerifier};
use fno_core::config::AppConfig;
use fno_database::UserStore;
use fno_service::{AuthService, UserService};

/// Shared dependencies, passed to every handler via `State<AppState>`.
///
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// User and role persistence
    pub store: Arc<dyn UserStore>,
    /// Bearer token to identity resolution
    pub tokens: Arc<TokenVerifier>,
    /// Role and ownership checks
    pub gate: Arc<AccessGate>,
    /// User lifecycle
    pub users: Arc<UserService>,
    /// Login
    pub auth: Arc<AuthService>,
}

impl AppState {
    /// Wires the auth stack and services over `store`.
    pub fn new(config: AppConfig, store: Arc<dyn UserStore>) -> Self {
        let hasher = PasswordHasher::new();
        let auth_config = &config.auth;

        let tokens = TokenVerifier::new(JwtDecoder::new(auth_config), Arc::clone(&store));
        let users = UserService::new(Arc::clone(&store), hasher, auth_config);
        let auth = AuthService::new(
            CredentialVerifier::new(Arc::clone(&store), hasher),
            JwtEncoder::new(auth_config),
        );
        let gate = AccessGate::from_config(auth_config);

        Self {
            config: Arc::new(config),
            store,
            tokens: Arc::new(tokens),
            gate: Arc::new(gate),
            users: Arc::new(users),
            auth: Arc::new(auth),
        }
    }
}
