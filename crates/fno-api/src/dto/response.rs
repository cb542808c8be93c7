//! Response DTOs. User and login payloads are
//! [`fno_service::UserView`] and [`fno_service::LoginResult`].

use serde::{Deserialize, Serialize};

/// `GET /health` body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub database: String,
}
