//! JWT claims payload.

use serde::{Deserialize, Serialize};

use fno_core::types::UserId;

/// Claims embedded in every access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user id.
    pub sub: UserId,
    /// Email at issuance.
    pub email: String,
    /// Role name at issuance.
    ///
    /// Advisory only. Authorization always uses the role re-read from the
    /// store when the token is verified, so this value may be stale.
    pub role: String,
    /// Issued-at (seconds since epoch).
    pub iat: i64,
    /// Expiration (seconds since epoch).
    pub exp: i64,
    /// Issuer.
    pub iss: String,
}
