//! Path parameter parsing.

use fno_core::error::AppError;
use fno_core::result::AppResult;
use fno_core::types::UserId;

/// Parses a `{id}` segment. Handlers parse it themselves instead of using
/// `Path<UserId>` so admin-only routes reject non-admins before the id is
/// looked at.
pub fn parse_user_id(raw: &str) -> AppResult<UserId> {
    raw.parse()
        .map_err(|_| AppError::validation("Validation failed (uuid is expected)"))
}
