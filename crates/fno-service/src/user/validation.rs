//! Field rules applied at the start of each lifecycle operation.
//!
//! Every function normalizes its input and returns the first violated
//! rule as a validation error; nothing here touches the store.

use validator::ValidateEmail;

use fno_core::error::AppError;
use fno_core::result::AppResult;
use fno_core::types::RoleId;
use fno_entity::user::iin::{has_iin_format, is_valid_iin};

/// Longest accepted name part, in characters.
pub const NAME_MAX_LENGTH: usize = 100;

/// Lowercases and trims, then checks the address shape.
pub fn email(raw: &str) -> AppResult<String> {
    let email = raw.trim().to_lowercase();
    if !email.validate_email() {
        return Err(AppError::validation("email must be an email"));
    }
    Ok(email)
}

/// Checks the plaintext password length (in characters, inclusive bounds).
pub fn password(raw: &str, min: usize, max: usize) -> AppResult<()> {
    let len = raw.chars().count();
    if len < min {
        return Err(AppError::validation(format!(
            "password must be longer than or equal to {min} characters"
        )));
    }
    if len > max {
        return Err(AppError::validation(format!(
            "password must be shorter than or equal to {max} characters"
        )));
    }
    Ok(())
}

/// Trims a mandatory name part; blank is rejected.
pub fn required_name(field: &str, raw: &str) -> AppResult<String> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(AppError::validation(format!("{field} cannot be empty")));
    }
    check_name_length(field, value)?;
    Ok(value.to_string())
}

/// Trims an optional name part; blank becomes `None`.
pub fn optional_name(field: &str, raw: Option<&str>) -> AppResult<Option<String>> {
    match raw.map(str::trim).filter(|v| !v.is_empty()) {
        Some(value) => {
            check_name_length(field, value)?;
            Ok(Some(value.to_string()))
        }
        None => Ok(None),
    }
}

/// Format first, then checksum.
pub fn iin(raw: &str) -> AppResult<String> {
    if !has_iin_format(raw) {
        return Err(AppError::validation("IIN must be exactly 12 digits"));
    }
    if !is_valid_iin(raw) {
        return Err(AppError::validation(
            "IIN must be a valid 12-digit Kazakhstan Individual Identification Number",
        ));
    }
    Ok(raw.to_string())
}

/// Parses a role id supplied by a client.
pub fn role_id(raw: &str) -> AppResult<RoleId> {
    raw.trim()
        .parse()
        .map_err(|_| AppError::validation("roleId must be a UUID"))
}

fn check_name_length(field: &str, value: &str) -> AppResult<()> {
    if value.chars().count() > NAME_MAX_LENGTH {
        return Err(AppError::validation(format!(
            "{field} must be shorter than or equal to {NAME_MAX_LENGTH} characters"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_is_normalized() {
        assert_eq!(email("  Ivan@Example.COM ").unwrap(), "ivan@example.com");
        assert!(email("not-an-email").is_err());
        assert!(email("   ").is_err());
    }

    #[test]
    fn test_password_bounds() {
        assert!(password("1234567", 8, 100).is_err());
        assert!(password("12345678", 8, 100).is_ok());
        assert!(password(&"x".repeat(100), 8, 100).is_ok());
        assert!(password(&"x".repeat(101), 8, 100).is_err());
    }

    #[test]
    fn test_required_name() {
        assert_eq!(required_name("firstName", "  Иван ").unwrap(), "Иван");
        let err = required_name("firstName", "   ").unwrap_err();
        assert_eq!(err.message, "firstName cannot be empty");
        assert!(required_name("lastName", &"я".repeat(100)).is_ok());
        assert!(required_name("lastName", &"я".repeat(101)).is_err());
    }

    #[test]
    fn test_optional_name_blank_is_none() {
        assert_eq!(optional_name("patronymic", Some("  ")).unwrap(), None);
        assert_eq!(optional_name("patronymic", None).unwrap(), None);
        assert_eq!(
            optional_name("patronymic", Some(" Иванович ")).unwrap(),
            Some("Иванович".to_string())
        );
    }

    #[test]
    fn test_iin_messages_in_order() {
        assert_eq!(iin("12345").unwrap_err().message, "IIN must be exactly 12 digits");
        assert_eq!(
            iin("88012530171a").unwrap_err().message,
            "IIN must be exactly 12 digits"
        );
        assert!(iin("880125301712").unwrap_err().message.contains("Kazakhstan"));
        assert_eq!(iin("880125301713").unwrap(), "880125301713");
    }

    #[test]
    fn test_role_id() {
        assert!(role_id("not-a-uuid").is_err());
        assert!(role_id("6f1c1d0e-1b7a-4c55-9a57-0d3e6f9a1b2c").is_ok());
    }
}
