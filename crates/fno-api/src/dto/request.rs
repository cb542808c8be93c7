//! Request DTOs.
//!
//! Field-level rules (trimming, lengths, IIN checksum) are enforced by
//! the services; these types only fix the wire shape.

use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

use fno_service::{CreateUser, RegisterUser, UpdateUser};

/// Distinguishes an absent field (`None`) from an explicit `null`
/// (`Some(None)`).
fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1))]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// `POST /users/register` body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUserRequest {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub patronymic: Option<String>,
    pub iin: String,
}

impl From<RegisterUserRequest> for RegisterUser {
    fn from(req: RegisterUserRequest) -> Self {
        Self {
            email: req.email,
            password: req.password,
            first_name: req.first_name,
            last_name: req.last_name,
            patronymic: req.patronymic,
            iin: req.iin,
        }
    }
}

/// `POST /users` body (admin).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    #[serde(flatten)]
    pub profile: RegisterUserRequest,
    #[serde(default)]
    pub role_id: Option<String>,
}

impl From<CreateUserRequest> for CreateUser {
    fn from(req: CreateUserRequest) -> Self {
        Self {
            profile: req.profile.into(),
            role_id: req.role_id,
        }
    }
}

/// `PATCH /users/{id}` body.
///
/// `null` means "no change" for every field except `patronymic`, where it
/// clears the value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub patronymic: Option<Option<String>>,
    #[serde(default)]
    pub iin: Option<String>,
    #[serde(default)]
    pub role_id: Option<String>,
}

impl From<UpdateUserRequest> for UpdateUser {
    fn from(req: UpdateUserRequest) -> Self {
        Self {
            email: req.email,
            first_name: req.first_name,
            last_name: req.last_name,
            patronymic: req.patronymic,
            iin: req.iin,
            role_id: req.role_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patronymic_null_vs_absent() {
        let absent: UpdateUserRequest = serde_json::from_str(r#"{"firstName":"Иван"}"#).unwrap();
        assert_eq!(absent.patronymic, None);

        let cleared: UpdateUserRequest = serde_json::from_str(r#"{"patronymic":null}"#).unwrap();
        assert_eq!(cleared.patronymic, Some(None));

        let set: UpdateUserRequest = serde_json::from_str(r#"{"patronymic":"Иванович"}"#).unwrap();
        assert_eq!(set.patronymic, Some(Some("Иванович".to_string())));
    }

    #[test]
    fn test_null_role_id_counts_as_absent() {
        let req: UpdateUserRequest =
            serde_json::from_str(r#"{"roleId":null,"email":null}"#).unwrap();
        assert!(!UpdateUser::from(req.clone()).has_role_id());
        assert_eq!(req.email, None);
    }

    #[test]
    fn test_create_request_flattens_profile() {
        let req: CreateUserRequest = serde_json::from_str(
            r#"{"email":"a@example.com","password":"password123","firstName":"A",
                "lastName":"B","iin":"880125301713","roleId":"x"}"#,
        )
        .unwrap();
        assert_eq!(req.profile.first_name, "A");
        assert_eq!(req.role_id.as_deref(), Some("x"));
    }
}
