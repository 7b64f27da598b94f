//! User identity types.

use chrono::{DateTime, Utc};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use rk_industry_core::{Email, UserId};

use crate::services::auth::AuthError;

/// The resolved profile behind a credential, as returned by `GET /me`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    pub id: UserId,
    /// Kept as the backend spells it; not re-validated on the way in.
    pub email: String,
    pub full_name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default, deserialize_with = "super::lenient_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

impl UserRef {
    /// Header greeting, e.g. "Hello, Ann".
    #[must_use]
    pub fn greeting(&self) -> String {
        format!("Hello, {}", self.full_name)
    }
}

/// Fields submitted on the sign-up form.
///
/// Every field is required. Construction validates the form so no request is
/// sent for obviously incomplete input.
#[derive(Debug, Clone)]
pub struct RegistrationProfile {
    pub email: Email,
    pub password: SecretString,
    pub full_name: String,
    pub phone: String,
    pub address: String,
}

impl RegistrationProfile {
    /// Validate and build a registration profile.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail` for a malformed email and
    /// `AuthError::MissingField` for any blank field.
    pub fn new(
        email: &str,
        password: SecretString,
        full_name: &str,
        phone: &str,
        address: &str,
    ) -> Result<Self, AuthError> {
        use secrecy::ExposeSecret;

        let email = Email::parse(email)?;
        if password.expose_secret().is_empty() {
            return Err(AuthError::MissingField("Password"));
        }
        let full_name = required(full_name, "Full Name")?;
        let phone = required(phone, "Phone")?;
        let address = required(address, "Address")?;

        Ok(Self {
            email,
            password,
            full_name,
            phone,
            address,
        })
    }
}

fn required(value: &str, field: &'static str) -> Result<String, AuthError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(AuthError::MissingField(field))
    } else {
        Ok(trimmed.to_owned())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_me_response() {
        let json = r#"{
            "id": "u1",
            "email": "ann@example.com",
            "full_name": "Ann",
            "phone": "+1234567890",
            "address": "1 Main St",
            "created_at": "2025-07-15T10:00:00.5"
        }"#;
        let user: UserRef = serde_json::from_str(json).unwrap();
        assert_eq!(user.id.as_str(), "u1");
        assert_eq!(user.greeting(), "Hello, Ann");
        assert!(user.created_at.is_some());
    }

    #[test]
    fn test_deserialize_minimal_user() {
        let user: UserRef =
            serde_json::from_str(r#"{"id":"u2","email":"x@y.z","full_name":"X"}"#).unwrap();
        assert!(user.phone.is_none());
        assert!(user.created_at.is_none());
    }

    #[test]
    fn test_registration_requires_every_field() {
        let err = RegistrationProfile::new(
            "ann@example.com",
            SecretString::from("pw"),
            "Ann",
            "  ",
            "1 Main St",
        )
        .unwrap_err();
        assert!(matches!(err, AuthError::MissingField("Phone")));

        let err = RegistrationProfile::new(
            "ann@example.com",
            SecretString::from(String::new()),
            "Ann",
            "123",
            "1 Main St",
        )
        .unwrap_err();
        assert!(matches!(err, AuthError::MissingField("Password")));
    }

    #[test]
    fn test_registration_validates_email() {
        let err = RegistrationProfile::new(
            "not-an-email",
            SecretString::from("pw"),
            "Ann",
            "123",
            "1 Main St",
        )
        .unwrap_err();
        assert!(matches!(err, AuthError::InvalidEmail(_)));
    }
}
