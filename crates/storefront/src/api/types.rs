//! Wire types private to the API client.

use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};

use crate::models::RegistrationProfile;

/// Successful `POST /login` response.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
}

/// Generic `{"message": "..."}` acknowledgement.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApiMessage {
    pub message: String,
}

/// Request body for `POST /login`.
#[derive(Serialize)]
pub(super) struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Request body for `POST /register`.
#[derive(Serialize)]
pub(super) struct RegisterRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
    pub full_name: &'a str,
    pub phone: &'a str,
    pub address: &'a str,
}

impl<'a> From<&'a RegistrationProfile> for RegisterRequest<'a> {
    fn from(profile: &'a RegistrationProfile) -> Self {
        Self {
            email: profile.email.as_str(),
            password: profile.password.expose_secret(),
            full_name: &profile.full_name,
            phone: &profile.phone,
            address: &profile.address,
        }
    }
}

/// Error payload: `detail` is a string for handled errors and a list of
/// field errors for request validation failures.
#[derive(Deserialize)]
pub(super) struct ErrorBody {
    #[serde(default)]
    detail: Option<serde_json::Value>,
}

impl ErrorBody {
    /// The literal message, when `detail` is a non-empty string.
    pub fn into_message(self) -> Option<String> {
        match self.detail {
            Some(serde_json::Value::String(message)) if !message.trim().is_empty() => {
                Some(message)
            }
            _ => None,
        }
    }
}
