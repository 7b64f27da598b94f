//! Authentication error types.

use thiserror::Error;

use rk_industry_core::EmailError;

use crate::api::ApiError;

/// Fixed message shown on the login form for any failure.
pub const LOGIN_FAILED_MESSAGE: &str = "Invalid email or password";

/// Fallback message on the sign-up form when the backend gives no detail.
pub const REGISTRATION_FAILED_MESSAGE: &str = "Registration failed";

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// A required form field is blank.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// The backend rejected the email/password pair.
    #[error("invalid credentials")]
    InvalidCredentials {
        /// Literal backend message, if any.
        detail: Option<String>,
    },

    /// A credential was issued but `/me` could not resolve it.
    #[error("credential could not be resolved to a user: {0}")]
    IdentityUnresolved(#[source] ApiError),

    /// Any other backend or transport failure.
    #[error("backend error: {0}")]
    Api(ApiError),
}

impl From<ApiError> for AuthError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Unauthorized { detail } => Self::InvalidCredentials { detail },
            other => Self::Api(other),
        }
    }
}

impl AuthError {
    /// The backend's literal error message, when one was returned.
    #[must_use]
    pub fn backend_detail(&self) -> Option<&str> {
        match self {
            Self::InvalidCredentials { detail } => detail.as_deref(),
            Self::IdentityUnresolved(err) | Self::Api(err) => err.detail(),
            Self::InvalidEmail(_) | Self::MissingField(_) => None,
        }
    }

    /// Message for the login form. Never distinguishes the cause.
    #[must_use]
    pub const fn login_message(&self) -> &'static str {
        LOGIN_FAILED_MESSAGE
    }

    /// Message for the sign-up form.
    ///
    /// Client-side validation errors are shown as-is; backend failures show
    /// the backend's detail verbatim, falling back to a generic message.
    #[must_use]
    pub fn registration_message(&self) -> String {
        match self {
            Self::InvalidEmail(_) | Self::MissingField(_) => self.to_string(),
            _ => self
                .backend_detail()
                .unwrap_or(REGISTRATION_FAILED_MESSAGE)
                .to_owned(),
        }
    }
}
