//! Authentication gateway.
//!
//! Drives the login and sign-up forms: performs the backend calls through the
//! [`SessionStore`] and turns failures into the message the form displays.

mod error;

pub use error::{AuthError, LOGIN_FAILED_MESSAGE, REGISTRATION_FAILED_MESSAGE};

use secrecy::SecretString;
use thiserror::Error;
use tracing::{info, instrument, warn};

use crate::models::{RegistrationProfile, UserRef};
use crate::services::session::SessionStore;

/// A failed form submission: the inline message plus the underlying cause.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct FormError {
    message: String,
    #[source]
    cause: AuthError,
}

impl FormError {
    /// Text shown inline in the form.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// What actually went wrong.
    #[must_use]
    pub const fn cause(&self) -> &AuthError {
        &self.cause
    }
}

/// Login and registration entry point for the UI.
#[derive(Debug, Clone)]
pub struct AuthGateway {
    session: SessionStore,
}

impl AuthGateway {
    /// Create a gateway updating `session` on success.
    #[must_use]
    pub const fn new(session: SessionStore) -> Self {
        Self { session }
    }

    /// Submit the login form.
    ///
    /// # Errors
    ///
    /// Any failure yields the fixed message "Invalid email or password".
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn login(&self, email: &str, password: &SecretString) -> Result<UserRef, FormError> {
        self.session.login(email, password).await.map_err(|cause| {
            warn!(error = %cause, "Login failed");
            FormError {
                message: cause.login_message().to_owned(),
                cause,
            }
        })
    }

    /// Submit the sign-up form.
    ///
    /// Registration itself establishes no session; on success the same
    /// email and password are used for a regular login.
    ///
    /// # Errors
    ///
    /// The message is the backend's detail when it sent one (e.g. "Email
    /// already registered"), otherwise "Registration failed".
    #[instrument(skip(self, profile), fields(email = %profile.email))]
    pub async fn register(&self, profile: &RegistrationProfile) -> Result<UserRef, FormError> {
        let result = async {
            let created = self.session.api().register(profile).await?;
            info!(user_id = %created.id, "Account created");
            self.session
                .login(profile.email.as_str(), &profile.password)
                .await
        }
        .await;

        result.map_err(|cause| {
            warn!(error = %cause, "Registration failed");
            FormError {
                message: cause.registration_message(),
                cause,
            }
        })
    }

    /// Validate raw sign-up fields and submit them.
    ///
    /// # Errors
    ///
    /// Validation failures are reported like backend failures, with the
    /// validation message shown inline.
    pub async fn register_fields(
        &self,
        email: &str,
        password: SecretString,
        full_name: &str,
        phone: &str,
        address: &str,
    ) -> Result<UserRef, FormError> {
        let profile = RegistrationProfile::new(email, password, full_name, phone, address)
            .map_err(|cause| FormError {
                message: cause.registration_message(),
                cause,
            })?;
        self.register(&profile).await
    }

    /// End the session.
    pub fn logout(&self) {
        self.session.logout();
    }
}
