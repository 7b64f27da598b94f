//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type for front ends built on this crate.
//! Unexpected failures are captured to Sentry via [`AppError::report`];
//! expected ones (bad input, rejected credentials) are only logged.

use thiserror::Error;

use crate::api::ApiError;
use crate::config::ConfigError;
use crate::services::auth::{AuthError, FormError};
use crate::services::contact::ContactError;
use crate::services::orders::CheckoutError;
use crate::services::storage::StorageError;

/// Application-level error type for the storefront client.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Backend request failed.
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Persisted state could not be read or written.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Authentication operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// A login or sign-up form was rejected.
    #[error("{0}")]
    Form(#[from] FormError),

    /// Contact form submission failed.
    #[error("Contact error: {0}")]
    Contact(#[from] ContactError),

    /// Checkout failed.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    /// Bad input from the user.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The operation needs a signed-in user.
    #[error("Please login first")]
    NotAuthenticated,

    /// The failure was already shown through a notifier.
    #[error("{0}")]
    Notified(String),
}

impl AppError {
    /// Whether this is a bug or outage rather than a user mistake.
    #[must_use]
    pub const fn is_unexpected(&self) -> bool {
        match self {
            Self::Config(_) | Self::Storage(_) => true,
            Self::Api(err)
            | Self::Contact(ContactError::Api(err))
            | Self::Checkout(CheckoutError::Api(err)) => !err.is_unauthorized(),
            Self::Checkout(CheckoutError::MissingProductDetails(_)) => true,
            _ => false,
        }
    }

    /// Whether the user has already been told about this failure.
    #[must_use]
    pub const fn is_notified(&self) -> bool {
        matches!(self, Self::Notified(_))
    }

    /// Log the error, capturing unexpected ones to Sentry.
    pub fn report(&self) {
        if self.is_unexpected() {
            let event_id = sentry::capture_error(self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Command failed"
            );
        } else {
            tracing::debug!(error = %self, "Command rejected");
        }
    }

    /// Message to show the user. Never leaks transport details.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Form(err) => err.message().to_owned(),
            Self::Contact(err) => err.display_message(),
            Self::Auth(err) => err.registration_message(),
            Self::Checkout(CheckoutError::Api(_)) => "Failed to place order".to_string(),
            Self::Checkout(err) => err.to_string(),
            Self::Api(err) if err.is_unauthorized() => {
                "Your session has expired. Please login again".to_string()
            }
            Self::Api(_) => "Could not reach the store. Please try again".to_string(),
            _ => self.to_string(),
        }
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Set the Sentry user context from a user ID.
///
/// Call this after successful authentication to associate errors with users.
pub fn set_sentry_user(user_id: &impl ToString, email: Option<&str>) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            id: Some(user_id.to_string()),
            email: email.map(String::from),
            ..Default::default()
        }));
    });
}

/// Clear the Sentry user context.
///
/// Call this on logout to stop associating errors with the user.
pub fn clear_sentry_user() {
    sentry::configure_scope(|scope| {
        scope.set_user(None);
    });
}

/// Add a breadcrumb for user actions.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of user actions
/// leading up to an error.
///
/// # Example
///
/// ```rust,ignore
/// add_breadcrumb("cart", "Added product", Some(&[("product_id", "p1")]));
/// ```
pub fn add_breadcrumb(category: &str, message: &str, data: Option<&[(&str, &str)]>) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    if let Some(pairs) = data {
        for (key, value) in pairs {
            breadcrumb.data.insert(
                (*key).to_string(),
                serde_json::Value::String((*value).to_string()),
            );
        }
    }

    sentry::add_breadcrumb(breadcrumb);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_display() {
        let err = AppError::BadRequest("unknown category".to_string());
        assert_eq!(err.to_string(), "Bad request: unknown category");

        let err = AppError::from(ConfigError::MissingEnvVar("RK_BACKEND_URL".to_string()));
        assert_eq!(
            err.to_string(),
            "Configuration error: Missing environment variable: RK_BACKEND_URL"
        );
    }

    #[test]
    fn test_unexpected_classification() {
        assert!(AppError::from(ApiError::Status {
            status: 500,
            detail: None
        })
        .is_unexpected());
        assert!(!AppError::from(ApiError::Unauthorized { detail: None }).is_unexpected());
        assert!(!AppError::from(CheckoutError::EmptyCart).is_unexpected());
        assert!(!AppError::NotAuthenticated.is_unexpected());
        assert!(!AppError::Notified("product p-tee was not added".to_string()).is_unexpected());
    }

    #[test]
    fn test_notified_errors() {
        let err = AppError::Notified("product p-tee was not added".to_string());
        assert!(err.is_notified());
        assert_eq!(err.to_string(), "product p-tee was not added");
        assert!(!AppError::NotAuthenticated.is_notified());
    }

    #[test]
    fn test_user_messages() {
        assert_eq!(
            AppError::from(ContactError::Api(ApiError::Status {
                status: 502,
                detail: None
            }))
            .user_message(),
            "Failed to send message. Please try again."
        );
        assert_eq!(
            AppError::from(CheckoutError::EmptyCart).user_message(),
            "Your cart is empty"
        );
        assert_eq!(
            AppError::from(ApiError::Unauthorized { detail: None }).user_message(),
            "Your session has expired. Please login again"
        );
    }
}
