//! Portfolio contact form.
//!
//! Submissions are stored by the backend. There is no follow-up email and no
//! subscription list; the form only needs a yes/no answer to render.

use thiserror::Error;
use tracing::{info, instrument, warn};

use rk_industry_core::EmailError;

use crate::api::{ApiClient, ApiError};
use crate::models::{ContactForm, ContactMessage};

/// Shown inline after a successful submission.
pub const CONTACT_SENT_MESSAGE: &str = "Thank you! Your message has been sent.";

/// Shown inline for any backend or network failure.
pub const CONTACT_FAILED_MESSAGE: &str = "Failed to send message. Please try again.";

/// Errors that can occur while submitting the contact form.
#[derive(Debug, Error)]
pub enum ContactError {
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("backend error: {0}")]
    Api(#[from] ApiError),
}

impl ContactError {
    /// Text shown inline in the form.
    ///
    /// Validation problems are shown as-is; anything the backend or network
    /// caused collapses to a single fixed message.
    #[must_use]
    pub fn display_message(&self) -> String {
        match self {
            Self::InvalidEmail(_) | Self::MissingField(_) => self.to_string(),
            Self::Api(_) => CONTACT_FAILED_MESSAGE.to_owned(),
        }
    }
}

/// Contact form submission service.
#[derive(Debug, Clone)]
pub struct ContactService {
    api: ApiClient,
}

impl ContactService {
    #[must_use]
    pub const fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Submit a validated form.
    ///
    /// # Errors
    ///
    /// Returns `ContactError::Api` if the backend cannot store the message.
    #[instrument(skip(self, form), fields(email = %form.email))]
    pub async fn submit(&self, form: &ContactForm) -> Result<ContactMessage, ContactError> {
        match self.api.submit_contact(form).await {
            Ok(stored) => {
                info!(message_id = %stored.id, "Contact message stored");
                Ok(stored)
            }
            Err(e) => {
                warn!(error = %e, "Contact submission failed");
                Err(e.into())
            }
        }
    }

    /// Validate raw form fields and submit them.
    ///
    /// # Errors
    ///
    /// Returns the validation error before any request is made, otherwise
    /// as [`submit`](Self::submit).
    pub async fn submit_fields(
        &self,
        name: &str,
        email: &str,
        project: &str,
        message: &str,
    ) -> Result<ContactMessage, ContactError> {
        let form = ContactForm::new(name, email, project, message)?;
        self.submit(&form).await
    }

    /// Stored messages, newest first.
    ///
    /// # Errors
    ///
    /// Returns `ContactError::Api` on any backend failure.
    #[instrument(skip(self))]
    pub async fn messages(&self) -> Result<Vec<ContactMessage>, ContactError> {
        Ok(self.api.contact_messages().await?)
    }
}
