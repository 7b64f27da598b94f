//! Portfolio contact form types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use rk_industry_core::{ContactMessageId, Email};

use crate::services::contact::ContactError;

/// A validated contact form submission.
///
/// Serializes to the body of `POST /contact`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactForm {
    pub name: String,
    pub email: Email,
    pub project: String,
    pub message: String,
}

impl ContactForm {
    /// Validate and build a contact form.
    ///
    /// # Errors
    ///
    /// Returns `ContactError::InvalidEmail` or `ContactError::MissingField`.
    pub fn new(name: &str, email: &str, project: &str, message: &str) -> Result<Self, ContactError> {
        let email = Email::parse(email)?;
        let name = name.trim();
        if name.is_empty() {
            return Err(ContactError::MissingField("Name"));
        }
        let message = message.trim();
        if message.is_empty() {
            return Err(ContactError::MissingField("Message"));
        }

        Ok(Self {
            name: name.to_owned(),
            email,
            project: project.trim().to_owned(),
            message: message.to_owned(),
        })
    }
}

/// A stored contact message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMessage {
    pub id: ContactMessageId,
    pub name: String,
    pub email: String,
    pub project: String,
    pub message: String,
    #[serde(default, deserialize_with = "super::lenient_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}
