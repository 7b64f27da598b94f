//! Bearer credential issued by the backend at login.

use core::fmt;

use secrecy::{ExposeSecret, SecretString};

/// Opaque bearer token.
///
/// The token is never printed: `Debug` is redacted and there is no `Display`.
/// Use [`AccessToken::authorization_header`] to build the header value and
/// [`AccessToken::expose`] when it has to be persisted.
#[derive(Clone)]
pub struct AccessToken(SecretString);

impl AccessToken {
    /// Wrap a raw token string.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(SecretString::from(token.into()))
    }

    /// Value for the `Authorization` header.
    #[must_use]
    pub fn authorization_header(&self) -> String {
        format!("Bearer {}", self.0.expose_secret())
    }

    /// Raw token, for writing to persistent storage.
    #[must_use]
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }

    /// Whether the token is empty or whitespace only.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.0.expose_secret().trim().is_empty()
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken([REDACTED])")
    }
}

impl PartialEq for AccessToken {
    fn eq(&self, other: &Self) -> bool {
        self.0.expose_secret() == other.0.expose_secret()
    }
}

impl Eq for AccessToken {}

impl From<String> for AccessToken {
    fn from(token: String) -> Self {
        Self::new(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authorization_header() {
        let token = AccessToken::new("T1");
        assert_eq!(token.authorization_header(), "Bearer T1");
    }

    #[test]
    fn test_debug_redacts() {
        let token = AccessToken::new("super-secret-jwt");
        let debug = format!("{token:?}");
        assert!(debug.contains("REDACTED"));
        assert!(!debug.contains("super-secret-jwt"));
    }

    #[test]
    fn test_blank() {
        assert!(AccessToken::new("  ").is_blank());
        assert!(!AccessToken::new("T1").is_blank());
    }
}
