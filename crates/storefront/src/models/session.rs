//! Client session state.

use rk_industry_core::AccessToken;

use super::UserRef;

/// The client's belief about who is signed in.
///
/// Identity and credential are stored together, so a credential without a
/// resolved identity (or the reverse) cannot be represented.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    signed_in: Option<(UserRef, AccessToken)>,
}

impl Session {
    /// An empty session.
    #[must_use]
    pub const fn anonymous() -> Self {
        Self { signed_in: None }
    }

    /// A session for a resolved identity and the credential that proved it.
    #[must_use]
    pub const fn authenticated(identity: UserRef, credential: AccessToken) -> Self {
        Self {
            signed_in: Some((identity, credential)),
        }
    }

    /// The signed-in user, if any.
    #[must_use]
    pub fn identity(&self) -> Option<&UserRef> {
        self.signed_in.as_ref().map(|(identity, _)| identity)
    }

    /// The bearer credential, if any.
    #[must_use]
    pub fn credential(&self) -> Option<&AccessToken> {
        self.signed_in.as_ref().map(|(_, credential)| credential)
    }

    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.signed_in.is_some()
    }
}

/// Keys used in persistent client storage.
pub mod keys {
    /// Key for the persisted bearer credential.
    pub const TOKEN: &str = "token";
}
